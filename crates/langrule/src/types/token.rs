/// An interpolation token in a translatable label, e.g. `{user_count}`.
///
/// Rule kinds decide whether they apply to a token by its declared
/// dependency or, failing that, by its suffix (`count` in `user_count`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    name: String,
    dependency: Option<String>,
}

impl Token {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependency: None,
        }
    }

    /// Declares the dependency axis explicitly, e.g. `{actor:gender}`.
    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependency = Some(dependency.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dependency(&self) -> Option<&str> {
        self.dependency.as_deref()
    }

    /// The text after the last underscore, or the whole name.
    pub fn suffix(&self) -> &str {
        self.name.rsplit('_').next().unwrap_or(&self.name)
    }
}
