use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Range;

use super::{Gender, Person};

/// Floats in this range convert to `i64` without saturating.
const I64_RANGE: Range<f64> = i64::MIN as f64..i64::MAX as f64;

/// A runtime value interpolated into a translated string and classified by
/// language rules.
///
/// # Example
///
/// ```
/// use langrule::{Person, Value};
///
/// let count: Value = 3.into();
/// let actor: Value = Person::female("Anna").into();
/// let list: Value = vec![Person::male("Ivan"), Person::female("Olga")].into();
///
/// assert_eq!(count.as_number(), Some(3));
/// assert_eq!(actor.to_string(), "Anna");
/// assert_eq!(list.as_list().map(<[Value]>::len), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer (counts, ages, durations).
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// Plain text.
    String(String),

    /// A person carrying a grammatical gender.
    Person(Person),

    /// A list of values, e.g. several users.
    List(Vec<Value>),
}

impl Value {
    /// Get this value as an integer.
    ///
    /// Floats with no fractional part and numeric strings also qualify, as
    /// long as they fit in an `i64`.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Float(f) if f.fract() == 0.0 && I64_RANGE.contains(f) => Some(*f as i64),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a person, if it is one.
    pub fn as_person(&self) -> Option<&Person> {
        match self {
            Value::Person(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// The gender of this value, if it has one.
    ///
    /// Strings naming a gender (`"female"`) are accepted so that plain
    /// gender codes can be passed without wrapping them in a [`Person`].
    pub fn gender(&self) -> Option<Gender> {
        match self {
            Value::Person(p) => Some(p.gender),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Person(p) => write!(f, "{p}"),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Number)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Person> for Value {
    fn from(p: Person) -> Self {
        Value::Person(p)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_floats_convert_to_numbers() {
        assert_eq!(Value::from(3.0).as_number(), Some(3));
        assert_eq!(Value::from(-2.0).as_number(), Some(-2));
        assert_eq!(Value::from(2.5).as_number(), None);
    }

    #[test]
    fn floats_outside_i64_are_not_numbers() {
        for f in [1e20, -1e20, 1e300, f64::INFINITY, f64::NAN, 9_223_372_036_854_775_808.0] {
            assert_eq!(Value::from(f).as_number(), None, "{f}");
        }
        assert_eq!(
            Value::from(-9_223_372_036_854_775_808.0).as_number(),
            Some(i64::MIN)
        );
    }

    #[test]
    fn large_usize_does_not_wrap() {
        assert_eq!(Value::from(42usize), Value::Number(42));
        if let Ok(huge) = usize::try_from(u64::MAX) {
            assert_eq!(Value::from(huge).as_number(), None);
        }
    }
}
