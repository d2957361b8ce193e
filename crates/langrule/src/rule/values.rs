//! Helpers for the comma-separated value lists stored in rule definitions.

/// Split a comma-separated list, trimming each element.
///
/// Empty elements are dropped, so `""` and `" , "` both yield an empty list.
///
/// ```
/// use langrule::sanitize_values;
///
/// assert_eq!(sanitize_values("2, 3,4"), vec!["2", "3", "4"]);
/// ```
pub fn sanitize_values(values: &str) -> Vec<String> {
    values
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Normalize a comma-separated list for display: `"2, 3,4"` becomes `"2, 3, 4"`.
pub fn humanize_values(values: &str) -> String {
    sanitize_values(values).join(", ")
}
