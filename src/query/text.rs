//! Text normalization shared by the filter, the classifier and the vocabulary.

/// Trims and lowercases; `None` becomes the empty string.
pub fn normalize(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_lowercase()
}

/// Keeps only ASCII digits.
pub fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
