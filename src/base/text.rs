//! Title text normalization.
//!
//! The host keeps titles in two interchangeable forms: the db key
//! (underscores, first letter capitalized) and the display text (spaces).

/// Uppercase the first character, leaving the rest untouched.
pub fn ucfirst(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalize display text to the underscored db-key form.
pub fn to_db_key(text: &str) -> String {
    ucfirst(text.trim()).split_whitespace().collect::<Vec<_>>().join("_")
}

/// Convert a db key back to display text with spaces.
pub fn to_display_text(key: &str) -> String {
    key.replace('_', " ")
}
