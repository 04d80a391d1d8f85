//! Wire-name conversion.
//!
//! Payload keys arrive in camelCase; accessor keys follow Rust's
//! snake_case. Both directions are pure lexical transforms and mutually
//! inverse for conventional names, so bound state can serialize back under
//! its original wire keys.

/// Converts a camelCase wire name to its snake_case accessor form.
pub fn snakify(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for character in name.chars() {
        if character.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(character.to_ascii_lowercase());
        } else {
            out.push(character);
        }
    }
    out
}

/// Converts a snake_case accessor name back to its camelCase wire form.
pub fn camelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for character in name.chars() {
        if character == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(character.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(character);
        }
    }
    out
}
