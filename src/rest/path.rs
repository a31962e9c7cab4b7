//! Path template handling for endpoint declarations.
//!
//! Templates use `{name}` placeholders, e.g.
//! `/accounts/{account_id}/phone_calls`. Values are percent-encoded as they are
//! substituted so an argument can never inject extra path segments.
//!
//! # Example
//!
//! ```rust
//! use ringplus::rest::{build_path, placeholders};
//! use std::collections::HashMap;
//!
//! let template = "/voicemail_boxes/{voicemail_box_id}/voicemail_messages";
//! assert_eq!(placeholders(template), vec!["voicemail_box_id"]);
//!
//! let mut values = HashMap::new();
//! values.insert("voicemail_box_id", "7");
//! let path = build_path(template, &values).unwrap();
//! assert_eq!(path, "/voicemail_boxes/7/voicemail_messages");
//! ```

use std::collections::HashMap;
use std::fmt::Display;

use crate::rest::errors::ArgumentError;

/// Returns the placeholder names of a template, in order of appearance.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        let name = &after[..end];
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
        rest = &after[end + 1..];
    }
    names
}

/// Builds a path from a template by substituting every placeholder.
///
/// # Errors
///
/// Returns [`ArgumentError::Missing`] naming the first placeholder that has no
/// value.
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(
    template: &'static str,
    values: &HashMap<&str, V>,
) -> Result<String, ArgumentError> {
    let mut result = template.to_string();

    for name in placeholders(template) {
        let value = values.get(name).ok_or_else(|| ArgumentError::Missing {
            endpoint: template,
            name: name.to_string(),
        })?;
        let placeholder = format!("{{{name}}}");
        result = result.replace(&placeholder, &urlencoding::encode(&value.to_string()));
    }

    Ok(result)
}
