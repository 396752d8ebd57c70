//! Named pattern registry.
//!
//! Sources are stored unanchored and compiled wrapped in `^(?:...)$` so a
//! pattern always matches the whole value, never a substring. The `number`
//! pattern deliberately matches the empty string: emptiness is the required
//! rule's business, not the pattern's.

use std::collections::HashMap;

use regex::Regex;

use crate::error::ConfigError;

/// Built-in pattern sources, by name.
pub const BUILTIN: &[(&str, &str)] = &[
    ("alpha", r"[a-zA-Z]+"),
    ("alpha_numeric", r"[a-zA-Z0-9]+"),
    ("integer", r"[-+]?\d+"),
    ("number", r"[-+]?\d*(?:[\.,]\d+)?"),
    (
        "email",
        r"[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*",
    ),
    ("url", r"(?:https?|ftp|file|ssh)://[^\s/$.?#][^\s]*"),
    (
        "domain",
        r"(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,8}",
    ),
    (
        "datetime",
        r"[0-2][0-9]{3}-[0-1][0-9]-[0-3][0-9]T[0-5][0-9]:[0-5][0-9]:[0-5][0-9](?:Z|[-+](?:0[0-9]|1[0-4]):[0-5][0-9])",
    ),
    // Month/day combinations are enumerated so February never gets a 30th.
    (
        "date",
        r"(?:19|20)[0-9]{2}-(?:(?:0[1-9]|1[0-2])-(?:0[1-9]|1[0-9]|2[0-9])|(?:0[13-9]|1[0-2])-30|(?:0[13578]|1[02])-31)",
    ),
    ("time", r"(?:[01][0-9]|2[0-3])(?::[0-5][0-9]){2}"),
    ("dateISO", r"\d{4}[/\-]\d{1,2}[/\-]\d{1,2}"),
    (
        "month_day_year",
        r"(?:0[1-9]|1[012])[- /.](?:0[1-9]|[12][0-9]|3[01])[- /.]\d{4}",
    ),
    (
        "day_month_year",
        r"(?:0[1-9]|[12][0-9]|3[01])[- /.](?:0[1-9]|1[012])[- /.]\d{4}",
    ),
    ("color", r"#?(?:[a-fA-F0-9]{6}|[a-fA-F0-9]{3})"),
];

/// Compile a pattern source anchored for full-value matching.
pub fn compile(source: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{source})$"))
}

/// Build the merged pattern registry: built-ins plus user-supplied sources.
/// User entries may add new names or shadow built-ins.
pub fn registry(extra: &HashMap<String, String>) -> Result<HashMap<String, Regex>, ConfigError> {
    let mut patterns = HashMap::with_capacity(BUILTIN.len() + extra.len());
    for (name, source) in BUILTIN {
        // Built-in sources are known-good; a compile failure here is a bug.
        let regex = compile(source).map_err(|e| ConfigError::InvalidPattern {
            name: (*name).to_string(),
            source_error: e.to_string(),
        })?;
        patterns.insert((*name).to_string(), regex);
    }
    for (name, source) in extra {
        let regex = compile(source).map_err(|e| ConfigError::InvalidPattern {
            name: name.clone(),
            source_error: e.to_string(),
        })?;
        patterns.insert(name.clone(), regex);
    }
    Ok(patterns)
}
