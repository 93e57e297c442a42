//! String validation functions

use anyhow::{anyhow, bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

// Email validation regex
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

// Compiled `regex[..]` patterns, keyed by pattern text. Invalid patterns are never stored.
static PATTERN_CACHE: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(Default::default);

fn compiled(pattern: &str) -> Result<Regex> {
    let mut cache = PATTERN_CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(re) = cache.get(pattern) {
        return Ok(re.clone());
    }

    let re = Regex::new(pattern).with_context(|| format!("invalid pattern {:?}", pattern))?;
    cache.insert(pattern.to_string(), re.clone());
    Ok(re)
}

/// Validates that `s` matches `pattern`.
///
/// Each distinct pattern is compiled once and reused across calls.
pub fn validate_pattern(s: &str, pattern: &str) -> Result<()> {
    if !compiled(pattern)?.is_match(s) {
        bail!("must match pattern {:?}", pattern);
    }
    Ok(())
}

pub fn validate_email(s: &str) -> Result<()> {
    if EMAIL_REGEX.is_match(s) {
        Ok(())
    } else {
        Err(anyhow!("{:?} is not a valid email address", s))
    }
}
