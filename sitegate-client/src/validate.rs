//! Local field checks, run before any network activity.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ContactFields;

// Basic local@domain.tld shape; the mail provider does the real vetting.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

const MIN_NAME_LEN: usize = 2;
const MIN_MESSAGE_LEN: usize = 10;

pub fn validate(fields: &ContactFields) -> Result<(), String> {
    if fields.name.trim().chars().count() < MIN_NAME_LEN {
        return Err("Please enter your full name.".to_string());
    }
    if !EMAIL_RE.is_match(fields.email.trim()) {
        return Err("Please enter a valid email address.".to_string());
    }
    if fields.message.trim().chars().count() < MIN_MESSAGE_LEN {
        return Err(
            "Please tell us a bit more about your project (at least 10 characters).".to_string(),
        );
    }
    Ok(())
}
