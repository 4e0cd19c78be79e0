use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::config::{MAX_PASSWORD_LENGTH, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH};
use crate::core::errors::{Error, Result};

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

fn username_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[^\s,]+$").expect("Regex should compile"))
}

/// Usernames are single tokens: no whitespace, no commas (they would break
/// the bootstrap CSV), at most `MAX_USERNAME_LENGTH` characters.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(Error::InvalidUsername("username is required".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(Error::InvalidUsername(format!(
            "username must be at most {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    if !username_regex().is_match(username) {
        return Err(Error::InvalidUsername(
            "username cannot contain spaces or commas".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<()> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
        return Err(Error::InvalidPassword(format!(
            "password must be {}-{} characters",
            MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}
