//! Input rules checked by the services before touching a repository.
//!
//! Each check returns the exact message the caller sees in the envelope.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{MIN_NAME_LENGTH, MIN_SEARCH_TERM_LENGTH};
use crate::errors::{AppError, AppResult};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub fn email(value: &str) -> AppResult<()> {
    if EMAIL_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(AppError::validation("Invalid email format"))
    }
}

pub fn user_name(value: &str) -> AppResult<()> {
    if has_min_length(value, MIN_NAME_LENGTH) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Name must be at least {} characters long",
            MIN_NAME_LENGTH
        )))
    }
}

pub fn product_name(value: &str) -> AppResult<()> {
    if has_min_length(value, MIN_NAME_LENGTH) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Product name must be at least {} characters long",
            MIN_NAME_LENGTH
        )))
    }
}

pub fn price(value: f64) -> AppResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(AppError::validation("Price must be greater than 0"))
    }
}

pub fn stock(value: i64) -> AppResult<()> {
    if value >= 0 {
        Ok(())
    } else {
        Err(AppError::validation("Stock must be a non-negative number"))
    }
}

/// Trim a search term, rejecting it when too short
pub fn search_term(value: &str) -> AppResult<&str> {
    let term = value.trim();
    if term.chars().count() >= MIN_SEARCH_TERM_LENGTH {
        Ok(term)
    } else {
        Err(AppError::validation(format!(
            "Search term must be at least {} characters long",
            MIN_SEARCH_TERM_LENGTH
        )))
    }
}

/// Inclusive range with `0 <= min <= max`
pub fn price_range(min: f64, max: f64) -> AppResult<()> {
    if min >= 0.0 && max >= 0.0 && min <= max {
        Ok(())
    } else {
        Err(AppError::validation("Invalid price range"))
    }
}

pub fn threshold(value: i64) -> AppResult<()> {
    if value >= 0 {
        Ok(())
    } else {
        Err(AppError::validation("Threshold must be a non-negative number"))
    }
}

fn has_min_length(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}
