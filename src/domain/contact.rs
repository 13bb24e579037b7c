//! Shared contact-field patterns.
//!
//! The address pattern accepts anything shaped `local@domain.tld`. The phone
//! pattern is deliberately loose: at least seven characters drawn from
//! digits, `+`, `-`, spaces and parentheses.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-\s()]{7,}$").expect("phone pattern compiles"));

pub(crate) fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

pub(crate) fn is_phone(value: &str) -> bool {
    PHONE.is_match(value)
}
