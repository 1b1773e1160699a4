//! String formats recognised by string field constraints.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use validator::{ValidateEmail, ValidateUrl};

/// Indian mobile number, optionally prefixed with `+91` or `91`.
pub const PHONE_PATTERN: &str = r"^(\+91|91)?[6789]\d{9}$";

/// Six-digit Indian postal code.
pub const PINCODE_PATTERN: &str = r"^\d{6}$";

/// Five- or six-digit postal code used by the operational hospital record.
pub const ZIP_CODE_PATTERN: &str = r"^\d{5,6}$";

/// 24-hour `HH:mm` clock time.
pub const TIME_24H_PATTERN: &str = r"^([01]\d|2[0-3]):[0-5]\d$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));
static PINCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PINCODE_PATTERN).expect("valid regex"));
static ZIP_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ZIP_CODE_PATTERN).expect("valid regex"));
static TIME_24H_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TIME_24H_PATTERN).expect("valid regex"));

/// A named string shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StringFormat {
    Email,
    Url,
    Phone,
    Pincode,
    ZipCode,
    Time24h,
    /// Mixed-case letters, a digit and a special character.
    StrongPassword,
}

impl StringFormat {
    /// Whether `value` has this shape.
    pub fn matches(self, value: &str) -> bool {
        match self {
            Self::Email => value.to_owned().validate_email(),
            Self::Url => value.to_owned().validate_url(),
            Self::Phone => PHONE_RE.is_match(value),
            Self::Pincode => PINCODE_RE.is_match(value),
            Self::ZipCode => ZIP_CODE_RE.is_match(value),
            Self::Time24h => TIME_24H_RE.is_match(value),
            Self::StrongPassword => is_strong_password(value),
        }
    }

    /// Default message when a value does not have this shape.
    pub fn message(self) -> &'static str {
        match self {
            Self::Email => "Invalid email address",
            Self::Url => "Invalid URL",
            Self::Phone => "Invalid phone number",
            Self::Pincode => "Pincode must be 6 digits",
            Self::ZipCode => "Zip code must be 5 or 6 digits",
            Self::Time24h => "Time must be in HH:mm format",
            Self::StrongPassword => {
                "Password must contain at least one uppercase letter, one lowercase letter, one number and one special character"
            }
        }
    }
}

fn is_strong_password(value: &str) -> bool {
    value.chars().any(|c| c.is_lowercase())
        && value.chars().any(|c| c.is_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace())
}
