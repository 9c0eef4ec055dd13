//! Scalar value objects for student records.
//!
//! # Responsibility
//! - Wrap raw strings in types that can only hold valid values.
//! - Normalize input by trimming surrounding whitespace, nothing else.
//!
//! # Invariants
//! - `as_str()` always returns a value for which `is_valid` holds.
//! - Deserialization goes through the same validation as construction.

use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:alnum:]][[:alnum:] ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone regex"));
static EMAIL_LOCAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[[:alnum:]]([[:alnum:]+_.\-]*[[:alnum:]])?$").expect("valid email local regex")
});
static EMAIL_DOMAIN_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[[:alnum:]]+(-[[:alnum:]]+)*$").expect("valid email domain regex")
});
static SUBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:alnum:]]+$").expect("valid subject regex"));

/// Declares a trimmed, validated string wrapper.
macro_rules! string_value {
    ($(#[$meta:meta])* $ty:ident, field = $field:literal, constraint = $constraint:expr, check = $check:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $ty(String);

        impl $ty {
            /// Human-readable constraint shown when validation fails.
            pub const MESSAGE_CONSTRAINTS: &'static str = $constraint;

            /// Trims and validates `value`.
            pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
                let trimmed = value.as_ref().trim();
                if !Self::is_valid(trimmed) {
                    return Err(ValidationError::new($field, trimmed, Self::MESSAGE_CONSTRAINTS));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns whether `value` is acceptable as-is (no trimming applied).
            pub fn is_valid(value: &str) -> bool {
                $check(value)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }
    };
}

string_value!(
    /// Student or guardian name.
    Name,
    field = "name",
    constraint = "Names should only contain alphanumeric characters and spaces, and it should not be blank",
    check = is_valid_name
);

string_value!(
    /// Student or guardian phone number.
    Phone,
    field = "phone",
    constraint = "Phone numbers should only contain numbers, and it should be at least 3 digits long",
    check = is_valid_phone
);

string_value!(
    /// Contact email.
    Email,
    field = "email",
    constraint = "Emails should be of the format local-part@domain; the local-part contains alphanumerics \
                  and +_.- (not at the start or end), and the domain is made of labels separated by periods, \
                  ending with a label at least 2 characters long",
    check = is_valid_email
);

string_value!(
    /// Home address; free text.
    Address,
    field = "address",
    constraint = "Addresses can take any values, and it should not be blank",
    check = is_not_blank
);

string_value!(
    /// School the student attends.
    School,
    field = "school",
    constraint = "School names should only contain alphanumeric characters and spaces, and it should not be blank",
    check = is_valid_name
);

string_value!(
    /// Subject taught to a student; one alphanumeric word.
    Subject,
    field = "subject",
    constraint = "Subject names should be a single alphanumeric word",
    check = is_valid_subject
);

fn is_valid_name(value: &str) -> bool {
    NAME_RE.is_match(value)
}

fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

fn is_not_blank(value: &str) -> bool {
    !value.trim().is_empty() && value.trim() == value
}

fn is_valid_subject(value: &str) -> bool {
    SUBJECT_RE.is_match(value)
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if !EMAIL_LOCAL_RE.is_match(local) {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let Some(last) = labels.last() else {
        return false;
    };
    last.chars().count() >= 2 && labels.iter().all(|label| EMAIL_DOMAIN_LABEL_RE.is_match(label))
}
