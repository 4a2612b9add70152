//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (non-empty identifiers, known
//! duration labels, ordered availability windows) so that once a value reaches
//! the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Duration label is not one of the offered options.
    #[error("unknown duration: {0}")]
    UnknownDuration(String),
    /// Itinerary item type is not one of the offered kinds.
    #[error("unknown itinerary item type: {0}")]
    UnknownItemType(String),
    /// Availability window starts after it ends.
    #[error("availability window starts after it ends")]
    InvertedWindow,
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(
    TourId,
    "Stable tour identifier shared with the remote API (UUID v4 for tours created here)."
);

non_empty_string_newtype!(GuideId, "Identifier of a tour guide.");

impl TourId {
    /// Generates a fresh identifier for a tour that does not exist remotely yet.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Durations offered by the itinerary editor.
pub const DURATION_OPTIONS: [&str; 3] = ["2 Days 1 Night", "3 Days 2 Nights", "4 Days 3 Nights"];

/// Parses the leading integer token of a duration label ("3 Days 2 Nights" -> 3).
///
/// Labels without a leading integer yield zero days.
fn leading_day_count(label: &str) -> usize {
    label
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<usize>().ok())
        .unwrap_or(0)
}

/// Duration label restricted to [`DURATION_OPTIONS`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct DurationLabel(String);

impl DurationLabel {
    /// Accepts one of the offered duration labels.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        let trimmed = value.trim();
        if DURATION_OPTIONS.contains(&trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(TypeConstraintError::UnknownDuration(value))
        }
    }

    /// Number of days encoded by the label.
    pub fn day_count(&self) -> usize {
        leading_day_count(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DurationLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DurationLabel {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DurationLabel> for String {
    fn from(value: DurationLabel) -> Self {
        value.0
    }
}

/// Kind of an itinerary entry.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ItemType {
    Accommodation,
    Transportation,
    Activities,
    Meals,
}

impl ItemType {
    pub const ALL: [ItemType; 4] = [
        ItemType::Accommodation,
        ItemType::Transportation,
        ItemType::Activities,
        ItemType::Meals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Accommodation => "Accommodation",
            ItemType::Transportation => "Transportation",
            ItemType::Activities => "Activities",
            ItemType::Meals => "Meals",
        }
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| TypeConstraintError::UnknownItemType(s.to_string()))
    }
}

/// Date fields arrive either as plain dates or as full RFC 3339 timestamps.
pub mod lenient_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(value)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_some(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse(value)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {value}"))),
        }
    }
}
