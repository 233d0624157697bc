//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers, text values, budgets and the closed role/status sets are
//! enforced at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::{ValidateEmail, ValidateUrl};

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be non-negative was negative or invalid.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// Email validation failed.
    #[error("{0} must be a valid email address")]
    InvalidEmail(&'static str),
    /// Minimum budget exceeds the maximum.
    #[error("minimum budget cannot exceed maximum budget")]
    InvertedBudget,
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Trims an optional text input, mapping blank values to `None`.
pub fn optional_text<S: Into<String>>(value: Option<S>) -> Option<String> {
    value
        .map(|v| v.into().trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

/// Shared accessor and conversion impls for string-backed newtypes.
macro_rules! string_newtype_impls {
    ($name:ident) => {
        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
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

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }
        }

        string_newtype_impls!($name);
    };
}

macro_rules! url_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed URL and validates its format.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if !trimmed.as_str().validate_url() {
                    return Err(TypeConstraintError::InvalidUrl($field));
                }
                Ok(Self(trimmed))
            }
        }

        string_newtype_impls!($name);
    };
}

id_newtype!(ProfileId, "Identifier shared by a user account and its profile.", "profile_id");
id_newtype!(CampaignId, "Unique identifier for a campaign.", "campaign_id");
id_newtype!(
    ApplicationId,
    "Unique identifier for an application.",
    "application_id"
);
id_newtype!(
    CategoryId,
    "Unique identifier for a category.",
    "category_id"
);

non_empty_string_newtype!(FullName, "Display name of a profile owner.", "full name");
non_empty_string_newtype!(
    CompanyName,
    "Company name, required for company profiles.",
    "company name"
);
non_empty_string_newtype!(CampaignTitle, "Campaign title.", "title");
non_empty_string_newtype!(
    CampaignDescription,
    "Campaign description.",
    "description"
);
non_empty_string_newtype!(
    CampaignRequirements,
    "Requirements an influencer must meet.",
    "requirements"
);
non_empty_string_newtype!(Pitch, "Influencer pitch attached to an application.", "pitch");
non_empty_string_newtype!(CategoryName, "Category display name.", "category");

url_string_newtype!(WebUrl, "Website or social profile URL.", "url");

/// Lower-cased, validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Trims, lower-cases and validates an email address.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "email")?.to_lowercase();
        if !trimmed.as_str().validate_email() {
            return Err(TypeConstraintError::InvalidEmail("email"));
        }
        Ok(Self(trimmed))
    }
}

string_newtype_impls!(Email);

/// Whole-dollar budget amount.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct BudgetAmount(i64);

impl BudgetAmount {
    /// Constructs an amount that must be zero or greater.
    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if value >= 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("budget"))
        }
    }

    /// Returns the raw amount.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for BudgetAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for BudgetAmount {
    type Error = TypeConstraintError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Audience size of an influencer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct FollowerCount(i32);

impl FollowerCount {
    /// Constructs a follower count that must be zero or greater.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value >= 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("followers count"))
        }
    }

    /// Returns the raw count.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for FollowerCount {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Engagement rate in percent.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct EngagementRate(f64);

impl EngagementRate {
    /// Constructs a finite rate that is zero or greater.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("engagement rate"))
        }
    }

    /// Returns the raw rate.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for EngagementRate {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Generates a closed string-backed enum with persistence helpers.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal, { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// String representation used in persistence and URLs.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                match value.trim() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(TypeConstraintError::InvalidValue(format!(
                        "{}: {other}",
                        $field
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::try_from(value.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

string_enum!(
    /// Marketplace side a profile belongs to. Fixed at signup.
    Role, "role", {
        Influencer => "influencer",
        Company => "company",
    }
);

string_enum!(
    /// Lifecycle state of a campaign.
    CampaignStatus, "campaign status", {
        Active => "active",
        Paused => "paused",
        Completed => "completed",
    }
);

string_enum!(
    /// Lifecycle state of an application.
    ApplicationStatus, "application status", {
        Pending => "pending",
        Accepted => "accepted",
        Rejected => "rejected",
    }
);

string_enum!(
    /// Supported UI languages. Danish is the default.
    Locale, "locale", {
        En => "en",
        Da => "da",
    }
);

impl Default for Locale {
    fn default() -> Self {
        Self::Da
    }
}

impl Locale {
    /// All supported locales in display order.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Da];

    /// Native name shown in the language switcher.
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Da => "Dansk",
        }
    }
}

impl CampaignStatus {
    /// Whether the campaign state machine allows moving to `next`.
    ///
    /// `active ⇄ paused`, and either may move to the terminal `completed`.
    pub const fn can_transition_to(self, next: CampaignStatus) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Paused)
                | (Self::Paused, Self::Active)
                | (Self::Active, Self::Completed)
                | (Self::Paused, Self::Completed)
        )
    }

    /// Only active campaigns accept applications.
    pub const fn accepts_applications(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl ApplicationStatus {
    /// `accepted` and `rejected` have no outgoing transitions.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Company decision on a pending application.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationDecision {
    Accept,
    Reject,
}

impl ApplicationDecision {
    /// Status written when the decision is applied.
    pub const fn resulting_status(self) -> ApplicationStatus {
        match self {
            Self::Accept => ApplicationStatus::Accepted,
            Self::Reject => ApplicationStatus::Rejected,
        }
    }
}

impl TryFrom<&str> for ApplicationDecision {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "accepted" | "accept" => Ok(Self::Accept),
            "rejected" | "reject" => Ok(Self::Reject),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "application decision: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_non_empty_strings() {
        let value = FullName::new("  Sophia Chen  ").unwrap();
        assert_eq!(value.as_str(), "Sophia Chen");
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = CampaignId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("campaign_id"));
    }

    #[test]
    fn validates_urls() {
        assert!(WebUrl::new("https://instagram.com/sophiachen_style").is_ok());
        let err = WebUrl::new("not-a-url").unwrap_err();
        assert_eq!(err, TypeConstraintError::InvalidUrl("url"));
    }

    #[test]
    fn normalizes_email() {
        let email = Email::new(" Chef.David@Email.com ").unwrap();
        assert_eq!(email.as_str(), "chef.david@email.com");
        assert_eq!(
            Email::new("nope").unwrap_err(),
            TypeConstraintError::InvalidEmail("email")
        );
    }

    #[test]
    fn role_accepts_exactly_two_values() {
        assert_eq!(Role::try_from("influencer").unwrap(), Role::Influencer);
        assert_eq!(Role::try_from("company").unwrap(), Role::Company);
        assert!(Role::try_from("admin").is_err());
        assert!(Role::try_from("").is_err());
    }

    #[test]
    fn campaign_status_machine() {
        use CampaignStatus::*;
        assert!(Active.can_transition_to(Paused));
        assert!(Paused.can_transition_to(Active));
        assert!(Active.can_transition_to(Completed));
        assert!(Paused.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Active));
        assert!(!Completed.can_transition_to(Paused));
        assert!(!Active.can_transition_to(Active));
    }

    #[test]
    fn application_terminal_states() {
        assert!(!ApplicationStatus::Pending.is_terminal());
        assert!(ApplicationStatus::Accepted.is_terminal());
        assert!(ApplicationStatus::Rejected.is_terminal());
    }

    #[test]
    fn decision_parses_status_words() {
        assert_eq!(
            ApplicationDecision::try_from("accepted").unwrap(),
            ApplicationDecision::Accept
        );
        assert_eq!(
            ApplicationDecision::try_from("reject").unwrap(),
            ApplicationDecision::Reject
        );
        assert!(ApplicationDecision::try_from("pending").is_err());
    }

    #[test]
    fn budget_rejects_negative_numbers() {
        assert_eq!(
            BudgetAmount::new(-1).unwrap_err(),
            TypeConstraintError::NegativeNumber("budget")
        );
        assert_eq!(BudgetAmount::new(0).unwrap().get(), 0);
    }

    #[test]
    fn unknown_locale_is_rejected() {
        assert_eq!(Locale::try_from("en").unwrap(), Locale::En);
        assert!(Locale::try_from("fr").is_err());
        assert_eq!(Locale::default(), Locale::Da);
    }
}
