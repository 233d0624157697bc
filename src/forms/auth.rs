use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::profile::{NewProfile, NewProfileKind};
use crate::domain::types::{CompanyName, Email, FullName, Role, TypeConstraintError};
use crate::forms::invalid_fields;

/// Submitted values are echoed back on failure; the password never is.
#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginFormPayload {
    pub email: Email,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum LoginFormError {
    #[error("Login form validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Login form contains invalid data: {0}")]
    TypeConstraint(#[from] TypeConstraintError),
}

impl From<ValidationErrors> for LoginFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(invalid_fields(&value))
    }
}

impl TryFrom<LoginForm> for LoginFormPayload {
    type Error = LoginFormError;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            email: Email::new(value.email)?,
            password: value.password,
        })
    }
}

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct SignupForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    #[serde(skip_serializing)]
    pub password: String,
    #[validate(length(min = 1))]
    pub full_name: String,
    pub role: String,
    /// Required when `role` is `company`, ignored otherwise.
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignupFormPayload {
    pub password: String,
    pub profile: NewProfile,
}

#[derive(Debug, Error)]
pub enum SignupFormError {
    #[error("Signup form validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Signup form contains invalid data: {0}")]
    TypeConstraint(#[from] TypeConstraintError),
}

impl From<ValidationErrors> for SignupFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(invalid_fields(&value))
    }
}

impl TryFrom<SignupForm> for SignupFormPayload {
    type Error = SignupFormError;

    fn try_from(value: SignupForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let kind = match Role::try_from(value.role.as_str())? {
            Role::Influencer => NewProfileKind::Influencer,
            Role::Company => NewProfileKind::Company {
                company_name: CompanyName::new(value.company_name.unwrap_or_default())?,
            },
        };

        Ok(Self {
            password: value.password,
            profile: NewProfile {
                email: Email::new(value.email)?,
                full_name: FullName::new(value.full_name)?,
                kind,
            },
        })
    }
}
