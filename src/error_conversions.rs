//! Error conversion glue between layers.
//!
//! The domain layer does not depend on repository or service error types, so
//! the `From` impls connecting them live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod service {
    use crate::domain::access::AccessError;
    use crate::domain::types::TypeConstraintError;
    use crate::forms::applications::{ApplicationStatusFormError, ApplyFormError};
    use crate::forms::auth::{LoginFormError, SignupFormError};
    use crate::forms::campaigns::{CampaignStatusFormError, CreateCampaignFormError};
    use crate::forms::profiles::{CompanyProfileFormError, InfluencerProfileFormError};
    use crate::services::errors::{ServiceError, UserMessage};

    /// Catalog key naming a form field, e.g. `full name` → `fields.full_name`.
    fn field_key(field: &str) -> String {
        format!("fields.{}", field.replace(' ', "_"))
    }

    impl From<TypeConstraintError> for UserMessage {
        fn from(val: TypeConstraintError) -> Self {
            let (key, field) = match val {
                TypeConstraintError::NonPositiveId(field) => ("errors.non_positive_id", field),
                TypeConstraintError::NegativeNumber(field) => ("errors.negative_number", field),
                TypeConstraintError::EmptyString(field) => ("errors.empty_field", field),
                TypeConstraintError::InvalidUrl(field) => ("errors.invalid_url", field),
                TypeConstraintError::InvalidEmail(field) => ("errors.invalid_email", field),
                TypeConstraintError::InvertedBudget => {
                    return UserMessage::new("errors.inverted_budget");
                }
                TypeConstraintError::InvalidValue(value) => {
                    log::debug!("Rejected value: {value}");
                    return UserMessage::new("errors.invalid_value");
                }
            };
            UserMessage::new(key).with_arg("field", [field_key(field)])
        }
    }

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.into())
        }
    }

    impl From<AccessError> for ServiceError {
        fn from(val: AccessError) -> Self {
            let message = match &val {
                AccessError::CampaignNotActive => UserMessage::new("errors.campaign_not_active"),
                AccessError::AlreadyApplied => UserMessage::new("errors.already_applied"),
                AccessError::AlreadyDecided(status) => UserMessage::new("errors.already_decided")
                    .with_arg("status", [format!("status.{status}")]),
                AccessError::InvalidCampaignTransition(from, to) => {
                    UserMessage::new("errors.invalid_transition")
                        .with_arg("from", [format!("status.{from}")])
                        .with_arg("to", [format!("status.{to}")])
                }
                _ => return ServiceError::Forbidden(val.to_string()),
            };
            ServiceError::Conflict(message)
        }
    }

    fn invalid_fields(fields: &[String]) -> UserMessage {
        UserMessage::new("errors.invalid_fields")
            .with_arg("fields", fields.iter().map(|field| field_key(field)))
    }

    macro_rules! form_error_into_service_error {
        ($($error:ident),+ $(,)?) => {
            $(
                impl From<$error> for ServiceError {
                    fn from(val: $error) -> Self {
                        match val {
                            $error::Validation(fields) => {
                                ServiceError::Form(invalid_fields(&fields))
                            }
                            $error::TypeConstraint(err) => ServiceError::Form(err.into()),
                        }
                    }
                }
            )+
        };
    }

    form_error_into_service_error!(
        LoginFormError,
        SignupFormError,
        CreateCampaignFormError,
        CampaignStatusFormError,
        ApplyFormError,
        ApplicationStatusFormError,
        InfluencerProfileFormError,
        CompanyProfileFormError,
    );

}
