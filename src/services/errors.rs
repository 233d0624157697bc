use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::domain::types::Locale;
use crate::i18n::Catalog;

/// Text shown to the user when an action fails: a catalog key plus named
/// arguments whose values are catalog keys as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    key: &'static str,
    args: Vec<(&'static str, Vec<String>)>,
}

impl UserMessage {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: Vec::new(),
        }
    }

    /// Fills `{name}` with the translations of `keys`, comma separated.
    pub fn with_arg<I, S>(mut self, name: &'static str, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args
            .push((name, keys.into_iter().map(Into::into).collect()));
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn render(&self, catalog: &Catalog, locale: Locale) -> String {
        let mut text = catalog.translate(locale, self.key);
        for (name, keys) in &self.args {
            let value = keys
                .iter()
                .map(|key| catalog.translate(locale, key))
                .collect::<Vec<_>>()
                .join(", ");
            text = text.replace(&format!("{{{name}}}"), &value);
        }
        text
    }
}

impl Display for UserMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)?;
        for (name, keys) in &self.args {
            write!(f, " {name}=[{}]", keys.join(", "))?;
        }
        Ok(())
    }
}

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// No session, or the session does not resolve to a profile.
    #[error("unauthorized")]
    Unauthorized,
    /// The actor's role or ownership does not permit the action.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// The target is not in a state that allows the action.
    #[error("conflict: {0}")]
    Conflict(UserMessage),
    /// Submitted form data failed validation.
    #[error("invalid form: {0}")]
    Form(UserMessage),
    /// A value could not be converted into a domain type.
    #[error("invalid value: {0}")]
    TypeConstraint(UserMessage),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

impl ServiceError {
    /// Message for the failures a user can correct by changing the input or
    /// retrying. `None` for errors that redirect elsewhere.
    pub fn user_message(&self) -> Option<UserMessage> {
        match self {
            Self::Conflict(message) | Self::Form(message) | Self::TypeConstraint(message) => {
                Some(message.clone())
            }
            Self::NotFound => Some(UserMessage::new("flash.not_found")),
            Self::Internal => Some(UserMessage::new("flash.generic_error")),
            Self::Unauthorized | Self::Forbidden(_) => None,
        }
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
