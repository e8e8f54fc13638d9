//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidField`] thrown when a supplied value breaks a field rule.
//! - [`NotFound`] thrown when no record exists for the caller.
//!
//!  [`InvalidField`]: EngineError::InvalidField
//!  [`NotFound`]: EngineError::NotFound
use sea_orm::DbErr;
use thiserror::Error;

use crate::habits::Channel;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("{0} content is not allowed for this habit")]
    ContentNotAllowed(Channel),
    #[error("{0} content is required for this habit")]
    ContentRequired(Channel),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("an entry already exists for this date")]
    DuplicateEntryDate,
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::InvalidField {
                    field: a,
                    reason: a_reason,
                },
                Self::InvalidField {
                    field: b,
                    reason: b_reason,
                },
            ) => a == b && a_reason == b_reason,
            (Self::MissingField(a), Self::MissingField(b)) => a == b,
            (Self::ContentNotAllowed(a), Self::ContentNotAllowed(b)) => a == b,
            (Self::ContentRequired(a), Self::ContentRequired(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::DuplicateEntryDate, Self::DuplicateEntryDate) => true,
            (Self::EmailTaken, Self::EmailTaken) => true,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
