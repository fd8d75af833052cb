//! The module contains the errors the engine can throw.
//!
//! Validation errors ([`InvalidAmount`], [`InvalidDescription`],
//! [`InvalidConfiguration`], [`OnboardingRequired`]) are synchronous input
//! rejections: state is left untouched and the caller re-prompts the user.
//! [`Store`] wraps a failure of the key-value store; the session recovers
//! from those locally and never surfaces them.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDescription`]: EngineError::InvalidDescription
//!  [`InvalidConfiguration`]: EngineError::InvalidConfiguration
//!  [`OnboardingRequired`]: EngineError::OnboardingRequired
//!  [`Store`]: EngineError::Store
use thiserror::Error;

use crate::store::StoreError;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("invalid description: {0}")]
    InvalidDescription(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("onboarding required: {0}")]
    OnboardingRequired(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Returns `true` for pure input rejections, `false` for store failures.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDescription(a), Self::InvalidDescription(b)) => a == b,
            (Self::InvalidConfiguration(a), Self::InvalidConfiguration(b)) => a == b,
            (Self::OnboardingRequired(a), Self::OnboardingRequired(b)) => a == b,
            (Self::Store(a), Self::Store(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
