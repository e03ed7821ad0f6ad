//! # Storefront Errors
//!
//! `StorefrontError` for the session layer and the serializable `ApiError`
//! the presentation layer receives from commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Bazaar                                 │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  placeOrder(form)                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Form invalid? ─── CoreError::CheckoutRejected ─────┐            │  │
//! │  │         │                                           │            │  │
//! │  │         ▼                                           ▼            │  │
//! │  │  Submit failed? ── StorefrontError::Submission ── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "CHECKOUT_REJECTED"                                      │
//! │    // e.issues = [{ code: "PHONE_REQUIRED", message: "..." }]           │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bazaar_core::{CheckoutIssue, CoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::submit::SubmitError;

// =============================================================================
// Storefront Error
// =============================================================================

/// Result type for storefront operations.
pub type StorefrontResult<T> = Result<T, StorefrontError>;

#[derive(Debug, Error)]
pub enum StorefrontError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration parsed but failed validation.
    #[error("Invalid storefront configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// Catalog file could not be read.
    #[error("Failed to load catalog: {0}")]
    CatalogLoadFailed(String),

    // =========================================================================
    // Checkout Errors
    // =========================================================================
    /// The order submitter reported a failure.
    #[error("Order submission failed: {0}")]
    Submission(#[from] SubmitError),

    /// Business rule failure from bazaar-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<std::io::Error> for StorefrontError {
    fn from(err: std::io::Error) -> Self {
        StorefrontError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StorefrontError {
    fn from(err: toml::de::Error) -> Self {
        StorefrontError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StorefrontError {
    fn from(err: toml::ser::Error) -> Self {
        StorefrontError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// API Error
// =============================================================================

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "CHECKOUT_REJECTED",
///   "message": "Укажите номер телефона",
///   "issues": [{ "code": "PHONE_REQUIRED", "message": "Укажите номер телефона" }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field checkout problems; empty for every other error.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ApiIssue>,
}

/// One checkout problem, as shown next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApiIssue {
    pub code: String,
    pub message: String,
}

impl From<&CheckoutIssue> for ApiIssue {
    fn from(issue: &CheckoutIssue) -> Self {
        ApiIssue {
            code: issue.code().to_string(),
            message: issue.to_string(),
        }
    }
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Product, category or order id is unknown
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Product is sold out
    OutOfStock,

    /// Checkout form or cart failed validation (see `issues`)
    CheckoutRejected,

    /// A submission is already in flight
    AlreadySubmitting,

    /// The order submitter failed; the cart was kept
    SubmissionFailed,

    /// Configuration could not be loaded, saved or validated
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            issues: Vec::new(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::OutOfStock { name, .. } => {
                ApiError::new(ErrorCode::OutOfStock, format!("{} нет в наличии", name))
            }
            CoreError::InvalidCatalog(reason) => {
                tracing::error!("Catalog data invalid: {}", reason);
                ApiError::internal("Catalog unavailable")
            }
            CoreError::CheckoutRejected(rejection) => ApiError {
                code: ErrorCode::CheckoutRejected,
                message: rejection.to_string(),
                issues: rejection.issues.iter().map(ApiIssue::from).collect(),
            },
            CoreError::AlreadySubmitting => ApiError::new(
                ErrorCode::AlreadySubmitting,
                "Заказ уже оформляется",
            ),
            CoreError::NotSubmitting => {
                tracing::error!("Checkout completion without a submission in flight");
                ApiError::internal("Checkout state out of sync")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts storefront errors to API errors.
impl From<StorefrontError> for ApiError {
    fn from(err: StorefrontError) -> Self {
        match err {
            StorefrontError::Core(e) => e.into(),
            StorefrontError::Submission(e) => {
                tracing::warn!("Order submission failed: {}", e);
                ApiError::new(
                    ErrorCode::SubmissionFailed,
                    "Не удалось оформить заказ. Попробуйте ещё раз",
                )
            }
            StorefrontError::CatalogLoadFailed(reason) => {
                tracing::error!("Catalog load failed: {}", reason);
                ApiError::internal("Catalog unavailable")
            }
            other @ (StorefrontError::InvalidConfig(_)
            | StorefrontError::ConfigLoadFailed(_)
            | StorefrontError::ConfigSaveFailed(_)) => {
                ApiError::new(ErrorCode::ConfigError, other.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
