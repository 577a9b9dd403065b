// SPDX-License-Identifier: MIT

//! Typed failure reasons for tool invocations.
//!
//! Clients and normalizers return these instead of pre-rendered error text,
//! so internal layers stay testable without string-matching on messages.
//! The dispatcher collapses them into user-presentable replies.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    /// Malformed free-text query or bad structured field, detected before
    /// any network call. The message is a short instruction to the user.
    #[error("{0}")]
    InvalidInput(String),

    /// A required credential for this capability is absent. Names the
    /// capability, never the credential variable.
    #[error("{capability} is not configured")]
    NotConfigured { capability: String },

    /// The upstream service answered with a non-success indicator or an
    /// unusable payload.
    #[error("upstream error from {service}: {message}")]
    Upstream { service: String, message: String },

    /// Network-level failures
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Malformed upstream JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LookupError {
    /// Create an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a not-configured error
    pub fn not_configured(capability: impl Into<String>) -> Self {
        Self::NotConfigured {
            capability: capability.into(),
        }
    }

    /// Create an upstream error
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }
}
