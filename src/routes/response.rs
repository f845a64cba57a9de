//! Plain-text pages shown to someone who followed a confirmation link.

use std::any::Any;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::domain::MissingParameter;
use crate::store::StoreError;

pub const PLAIN_TEXT_UTF8: &str = "text/plain; charset=utf-8";

fn plain_text(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, PLAIN_TEXT_UTF8)], body).into_response()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    PermissionConfirmed,
    AlreadyConfirmed,
    SignupConfirmed,
}

impl Confirmation {
    pub fn message(self) -> &'static str {
        match self {
            Self::PermissionConfirmed => "✅ Permission confirmed successfully",
            Self::AlreadyConfirmed => "ℹ Already confirmed",
            Self::SignupConfirmed => {
                "✅ Confirmed successfully, The system is now available for use."
            }
        }
    }
}

impl IntoResponse for Confirmation {
    fn into_response(self) -> Response {
        plain_text(StatusCode::OK, self.message().to_string())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfirmError {
    #[error("Invalid link ({0})")]
    InvalidLink(#[from] MissingParameter),
    #[error("Invitation not found")]
    InvitationNotFound,
    #[error("Could not confirm invitation: {0}")]
    Rejected(String),
    #[error("Email confirmation failed ({code}){}", describe(.description))]
    SignupFailed {
        code: String,
        description: Option<String>,
    },
    #[error("Unexpected error: {0}")]
    Store(#[from] StoreError),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

fn describe(description: &Option<String>) -> String {
    description
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

impl ConfirmError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidLink(_) | Self::Rejected(_) | Self::SignupFailed { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::InvitationNotFound => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ConfirmError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error.cause_chain = ?self, error.message = %self, "Confirmation failed");
        } else {
            tracing::warn!(error.message = %self, "Confirmation refused");
        }
        plain_text(status, format!("❌ {self}"))
    }
}

/// Turns a handler panic into the same page as any other unexpected error.
pub fn unexpected_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    ConfirmError::Unexpected(details).into_response()
}
