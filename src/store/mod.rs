//! Access to the external data store holding invitations and memberships.
//!
//! Handlers only ever see [`ConfirmationStore`], so the REST client can be
//! swapped for an in-memory double in tests.

mod rest;

pub use rest::RestStore;

use crate::domain::{
    AcceptResult, InviteToken, InvitationRecord, MembershipRecord, NewMembership, PermissionLogId,
};
use async_trait::async_trait;
use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("failed to reach the data store: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("data store responded with {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected data store payload: {0}")]
    Decode(String),
    #[error("data store unavailable: {0}")]
    Unavailable(String),
}

/// What happened to a membership insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The store already holds a membership for this (email, location) pair.
    AlreadyExists,
}

#[async_trait]
pub trait ConfirmationStore: Send + Sync {
    /// Look up an invitation; `Ok(None)` when the store has no such entry.
    async fn fetch_invitation(
        &self,
        id: &PermissionLogId,
    ) -> Result<Option<InvitationRecord>, StoreError>;

    async fn find_membership(
        &self,
        member_email: &str,
        location_id: &Value,
    ) -> Result<Option<MembershipRecord>, StoreError>;

    /// Insert a membership. A uniqueness conflict is reported as
    /// [`InsertOutcome::AlreadyExists`], not as an error.
    async fn insert_membership(
        &self,
        membership: &NewMembership,
    ) -> Result<InsertOutcome, StoreError>;

    /// Run the store-side accept-invite procedure for `token`.
    async fn accept_invite(&self, token: &InviteToken) -> Result<AcceptResult, StoreError>;
}
