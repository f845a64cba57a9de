use axum::extract::{Query, State};

use super::query::{QueryPairs, first_value};
use super::{ConfirmError, Confirmation};
use crate::configuration::PermissionStrategy;
use crate::domain::{InviteToken, NewMembership, PermissionLogId};
use crate::state::AppState;
use crate::store::{ConfirmationStore, InsertOutcome};

#[axum::debug_handler]
#[tracing::instrument(
    name = "Confirm a location permission",
    skip(state, query),
    fields(strategy = ?state.permission_strategy)
)]
pub async fn confirm_permission(
    State(state): State<AppState>,
    Query(query): Query<QueryPairs>,
) -> Result<Confirmation, ConfirmError> {
    let store = state.store.as_ref();
    match state.permission_strategy {
        PermissionStrategy::LogLookup => {
            let permission_log_id = first_value(&query, PermissionLogId::PARAMETER);
            confirm_by_log_id(store, permission_log_id).await
        }
        PermissionStrategy::AcceptInvite => {
            confirm_by_token(store, first_value(&query, InviteToken::PARAMETER)).await
        }
    }
}

#[tracing::instrument(name = "Confirming from the invitation log", skip(store))]
async fn confirm_by_log_id(
    store: &dyn ConfirmationStore,
    permission_log_id: Option<String>,
) -> Result<Confirmation, ConfirmError> {
    let log_id = PermissionLogId::parse(permission_log_id)?;

    // An invitation the store cannot hand back counts as missing
    let invitation = store
        .fetch_invitation(&log_id)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error.message = %e, "Invitation lookup failed");
            None
        })
        .ok_or(ConfirmError::InvitationNotFound)?;

    if store
        .find_membership(&invitation.member_email, &invitation.location_id)
        .await?
        .is_some()
    {
        return Ok(Confirmation::AlreadyConfirmed);
    }

    // A concurrent confirmation may win between the lookup and the insert
    match store
        .insert_membership(&NewMembership::from(&invitation))
        .await?
    {
        InsertOutcome::Inserted => Ok(Confirmation::PermissionConfirmed),
        InsertOutcome::AlreadyExists => Ok(Confirmation::AlreadyConfirmed),
    }
}

#[tracing::instrument(name = "Confirming through accept-invite", skip_all)]
async fn confirm_by_token(
    store: &dyn ConfirmationStore,
    token: Option<String>,
) -> Result<Confirmation, ConfirmError> {
    let token = InviteToken::parse(token)?;

    let result = store.accept_invite(&token).await?;
    if result.ok {
        Ok(Confirmation::PermissionConfirmed)
    } else {
        Err(ConfirmError::Rejected(result.rejection_reason().to_string()))
    }
}
