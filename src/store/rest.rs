use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::{ConfirmationStore, InsertOutcome, StoreError};
use crate::domain::{
    AcceptResult, InviteToken, InvitationRecord, MembershipRecord, NewMembership, PermissionLogId,
};

const INVITATIONS: &str = "rest/v1/permission_log";
const MEMBERSHIPS: &str = "rest/v1/location_members";

/// PostgREST client authenticated with the service role key.
pub struct RestStore {
    http_client: Client,
    base_url: Url,
    service_role_key: String,
    accept_invite_procedure: String,
}

impl RestStore {
    pub fn new(
        mut base_url: Url,
        service_role_key: String,
        accept_invite_procedure: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        // `Url::join` drops the last path segment unless it ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http_client,
            base_url,
            service_role_key,
            accept_invite_procedure,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|e| StoreError::Unavailable(format!("invalid endpoint `{path}`: {e}")))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }

    async fn first_row<T: DeserializeOwned>(response: Response) -> Result<Option<T>, StoreError> {
        let rows: Vec<T> = decode(response).await?;
        Ok(rows.into_iter().next())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let response = error_for_status(response).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
}

async fn error_for_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

/// PostgREST errors look like `{"code": .., "message": .., "details": ..}`.
fn error_message(status: StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_string());

    if message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        message
    }
}

/// Render a JSON scalar the way PostgREST filters expect it.
fn filter_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl ConfirmationStore for RestStore {
    #[tracing::instrument(name = "Fetching invitation from the permission log", skip(self))]
    async fn fetch_invitation(
        &self,
        id: &PermissionLogId,
    ) -> Result<Option<InvitationRecord>, StoreError> {
        let filter = format!("eq.{}", id.as_ref());
        let response = self
            .authorized(self.http_client.get(self.endpoint(INVITATIONS)?))
            .query(&[
                ("select", "*"),
                ("permission_log_id", filter.as_str()),
                ("limit", "1"),
            ])
            .send()
            .await?;

        // A malformed id makes the store reject the filter itself
        if response.status().is_client_error() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "Invitation lookup rejected with {}: {}",
                status,
                error_message(status, &body)
            );
            return Ok(None);
        }

        Self::first_row(response).await
    }

    #[tracing::instrument(name = "Looking up an existing membership", skip(self))]
    async fn find_membership(
        &self,
        member_email: &str,
        location_id: &Value,
    ) -> Result<Option<MembershipRecord>, StoreError> {
        let email_filter = format!("eq.{member_email}");
        let location_filter = format!("eq.{}", filter_value(location_id));
        let response = self
            .authorized(self.http_client.get(self.endpoint(MEMBERSHIPS)?))
            .query(&[
                ("select", "*"),
                ("member_email", email_filter.as_str()),
                ("location_id", location_filter.as_str()),
                ("limit", "1"),
            ])
            .send()
            .await?;

        Self::first_row(response).await
    }

    #[tracing::instrument(
        name = "Inserting a new membership",
        skip(self, membership),
        fields(member_email = %membership.member_email)
    )]
    async fn insert_membership(
        &self,
        membership: &NewMembership,
    ) -> Result<InsertOutcome, StoreError> {
        let response = self
            .authorized(self.http_client.post(self.endpoint(MEMBERSHIPS)?))
            .header("Prefer", "return=minimal")
            .json(membership)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            tracing::info!("Membership already present, insert skipped");
            return Ok(InsertOutcome::AlreadyExists);
        }
        error_for_status(response).await?;
        Ok(InsertOutcome::Inserted)
    }

    #[tracing::instrument(
        name = "Calling the accept-invite procedure",
        skip(self, token),
        fields(procedure = %self.accept_invite_procedure)
    )]
    async fn accept_invite(&self, token: &InviteToken) -> Result<AcceptResult, StoreError> {
        let path = format!("rest/v1/rpc/{}", self.accept_invite_procedure);
        let response = self
            .authorized(self.http_client.post(self.endpoint(&path)?))
            .json(&serde_json::json!({ "p_token": token.as_ref() }))
            .send()
            .await?;

        // Set-returning procedures answer with a one-element array
        let value = match decode::<Value>(response).await? {
            Value::Array(mut rows) if !rows.is_empty() => rows.swap_remove(0),
            other => other,
        };
        serde_json::from_value(value).map_err(|e| StoreError::Decode(e.to_string()))
    }
}
