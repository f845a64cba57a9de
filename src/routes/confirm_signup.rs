use axum::extract::Query;

use super::query::{QueryPairs, first_value};
use super::{ConfirmError, Confirmation};

/// The auth provider appends `error_code` and `error_description` when its
/// email link fails.
#[tracing::instrument(name = "Confirm an email signup", skip(query))]
pub async fn confirm_signup(Query(query): Query<QueryPairs>) -> Result<Confirmation, ConfirmError> {
    let non_empty = |name: &str| first_value(&query, name).filter(|s| !s.is_empty());

    match non_empty("error_code") {
        Some(code) => Err(ConfirmError::SignupFailed {
            code,
            description: non_empty("error_description"),
        }),
        None => Ok(Confirmation::SignupConfirmed),
    }
}
