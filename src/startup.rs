use std::sync::Arc;

use axum::{Router, body::Body, extract::Request, routing::get};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::configuration::Settings;
use crate::routes::{confirm_permission, confirm_signup, health_check, unexpected_panic};
use crate::state::AppState;
use crate::store::RestStore;

pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, std::io::Error> {
        let base_url = config.store.base_url().map_err(std::io::Error::other)?;
        let store = RestStore::new(
            base_url,
            config.store.service_role_key.clone(),
            config.store.accept_invite_procedure.clone(),
            config.store.timeout(),
        )
        .map_err(std::io::Error::other)?;

        let state = AppState {
            store: Arc::new(store),
            permission_strategy: config.confirm_permission.strategy,
        };

        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(address).await?;
        // Port 0 asks the OS for a free one
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!(
            port = self.port,
            strategy = ?self.state.permission_strategy,
            "Serving confirmation links"
        );
        axum::serve(self.listener, app(self.state)).await
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health_check", get(health_check))
        .route("/confirm-permission", get(confirm_permission))
        .route("/confirm-signup", get(confirm_signup))
        .layer(CatchPanicLayer::custom(unexpected_panic))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = Uuid::new_v4();
                // Query strings carry invite tokens, so only the path is recorded
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri().path(),
                    request_id = %request_id,
                )
            }),
        )
        .with_state(state)
}
