use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use url::Url;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub store: StoreSettings,
    pub confirm_permission: ConfirmPermissionSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(serde::Deserialize, Clone)]
pub struct StoreSettings {
    pub base_url: String,
    pub service_role_key: String,
    pub timeout_milliseconds: u64,
    pub accept_invite_procedure: String,
}

// The service role key must never end up in logs
impl std::fmt::Debug for StoreSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSettings")
            .field("base_url", &self.base_url)
            .field("service_role_key", &"[REDACTED]")
            .field("timeout_milliseconds", &self.timeout_milliseconds)
            .field("accept_invite_procedure", &self.accept_invite_procedure)
            .finish()
    }
}

impl StoreSettings {
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.base_url.trim())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ConfirmPermissionSettings {
    pub strategy: PermissionStrategy,
}

/// Which confirmation flow answers `/confirm-permission`.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStrategy {
    /// Token handed to the store's accept-invite procedure.
    #[default]
    AcceptInvite,
    /// Invitation looked up by log id, membership inserted here.
    LogLookup,
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let builder = defaults()?
        // Search for an optional file named `configuration`
        .add_source(config::File::with_name("configuration").required(false))
        // e.g. `APP_APPLICATION__PORT=5001` sets `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        // Deployment variables injected by the hosting platform
        .set_override_option("store.base_url", std::env::var("SUPABASE_URL").ok())?
        .set_override_option(
            "store.service_role_key",
            std::env::var("SUPABASE_SERVICE_ROLE_KEY").ok(),
        )?;

    settings_from(builder)
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 8000)?
        .set_default("store.base_url", "")?
        .set_default("store.service_role_key", "")?
        .set_default("store.timeout_milliseconds", 10_000)?
        .set_default("store.accept_invite_procedure", "accept_invite")?
        .set_default("confirm_permission.strategy", "accept_invite")
}

fn settings_from(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()
}

impl Settings {
    /// A store without an address or a credential is unusable, so refuse to start.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.store.base_url.trim().is_empty() {
            return Err(ConfigError::Message(
                "store.base_url (SUPABASE_URL) is not set".into(),
            ));
        }
        if let Err(e) = self.store.base_url() {
            return Err(ConfigError::Message(format!(
                "store.base_url is not a valid URL: {e}"
            )));
        }
        if self.store.service_role_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "store.service_role_key (SUPABASE_SERVICE_ROLE_KEY) is not set".into(),
            ));
        }
        Ok(self)
    }
}
