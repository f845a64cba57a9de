use std::sync::Arc;

use crate::configuration::PermissionStrategy;
use crate::store::ConfirmationStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ConfirmationStore>,
    pub permission_strategy: PermissionStrategy,
}
