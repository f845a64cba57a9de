mod confirm_permission;
mod confirm_signup;
mod health_check;
mod query;
mod response;

pub use confirm_permission::confirm_permission;
pub use confirm_signup::confirm_signup;
pub use health_check::health_check;
pub use response::{Confirmation, ConfirmError, PLAIN_TEXT_UTF8, unexpected_panic};
