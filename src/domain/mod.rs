mod accept_result;
mod confirmation_id;
mod invitation;

pub use accept_result::AcceptResult;
pub use confirmation_id::{InviteToken, MissingParameter, PermissionLogId};
pub use invitation::{InvitationRecord, MembershipRecord, NewMembership, UNKNOWN_MEMBER_NAME};
