use serde_json::Value;

/// Name recorded for members whose invitation carries none.
pub const UNKNOWN_MEMBER_NAME: &str = "Unknown";

/// Pending permission grant, as stored in the invitation log.
///
/// `location_id` and `permission` are copied onto the membership verbatim,
/// so they are kept as raw JSON scalars.
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct InvitationRecord {
    pub member_email: String,
    pub location_id: Value,
    pub permission: Value,
    #[serde(default)]
    pub member_name: Option<String>,
}

/// Confirmed access of a member to a location.
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct MembershipRecord {
    pub member_email: String,
    pub location_id: Value,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub member_permission: Option<Value>,
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct NewMembership {
    pub location_id: Value,
    pub member_email: String,
    pub member_name: String,
    pub member_permission: Value,
}

impl From<&InvitationRecord> for NewMembership {
    fn from(invitation: &InvitationRecord) -> Self {
        let member_name = invitation
            .member_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_MEMBER_NAME)
            .to_string();

        Self {
            location_id: invitation.location_id.clone(),
            member_email: invitation.member_email.clone(),
            member_name,
            member_permission: invitation.permission.clone(),
        }
    }
}
