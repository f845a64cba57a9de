/// A required query parameter was absent, empty or only whitespace.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("missing {0}")]
pub struct MissingParameter(pub &'static str);

fn required(raw: Option<String>, name: &'static str) -> Result<String, MissingParameter> {
    match raw.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(MissingParameter(name)),
    }
}

/// Identifier of a row in the invitation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionLogId(String);

impl PermissionLogId {
    pub const PARAMETER: &'static str = "permissionLogId";

    pub fn parse(raw: Option<String>) -> Result<Self, MissingParameter> {
        required(raw, Self::PARAMETER).map(Self)
    }
}

impl AsRef<str> for PermissionLogId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque invite token, validated by the store itself.
#[derive(Clone, PartialEq, Eq)]
pub struct InviteToken(String);

impl InviteToken {
    pub const PARAMETER: &'static str = "token";

    pub fn parse(raw: Option<String>) -> Result<Self, MissingParameter> {
        required(raw, Self::PARAMETER).map(Self)
    }
}

// Tokens grant access; keep them out of logs.
impl std::fmt::Debug for InviteToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("InviteToken(..)")
    }
}

impl AsRef<str> for InviteToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
