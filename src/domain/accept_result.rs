/// Outcome reported by the store's accept-invite procedure.
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AcceptResult {
    pub ok: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl AcceptResult {
    pub fn accepted() -> Self {
        Self { ok: true, reason: None }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }

    /// The store's explanation, or `"unknown"` when it gave none.
    pub fn rejection_reason(&self) -> &str {
        match self.reason.as_deref().map(str::trim) {
            Some(reason) if !reason.is_empty() => reason,
            _ => "unknown",
        }
    }
}
