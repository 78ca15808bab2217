use serde::Serialize;
use tokio::time::Instant;
use uuid::Uuid;

/// Toast severity, mirrored by the rendering layer's styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// A transient user notification. Entries are only ever added and removed;
/// an existing toast is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub id: String,
    pub kind: ToastKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip)]
    pub created_at: Instant,
}

impl Toast {
    /// Creates a toast with a fresh id, stamped with the current instant.
    pub fn new(kind: ToastKind, message: impl Into<String>, subject: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            kind,
            message: message.into(),
            subject,
            created_at: Instant::now(),
        }
    }
}
