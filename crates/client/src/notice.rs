use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One-shot alert shown to the user after an operation finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Validation failure raised before any request was made.
    pub fn invalid(body: impl Into<String>) -> Self {
        Self::error("⚠️ Fehler", body)
    }

    /// Best-effort human readable message for a failed request.
    pub fn from_error(err: &ClientError, fallback: &str) -> Self {
        let body = if err.is_network() {
            "Keine Verbindung zum Server".to_string()
        } else if let Some(detail) = err.detail() {
            detail.to_string()
        } else {
            fallback.to_string()
        };
        Self::error("❌ Fehler", body)
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.body)
    }
}
