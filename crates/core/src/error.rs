/// A failed parse.
///
/// `Syntax` is the only variant input can produce. `Internal` means the
/// parser broke its own stack discipline and indicates a bug in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Line {line}: {message}")]
    Syntax { line: u32, message: String },

    #[error("internal parser fault: {0}")]
    Internal(String),
}

impl ParseError {
    pub fn syntax(line: u32, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            line,
            message: message.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        ParseError::Internal(detail.into())
    }

    pub fn line(&self) -> Option<u32> {
        match self {
            ParseError::Syntax { line, .. } => Some(*line),
            ParseError::Internal(_) => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ParseError::Syntax { message, .. } => message,
            ParseError::Internal(detail) => detail,
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ParseError::Syntax { .. })
    }

    /// JSON object used by `--output json`. Always carries every field,
    /// `line` is null for internal faults.
    pub fn to_json_value(&self) -> serde_json::Value {
        let kind = match self {
            ParseError::Syntax { .. } => "syntax",
            ParseError::Internal(_) => "internal",
        };
        serde_json::json!({
            "kind":    kind,
            "line":    self.line(),
            "message": self.message(),
        })
    }
}
