use serde::{Deserialize, Serialize};

/// Canonical document category driving extraction strategy selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Word,
    Image,
    Text,
    Email,
    #[default]
    Other,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Word => write!(f, "word"),
            Self::Image => write!(f, "image"),
            Self::Text => write!(f, "text"),
            Self::Email => write!(f, "email"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "word" => Ok(Self::Word),
            "image" => Ok(Self::Image),
            "text" => Ok(Self::Text),
            "email" => Ok(Self::Email),
            _ => Ok(Self::Other),
        }
    }
}

/// Lifecycle marker for a document record.
///
/// Upload-created records start out `Queued`; records discovered by the
/// blob scan start out `Received`. The pipeline moves them to
/// `Processed` or `Failed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Queued,
    Received,
    Processed,
    Failed,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Queued => write!(f, "queued"),
            Self::Received => write!(f, "received"),
            Self::Processed => write!(f, "processed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "queued" => Ok(Self::Queued),
            "received" => Ok(Self::Received),
            "processed" => Ok(Self::Processed),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Unknown document status: {s}")),
        }
    }
}
