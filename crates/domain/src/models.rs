use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an object on the remote board (card, list, comment).
///
/// Validation only applies to identifiers arriving from our own callers;
/// identifiers coming back from the remote API are taken as-is via
/// [`RemoteId::new_unchecked`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteId(String);

impl RemoteId {
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.is_empty() {
            return Err("Remote ID cannot be empty.".to_string());
        }
        if s.len() > 64 {
            return Err("Remote ID is too long (max 64 chars).".to_string());
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err("Remote ID contains invalid characters.".to_string());
        }
        Ok(Self(s))
    }

    pub fn new_unchecked(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A list (column) on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardList {
    pub id: RemoteId,
    pub name: String,
}

/// A card as the remote API returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: RemoteId,
    pub name: String,
    #[serde(default)]
    pub desc: String,
}

/// One comment of a card's thread, as stored remotely. The remote store owns
/// these; this side never mutates them except through an [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: RemoteId,
    pub text: String,
}

/// A single change to apply against the remote comment thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Delete { id: RemoteId },
    Edit { id: RemoteId, text: String },
    Create { text: String },
}
