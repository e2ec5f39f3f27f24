//! Status vocabularies and the translation tables between them.
//!
//! Three representations coexist: the board's canonical statuses, the
//! remote system's canonical codes, and legacy lowercase localized codes
//! still present in older records. Every board status owns exactly one
//! column.

use super::ParseColumnError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Board-canonical task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalStatus {
    /// Work has not started.
    Todo,
    /// Work is under way.
    InProgress,
    /// Work is awaiting review.
    InReview,
    /// Work is finished.
    Done,
}

impl CanonicalStatus {
    /// All canonical statuses in board column order.
    pub const ALL: [Self; 4] = [Self::Todo, Self::InProgress, Self::InReview, Self::Done];

    /// Returns the board-canonical string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Done => "done",
        }
    }

    /// Returns `true` when the status counts towards completed work.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status code in the remote system's canonical vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemoteStatus {
    /// Remote `To_Do`.
    #[serde(rename = "To_Do")]
    ToDo,
    /// Remote `In_Progress`.
    #[serde(rename = "In_Progress")]
    InProgress,
    /// Remote `In_Review`.
    #[serde(rename = "In_Review")]
    InReview,
    /// Remote `Completed`.
    #[serde(rename = "Completed")]
    Completed,
}

impl RemoteStatus {
    /// Returns the remote wire code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To_Do",
            Self::InProgress => "In_Progress",
            Self::InReview => "In_Review",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Board column identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnId {
    /// Column holding [`CanonicalStatus::Todo`] tasks.
    Todo,
    /// Column holding [`CanonicalStatus::InProgress`] tasks.
    InProgress,
    /// Column holding [`CanonicalStatus::InReview`] tasks.
    InReview,
    /// Column holding [`CanonicalStatus::Done`] tasks.
    Done,
}

impl ColumnId {
    /// All columns in display order.
    pub const ALL: [Self; 4] = [Self::Todo, Self::InProgress, Self::InReview, Self::Done];

    /// Returns the column identifier used by the rendering layer.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::InReview => "in-review",
            Self::Done => "done",
        }
    }

    /// Returns the canonical status represented by this column.
    #[must_use]
    pub const fn status(self) -> CanonicalStatus {
        StatusVocabulary::from_column(self)
    }
}

impl TryFrom<&str> for ColumnId {
    type Error = ParseColumnError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == value.trim())
            .ok_or_else(|| ParseColumnError(value.to_owned()))
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of resolving a raw status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusMatch {
    /// The value maps to a live board status.
    Active(CanonicalStatus),
    /// The value is a deletion sentinel in one of the vocabularies.
    Deleted,
    /// No vocabulary recognises the value.
    Unmatched,
}

impl StatusMatch {
    /// Returns the canonical status when the match is active.
    #[must_use]
    pub const fn active(self) -> Option<CanonicalStatus> {
        match self {
            Self::Active(status) => Some(status),
            Self::Deleted | Self::Unmatched => None,
        }
    }
}

const BOARD_DELETED: &str = "deleted";

const REMOTE_TABLE: [(&str, StatusMatch); 5] = [
    ("To_Do", StatusMatch::Active(CanonicalStatus::Todo)),
    ("In_Progress", StatusMatch::Active(CanonicalStatus::InProgress)),
    ("In_Review", StatusMatch::Active(CanonicalStatus::InReview)),
    ("Completed", StatusMatch::Active(CanonicalStatus::Done)),
    ("Deleted", StatusMatch::Deleted),
];

const LEGACY_TABLE: [(&str, StatusMatch); 6] = [
    ("pendiente", StatusMatch::Active(CanonicalStatus::Todo)),
    ("en_progreso", StatusMatch::Active(CanonicalStatus::InProgress)),
    ("en_revision", StatusMatch::Active(CanonicalStatus::InReview)),
    ("completada", StatusMatch::Active(CanonicalStatus::Done)),
    ("eliminada", StatusMatch::Deleted),
    ("eliminado", StatusMatch::Deleted),
];

/// Translation tables between the status vocabularies.
///
/// All functions are pure. Translation out of [`CanonicalStatus`] is total;
/// translation into it is partial and reports [`StatusMatch::Unmatched`]
/// explicitly.
///
/// # Examples
///
/// ```
/// use taskboard::board::domain::{CanonicalStatus, StatusMatch, StatusVocabulary};
///
/// assert_eq!(
///     StatusVocabulary::to_canonical("en_revision"),
///     StatusMatch::Active(CanonicalStatus::InReview)
/// );
/// assert_eq!(
///     StatusVocabulary::to_canonical("In_Review"),
///     StatusMatch::Active(CanonicalStatus::InReview)
/// );
/// assert_eq!(StatusVocabulary::to_canonical("archived"), StatusMatch::Unmatched);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusVocabulary;

impl StatusVocabulary {
    /// Resolves a raw status from any vocabulary.
    ///
    /// Board-canonical values pass through unchanged, then the remote table
    /// is consulted (exact match), then the legacy table (ASCII
    /// case-insensitive).
    #[must_use]
    pub fn to_canonical(raw: &str) -> StatusMatch {
        let value = raw.trim();

        if let Some(status) = CanonicalStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
        {
            return StatusMatch::Active(status);
        }
        if value == BOARD_DELETED {
            return StatusMatch::Deleted;
        }

        if let Some((_, matched)) = REMOTE_TABLE.iter().find(|(code, _)| *code == value) {
            return *matched;
        }

        LEGACY_TABLE
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(value))
            .map_or(StatusMatch::Unmatched, |(_, matched)| *matched)
    }

    /// Translates a canonical status into the remote vocabulary.
    #[must_use]
    pub const fn to_remote(status: CanonicalStatus) -> RemoteStatus {
        match status {
            CanonicalStatus::Todo => RemoteStatus::ToDo,
            CanonicalStatus::InProgress => RemoteStatus::InProgress,
            CanonicalStatus::InReview => RemoteStatus::InReview,
            CanonicalStatus::Done => RemoteStatus::Completed,
        }
    }

    /// Returns the column that displays a canonical status.
    #[must_use]
    pub const fn to_column(status: CanonicalStatus) -> ColumnId {
        match status {
            CanonicalStatus::Todo => ColumnId::Todo,
            CanonicalStatus::InProgress => ColumnId::InProgress,
            CanonicalStatus::InReview => ColumnId::InReview,
            CanonicalStatus::Done => ColumnId::Done,
        }
    }

    /// Returns the canonical status a column displays.
    #[must_use]
    pub const fn from_column(column: ColumnId) -> CanonicalStatus {
        match column {
            ColumnId::Todo => CanonicalStatus::Todo,
            ColumnId::InProgress => CanonicalStatus::InProgress,
            ColumnId::InReview => CanonicalStatus::InReview,
            ColumnId::Done => CanonicalStatus::Done,
        }
    }
}
