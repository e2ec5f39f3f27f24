//! Raw task records as delivered by the remote system.
//!
//! Records arrive in mixed vocabularies and with either English or legacy
//! localized field names. Nothing here is validated; ingestion decides
//! what survives.

use super::{Attachment, Comment, StatusMatch, StatusVocabulary};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

pub(super) const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Task record in remote wire form.
///
/// The identifier may arrive as `id`, `_id`, or both; a non-blank `id`
/// wins. A record with neither deserializes with an empty identifier and
/// is quarantined during ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawTaskRecord")]
pub struct RawTask {
    /// Remote identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Primary status in any vocabulary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Auxiliary shadow status in any vocabulary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_status: Option<String>,
    /// Priority name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Assignee reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Due date as `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Comment thread.
    pub comments: Vec<Comment>,
    /// Attachments.
    pub attachments: Vec<Attachment>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTaskRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    object_id: Option<String>,
    #[serde(default, alias = "titulo")]
    title: String,
    #[serde(default, alias = "descripcion")]
    description: Option<String>,
    #[serde(default, alias = "estado")]
    status: Option<String>,
    #[serde(default, alias = "estadoRemoto")]
    remote_status: Option<String>,
    #[serde(default, alias = "prioridad")]
    priority: Option<String>,
    #[serde(default, alias = "asignado")]
    assignee: Option<String>,
    #[serde(default, alias = "fechaLimite")]
    due_date: Option<String>,
    #[serde(default, alias = "comentarios")]
    comments: Vec<Comment>,
    #[serde(default, alias = "adjuntos")]
    attachments: Vec<Attachment>,
}

impl From<RawTaskRecord> for RawTask {
    fn from(record: RawTaskRecord) -> Self {
        let id = record
            .id
            .filter(|id| !id.trim().is_empty())
            .or(record.object_id)
            .unwrap_or_default();
        Self {
            id,
            title: record.title,
            description: record.description,
            status: record.status,
            remote_status: record.remote_status,
            priority: record.priority,
            assignee: record.assignee,
            due_date: record.due_date,
            comments: record.comments,
            attachments: record.attachments,
        }
    }
}

impl RawTask {
    /// Creates a raw record with an identifier, title, and primary status.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: Some(status.into()),
            ..Self::default()
        }
    }

    /// Sets the auxiliary shadow status.
    #[must_use]
    pub fn with_remote_status(mut self, remote_status: impl Into<String>) -> Self {
        self.remote_status = Some(remote_status.into());
        self
    }

    /// Resolves the record's status across both status fields.
    ///
    /// A deletion sentinel in either field wins. Otherwise the primary
    /// field is preferred and the shadow field is the fallback.
    #[must_use]
    pub fn resolve_status(&self) -> StatusMatch {
        let primary = resolve_field(self.status.as_deref());
        let shadow = resolve_field(self.remote_status.as_deref());

        match (primary, shadow) {
            (StatusMatch::Deleted, _) | (_, StatusMatch::Deleted) => StatusMatch::Deleted,
            (StatusMatch::Active(status), _) | (StatusMatch::Unmatched, StatusMatch::Active(status)) => {
                StatusMatch::Active(status)
            }
            (StatusMatch::Unmatched, StatusMatch::Unmatched) => StatusMatch::Unmatched,
        }
    }

    /// Returns the first non-empty raw status value, for diagnostics.
    #[must_use]
    pub fn raw_status_label(&self) -> String {
        self.status
            .as_deref()
            .or(self.remote_status.as_deref())
            .unwrap_or_default()
            .to_owned()
    }

    /// Parses the due date, accepting plain dates and RFC 3339 timestamps.
    ///
    /// Returns `None` when absent or unparseable.
    #[must_use]
    pub fn parsed_due_date(&self) -> Option<NaiveDate> {
        let value = self.due_date.as_deref()?.trim();
        if value.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(value, DUE_DATE_FORMAT)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(value)
                    .ok()
                    .map(|timestamp| timestamp.date_naive())
            })
    }
}

fn resolve_field(value: Option<&str>) -> StatusMatch {
    value.map_or(StatusMatch::Unmatched, StatusVocabulary::to_canonical)
}
