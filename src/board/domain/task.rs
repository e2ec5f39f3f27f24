//! Task record and its value types.

use super::{CanonicalStatus, ColumnId, RawTask, RemoteStatus, StatusVocabulary, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses English or legacy localized priority names.
    ///
    /// Unknown values fall back to [`Priority::Medium`].
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" | "baja" => Self::Low,
            "high" | "alta" => Self::High,
            _ => Self::Medium,
        }
    }
}

/// Comment left on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Author reference.
    #[serde(alias = "autor")]
    pub author: String,
    /// Comment text.
    #[serde(alias = "texto")]
    pub body: String,
    /// Creation time, when the remote record carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// File attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Original file name.
    #[serde(alias = "nombre")]
    pub name: String,
    /// Location of the stored file.
    pub url: String,
    /// Size in bytes, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

/// Normalized task as exposed to the board.
///
/// A task held by the board never carries a deletion sentinel: deleted
/// records are dropped during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: CanonicalStatus,
    remote_status: RemoteStatus,
    priority: Priority,
    assignee: Option<String>,
    due_date: Option<NaiveDate>,
    comments: Vec<Comment>,
    attachments: Vec<Attachment>,
}

impl Task {
    /// Creates a task whose shadow remote status mirrors `status`.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>, status: CanonicalStatus) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status,
            remote_status: StatusVocabulary::to_remote(status),
            priority: Priority::default(),
            assignee: None,
            due_date: None,
            comments: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignee reference.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the comment thread.
    #[must_use]
    pub fn with_comments(mut self, comments: impl IntoIterator<Item = Comment>) -> Self {
        self.comments = comments.into_iter().collect();
        self
    }

    /// Sets the attachments.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the canonical status.
    #[must_use]
    pub const fn status(&self) -> CanonicalStatus {
        self.status
    }

    /// Returns the last status acknowledged by the remote system.
    ///
    /// Lags behind [`Task::status`] while a move is awaiting confirmation.
    #[must_use]
    pub const fn remote_status(&self) -> RemoteStatus {
        self.remote_status
    }

    /// Returns the column that displays this task.
    #[must_use]
    pub const fn column(&self) -> ColumnId {
        StatusVocabulary::to_column(self.status)
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the assignee reference, if any.
    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the comments in thread order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the attachments in upload order.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Converts the task back into its normalized wire form.
    #[must_use]
    pub fn to_raw(&self) -> RawTask {
        RawTask {
            id: self.id.as_str().to_owned(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: Some(self.status.as_str().to_owned()),
            remote_status: Some(self.remote_status.as_str().to_owned()),
            priority: Some(self.priority.as_str().to_owned()),
            assignee: self.assignee.clone(),
            due_date: self
                .due_date
                .map(|date| date.format(super::raw::DUE_DATE_FORMAT).to_string()),
            comments: self.comments.clone(),
            attachments: self.attachments.clone(),
        }
    }

    pub(crate) const fn set_status(&mut self, status: CanonicalStatus) {
        self.status = status;
    }

    pub(crate) const fn set_remote_status(&mut self, remote_status: RemoteStatus) {
        self.remote_status = remote_status;
    }

    pub(crate) fn push_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }
}
