//! Optional listing export: render the shopper's lists as a spreadsheet, file
//! it, and email it.
//!
//! File storage and mail delivery are external collaborators; failures are
//! reported through `anyhow` and only ever logged by the caller.

pub mod in_memory;
pub mod spreadsheet;

use std::sync::Arc;

use anyhow::Context;

use wishlist_lists::ProductListEntry;

pub use in_memory::{InMemoryFileCabinet, OutboxMailer};
pub use spreadsheet::{render_workbook, summary_lines};

/// A file to be stored in the account's file cabinet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub file_type: String,
    pub folder_id: i64,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub author_id: u64,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    /// File id of the attachment, if any.
    pub attachment: Option<String>,
}

pub trait FileCabinet: Send + Sync {
    /// Store the file and return its id.
    fn save(&self, file: ExportFile) -> anyhow::Result<String>;
}

pub trait Mailer: Send + Sync {
    fn send(&self, email: Email) -> anyhow::Result<()>;
}

/// Where and how exports are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    pub recipient: String,
    pub author_id: u64,
    pub subject: String,
    pub file_name: String,
    pub folder_id: i64,
    /// Fixed file attached to every export mail. When unset, the freshly saved
    /// spreadsheet is attached instead.
    pub attachment_id: Option<String>,
}

impl ExportSettings {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            author_id: 645,
            subject: "whislist export".to_string(),
            file_name: "wishlist.xls".to_string(),
            folder_id: -4,
            attachment_id: None,
        }
    }
}

/// Spreadsheet export wired to its file and mail collaborators.
#[derive(Clone)]
pub struct Exporter {
    files: Arc<dyn FileCabinet>,
    mailer: Arc<dyn Mailer>,
    settings: ExportSettings,
}

impl Exporter {
    pub fn new(files: Arc<dyn FileCabinet>, mailer: Arc<dyn Mailer>, settings: ExportSettings) -> Self {
        Self {
            files,
            mailer,
            settings,
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Render, store and mail the lists. Returns the stored file id.
    pub fn export(&self, lists: &[ProductListEntry]) -> anyhow::Result<String> {
        let file_id = self
            .files
            .save(ExportFile {
                name: self.settings.file_name.clone(),
                file_type: "EXCEL".to_string(),
                folder_id: self.settings.folder_id,
                contents: render_workbook(lists),
            })
            .context("saving export spreadsheet")?;

        tracing::info!(file_id = %file_id, lists = lists.len(), "saved product list export");

        self.mailer
            .send(Email {
                author_id: self.settings.author_id,
                recipient: self.settings.recipient.clone(),
                subject: self.settings.subject.clone(),
                body: summary_lines(lists).join("\n"),
                attachment: Some(
                    self.settings
                        .attachment_id
                        .clone()
                        .unwrap_or_else(|| file_id.clone()),
                ),
            })
            .context("sending export email")?;

        Ok(file_id)
    }
}

impl core::fmt::Debug for Exporter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Exporter")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
