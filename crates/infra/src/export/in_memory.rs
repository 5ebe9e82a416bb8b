use std::sync::RwLock;

use anyhow::anyhow;

use super::{Email, ExportFile, FileCabinet, Mailer};

/// In-memory file cabinet for tests/dev. Ids are sequential from 1.
#[derive(Debug, Default)]
pub struct InMemoryFileCabinet {
    files: RwLock<Vec<ExportFile>>,
}

impl InMemoryFileCabinet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> Vec<ExportFile> {
        self.files.read().map(|f| f.clone()).unwrap_or_default()
    }
}

impl FileCabinet for InMemoryFileCabinet {
    fn save(&self, file: ExportFile) -> anyhow::Result<String> {
        let mut files = self.files.write().map_err(|_| anyhow!("file cabinet lock poisoned"))?;
        files.push(file);
        Ok(files.len().to_string())
    }
}

/// Mailer that keeps every sent message, for tests/dev.
#[derive(Debug, Default)]
pub struct OutboxMailer {
    sent: RwLock<Vec<Email>>,
}

impl OutboxMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent.read().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Mailer for OutboxMailer {
    fn send(&self, email: Email) -> anyhow::Result<()> {
        self.sent
            .write()
            .map_err(|_| anyhow!("outbox lock poisoned"))?
            .push(email);
        Ok(())
    }
}
