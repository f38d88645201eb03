use std::path::{Path, PathBuf};

use tokio::fs;

use crate::errors::ServiceError;
use models::contact::ContactMessage;

/// Writes contact messages to local JSON files when the remote store is unavailable.
#[derive(Clone, Debug)]
pub struct BackupWriter {
    dir: PathBuf,
}

impl BackupWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("contact_messages_backup_{id}.json"))
    }

    /// Pretty-printed JSON (4-space indent), one file per message.
    pub async fn write(&self, message: &ContactMessage) -> Result<PathBuf, ServiceError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ServiceError::Io(format!("cannot create {}: {e}", self.dir.display())))?;
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        serde::Serialize::serialize(message, &mut ser).map_err(|e| ServiceError::Io(e.to_string()))?;
        let path = self.path_for(&message.id);
        fs::write(&path, buf)
            .await
            .map_err(|e| ServiceError::Io(format!("cannot write {}: {e}", path.display())))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::contact::ContactFormData;
    use uuid::Uuid;

    #[tokio::test]
    async fn backup_file_holds_the_full_record() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("backups_{}", Uuid::new_v4()));
        let writer = BackupWriter::new(&dir);
        let msg = ContactMessage::from_form(ContactFormData {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hi".into(),
            message: "Body".into(),
        });

        let path = writer.write(&msg).await?;
        assert_eq!(path, dir.join(format!("contact_messages_backup_{}.json", msg.id)));

        let text = tokio::fs::read_to_string(&path).await?;
        assert!(text.contains("\n    \"id\""));
        let back: ContactMessage = serde_json::from_str(&text)?;
        assert_eq!(back, msg);

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
