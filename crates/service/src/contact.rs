use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info, instrument};

use common::observability::{BACKUP_WRITES_TOTAL, CONTACT_SUBMISSIONS_TOTAL, REMOTE_STORE_ERRORS_TOTAL};
use models::contact::{validate_message_id, ContactFormData, ContactMessage, StatusUpdate};

use crate::catalog::{CatalogService, CONTACT_MESSAGES};
use crate::errors::ServiceError;
use crate::remote::RemoteStore;
use crate::storage::backup::BackupWriter;

/// Contact-form workflow: submit, list, and status updates.
#[derive(Clone)]
pub struct ContactService {
    remote: Arc<dyn RemoteStore>,
    catalog: CatalogService,
    backups: BackupWriter,
}

impl ContactService {
    pub fn new(remote: Arc<dyn RemoteStore>, catalog: CatalogService, backups: BackupWriter) -> Self {
        Self { remote, catalog, backups }
    }

    fn message_path(id: &str) -> String {
        format!("{CONTACT_MESSAGES}/{id}")
    }

    /// Store a new message. When the remote write fails the record is kept in a local
    /// backup file and the remote error is still returned.
    #[instrument(skip_all)]
    pub async fn submit(&self, form: ContactFormData) -> Result<ContactMessage, ServiceError> {
        if let Err(e) = form.validate() {
            CONTACT_SUBMISSIONS_TOTAL.with_label_values(&["invalid"]).inc();
            return Err(e.into());
        }
        let message = ContactMessage::from_form(form);
        let record = serde_json::to_value(&message).map_err(|e| ServiceError::Io(e.to_string()))?;

        match self.remote.set(&Self::message_path(&message.id), record).await {
            Ok(()) => {
                CONTACT_SUBMISSIONS_TOTAL.with_label_values(&["stored"]).inc();
                info!(message_id = %message.id, "contact message saved to remote store");
                Ok(message)
            }
            Err(e) => {
                REMOTE_STORE_ERRORS_TOTAL.inc();
                CONTACT_SUBMISSIONS_TOTAL.with_label_values(&["failed"]).inc();
                error!(message_id = %message.id, error = %e, "failed to save contact message");
                match self.backups.write(&message).await {
                    Ok(path) => {
                        BACKUP_WRITES_TOTAL.inc();
                        info!(message_id = %message.id, path = %path.display(), "contact message saved locally as backup");
                    }
                    Err(backup_err) => {
                        error!(message_id = %message.id, error = %backup_err, "failed to save contact message backup");
                    }
                }
                Err(e)
            }
        }
    }

    /// All messages, seed and live merged.
    pub async fn list(&self) -> Map<String, Value> {
        self.catalog.merged(CONTACT_MESSAGES).await
    }

    /// Validate a raw PATCH body and write the new status. The id must address a
    /// single child of `contact_messages`.
    #[instrument(skip(self, payload))]
    pub async fn update_status(&self, id: &str, payload: &Value) -> Result<StatusUpdate, ServiceError> {
        let update = StatusUpdate::from_payload(payload)?;
        validate_message_id(id)?;
        self.remote
            .update(&Self::message_path(id), update.to_fields())
            .await
            .map_err(|e| {
                REMOTE_STORE_ERRORS_TOTAL.inc();
                error!(message_id = %id, error = %e, "failed to update contact message");
                e
            })?;
        info!(message_id = %id, status = %update.status, "contact message status updated");
        Ok(update)
    }
}
