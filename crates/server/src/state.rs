use std::sync::Arc;

use service::catalog::CatalogService;
use service::contact::ContactService;
use service::remote::RemoteStore;
use service::storage::{backup::BackupWriter, seed::SeedData};

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub catalog: CatalogService,
    pub contacts: ContactService,
}

impl ServerState {
    pub fn new(seed: SeedData, remote: Arc<dyn RemoteStore>, backups: BackupWriter) -> Self {
        let catalog = CatalogService::new(Arc::new(seed), Arc::clone(&remote));
        let contacts = ContactService::new(remote, catalog.clone(), backups);
        Self { catalog, contacts }
    }
}
