//! `AppRepository` backed by a process-local map.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{AppRepository, AppRepositoryError};
use crate::domain::{App, AppId};

/// In-memory app catalogue.
///
/// # Examples
/// ```
/// use sso::domain::{App, AppId, AppSecret};
/// use sso::outbound::memory::InMemoryAppRepository;
///
/// let apps = InMemoryAppRepository::new([App::new(AppId::new(1), "billing", AppSecret::new("s"))]);
/// apps.insert(App::new(AppId::new(2), "crm", AppSecret::new("t"))).unwrap();
/// ```
#[derive(Default)]
pub struct InMemoryAppRepository {
    apps: RwLock<HashMap<AppId, App>>,
}

impl InMemoryAppRepository {
    /// Seed the catalogue. Later entries replace earlier ones with the same id.
    pub fn new(apps: impl IntoIterator<Item = App>) -> Self {
        Self {
            apps: RwLock::new(apps.into_iter().map(|app| (app.id(), app)).collect()),
        }
    }

    /// Add or replace an app.
    pub fn insert(&self, app: App) -> Result<(), AppRepositoryError> {
        self.apps
            .write()
            .map_err(|_| AppRepositoryError::query("app store lock poisoned"))?
            .insert(app.id(), app);
        Ok(())
    }
}

#[async_trait]
impl AppRepository for InMemoryAppRepository {
    async fn find_by_id(&self, id: AppId) -> Result<Option<App>, AppRepositoryError> {
        let apps = self
            .apps
            .read()
            .map_err(|_| AppRepositoryError::query("app store lock poisoned"))?;
        Ok(apps.get(&id).cloned())
    }
}
