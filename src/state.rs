use std::sync::Arc;

use crate::config::Config;
use crate::directory::Directory;
use crate::notify::Notifier;

/// Shared by every worker; nothing in here is mutated after start-up.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
    pub notifier: Arc<dyn Notifier>,
    pub display_date_format: String,
    pub list_view_path: String,
}

impl AppState {
    pub fn new(config: &Config, directory: Directory, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            directory: Arc::new(directory),
            notifier,
            display_date_format: config.display_date_format.clone(),
            list_view_path: config.list_view_path.clone(),
        }
    }
}
