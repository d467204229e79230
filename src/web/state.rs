use std::path::{Path, PathBuf};

use crate::model::ModelManager;

#[derive(Debug, Clone)]
pub struct AppState {
    mm: ModelManager,
    uploads_dir: PathBuf,
    max_upload_bytes: usize,
}

impl AppState {
    pub fn new<P: Into<PathBuf>>(
        mm: ModelManager,
        uploads_dir: P,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            mm,
            uploads_dir: uploads_dir.into(),
            max_upload_bytes,
        }
    }

    pub fn pool(&self) -> &ModelManager {
        &self.mm
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
