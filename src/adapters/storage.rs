use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use std::path::{Path, PathBuf};

/// Writes artifacts below `base_path`, creating parent directories on demand.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir(parent).await?;
        }

        tokio::fs::write(&full_path, data)
            .await
            .map_err(|e| EtlError::filesystem(full_path.display().to_string(), e))?;

        tracing::debug!("Wrote {} ({} bytes)", full_path.display(), data.len());
        Ok(())
    }
}

async fn create_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| EtlError::filesystem(dir.display().to_string(), e))
}
