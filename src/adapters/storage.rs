use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Filesystem storage rooted at the output directory. Absolute paths are
/// used as-is.
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
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.resolve(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_round_trip_creates_nested_dirs() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("templates/out/Yankees.csv", b"a,b\n").await.unwrap();

        assert!(dir.path().join("templates/out/Yankees.csv").exists());
        assert_eq!(storage.read_file("templates/out/Yankees.csv").await.unwrap(), b"a,b\n");
    }

    #[tokio::test]
    async fn test_absolute_paths_bypass_base() {
        let base = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let target = other.path().join("template.csv");
        std::fs::write(&target, b"x").unwrap();

        let storage = LocalStorage::new(base.path());
        let data = storage.read_file(target.to_str().unwrap()).await.unwrap();
        assert_eq!(data, b"x");
    }
}
