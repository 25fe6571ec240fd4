use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub trait ConfigContentProvider {
    fn get_config_content(&self) -> Result<Option<String>, String>;
    fn set_config_content(&self, content: &str) -> Result<(), String>;
}

pub struct FileContentConfigProvider {
    file_path: PathBuf,
}

impl FileContentConfigProvider {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Ok(None),
                _ => Err(format!(
                    "Failed to read {}: {}",
                    self.file_path.display(),
                    err
                )),
            },
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                format!("Failed to create directory {}: {}", parent.display(), e)
            })?;
        }
        std::fs::write(&self.file_path, content)
            .map_err(|e| format!("Failed to write {}: {}", self.file_path.display(), e))
    }
}

/// Keeps content in memory. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemoryContentConfigProvider {
    content: Arc<Mutex<Option<String>>>,
}

impl MemoryContentConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: &str) -> Self {
        Self {
            content: Arc::new(Mutex::new(Some(content.to_string()))),
        }
    }
}

impl ConfigContentProvider for MemoryContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        let content = self
            .content
            .lock()
            .map_err(|e| format!("Config buffer lock poisoned: {}", e))?;
        Ok(content.clone())
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        let mut current = self
            .content
            .lock()
            .map_err(|e| format!("Config buffer lock poisoned: {}", e))?;
        *current = Some(content.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir()
            .join(format!("snake_provider_test_{}", random_number))
            .join("content.yaml")
    }

    #[test]
    fn test_missing_file_returns_none() {
        let provider = FileContentConfigProvider::new(get_temp_file_path());
        assert_eq!(provider.get_config_content(), Ok(None));
    }

    #[test]
    fn test_write_creates_parent_directory() {
        let path = get_temp_file_path();
        let provider = FileContentConfigProvider::new(path.clone());
        provider.set_config_content("a: 1\n").unwrap();
        assert_eq!(provider.get_config_content().unwrap().as_deref(), Some("a: 1\n"));
        assert!(path.exists());
    }

    #[test]
    fn test_memory_provider_clones_share_content() {
        let provider = MemoryContentConfigProvider::new();
        let other = provider.clone();
        provider.set_config_content("x").unwrap();
        assert_eq!(other.get_config_content().unwrap().as_deref(), Some("x"));
    }
}
