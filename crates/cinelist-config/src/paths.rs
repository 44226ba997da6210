use anyhow::Result;
use std::path::{Path, PathBuf};

/// `CINELIST_HOME`, when set, relocates every path under one directory
pub fn home_override() -> Option<PathBuf> {
    std::env::var_os("CINELIST_HOME").map(PathBuf::from)
}

#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("cinelist");
        let data_dir = dirs::data_dir()
            .map(|d| d.join("cinelist"))
            .unwrap_or_else(|| config_dir.join("data"));

        Ok(Self {
            log_dir: data_dir.join("logs"),
            config_dir,
            data_dir,
        })
    }

    /// Everything under a single base directory (containers, tests)
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Default location of the list store
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join("storage")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("cinelist.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        std::fs::create_dir_all(self.storage_dir())?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = home_override() {
            return Self::from_base(base);
        }

        // Platform paths (e.g. ~/.config/cinelist on Linux), falling back to the working directory
        Self::new().unwrap_or_else(|_| Self::from_base(".cinelist"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base_layout() {
        let paths = PathManager::from_base("/srv/cinelist");
        assert_eq!(paths.config_file(), PathBuf::from("/srv/cinelist/config.toml"));
        assert_eq!(paths.storage_dir(), PathBuf::from("/srv/cinelist/data/storage"));
        assert_eq!(paths.log_file(), PathBuf::from("/srv/cinelist/logs/cinelist.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path());
        paths.ensure_directories().unwrap();
        assert!(paths.storage_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }
}
