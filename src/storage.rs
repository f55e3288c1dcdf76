use crate::config::Config;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

/// Support de persistance du document de configuration.
pub trait Storage {
    fn load(&self) -> anyhow::Result<Config>;
    /// Écriture atomique : jamais de fichier de configuration tronqué.
    fn save(&self, config: &Config) -> anyhow::Result<()>;
}

/// Configuration dans un fichier JSON unique (groupes, horaires, réglages).
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configuration du fichier, ou celle par défaut s'il est absent (premier
    /// lancement) ou illisible. L'erreur de lecture est signalée mais jamais
    /// propagée : un site sans configuration planifie quand même, sans groupes.
    pub fn load_or_default(&self) -> Config {
        if !self.path.exists() {
            return Config::default();
        }
        match self.load() {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "config unavailable, using defaults");
                Config::default()
            }
        }
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Config> {
        let data = fs::read(&self.path)
            .with_context(|| format!("reading config {}", self.path.display()))?;
        let config: Config = serde_json::from_slice(&data)
            .with_context(|| format!("parsing config {}", self.path.display()))?;
        Ok(config)
    }

    fn save(&self, config: &Config) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(config)?;
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp =
            NamedTempFile::new_in(dir).with_context(|| "creating temp config file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}
