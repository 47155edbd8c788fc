use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::game::SessionConfig;
use crate::scoreboard::SCOREBOARD_CAP;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub round_secs: u32,
    pub countdown_ticks: u32,
    pub scoreboard_cap: usize,
    pub match_case: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            round_secs: 20,
            countdown_ticks: 3,
            scoreboard_cap: SCOREBOARD_CAP,
            match_case: false,
        }
    }
}

impl Config {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            round_secs: self.round_secs,
            countdown_ticks: self.countdown_ticks,
            match_case: self.match_case,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "lightspeed") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("lightspeed_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            round_secs: 99,
            countdown_ticks: 5,
            scoreboard_cap: 9,
            match_case: true,
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_or_malformed_config_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config::default());

        fs::write(&path, b"{{{").unwrap();
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn session_config_mirrors_round_settings() {
        let cfg = Config {
            round_secs: 15,
            countdown_ticks: 3,
            scoreboard_cap: 10,
            match_case: true,
        };
        let sc = cfg.session_config();
        assert_eq!(sc.round_secs, 15);
        assert_eq!(sc.countdown_ticks, 3);
        assert!(sc.match_case);
    }
}
