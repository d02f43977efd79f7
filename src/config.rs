use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::carousel::{CarouselConfig, DEALS_INTERVAL, HERO_INTERVAL, RESUME_DELAY};
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub hero_interval_ms: u64,
    pub deals_interval_ms: u64,
    pub resume_delay_ms: u64,
    pub hero_start_delay_ms: u64,
    pub deals_visible: usize,
    pub transition_ms: u64,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hero_interval_ms: HERO_INTERVAL.as_millis() as u64,
            deals_interval_ms: DEALS_INTERVAL.as_millis() as u64,
            resume_delay_ms: RESUME_DELAY.as_millis() as u64,
            hero_start_delay_ms: 500,
            deals_visible: 4,
            transition_ms: 500,
            tick_rate_ms: 100,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("hero_interval_ms", self.hero_interval_ms),
            ("deals_interval_ms", self.deals_interval_ms),
            ("tick_rate_ms", self.tick_rate_ms),
            ("deals_visible", self.deals_visible as u64),
        ];
        match required.iter().find(|(_, v)| *v == 0) {
            Some((field, _)) => Err(ConfigError::Zero { field: *field }),
            None => Ok(()),
        }
    }

    pub fn hero_carousel(&self) -> CarouselConfig {
        CarouselConfig::new(
            Duration::from_millis(self.hero_interval_ms),
            Duration::from_millis(self.resume_delay_ms),
        )
        .with_start_delay(Duration::from_millis(self.hero_start_delay_ms))
    }

    pub fn deals_carousel(&self) -> CarouselConfig {
        CarouselConfig::new(
            Duration::from_millis(self.deals_interval_ms),
            Duration::from_millis(self.resume_delay_ms),
        )
    }

    pub fn deals_visible(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.deals_visible).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "pumpdeck") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("pumpdeck_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable config: {e}");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
