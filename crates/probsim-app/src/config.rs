use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

pub const CONFIG_ENV: &str = "PROBSIM_CONFIG";
pub const SEED_ENV: &str = "PROBSIM_SEED";
pub const DEFAULT_CONFIG_FILE: &str = "probsim.yaml";

const DEFAULT_FRAMES: u32 = 10;
const DEFAULT_FRAME_DELAY_MS: u64 = 100;
const MAX_FRAMES: u32 = 1_000;

/// Root application configuration, loaded from YAML.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: AppConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Resolve the config file from `PROBSIM_CONFIG`, then `./probsim.yaml`,
    /// then built-in defaults. `PROBSIM_SEED` overrides the file's seed.
    pub fn discover() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut cfg = match explicit {
            Some(path) => Self::from_path(path)?,
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    Self::from_path(local)?
                } else {
                    Self::default()
                }
            }
        };
        if let Ok(raw) = std::env::var(SEED_ENV) {
            cfg.apply_seed_override(&raw)?;
        }
        Ok(cfg)
    }

    pub fn apply_seed_override(&mut self, raw: &str) -> Result<(), ValidationError> {
        let seed = raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ValidationError::InvalidField {
                field: SEED_ENV.to_string(),
                message: format!("'{raw}' is not an unsigned integer"),
            })?;
        self.seed = Some(seed);
        Ok(())
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.animation.validate()?;
        self.assets.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnimationConfig {
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        }
    }
}

impl AnimationConfig {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.frame_delay_ms == 0 {
            return Err(ValidationError::InvalidField {
                field: "animation.frame_delay_ms".to_string(),
                message: "frame delay must be greater than zero".to_string(),
            });
        }
        if self.frames > MAX_FRAMES {
            return Err(ValidationError::InvalidField {
                field: "animation.frames".to_string(),
                message: format!("at most {MAX_FRAMES} frames are supported"),
            });
        }
        Ok(())
    }
}

fn default_frames() -> u32 {
    DEFAULT_FRAMES
}

fn default_frame_delay_ms() -> u64 {
    DEFAULT_FRAME_DELAY_MS
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AssetsConfig {
    /// Overrides the manifest's asset root directory.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

impl AssetsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(root) = &self.root {
            if root.as_os_str().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: "assets.root".to_string(),
                    message: "asset root must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub json: bool,
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            json: false,
            file: default_log_file(),
        }
    }
}

impl LoggingConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }
        if self.file.as_os_str().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "logging.file".to_string(),
                message: "log file path must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("probsim.log")
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
    #[error(transparent)]
    Override(#[from] ValidationError),
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
