use exer_webclient::{ApiConfig, Url};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{cmd::GlobalArgs, util};

pub const APP_NAME: &str = "exer";
pub const BIN_NAME: &str = "exer";
pub const ENV_PREFIX: &str = "EXER_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config: {0}")]
    Read(#[from] fsutil::Error),

    #[error("Invalid config '{0}': {1}")]
    InvalidToml(PathBuf, #[source] toml::de::Error),

    #[error("Invalid environment variable: {0}")]
    Env(#[from] envy::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default = "GlobalConfig::default_workspace")]
    pub workspace: PathBuf,

    #[serde(default)]
    pub api: ApiConfig,
}

/// Overrides read from `EXER_*` environment variables.
#[derive(Debug, Deserialize)]
struct EnvOverrides {
    workspace: Option<PathBuf>,
    api_base_url: Option<Url>,
    token: Option<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            workspace: Self::default_workspace(),
            api: ApiConfig::default(),
        }
    }
}

impl GlobalConfig {
    pub const FILENAME: &str = "config.toml";

    pub fn filepath() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(Self::FILENAME))
    }

    fn default_workspace() -> PathBuf {
        dirs::home_dir().unwrap_or_default().join("exercism")
    }

    pub fn from_toml(s: &str, source: impl AsRef<Path>) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| {
            ConfigError::InvalidToml(util::replace_homedir_to_tilde(source.as_ref()), e)
        })
    }

    /// Load `path`, falling back to the defaults when the file does not exist.
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fsutil::read_to_string(path) {
            Ok(toml) => Self::from_toml(&toml, path),
            Err(e) if e.is_not_found() => {
                log::debug!("No config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn with_env_vars<I>(mut self, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let EnvOverrides {
            workspace,
            api_base_url,
            token,
        } = envy::prefixed(ENV_PREFIX).from_iter(vars)?;

        if let Some(d) = workspace {
            self.workspace = d;
        }
        if let Some(url) = api_base_url {
            self.api.base_url = url;
        }
        if let Some(token) = token {
            self.api.token = Some(token);
        }
        Ok(self)
    }

    pub fn with_args(mut self, args: &GlobalArgs) -> Self {
        let GlobalArgs {
            subcmd: _,
            workspace,
            config: _,
        } = args;

        if let Some(d) = workspace {
            self.workspace = d.clone();
        }
        self
    }

    /// Defaults < config file < `EXER_*` env vars < command-line args.
    pub fn from_file_and_args(args: &GlobalArgs) -> Result<Self, ConfigError> {
        let cfg = match args.config.clone().or_else(Self::filepath) {
            Some(path) => Self::from_file_or_default(path)?,
            None => Self::default(),
        };
        Ok(cfg.with_env_vars(std::env::vars())?.with_args(args))
    }
}
