use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

mod config_dir;
pub use config_dir::{find_config_file, read_config};

mod error;
pub use error::{ConfigError, ConfigResult};
use tokio::sync::OnceCell;

#[derive(Debug, Deserialize)]
pub struct Config {
    host: Host,
    app: App,
}

#[derive(Debug, Deserialize)]
pub struct Host {
    bindto: String,
}

#[derive(Debug, Deserialize)]
pub struct App {
    jwt: String,
    database_uri: String,
    #[serde(default = "default_uploads_dir")]
    uploads_dir: String,
    /// Largest request body accepted by forms that carry file uploads.
    #[serde(default = "default_max_upload_bytes")]
    max_upload_bytes: usize,
}

fn default_uploads_dir() -> String {
    String::from("uploads")
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Config {
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                match Self::load(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        if !matches!(e, error::ConfigError::ConfigNotFound) {
                            crate::error::log_error(&e);
                        }
                        tracing::error!("Config not found.");
                        std::process::exit(1);
                    }
                }
            })
            .await
    }

    pub fn load(use_local: bool) -> ConfigResult<Self> {
        let bytes = read_config(use_local)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> ConfigResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(|_| ConfigError::InvalidEncoding)?;
        let config: Self = toml::from_str(text)?;
        Ok(config)
    }

    #[inline]
    pub fn host(&self) -> &Host {
        &self.host
    }

    #[inline]
    pub fn app(&self) -> &App {
        &self.app
    }
}

impl Host {
    #[inline]
    pub fn bindto(&self) -> &str {
        &self.bindto
    }
}

impl App {
    #[inline]
    pub fn jwt(&self) -> &str {
        &self.jwt
    }

    #[inline]
    pub fn database_uri(&self) -> &str {
        &self.database_uri
    }

    #[inline]
    pub fn uploads_dir(&self) -> &str {
        &self.uploads_dir
    }

    #[inline]
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
