use std::path::PathBuf;

use tracing::debug;

use super::error::{ConfigError, ConfigResult};

/// Environment variable pointing straight at a config file. Wins over every other location.
pub static CONFIG_ENV: &str = "COURSEWARE_CONFIG";

static LOCAL_CONFIG: &str = "./config.toml";

/// Per-user config location: `$XDG_CONFIG_HOME/<app>/config.toml`, falling back to
/// `$HOME/.config/<app>/config.toml` on unix and `%APPDATA%\<app>\config.toml` on windows.
fn user_config_file() -> Option<PathBuf> {
    let app_name = crate::APPLICATION_NAME;

    #[cfg(unix)]
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")));
    #[cfg(windows)]
    let base = std::env::var_os("APPDATA").map(PathBuf::from);
    #[cfg(not(any(unix, windows)))]
    let base: Option<PathBuf> = None;

    base.map(|dir| dir.join(app_name).join("config.toml"))
}

pub fn find_config_file(use_local: bool) -> PathBuf {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(explicit);
    }

    if use_local {
        return PathBuf::from(LOCAL_CONFIG);
    }

    match user_config_file() {
        Some(path) if path.exists() => path,
        _ => PathBuf::from(LOCAL_CONFIG),
    }
}

pub fn read_config(use_local: bool) -> ConfigResult<Vec<u8>> {
    let filename = find_config_file(use_local);

    tracing::trace!("looking for config at: {}", filename.display());
    if !filename.exists() {
        return Err(ConfigError::ConfigNotFound);
    }

    let filename = filename.canonicalize()?;
    debug!("using {} as configuration file", filename.display());

    Ok(std::fs::read(filename)?)
}

#[cfg(test)]
mod test {
    use std::env;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn local_lookup_uses_working_directory() {
        if env::var_os(CONFIG_ENV).is_some() {
            return;
        }
        let path = find_config_file(true);
        assert_eq!(path, PathBuf::from("./config.toml"));
    }

    #[test]
    fn user_config_lives_under_app_directory() {
        let Some(path) = user_config_file() else {
            return;
        };
        assert!(path.ends_with(PathBuf::from(crate::APPLICATION_NAME).join("config.toml")));
    }
}
