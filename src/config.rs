use std::fs;
use std::time::Duration;

use camino::Utf8PathBuf;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::HelperError;
use crate::issue_url::DEFAULT_ISSUE_HOST;
use crate::sparql::WIKIDATA_ENDPOINT;

pub const CONFIG_FILE_NAME: &str = "wd-ontology.json";
pub const DEFAULT_ATTRIBUTION: &str = "https://orcid.org/0000-0003-2473-2313";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub issue_host: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub attribution: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub issue_host: String,
    pub language: String,
    pub attribution: String,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        ConfigLoader::resolve_config(Config::default())
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<Settings, HelperError> {
        let config_path = match path {
            Some(path) => Some(Utf8PathBuf::from(path)),
            None => Self::discover(),
        };
        let Some(config_path) = config_path else {
            debug!("no config file found, using defaults");
            return Ok(Self::resolve_config(Config::default()));
        };

        debug!(path = %config_path, "loading config");
        let content = fs::read_to_string(&config_path)
            .map_err(|_| HelperError::ConfigRead(config_path.clone().into_std_path_buf()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| HelperError::ConfigParse(err.to_string()))?;
        Ok(Self::resolve_config(config))
    }

    pub fn resolve_config(config: Config) -> Settings {
        Settings {
            endpoint: config
                .endpoint
                .unwrap_or_else(|| WIKIDATA_ENDPOINT.to_string()),
            issue_host: config
                .issue_host
                .unwrap_or_else(|| DEFAULT_ISSUE_HOST.to_string()),
            language: config
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            attribution: config
                .attribution
                .unwrap_or_else(|| DEFAULT_ATTRIBUTION.to_string()),
            timeout: Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }

    fn discover() -> Option<Utf8PathBuf> {
        let local = Utf8PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }
        ProjectDirs::from("org", "obophenotype", "wd-ontology")
            .and_then(|dirs| Utf8PathBuf::from_path_buf(dirs.config_dir().join("config.json")).ok())
            .filter(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let settings = ConfigLoader::resolve_config(Config::default());
        assert_eq!(settings.endpoint, WIKIDATA_ENDPOINT);
        assert_eq!(settings.issue_host, "github.com");
        assert_eq!(settings.language, "en");
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }
}
