use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;
use std::{fs, path::Path};
use url::Url;
use xmedia::DEFAULT_API_HOST;

pub const BEARER_TOKEN_VAR: &str = "TWITTER_BEARER_TOKEN";

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    api_host: Option<Url>,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigEnv {
    twitter_api_host: Option<Url>,
    twitter_bearer_token: Option<String>,
}

pub struct Config {
    pub api_host: Url,
    pub bearer_token: String,
}

fn merge_config(base: ConfigFile, override_config: ConfigEnv) -> Result<Config> {
    let api_host = match override_config.twitter_api_host.or(base.api_host) {
        Some(host) => host,
        None => Url::parse(DEFAULT_API_HOST)?,
    };

    let bearer_token = override_config
        .twitter_bearer_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| anyhow!("{BEARER_TOKEN_VAR} environment variable is required"))?;

    Ok(Config {
        api_host,
        bearer_token,
    })
}

pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    match fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display())),
        Err(_) => Ok(ConfigFile::default()),
    }
}

pub fn read_config() -> Result<Config> {
    let _ = dotenv();
    let env_config = envy::from_env::<ConfigEnv>().unwrap_or_default();

    let project_dirs = directories::ProjectDirs::from("com", "xmedia", "xmedia")
        .ok_or(anyhow!("Unable to determine home directory"))?;
    let file_config = load_config_file(&project_dirs.config_dir().join("config.toml"))?;

    merge_config(file_config, env_config)
}
