use anyhow::bail;
use thiserror::Error;

use super::structure::{ChatBotConfigInner, ChatBotConfigTOML, DISCORD_MESSAGE_LIMIT};
use std::{ops::Deref, path::PathBuf};

pub const TOKEN_ENV: &str = "DISCORD_TOKEN";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no discord token configured, set `{env}` or `config.discord.token`", env = TOKEN_ENV)]
    MissingToken,
    #[error("discord token is malformed")]
    InvalidToken,
    #[error("trigger prefix must not be empty")]
    EmptyPrefix,
    #[error("chunk size must be between 1 and {max}, got {0}", max = DISCORD_MESSAGE_LIMIT)]
    ChunkSize(usize),
    #[error("invalid llm endpoint \"{0}\"")]
    Endpoint(String),
}

#[derive(Debug, Clone)]
pub struct ChatBotConfig {
    pub path: PathBuf,
    cached: ChatBotConfigTOML,
}

impl ChatBotConfig {
    pub fn read(path: PathBuf) -> Result<Self, anyhow::Error> {
        let path = match path.is_dir() {
            true => path.join("config.toml"),
            false => path,
        };

        if !path.exists() {
            log::warn!(
                "no config found at {}, writing a default one",
                path.display()
            );
            return Ok(Self::new(path)?);
        }

        if !path.is_file() {
            bail!(
                "Given path exists and is not a file... either change the path or delete the file."
            );
        }

        let config_str = std::fs::read_to_string(&path)?;

        Ok(Self {
            path,
            cached: toml::from_str(&config_str)?,
        })
    }

    fn new(path: PathBuf) -> Result<Self, anyhow::Error> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let config = Self {
            path,
            cached: ChatBotConfigTOML::default(),
        };

        config.save()?;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        std::fs::write(&self.path, toml::to_string(&self.cached)?)?;

        Ok(())
    }

    /// Lets a non-empty token from the environment take precedence over the file.
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.cached.config.discord.token = token.trim().to_string();
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let config = &self.cached.config;

        if config.discord.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if serenity::utils::validate_token(&config.discord.token).is_err() {
            return Err(ConfigError::InvalidToken);
        }
        if config.discord.prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        if !(1..=DISCORD_MESSAGE_LIMIT).contains(&config.discord.chunk_size) {
            return Err(ConfigError::ChunkSize(config.discord.chunk_size));
        }

        match reqwest::Url::parse(&config.llm.endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(ConfigError::Endpoint(config.llm.endpoint.clone())),
        }
    }

    #[cfg(test)]
    pub fn from_inner(config: ChatBotConfigInner) -> Self {
        Self {
            path: PathBuf::from("config.toml"),
            cached: ChatBotConfigTOML { config },
        }
    }
}

impl Deref for ChatBotConfig {
    type Target = ChatBotConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.cached.config
    }
}
