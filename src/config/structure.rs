use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serenity::all::ChannelId;

/// Discord's hard cap on message length, in characters.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ChatBotConfigTOML {
    pub config: ChatBotConfigInner,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ChatBotConfigInner {
    pub discord: DiscordConfig,
    pub llm: LLMConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DiscordConfig {
    pub token: String,
    #[serde(default)]
    pub allowed_channels: Vec<u64>,
    pub prefix: String,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            allowed_channels: Vec::new(),
            prefix: "!".to_string(),
            chunk_size: DISCORD_MESSAGE_LIMIT,
        }
    }
}

fn default_chunk_size() -> usize {
    DISCORD_MESSAGE_LIMIT
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LLMConfig {
    pub endpoint: String,
    pub system_prompt: String,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:1234/v1/chat/completions".to_string(),
            system_prompt: "You are a helpful assistant chatting in a Discord channel.".to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

/// Read-only view of the settings the message flow needs, built once at startup.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub allowed_channels: HashSet<ChannelId>,
    pub prefix: String,
    pub chunk_size: usize,
    pub system_prompt: String,
}

impl From<&ChatBotConfigInner> for RelaySettings {
    fn from(config: &ChatBotConfigInner) -> Self {
        Self {
            allowed_channels: config
                .discord
                .allowed_channels
                .iter()
                .copied()
                .filter(|id| *id != 0)
                .map(ChannelId::new)
                .collect(),
            prefix: config.discord.prefix.clone(),
            chunk_size: config.discord.chunk_size,
            system_prompt: config.llm.system_prompt.clone(),
        }
    }
}
