pub mod store;
pub mod structure;

pub use store::{ChatBotConfig, TOKEN_ENV};
pub use structure::RelaySettings;
