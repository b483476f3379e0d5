pub mod builder;
pub mod client;
pub mod message;

pub use builder::ConversationBuilder;
pub use client::ModelClient;
