use colog::format::CologStyle;
use env_logger::Builder;
use log::{Level, LevelFilter};

/// Three-letter level tags, so log lines stay aligned.
struct LevelTokens;

impl CologStyle for LevelTokens {
    fn level_token(&self, level: &Level) -> &str {
        match *level {
            Level::Error => "ERR",
            Level::Warn => "WRN",
            Level::Info => "INF",
            Level::Debug => "DBG",
            Level::Trace => "TRC",
        }
    }
}

pub struct Logger;

impl Logger {
    pub fn init(level: Option<LevelFilter>) {
        Builder::new()
            .filter(Some("chatrelay"), level.unwrap_or(LevelFilter::Info))
            .filter(Some("reqwest"), LevelFilter::Warn)
            .filter(Some("serenity"), LevelFilter::Warn)
            .target(env_logger::Target::Stdout)
            .format(colog::formatter(LevelTokens))
            .write_style(env_logger::WriteStyle::Always)
            .init();
    }

    /// Level requested through `RUST_LOG`, when it names a plain level like `debug`.
    pub fn level_from_env() -> Option<LevelFilter> {
        std::env::var("RUST_LOG").ok()?.trim().parse().ok()
    }
}
