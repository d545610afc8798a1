//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, ChunkingSettings, LogFormat, LoggingConfig, RetrievalSettings, ServerConfig,
};
