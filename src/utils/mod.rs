pub mod config;
pub mod download;
pub mod init;

pub use config::AppConfig;
pub use download::{ModelDownloader, ModelPaths};
pub use init::{init, init_generator};
