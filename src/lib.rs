//! Fantasy Name Service
//!
//! This crate provides a small HTTP service that generates fantasy-style names,
//! sampling a pretrained GPT-2 checkpoint when it is available and falling back
//! to a rule-based generator otherwise.
//!
//! # Modules
//! - `controller`: Handles HTTP requests
//! - `entities`: Request and response data structures
//! - `error`: Crate-level error type
//! - `middleware`: Request logging and error responses
//! - `routes`: Route configuration
//! - `service`: Name generation, model sampling and experiments
//! - `utils`: Configuration, initialization and model download helpers
//!
//! # Examples
//! ```no_run
//! use actix_web::{web, App, HttpServer};
//! use fantasy_namegen::service::names::NameGenerator;
//! use fantasy_namegen::utils::AppConfig;
//! use std::sync::Arc;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = Arc::new(AppConfig::default());
//!     let generator = NameGenerator::rule_based_only();
//!     HttpServer::new(move || {
//!         App::new()
//!             .app_data(web::Data::new(config.clone()))
//!             .app_data(web::Data::new(generator.clone()))
//!             .configure(fantasy_namegen::routes::route::configure)
//!     })
//!     .bind("127.0.0.1:5000")?
//!     .run()
//!     .await
//! }
//! ```

#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en");

pub mod controller;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod utils;

pub use entities::*;
pub use error::*;
