//! quizwiz-store: durable storage backends and configuration.
//!
//! Implements the `KeyValueStore` trait over a JSON file on disk and loads
//! the quizwiz configuration that decides where that file lives and who the
//! default caller is.

pub mod config;
pub mod file;

pub use config::{load_config, load_config_from, open_store, IdentityConfig, QuizwizConfig};
pub use file::JsonFileStore;
