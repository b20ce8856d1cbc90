pub mod cache;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod query;
pub mod repository;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

pub use self::{
    cache::{CacheKey, PostDetail, QueryCache},
    config::ClientConfig,
    content::{Category, DraftPost, Post, PostId, validate},
    error::{Error, ErrorKind, Result},
    query::{FilterSpec, SortDirection, SortField, apply},
    repository::{BlogRepository, HttpRepository},
};

pub async fn run() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("BLOGDECK_LOG"))
        .init();

    cli::run().await
}
