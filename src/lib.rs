pub mod cli;
pub mod config;
pub mod core;
pub mod crawler;
pub mod essence;
pub mod providers;
pub mod replacer;
pub mod utils;

pub use crate::core::{EssenceError, Extractor, FetchError, Media, Options, Provider};
pub use crate::essence::Essence;
pub use config::Config;
pub use crawler::Crawler;
pub use providers::{OEmbedProvider, OpenGraphProvider};
pub use replacer::Replacer;
