pub mod config;
pub mod error;
pub mod handler;
pub mod search;
pub mod source;

pub use error::{FeedError, Result};
