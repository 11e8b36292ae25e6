pub mod backlog;
pub mod config;
pub mod document;
pub mod error;
pub mod inventory;
pub mod io;
pub mod paths;
pub mod phase;
pub mod prompt;
pub mod review;
pub mod roadmap;
pub mod store;
pub mod tree;
pub mod types;

pub use error::{ArchitectError, Result};
