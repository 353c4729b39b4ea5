//! Configuration system for git-changelog

pub mod defaults;
mod loader;
mod resolver;
mod types;
pub mod validation;

pub use loader::*;
pub use resolver::*;
pub use types::*;
pub use validation::*;
