pub mod catalog;
pub mod config;
pub mod cursor;
pub mod error;
pub mod frontmatter;
pub mod io;
pub mod link;
pub mod paths;
pub mod tool;

pub use error::{KitError, Result};
