mod apportion;
mod convert;
mod info;

pub use apportion::{apportion, OutputFormat};
pub use convert::convert;
pub use info::info;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
