pub mod assistant;
#[cfg(feature = "ollama")]
pub mod client;
pub mod config;
pub mod prompts;
pub mod types;

pub use assistant::*;
#[cfg(feature = "ollama")]
pub use client::*;
pub use config::*;
pub use prompts::*;
