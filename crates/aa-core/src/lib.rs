//! aa-core: Core types and traits for article-assistant
//!
//! This crate provides the tool abstraction shared by the article tools,
//! the agent definition and the command line interface.

pub mod error;
pub mod tool;

pub use error::Error;
pub use tool::{PropertySchema, Tool, ToolDefinition, ToolOutput, ToolParameters, ToolRegistry};

pub type Result<T> = std::result::Result<T, Error>;
