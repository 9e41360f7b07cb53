// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! The store depends only on these traits; the adapters layer supplies the
//! concrete YAML and in-memory implementations.

pub mod parser;
pub mod source;

// Re-export commonly used types
pub use parser::ConfigParser;
pub use source::DocumentSource;
