// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing document source implementations.
//!
//! Each adapter implements a port from the ports layer: `YamlParser` is a
//! `ConfigParser`, while `YamlFileAdapter` and `InMemoryAdapter` are
//! `DocumentSource`s the store can load and reload from.

pub mod memory;
pub mod yaml_file;

pub use memory::InMemoryAdapter;
pub use yaml_file::{YamlFileAdapter, YamlParser};
