// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer: the configuration store and reference resolution.

pub mod config_store;
pub mod interpolation;

pub use config_store::{ConfigStore, CONFIG_FILE_NAME};
