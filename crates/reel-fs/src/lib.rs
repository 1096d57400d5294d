// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem adapters for Reel tools.
//!
//! - [`FsConfigStore`]: `ConfigStore` writing `<key>.json` files under the
//!   platform config directory or an explicit one.
//! - [`FsResourceStore`]: `ResourceStore` mapping clip paths onto video files
//!   below a clip root.

mod config;
mod resources;

pub use config::FsConfigStore;
pub use resources::{FsResourceStore, DEFAULT_EXTENSIONS};
