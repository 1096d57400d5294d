// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for Reel crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`playback`] - Scripted playback driver and map-backed resource store
//! - [`stories`] - Ready-made stories in both editor and persisted form

pub mod config;
pub mod playback;
pub mod stories;

pub use config::InMemoryConfigStore;
pub use playback::{MapResourceStore, ScriptedDriver};
pub use stories::{branching_story, broken_story, editor_story, EditorStory};
