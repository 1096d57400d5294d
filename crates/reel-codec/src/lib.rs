// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Flattened, index-addressed form of a Reel story graph.
//!
//! This crate provides:
//! - the persisted schema ([`PersistedGraph`]) shared by the editor and the player
//! - [`flatten`]: handles → 0-based indices (`-1` for "no reference")
//! - [`resolve`]: indices → handles, in two passes (all nodes, then all links)
//! - JSON encode/decode and a content hash for change detection
//!
//! # Design
//!
//! Serialization is kept out of `reel-graph` so the graph model stays free of
//! wire concerns. Corrupt indices never abort a load: the offending
//! relationship is dropped and reported as a [`StructuralError`].

mod flatten;
mod json;
mod resolve;
mod schema;

pub use flatten::flatten;
pub use json::{from_json, to_json_pretty};
pub use resolve::{resolve, Resolution};
pub use schema::{IndexRef, OptionNodeRecord, PersistedGraph, VideoNodeRecord, NO_REF};

use thiserror::Error;

/// A relationship in persisted data that could not be honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// `parentVideoIndex` is neither `-1` nor a valid video index.
    #[error("option {option}: parentVideoIndex {index} outside 0..{len}")]
    ParentOutOfRange {
        /// Option record position.
        option: usize,
        /// Raw index found.
        index: i32,
        /// Number of video records.
        len: usize,
    },
    /// `childVideoIndex` is neither `-1` nor a valid video index.
    #[error("option {option}: childVideoIndex {index} outside 0..{len}")]
    ChildOutOfRange {
        /// Option record position.
        option: usize,
        /// Raw index found.
        index: i32,
        /// Number of video records.
        len: usize,
    },
    /// An `optionChildIndices` entry is not a valid option index.
    #[error("video {video}: optionChildIndices entry {index} outside 0..{len}")]
    OptionChildOutOfRange {
        /// Video record position.
        video: usize,
        /// Raw index found.
        index: i32,
        /// Number of option records.
        len: usize,
    },
    /// A video lists an option whose `parentVideoIndex` names another video.
    #[error("video {video} lists option {option} whose parentVideoIndex disagrees")]
    OptionChildMismatch {
        /// Video record position.
        video: usize,
        /// Option record position.
        option: usize,
    },
    /// An option is listed more than once as a child.
    #[error("video {video} lists option {option} again")]
    DuplicateOptionChild {
        /// Video record position holding the repeat.
        video: usize,
        /// Option record position.
        option: usize,
    },
}

/// Error type for codec entry points.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes are not valid story JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Strict resolution found structural problems.
    #[error("corrupt story data ({} structural errors)", .0.len())]
    Corrupt(Vec<StructuralError>),
}
