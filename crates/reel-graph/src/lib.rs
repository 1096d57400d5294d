// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Story graph model shared by the Reel editor, codec, and player.
//!
//! A story is a bipartite directed graph: [`VideoNode`]s own an ordered list of
//! [`OptionNode`] children, and each option may point at one child video that
//! plays when the option is chosen.
//!
//! # Ownership
//!
//! Nodes live in one arena per kind and are addressed by generational handles
//! ([`VideoId`], [`OptionId`]). A handle to a deleted node never aliases a node
//! created later; lookups through it simply fail. Back-references (an option's
//! parent) are plain handles, never shared ownership: the parent's
//! `option_children` list is the single source of membership.
//!
//! # Invariants
//!
//! - An option whose parent is `v` appears exactly once in `v`'s children, and
//!   in no other video's children.
//! - No option refers to a deleted video as parent or child.
//!
//! [`StoryGraph::check_invariants`] verifies both; structural mutations assert
//! them in debug builds.

mod arena;
mod clip;
mod geom;
mod ids;
pub mod layout;
mod node;
mod story;

pub use clip::{ClipPath, CLIP_EXTENSIONS, RESOURCES_PREFIX};
pub use geom::{Rect, Vec2};
pub use ids::{NodeRef, OptionId, VideoId};
pub use node::{OptionNode, VideoNode};
pub use story::{InvariantViolation, StoryGraph};

use thiserror::Error;

/// Error type for structural graph mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The video handle is stale or was never issued by this graph.
    #[error("unknown video node {0}")]
    UnknownVideo(VideoId),
    /// The option handle is stale or was never issued by this graph.
    #[error("unknown option node {0}")]
    UnknownOption(OptionId),
    /// The option already belongs to a video; detach it first.
    #[error("option {option} already belongs to video {parent}")]
    AlreadyParented {
        /// Option that was asked to join a second parent.
        option: OptionId,
        /// Its current parent.
        parent: VideoId,
    },
}
