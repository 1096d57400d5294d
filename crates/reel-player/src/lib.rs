// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Runtime traversal of a flattened Reel story.
//!
//! The player never sees editor handles. It walks a [`PersistedGraph`]
//! directly: the current video is an index, its choices come from
//! `optionChildIndices`, and the next video from an option's
//! `childVideoIndex`.
//!
//! # Design
//!
//! Decoding and presenting video is outside this crate. A host implements
//! [`PlaybackDriver`] (play/stop/pause and a progress fraction) and
//! [`ResourceStore`] (clip path → playable clip), then calls
//! [`Traversal::tick`] once per frame. Each tick samples progress and returns
//! the transitions it caused as [`TraversalEvent`]s; the host shows or enables
//! the choice panel in response and forwards the player's pick to
//! [`Traversal::select_option`].
//!
//! [`PersistedGraph`]: reel_codec::PersistedGraph

mod port;
mod thresholds;
mod traversal;

pub use port::{progress_from_frames, progress_from_time, PlaybackDriver, ResourceError, ResourceStore};
pub use thresholds::{ThresholdError, Thresholds};
pub use traversal::{Choice, PlaybackError, PlaybackState, Traversal, TraversalEvent};
