// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ports the host implements: a playback surface and a clip resolver.

use reel_graph::ClipPath;
use thiserror::Error;

/// Playback surface driven by a [`Traversal`](crate::Traversal).
///
/// Implementors own decoding and presentation. The traversal only starts,
/// stops and pauses clips and reads back how far the current one has played.
pub trait PlaybackDriver {
    /// Playable clip handle produced by the matching [`ResourceStore`].
    type Clip;

    /// Replace whatever is playing with `clip` and start it from the beginning.
    fn play(&mut self, clip: &Self::Clip);

    /// Stop playback. `progress` returns `None` until the next `play`.
    fn stop(&mut self);

    /// Pause in place.
    fn pause(&mut self);

    /// Fraction of the current clip played so far, in `[0, 1]`.
    ///
    /// `None` while nothing is playing or when the clip length is unknown or
    /// zero; the traversal treats that as "no sample" rather than zero.
    fn progress(&self) -> Option<f32>;
}

/// Resolves a persisted clip path to something a [`PlaybackDriver`] can play.
pub trait ResourceStore {
    /// Clip handle type; must match the driver's.
    type Clip;

    /// Look up the clip for `path`.
    fn resolve(&self, path: &ClipPath) -> Result<Self::Clip, ResourceError>;
}

/// A clip could not be made playable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// No resource exists for the path.
    #[error("clip not found: {path}")]
    NotFound {
        /// Resource-relative path that was looked up.
        path: String,
    },
    /// The video record names no clip at all.
    #[error("video {video} has no clip path")]
    EmptyPath {
        /// Video record position.
        video: usize,
    },
}

/// Progress fraction from a playback clock.
///
/// Returns `None` for a non-positive or non-finite `length`. The ratio is
/// clamped to `[0, 1]`.
#[allow(clippy::cast_possible_truncation)]
pub fn progress_from_time(time: f64, length: f64) -> Option<f32> {
    if !(length.is_finite() && length > 0.0) || time.is_nan() {
        return None;
    }
    Some((time / length).clamp(0.0, 1.0) as f32)
}

/// Progress fraction from a frame counter. `None` when `frame_count` is zero.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn progress_from_frames(frame: u64, frame_count: u64) -> Option<f32> {
    if frame_count == 0 {
        return None;
    }
    Some((frame as f64 / frame_count as f64).min(1.0) as f32)
}
