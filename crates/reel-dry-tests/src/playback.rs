// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Headless playback doubles.
//!
//! Clips are plain strings: [`MapResourceStore`] maps a clip path to a clip
//! name and [`ScriptedDriver`] records which names it was asked to play.
//! Tests move the playhead by hand with [`ScriptedDriver::seek`].

use std::collections::HashMap;

use reel_codec::PersistedGraph;
use reel_graph::ClipPath;
use reel_player::{PlaybackDriver, ResourceError, ResourceStore};

/// Playback driver whose progress is set by the test.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    playing: Option<String>,
    progress: f32,
    unknown_length: bool,
    paused: bool,
    played: Vec<String>,
    stop_count: usize,
}

impl ScriptedDriver {
    /// Idle driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the playhead of the current clip.
    pub fn seek(&mut self, progress: f32) {
        self.progress = progress;
    }

    /// Report no progress sample even while playing (zero-length clip).
    pub fn set_unknown_length(&mut self, unknown: bool) {
        self.unknown_length = unknown;
    }

    /// Clip currently playing.
    pub fn playing(&self) -> Option<&str> {
        self.playing.as_deref()
    }

    /// Every clip passed to `play`, in order.
    pub fn played(&self) -> &[String] {
        &self.played
    }

    /// Number of `stop` calls.
    pub fn stop_count(&self) -> usize {
        self.stop_count
    }

    /// Whether `pause` was called since the last `play`.
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl PlaybackDriver for ScriptedDriver {
    type Clip = String;

    fn play(&mut self, clip: &String) {
        self.playing = Some(clip.clone());
        self.played.push(clip.clone());
        self.progress = 0.0;
        self.paused = false;
    }

    fn stop(&mut self) {
        self.playing = None;
        self.stop_count += 1;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn progress(&self) -> Option<f32> {
        if self.playing.is_none() || self.unknown_length {
            return None;
        }
        Some(self.progress)
    }
}

/// Resource store backed by a map of clip path → clip name.
#[derive(Debug, Clone, Default)]
pub struct MapResourceStore {
    clips: HashMap<String, String>,
}

impl MapResourceStore {
    /// Empty store; every lookup fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that resolves every clip path named in `story` to itself.
    pub fn covering(story: &PersistedGraph) -> Self {
        let mut store = Self::new();
        for path in story.video_nodes.iter().filter_map(|v| ClipPath::new(&v.video_clip_path)) {
            store
                .clips
                .insert(path.as_str().to_owned(), path.as_str().to_owned());
        }
        store
    }

    /// Register `path` → `clip`.
    pub fn with_clip(mut self, path: &str, clip: &str) -> Self {
        self.clips.insert(path.to_owned(), clip.to_owned());
        self
    }

    /// Forget `path`, making it unresolvable.
    pub fn without(mut self, path: &str) -> Self {
        self.clips.remove(path);
        self
    }
}

impl ResourceStore for MapResourceStore {
    type Clip = String;

    fn resolve(&self, path: &ClipPath) -> Result<String, ResourceError> {
        self.clips
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| ResourceError::NotFound {
                path: path.as_str().to_owned(),
            })
    }
}
