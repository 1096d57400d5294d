// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved preferences for the Reel editor and player.

use serde::{Deserialize, Serialize};

/// Config key under which [`ReelPrefs`] are stored.
pub const PREFS_KEY: &str = "prefs";

/// All persisted preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReelPrefs {
    /// Runtime traversal tuning.
    pub playback: PlaybackPrefs,
    /// Editor surface settings.
    pub editor: EditorPrefs,
}

/// Progress fractions that drive the choice panel during playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackPrefs {
    /// Fraction at which choices appear (not yet selectable).
    pub reveal_threshold: f32,
    /// Fraction at which visible choices become selectable.
    pub enable_threshold: f32,
    /// Video index the story starts from; see `Traversal::from_prefs`.
    pub start_index: usize,
}

impl Default for PlaybackPrefs {
    fn default() -> Self {
        Self {
            reveal_threshold: 0.8,
            enable_threshold: 0.95,
            start_index: 0,
        }
    }
}

/// Editor canvas settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorPrefs {
    /// Canvas pan offset restored on open.
    pub pan: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_prefs_fill_defaults() {
        let prefs: ReelPrefs =
            serde_json::from_str(r#"{ "playback": { "enable_threshold": 0.99 } }"#).unwrap();
        assert_eq!(prefs.playback.enable_threshold, 0.99);
        assert_eq!(prefs.playback.reveal_threshold, 0.8);
        assert_eq!(prefs.editor, EditorPrefs::default());
    }

    #[test]
    fn start_index_round_trips() {
        let mut prefs = ReelPrefs::default();
        prefs.playback.start_index = 2;
        prefs.editor.pan = [4.0, -8.0];
        let text = serde_json::to_string(&prefs).unwrap();
        let back: ReelPrefs = serde_json::from_str(&text).unwrap();
        assert_eq!(back, prefs);
    }
}
