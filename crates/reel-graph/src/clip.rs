// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Resource-relative clip paths.

use core::fmt;

/// Asset-root prefix stripped from clip paths during normalization.
pub const RESOURCES_PREFIX: &str = "Assets/Resources/";

/// Video container extensions stripped from clip paths (compared
/// case-insensitively).
pub const CLIP_EXTENSIONS: &[&str] = &[
    "asf", "avi", "dv", "m4v", "mov", "mp4", "mpeg", "mpg", "ogv", "vp8", "webm", "wmv",
];

/// Resource-relative path of a video clip, without extension.
///
/// This is the only clip reference the story graph stores. Turning it into
/// something playable is the resource store's job and may fail per node
/// without affecting graph validity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClipPath(String);

impl ClipPath {
    /// Normalize `raw` into a clip path.
    ///
    /// Strips surrounding whitespace, leading [`RESOURCES_PREFIX`]es, and
    /// trailing [`CLIP_EXTENSIONS`] until none remain, so normalizing an
    /// already normalized path is a no-op. Returns `None` when nothing is left.
    ///
    /// ```
    /// use reel_graph::ClipPath;
    ///
    /// let clip = ClipPath::new("Assets/Resources/intro/opening.mp4").unwrap();
    /// assert_eq!(clip.as_str(), "intro/opening");
    /// assert_eq!(ClipPath::new(clip.as_str()), Some(clip));
    /// assert!(ClipPath::new("").is_none());
    /// ```
    pub fn new(raw: &str) -> Option<Self> {
        let mut current = raw;
        loop {
            let before = current.len();
            current = current.trim();
            if let Some(rest) = current.strip_prefix(RESOURCES_PREFIX) {
                current = rest;
            }
            current = strip_clip_extension(current);
            if current.len() == before {
                break;
            }
        }
        if current.is_empty() {
            None
        } else {
            Some(Self(current.to_owned()))
        }
    }

    /// The normalized path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn strip_clip_extension(path: &str) -> &str {
    let segment_start = path.rfind('/').map_or(0, |slash| slash + 1);
    match path[segment_start..].rfind('.') {
        Some(dot) if dot > 0 => {
            let ext = &path[segment_start + dot + 1..];
            if CLIP_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)) {
                &path[..segment_start + dot]
            } else {
                path
            }
        }
        _ => path,
    }
}

impl fmt::Display for ClipPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(raw: &str) -> Option<String> {
        ClipPath::new(raw).map(|c| c.0)
    }

    #[test]
    fn already_relative_paths_are_kept() {
        assert_eq!(norm("scenes/forest"), Some("scenes/forest".to_owned()));
    }

    #[test]
    fn only_video_extensions_on_last_segment_are_stripped() {
        assert_eq!(norm("v1.2/take"), Some("v1.2/take".to_owned()));
        assert_eq!(norm("v1.2/take.WebM"), Some("v1.2/take".to_owned()));
        assert_eq!(norm("notes/cut.final"), Some("notes/cut.final".to_owned()));
    }

    #[test]
    fn stacked_prefixes_and_extensions_collapse() {
        assert_eq!(
            norm(" Assets/Resources/Assets/Resources/a.mp4.mov "),
            Some("a".to_owned())
        );
    }

    #[test]
    fn dotfiles_keep_their_name() {
        assert_eq!(norm(".mp4"), Some(".mp4".to_owned()));
    }

    #[test]
    fn blank_and_prefix_only_inputs_are_none() {
        assert!(ClipPath::new("   ").is_none());
        assert!(ClipPath::new(RESOURCES_PREFIX).is_none());
    }
}
