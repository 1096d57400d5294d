// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Node payloads.
//!
//! Relationship fields are private: only [`StoryGraph`](crate::StoryGraph)
//! may change them, so handing out `&mut VideoNode` cannot break membership.

use crate::{ClipPath, OptionId, Rect, VideoId};

/// One playable video segment and its outgoing choices.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoNode {
    /// Display title.
    pub title: String,
    /// Clip to play, if assigned.
    pub clip: Option<ClipPath>,
    /// Canvas rectangle.
    pub rect: Rect,
    progress: f32,
    option_children: Vec<OptionId>,
}

impl VideoNode {
    /// Title given to new video nodes.
    pub const DEFAULT_TITLE: &'static str = "Video Node";

    /// A video node with default attributes and no children.
    pub fn new(rect: Rect) -> Self {
        Self {
            title: Self::DEFAULT_TITLE.to_owned(),
            clip: None,
            rect,
            progress: 0.0,
            option_children: Vec::new(),
        }
    }

    /// Editor preview progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Set preview progress, clamped to `[0, 1]` (NaN becomes 0).
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
    }

    /// Option children in declaration order.
    pub fn option_children(&self) -> &[OptionId] {
        &self.option_children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<OptionId> {
        &mut self.option_children
    }
}

/// A single branching choice presented after its parent video.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionNode {
    /// Internal display title.
    pub title: String,
    /// Human-facing choice text shown at runtime.
    pub prompt: String,
    /// Editor selection flag; meaningless at runtime.
    pub selected: bool,
    /// Canvas rectangle.
    pub rect: Rect,
    parent: Option<VideoId>,
    child: Option<VideoId>,
}

impl OptionNode {
    /// Title given to new option nodes.
    pub const DEFAULT_TITLE: &'static str = "Option Node";
    /// Prompt given to new option nodes.
    pub const DEFAULT_PROMPT: &'static str = "Choice";

    /// An unattached option with default attributes.
    pub fn new(rect: Rect) -> Self {
        Self {
            title: Self::DEFAULT_TITLE.to_owned(),
            prompt: Self::DEFAULT_PROMPT.to_owned(),
            selected: false,
            rect,
            parent: None,
            child: None,
        }
    }

    /// Video whose children include this option.
    pub fn parent(&self) -> Option<VideoId> {
        self.parent
    }

    /// Video that plays when this option is chosen.
    pub fn child(&self) -> Option<VideoId> {
        self.child
    }

    pub(crate) fn set_parent(&mut self, parent: Option<VideoId>) {
        self.parent = parent;
    }

    pub(crate) fn set_child(&mut self, child: Option<VideoId>) -> Option<VideoId> {
        core::mem::replace(&mut self.child, child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped() {
        let mut v = VideoNode::new(Rect::default());
        v.set_progress(1.7);
        assert!((v.progress() - 1.0).abs() < f32::EPSILON);
        v.set_progress(-0.2);
        assert!(v.progress().abs() < f32::EPSILON);
        v.set_progress(f32::NAN);
        assert!(v.progress().abs() < f32::EPSILON);
    }

    #[test]
    fn defaults_match_editor_labels() {
        let o = OptionNode::new(Rect::default());
        assert_eq!(o.title, "Option Node");
        assert_eq!(o.prompt, "Choice");
        assert!(!o.selected);
        assert!(o.parent().is_none() && o.child().is_none());
    }
}
