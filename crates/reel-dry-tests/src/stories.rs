// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Story fixtures.

use reel_codec::{flatten, OptionNodeRecord, PersistedGraph, VideoNodeRecord, NO_REF};
use reel_graph::{ClipPath, OptionId, StoryGraph, Vec2, VideoId};

/// The two-way branch built through graph operations, with its handles.
///
/// ```text
///            intro
///          /       \
///   [Go left]   [Go right]
///       |            |
///     left         right
/// ```
#[derive(Debug, Clone)]
pub struct EditorStory {
    /// The graph.
    pub graph: StoryGraph,
    /// Root video (`story/intro`).
    pub intro: VideoId,
    /// "Go left" option.
    pub left: OptionId,
    /// "Go right" option.
    pub right: OptionId,
    /// Video reached through `left` (`story/left`).
    pub left_video: VideoId,
    /// Video reached through `right` (`story/right`).
    pub right_video: VideoId,
}

/// Build [`EditorStory`] the way an author would: add a video, two option
/// children, then a child video for each option.
#[allow(clippy::expect_used)]
pub fn editor_story() -> EditorStory {
    let mut graph = StoryGraph::new();
    let intro = graph.create_video_node(Vec2::new(100.0, 40.0));
    let left = graph
        .create_option_node(Some(intro))
        .expect("intro is live");
    let right = graph
        .create_option_node(Some(intro))
        .expect("intro is live");
    let left_video = graph
        .create_child_video(left)
        .expect("left option is live");
    let right_video = graph
        .create_child_video(right)
        .expect("right option is live");

    for (id, title, clip) in [
        (intro, "Intro", "Assets/Resources/story/intro.mp4"),
        (left_video, "Left", "story/left"),
        (right_video, "Right", "story/right.webm"),
    ] {
        if let Some(v) = graph.video_mut(id) {
            v.title = title.into();
            v.clip = ClipPath::new(clip);
        }
    }
    for (id, prompt) in [(left, "Go left"), (right, "Go right")] {
        if let Some(o) = graph.option_mut(id) {
            o.prompt = prompt.into();
        }
    }

    EditorStory {
        graph,
        intro,
        left,
        right,
        left_video,
        right_video,
    }
}

/// [`editor_story`] flattened: videos `[intro, left, right]`, options
/// `[Go left → 1, Go right → 2]`.
pub fn branching_story() -> PersistedGraph {
    flatten(&editor_story().graph)
}

/// Hand-damaged story for runtime robustness tests.
///
/// Video 0 (`hub`) lists options `[0, 7, -1, 1]`; only 0 and 1 exist.
/// Option 0 ("Nowhere") points at video 9. Option 1 ("Stay") points at
/// video 1, which has no clip.
pub fn broken_story() -> PersistedGraph {
    PersistedGraph {
        video_nodes: vec![
            VideoNodeRecord {
                title: "Hub".into(),
                video_clip_path: "hub".into(),
                option_child_indices: vec![0, 7, NO_REF, 1],
                ..VideoNodeRecord::default()
            },
            VideoNodeRecord {
                title: "Silent".into(),
                ..VideoNodeRecord::default()
            },
        ],
        option_nodes: vec![
            OptionNodeRecord {
                choice_prompt: "Nowhere".into(),
                parent_video_index: 0,
                child_video_index: 9,
                ..OptionNodeRecord::default()
            },
            OptionNodeRecord {
                choice_prompt: "Stay".into(),
                parent_video_index: 0,
                child_video_index: 1,
                ..OptionNodeRecord::default()
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branching_story_layout() {
        let story = branching_story();
        let clips: Vec<_> = story
            .video_nodes
            .iter()
            .map(|v| v.video_clip_path.as_str())
            .collect();
        assert_eq!(clips, ["story/intro", "story/left", "story/right"]);
        assert_eq!(story.video_nodes[0].option_child_indices, vec![0, 1]);
        let targets: Vec<_> = story
            .option_nodes
            .iter()
            .map(|o| (o.choice_prompt.as_str(), o.child_video_index))
            .collect();
        assert_eq!(targets, [("Go left", 1), ("Go right", 2)]);
    }

    #[test]
    fn editor_story_is_consistent() {
        let s = editor_story();
        assert_eq!(s.graph.check_invariants(), Ok(()));
        assert_eq!(
            s.graph.video(s.intro).unwrap().option_children(),
            &[s.left, s.right]
        );
        assert_eq!(s.graph.option(s.right).unwrap().child(), Some(s.right_video));
    }
}
