// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property tests: arbitrary edit sequences never break single-parent
//! membership or leave dangling references.

#![allow(missing_docs)]

use proptest::prelude::*;
use reel_graph::{GraphError, OptionId, StoryGraph, Vec2, VideoId};

#[derive(Debug, Clone)]
enum Edit {
    AddVideo,
    AddOption { parent: Option<usize> },
    ConnectExisting { video: usize, option: usize },
    ConnectChild { option: usize, video: usize },
    Detach { option: usize },
    DeleteVideo { video: usize },
    DeleteOption { option: usize },
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        Just(Edit::AddVideo),
        proptest::option::of(0usize..16).prop_map(|parent| Edit::AddOption { parent }),
        (0usize..16, 0usize..16)
            .prop_map(|(video, option)| Edit::ConnectExisting { video, option }),
        (0usize..16, 0usize..16).prop_map(|(option, video)| Edit::ConnectChild { option, video }),
        (0usize..16).prop_map(|option| Edit::Detach { option }),
        (0usize..16).prop_map(|video| Edit::DeleteVideo { video }),
        (0usize..16).prop_map(|option| Edit::DeleteOption { option }),
    ]
}

fn pick<T: Copy>(items: &[T], i: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[i % items.len()])
    }
}

fn apply(g: &mut StoryGraph, edit: &Edit) {
    let videos: Vec<VideoId> = g.videos().map(|(id, _)| id).collect();
    let options: Vec<OptionId> = g.options().map(|(id, _)| id).collect();
    match *edit {
        Edit::AddVideo => {
            g.create_video_node(Vec2::ZERO);
        }
        Edit::AddOption { parent } => {
            let parent = parent.and_then(|p| pick(&videos, p));
            g.create_option_node(parent).unwrap();
        }
        Edit::ConnectExisting { video, option } => {
            if let (Some(v), Some(o)) = (pick(&videos, video), pick(&options, option)) {
                match g.connect_existing_option(v, o) {
                    Ok(()) | Err(GraphError::AlreadyParented { .. }) => {}
                    Err(other) => panic!("unexpected error {other}"),
                }
            }
        }
        Edit::ConnectChild { option, video } => {
            if let (Some(v), Some(o)) = (pick(&videos, video), pick(&options, option)) {
                g.connect_option_to_video(o, v).unwrap();
            }
        }
        Edit::Detach { option } => {
            if let Some(o) = pick(&options, option) {
                g.detach_option(o).unwrap();
            }
        }
        Edit::DeleteVideo { video } => {
            if let Some(v) = pick(&videos, video) {
                g.delete_video_node(v).unwrap();
            }
        }
        Edit::DeleteOption { option } => {
            if let Some(o) = pick(&options, option) {
                g.delete_option_node(o).unwrap();
            }
        }
    }
}

proptest! {
    #[test]
    fn edits_preserve_single_parent_membership(edits in prop::collection::vec(edit(), 0..60)) {
        let mut g = StoryGraph::new();
        for e in &edits {
            apply(&mut g, e);
            prop_assert_eq!(g.check_invariants(), Ok(()));

            for (option_id, option) in g.options() {
                let holders = g
                    .videos()
                    .filter(|(_, v)| v.option_children().contains(&option_id))
                    .count();
                match option.parent() {
                    Some(parent) => {
                        prop_assert_eq!(holders, 1);
                        let count = g
                            .video(parent)
                            .map(|v| v.option_children().iter().filter(|&&o| o == option_id).count());
                        prop_assert_eq!(count, Some(1));
                    }
                    None => prop_assert_eq!(holders, 0),
                }
            }
        }
    }
}
