// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deleting a video clears every reference to it; deleting an option never
//! takes a video with it.

#![allow(missing_docs)]

use reel_graph::{OptionId, StoryGraph, Vec2, VideoId};

/// Target video with options P1..P3 as children and options O1..O2 elsewhere
/// pointing at it as their child.
fn hub_graph() -> (StoryGraph, VideoId, Vec<OptionId>, Vec<OptionId>) {
    let mut g = StoryGraph::new();
    let upstream = g.create_video_node(Vec2::ZERO);
    let target = g.create_video_node(Vec2::new(0.0, 400.0));

    let owned: Vec<_> = (0..3)
        .map(|_| g.create_option_node(Some(target)).unwrap())
        .collect();
    let pointing: Vec<_> = (0..2)
        .map(|_| {
            let o = g.create_option_node(Some(upstream)).unwrap();
            g.connect_option_to_video(o, target).unwrap();
            o
        })
        .collect();
    (g, target, owned, pointing)
}

#[test]
fn deleting_video_nulls_children_and_parents() {
    let (mut g, target, owned, pointing) = hub_graph();

    let removed = g.delete_video_node(target).unwrap();
    assert!(removed.option_children().is_empty());

    for o in &pointing {
        let node = g.option(*o).expect("pointing option survives");
        assert_eq!(node.child(), None);
        assert!(node.parent().is_some(), "upstream membership untouched");
    }
    for o in &owned {
        let node = g.option(*o).expect("owned option survives");
        assert_eq!(node.parent(), None);
    }
    assert_eq!(g.option_count(), 5);
    assert_eq!(g.video_count(), 1);
    assert_eq!(g.check_invariants(), Ok(()));
}

#[test]
fn orphaned_options_become_reconnectable() {
    let (mut g, target, owned, _) = hub_graph();
    g.delete_video_node(target).unwrap();

    let free: Vec<_> = g.unparented_options().map(|(id, _)| id).collect();
    assert_eq!(free, owned);

    let replacement = g.create_video_node(Vec2::ZERO);
    for o in &owned {
        g.connect_existing_option(replacement, *o).unwrap();
    }
    assert_eq!(g.video(replacement).unwrap().option_children(), owned.as_slice());
}

#[test]
fn deleting_option_leaves_target_subtree() {
    let mut g = StoryGraph::new();
    let root = g.create_video_node(Vec2::ZERO);
    let choice = g.create_option_node(Some(root)).unwrap();
    let next = g.create_child_video(choice).unwrap();
    let deeper = g.create_option_node(Some(next)).unwrap();

    g.delete_option_node(choice).unwrap();

    assert_eq!(g.video_count(), 2);
    assert_eq!(g.option(deeper).unwrap().parent(), Some(next));
    assert!(g.video(root).unwrap().option_children().is_empty());
    assert_eq!(g.check_invariants(), Ok(()));
}

#[test]
fn self_loop_option_is_cleared_on_delete() {
    let mut g = StoryGraph::new();
    let v = g.create_video_node(Vec2::ZERO);
    let o = g.create_option_node(Some(v)).unwrap();
    g.connect_option_to_video(o, v).unwrap();

    g.delete_video_node(v).unwrap();
    let node = g.option(o).unwrap();
    assert_eq!(node.parent(), None);
    assert_eq!(node.child(), None);
}
