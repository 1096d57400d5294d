// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Authoring sessions end to end: menus, pending connections, save/load.

#![allow(missing_docs)]

use reel_app_core::config::{ConfigError, ConfigService};
use reel_codec::StructuralError;
use reel_dry_tests::{editor_story, InMemoryConfigStore};
use reel_editor::{
    ActionOutcome, EditorEvent, EditorMode, EditorSession, LoadOutcome, MenuAction,
    PersistError, PointerButton, Response,
};
use reel_graph::{ClipPath, NodeRef, Vec2};

fn press(at: Vec2) -> EditorEvent {
    EditorEvent::PointerDown {
        button: PointerButton::Primary,
        at,
    }
}

#[test]
fn author_a_branch_through_menus_and_connect_button() {
    let mut s = EditorSession::new();
    let Response::Menu(menu) = s.handle_event(EditorEvent::ContextClick {
        at: Vec2::new(100.0, 100.0),
    }) else {
        unreachable!("context click yields a menu");
    };
    let add = menu.find(&["Add Video Node"]).unwrap();
    let ActionOutcome::Created(NodeRef::Video(root)) = s.apply(add) else {
        unreachable!("add video creates");
    };

    let Response::Menu(menu) = s.handle_event(EditorEvent::ContextClick {
        at: Vec2::new(150.0, 150.0),
    }) else {
        unreachable!("context click yields a menu");
    };
    let ActionOutcome::Created(NodeRef::Option(choice)) =
        s.apply(menu.find(&["Add Option Child"]).unwrap())
    else {
        unreachable!("add option creates");
    };

    // A free-standing video to the right becomes the choice's target.
    let ActionOutcome::Created(NodeRef::Video(target)) = s.apply(MenuAction::AddVideoNode {
        at: Vec2::new(600.0, 600.0),
    }) else {
        unreachable!("add video creates");
    };

    let Some(reel_editor::NodeCard::Option {
        connect: Some(connect),
        ..
    }) = s.card(NodeRef::Option(choice))
    else {
        unreachable!("option without child shows the connect button");
    };
    assert_eq!(s.apply(connect), ActionOutcome::Pending(choice));
    assert_eq!(
        s.handle_event(press(Vec2::new(610.0, 610.0))),
        Response::Connected {
            option: choice,
            video: target
        }
    );
    assert_eq!(s.mode(), EditorMode::Idle);

    let option = s.graph().option(choice).unwrap();
    assert_eq!(option.parent(), Some(root));
    assert_eq!(option.child(), Some(target));
    assert_eq!(s.graph().check_invariants(), Ok(()));
}

#[test]
fn save_then_load_restores_the_story() {
    let store = InMemoryConfigStore::new();
    let config = ConfigService::new(store.clone());
    let story = editor_story();

    let mut s = EditorSession::with_graph(story.graph.clone());
    assert!(s.is_dirty());
    s.save(&config, "branching").unwrap();
    assert!(!s.is_dirty());
    assert_eq!(store.writes(), vec!["branching"]);
    assert!(store.text("branching").unwrap().contains("\"optionChildIndices\""));

    let mut reopened = EditorSession::new();
    assert_eq!(
        reopened.load(&config, "branching").unwrap(),
        LoadOutcome::Loaded {
            diagnostics: vec![]
        }
    );
    assert!(!reopened.is_dirty());
    assert_eq!(reopened.graph().video_count(), 3);
    assert_eq!(reopened.graph().option_count(), 2);

    let first = reopened.graph().videos().next().map(|(id, _)| id).unwrap();
    reopened.graph_mut().video_mut(first).unwrap().title = "Renamed".into();
    assert!(reopened.is_dirty());
}

#[test]
fn load_of_missing_key_keeps_the_session() {
    let config = ConfigService::new(InMemoryConfigStore::new());
    let mut s = EditorSession::with_graph(editor_story().graph);
    assert_eq!(s.load(&config, "nothing-here").unwrap(), LoadOutcome::Missing);
    assert_eq!(s.graph().video_count(), 3);
}

#[test]
fn damaged_file_loads_with_diagnostics_and_is_dirty() {
    let store = InMemoryConfigStore::with_blob(
        "damaged",
        r#"{
          "videoNodes": [ { "title": "Only", "optionChildIndices": [0, 4] } ],
          "optionNodes": [ { "parentVideoIndex": 0, "childVideoIndex": 12 } ]
        }"#,
    );
    let config = ConfigService::new(store);
    let mut s = EditorSession::new();
    let LoadOutcome::Loaded { diagnostics } = s.load(&config, "damaged").unwrap() else {
        unreachable!("blob present");
    };
    assert_eq!(
        diagnostics,
        vec![
            StructuralError::ChildOutOfRange {
                option: 0,
                index: 12,
                len: 1
            },
            StructuralError::OptionChildOutOfRange {
                video: 0,
                index: 4,
                len: 1
            },
        ]
    );
    assert!(s.is_dirty(), "repairs are unsaved");
    assert_eq!(s.graph().check_invariants(), Ok(()));
}

#[test]
fn clean_load_with_normalised_fields_is_not_dirty() {
    let store = InMemoryConfigStore::with_blob(
        "legacy",
        r#"{
          "videoNodes": [
            { "title": "A", "videoClipPath": "Assets/Resources/intro.mp4", "progress": 1.5 }
          ],
          "optionNodes": [ { "title": "Go", "parentVideoIndex": 0, "childVideoIndex": -1 } ]
        }"#,
    );
    let config = ConfigService::new(store);
    let mut s = EditorSession::new();
    assert_eq!(
        s.load(&config, "legacy").unwrap(),
        LoadOutcome::Loaded {
            diagnostics: vec![]
        }
    );
    assert!(!s.is_dirty(), "normalisation is not an edit");

    let (video, node) = s.graph().videos().next().unwrap();
    assert_eq!(node.clip.as_ref().map(ClipPath::as_str), Some("intro"));
    assert_eq!(node.option_children().len(), 1);
    s.graph_mut().video_mut(video).unwrap().title = "B".into();
    assert!(s.is_dirty());
}

#[test]
fn store_failures_surface_as_errors() {
    let store = InMemoryConfigStore::new();
    let config = ConfigService::new(store.clone());
    let mut s = EditorSession::with_graph(editor_story().graph);

    store.set_fail_on_save(true);
    assert!(matches!(
        s.save(&config, "story"),
        Err(PersistError::Config(ConfigError::Other(_)))
    ));
    assert!(s.is_dirty(), "failed save keeps the dirty flag");

    store.put("story", "not json");
    assert!(matches!(
        s.load(&config, "story"),
        Err(PersistError::Codec(_))
    ));
    assert_eq!(s.graph().video_count(), 3, "failed load leaves graph alone");

    assert!(matches!(
        s.save(&config, "../outside"),
        Err(PersistError::Config(ConfigError::InvalidKey(_)))
    ));
}

#[test]
fn clear_then_save_writes_an_empty_story() {
    let store = InMemoryConfigStore::new();
    let config = ConfigService::new(store.clone());
    let mut s = EditorSession::with_graph(editor_story().graph);
    s.save(&config, "story").unwrap();
    s.clear();
    assert!(s.graph().is_empty());
    assert!(s.is_dirty());
    s.save(&config, "story").unwrap();
    let text = store.text("story").unwrap();
    assert!(text.contains("\"videoNodes\": []"));
}
