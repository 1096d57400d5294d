// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property: the next primary press always leaves pending-connection mode,
//! whatever else happened in between.

#![allow(missing_docs)]

use proptest::prelude::*;
use reel_dry_tests::editor_story;
use reel_editor::{EditorEvent, EditorMode, EditorSession, MenuAction, PointerButton, Response};
use reel_graph::Vec2;

#[derive(Debug, Clone)]
enum Step {
    Press(f32, f32),
    Drag(PointerButton, f32, f32),
    Release,
    Context(f32, f32),
}

fn point() -> impl Strategy<Value = (f32, f32)> {
    (-200.0f32..900.0, -200.0f32..900.0)
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        point().prop_map(|(x, y)| Step::Press(x, y)),
        (
            prop_oneof![Just(PointerButton::Primary), Just(PointerButton::Middle)],
            point()
        )
            .prop_map(|(b, (x, y))| Step::Drag(b, x, y)),
        Just(Step::Release),
        point().prop_map(|(x, y)| Step::Context(x, y)),
    ]
}

fn event(step: &Step) -> EditorEvent {
    match *step {
        Step::Press(x, y) => EditorEvent::PointerDown {
            button: PointerButton::Primary,
            at: Vec2::new(x, y),
        },
        Step::Drag(button, x, y) => EditorEvent::PointerDrag {
            button,
            at: Vec2::new(x, y),
            delta: Vec2::new(x / 10.0, y / 10.0),
        },
        Step::Release => EditorEvent::PointerUp {
            button: PointerButton::Primary,
            at: Vec2::ZERO,
        },
        Step::Context(x, y) => EditorEvent::ContextClick { at: Vec2::new(x, y) },
    }
}

proptest! {
    #[test]
    fn primary_press_always_ends_pending_mode(steps in prop::collection::vec(step(), 0..30)) {
        let story = editor_story();
        let mut s = EditorSession::with_graph(story.graph);
        for (i, st) in steps.iter().enumerate() {
            if i % 3 == 0 {
                s.apply(MenuAction::BeginConnection { option: story.right });
            }
            let was_pending = matches!(s.mode(), EditorMode::PendingConnection { .. });
            let response = s.handle_event(event(st));
            if was_pending && matches!(st, Step::Press(..)) {
                prop_assert_eq!(s.mode(), EditorMode::Idle);
                let resolved = matches!(
                    response,
                    Response::Connected { .. } | Response::ConnectionCancelled { .. }
                );
                prop_assert!(resolved);
            }
            prop_assert_eq!(s.graph().check_invariants(), Ok(()));
        }
    }
}
