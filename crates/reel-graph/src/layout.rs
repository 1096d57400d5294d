// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Default node sizes and spawn placement.
//!
//! New nodes spawned from another node appear directly below it with a fixed
//! vertical gap. This is a usability default, not a correctness contract.

use crate::{Rect, Vec2};

/// Size of a freshly created video node.
pub const VIDEO_NODE_SIZE: Vec2 = Vec2::new(220.0, 140.0);

/// Size of a freshly created option node.
pub const OPTION_NODE_SIZE: Vec2 = Vec2::new(250.0, 150.0);

/// Vertical gap between a node and a child spawned from it.
pub const SPAWN_GAP: f32 = 50.0;

/// Top-left corner for a node spawned below `trigger`.
pub fn spawn_below(trigger: &Rect) -> Vec2 {
    Vec2::new(trigger.x, trigger.max_y() + SPAWN_GAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_keeps_x_and_adds_gap() {
        let parent = Rect::new(40.0, 60.0, 220.0, 140.0);
        assert_eq!(spawn_below(&parent), Vec2::new(40.0, 250.0));
    }
}
