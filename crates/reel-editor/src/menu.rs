// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Context menus as values, and the actions they carry.

use reel_graph::{GraphError, NodeRef, OptionId, StoryGraph, Vec2, VideoId};
use tracing::{info, warn};

use crate::session::{EditorMode, EditorSession};

/// What a context menu was opened on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuTarget {
    /// Empty canvas at a canvas-space point.
    Canvas {
        /// Where new nodes will be placed.
        at: Vec2,
    },
    /// A node.
    Node(NodeRef),
}

/// A menu row.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    /// Selectable row.
    Item {
        /// Row text.
        label: String,
        /// Action to [`apply`](EditorSession::apply) when picked.
        action: MenuAction,
    },
    /// Divider line.
    Separator,
    /// Nested menu. May be empty.
    Submenu {
        /// Row text.
        label: String,
        /// Nested rows.
        entries: Vec<MenuEntry>,
    },
}

impl MenuEntry {
    fn item(label: impl Into<String>, action: MenuAction) -> Self {
        Self::Item {
            label: label.into(),
            action,
        }
    }

    /// Row text; empty for separators.
    pub fn label(&self) -> &str {
        match self {
            Self::Item { label, .. } | Self::Submenu { label, .. } => label,
            Self::Separator => "",
        }
    }
}

/// Editor command reachable from a menu or a node card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    /// "Add Video Node" at a canvas-space point.
    AddVideoNode {
        /// Top-left of the new node.
        at: Vec2,
    },
    /// "Add Option Child": new option below and under `video`.
    AddOptionChild {
        /// Parent video.
        video: VideoId,
    },
    /// "Delete Video Node".
    DeleteVideoNode {
        /// Video to delete.
        video: VideoId,
    },
    /// Entry of "Connect Existing Option Node": adopt an unattached option.
    ConnectExistingOption {
        /// New parent.
        video: VideoId,
        /// Unattached option.
        option: OptionId,
    },
    /// "Add Child Video Node": new video below `option`, set as its child.
    AddChildVideoNode {
        /// Option receiving the child.
        option: OptionId,
    },
    /// "Delete Option Node".
    DeleteOptionNode {
        /// Option to delete.
        option: OptionId,
    },
    /// "Connect Existing Video Node": wait for a press on the target video.
    BeginConnection {
        /// Option waiting for a child.
        option: OptionId,
    },
}

/// Result of [`EditorSession::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A node was added.
    Created(NodeRef),
    /// Existing nodes changed.
    Updated,
    /// The session now waits for a target video.
    Pending(OptionId),
    /// Nothing changed.
    Rejected(GraphError),
}

/// Menu shown for a context click.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    /// What was clicked.
    pub target: MenuTarget,
    /// Rows, top to bottom.
    pub entries: Vec<MenuEntry>,
}

impl ContextMenu {
    /// Canvas menu: "Add Video Node" at `at` (canvas space).
    pub fn for_canvas(at: Vec2) -> Self {
        Self {
            target: MenuTarget::Canvas { at },
            entries: vec![MenuEntry::item("Add Video Node", MenuAction::AddVideoNode { at })],
        }
    }

    /// Video menu. The connect submenu lists every option without a parent.
    pub fn for_video(graph: &StoryGraph, video: VideoId) -> Self {
        let candidates = graph
            .unparented_options()
            .map(|(option, node)| {
                MenuEntry::item(
                    format!("{}: {}", node.title, node.prompt),
                    MenuAction::ConnectExistingOption { video, option },
                )
            })
            .collect();
        Self {
            target: MenuTarget::Node(NodeRef::Video(video)),
            entries: vec![
                MenuEntry::item("Add Option Child", MenuAction::AddOptionChild { video }),
                MenuEntry::Separator,
                MenuEntry::item("Delete Video Node", MenuAction::DeleteVideoNode { video }),
                MenuEntry::Submenu {
                    label: "Connect Existing Option Node".into(),
                    entries: candidates,
                },
            ],
        }
    }

    /// Option menu. "Connect Existing Video Node" only while the option has no child.
    pub fn for_option(graph: &StoryGraph, option: OptionId) -> Self {
        let mut entries = vec![
            MenuEntry::item("Add Child Video Node", MenuAction::AddChildVideoNode { option }),
            MenuEntry::Separator,
            MenuEntry::item("Delete Option Node", MenuAction::DeleteOptionNode { option }),
        ];
        if graph.option(option).is_some_and(|o| o.child().is_none()) {
            entries.push(MenuEntry::item(
                "Connect Existing Video Node",
                MenuAction::BeginConnection { option },
            ));
        }
        Self {
            target: MenuTarget::Node(NodeRef::Option(option)),
            entries,
        }
    }

    /// Action behind the row reached by following `path` through submenus.
    pub fn find(&self, path: &[&str]) -> Option<MenuAction> {
        let mut entries = &self.entries;
        let (last, parents) = path.split_last()?;
        for label in parents {
            entries = entries.iter().find_map(|e| match e {
                MenuEntry::Submenu { label: l, entries } if l == label => Some(entries),
                _ => None,
            })?;
        }
        entries.iter().find_map(|e| match e {
            MenuEntry::Item { label, action } if label == last => Some(*action),
            _ => None,
        })
    }
}

impl EditorSession {
    /// Perform a menu or card action.
    pub fn apply(&mut self, action: MenuAction) -> ActionOutcome {
        match self.try_apply(action) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(?err, ?action, "editor action rejected");
                ActionOutcome::Rejected(err)
            }
        }
    }

    fn try_apply(&mut self, action: MenuAction) -> Result<ActionOutcome, GraphError> {
        let outcome = match action {
            MenuAction::AddVideoNode { at } => {
                ActionOutcome::Created(self.graph.create_video_node(at).into())
            }
            MenuAction::AddOptionChild { video } => {
                ActionOutcome::Created(self.graph.create_option_node(Some(video))?.into())
            }
            MenuAction::AddChildVideoNode { option } => {
                ActionOutcome::Created(self.graph.create_child_video(option)?.into())
            }
            MenuAction::DeleteVideoNode { video } => {
                self.graph.delete_video_node(video)?;
                self.forget(NodeRef::Video(video));
                ActionOutcome::Updated
            }
            MenuAction::DeleteOptionNode { option } => {
                self.graph.delete_option_node(option)?;
                self.forget(NodeRef::Option(option));
                ActionOutcome::Updated
            }
            MenuAction::ConnectExistingOption { video, option } => {
                self.graph.connect_existing_option(video, option)?;
                ActionOutcome::Updated
            }
            MenuAction::BeginConnection { option } => {
                if self.graph.option(option).is_none() {
                    return Err(GraphError::UnknownOption(option));
                }
                self.mode = EditorMode::PendingConnection { option };
                info!(%option, "pending connection: press a video node to connect");
                ActionOutcome::Pending(option)
            }
        };
        Ok(outcome)
    }

    /// Drop interaction state that refers to a deleted node.
    fn forget(&mut self, node: NodeRef) {
        let stale = match self.mode {
            EditorMode::Dragging { node: dragged, .. } => dragged == node,
            EditorMode::PendingConnection { option } => node == NodeRef::Option(option),
            EditorMode::Idle => false,
        };
        if stale {
            self.mode = EditorMode::Idle;
        }
    }
}
