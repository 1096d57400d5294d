// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Editor session state and pointer handling.

use reel_app_core::prefs::ReelPrefs;
use reel_graph::{NodeRef, OptionId, StoryGraph, Vec2, VideoId};
use tracing::{debug, info, warn};

use crate::menu::ContextMenu;

/// Mouse button of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button: select, drag, complete a pending connection.
    Primary,
    /// Right button. Context menus arrive as [`EditorEvent::ContextClick`].
    Secondary,
    /// Middle button: pan the canvas.
    Middle,
}

/// Input delivered to [`EditorSession::handle_event`], in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    /// Button pressed.
    PointerDown {
        /// Which button.
        button: PointerButton,
        /// Pointer position.
        at: Vec2,
    },
    /// Pointer moved with a button held.
    PointerDrag {
        /// Which button.
        button: PointerButton,
        /// Pointer position after the move.
        at: Vec2,
        /// Movement since the previous event.
        delta: Vec2,
    },
    /// Button released.
    PointerUp {
        /// Which button.
        button: PointerButton,
        /// Pointer position.
        at: Vec2,
    },
    /// Context-menu request.
    ContextClick {
        /// Pointer position.
        at: Vec2,
    },
}

/// What the session is doing between events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorMode {
    /// No interaction in progress.
    Idle,
    /// The next primary press picks the child video for `option`.
    PendingConnection {
        /// Option waiting for a target.
        option: OptionId,
    },
    /// A node follows the pointer.
    Dragging {
        /// Node being moved.
        node: NodeRef,
        /// Pointer position minus node origin at press time (canvas space).
        grab: Vec2,
    },
}

/// Result of [`EditorSession::handle_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The event was not for the editor.
    Ignored,
    /// Session state changed; redraw.
    Repaint,
    /// A pending connection completed.
    Connected {
        /// Option whose child was set.
        option: OptionId,
        /// New child video.
        video: VideoId,
    },
    /// A pending connection was abandoned (press missed every video).
    ConnectionCancelled {
        /// Option that was waiting.
        option: OptionId,
    },
    /// Show this menu at the pointer.
    Menu(ContextMenu),
}

/// One open story in the editor.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub(crate) graph: StoryGraph,
    pub(crate) pan: Vec2,
    pub(crate) mode: EditorMode,
    pub(crate) reveal_hint: f32,
    pub(crate) snapshot: Option<[u8; 32]>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Empty session, no pan, runtime hint at the default reveal point.
    pub fn new() -> Self {
        Self::with_graph(StoryGraph::new())
    }

    /// Session over an existing graph. The graph counts as unsaved.
    pub fn with_graph(graph: StoryGraph) -> Self {
        Self {
            graph,
            pan: Vec2::ZERO,
            mode: EditorMode::Idle,
            reveal_hint: ReelPrefs::default().playback.reveal_threshold,
            snapshot: None,
        }
    }

    /// Restore pan and the reveal hint from saved preferences.
    pub fn apply_prefs(&mut self, prefs: &ReelPrefs) {
        self.pan = Vec2::new(prefs.editor.pan[0], prefs.editor.pan[1]);
        self.reveal_hint = prefs.playback.reveal_threshold;
    }

    /// Write the current pan back into `prefs`.
    pub fn store_prefs(&self, prefs: &mut ReelPrefs) {
        prefs.editor.pan = [self.pan.x, self.pan.y];
    }

    /// The graph.
    pub fn graph(&self) -> &StoryGraph {
        &self.graph
    }

    /// Mutable graph for attribute edits (titles, prompts, clips, progress).
    pub fn graph_mut(&mut self) -> &mut StoryGraph {
        &mut self.graph
    }

    /// Current canvas pan.
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Current interaction mode.
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Progress at which video cards show the runtime hint.
    pub fn reveal_hint(&self) -> f32 {
        self.reveal_hint
    }

    /// Window → canvas.
    pub fn to_canvas(&self, window: Vec2) -> Vec2 {
        window - self.pan
    }

    /// Topmost node under a canvas point. Videos are checked before options;
    /// within a kind, later nodes are on top.
    pub fn node_at(&self, canvas: Vec2) -> Option<NodeRef> {
        self.video_at(canvas)
            .map(NodeRef::Video)
            .or_else(|| self.option_at(canvas).map(NodeRef::Option))
    }

    /// Topmost video under a canvas point.
    pub fn video_at(&self, canvas: Vec2) -> Option<VideoId> {
        self.graph
            .videos()
            .filter(|(_, v)| v.rect.contains(canvas))
            .last()
            .map(|(id, _)| id)
    }

    /// Topmost option under a canvas point.
    pub fn option_at(&self, canvas: Vec2) -> Option<OptionId> {
        self.graph
            .options()
            .filter(|(_, o)| o.rect.contains(canvas))
            .last()
            .map(|(id, _)| id)
    }

    /// Route one input event.
    pub fn handle_event(&mut self, event: EditorEvent) -> Response {
        if let (
            EditorMode::PendingConnection { option },
            EditorEvent::PointerDown {
                button: PointerButton::Primary,
                at,
            },
        ) = (self.mode, event)
        {
            return self.finish_connection(option, at);
        }

        match event {
            EditorEvent::PointerDown {
                button: PointerButton::Primary,
                at,
            } => self.press(self.to_canvas(at)),
            EditorEvent::PointerDrag {
                button: PointerButton::Middle,
                delta,
                ..
            } => {
                self.pan += delta;
                Response::Repaint
            }
            EditorEvent::PointerDrag {
                button: PointerButton::Primary,
                at,
                ..
            } => self.drag_to(self.to_canvas(at)),
            EditorEvent::PointerUp {
                button: PointerButton::Primary,
                ..
            } => {
                if matches!(self.mode, EditorMode::Dragging { .. }) {
                    self.mode = EditorMode::Idle;
                    Response::Repaint
                } else {
                    Response::Ignored
                }
            }
            EditorEvent::ContextClick { at } => Response::Menu(self.context_menu(at)),
            EditorEvent::PointerDown { .. }
            | EditorEvent::PointerDrag { .. }
            | EditorEvent::PointerUp { .. } => Response::Ignored,
        }
    }

    /// Menu for whatever is under the window point `at`.
    pub fn context_menu(&self, at: Vec2) -> ContextMenu {
        let canvas = self.to_canvas(at);
        match self.node_at(canvas) {
            Some(NodeRef::Video(video)) => ContextMenu::for_video(&self.graph, video),
            Some(NodeRef::Option(option)) => ContextMenu::for_option(&self.graph, option),
            None => ContextMenu::for_canvas(canvas),
        }
    }

    fn finish_connection(&mut self, option: OptionId, at: Vec2) -> Response {
        self.mode = EditorMode::Idle;
        let Some(video) = self.video_at(self.to_canvas(at)) else {
            info!(%option, "press missed every video; connection cancelled");
            return Response::ConnectionCancelled { option };
        };
        match self.graph.connect_option_to_video(option, video) {
            Ok(_) => {
                info!(%option, %video, "pending connection completed");
                Response::Connected { option, video }
            }
            Err(err) => {
                warn!(?err, "pending connection target vanished");
                Response::ConnectionCancelled { option }
            }
        }
    }

    fn press(&mut self, canvas: Vec2) -> Response {
        let Some(node) = self.node_at(canvas) else {
            return Response::Ignored;
        };
        let origin = match node {
            NodeRef::Video(id) => self.graph.video(id).map(|v| v.rect.position()),
            NodeRef::Option(id) => {
                self.select_only(id);
                self.graph.option(id).map(|o| o.rect.position())
            }
        };
        let Some(origin) = origin else {
            return Response::Ignored;
        };
        self.mode = EditorMode::Dragging {
            node,
            grab: canvas - origin,
        };
        debug!(%node, "drag started");
        Response::Repaint
    }

    fn drag_to(&mut self, canvas: Vec2) -> Response {
        let EditorMode::Dragging { node, grab } = self.mode else {
            return Response::Ignored;
        };
        let rect = match node {
            NodeRef::Video(id) => self.graph.video_mut(id).map(|v| &mut v.rect),
            NodeRef::Option(id) => self.graph.option_mut(id).map(|o| &mut o.rect),
        };
        match rect {
            Some(rect) => {
                rect.set_position(canvas - grab);
                Response::Repaint
            }
            None => {
                self.mode = EditorMode::Idle;
                Response::Ignored
            }
        }
    }

    fn select_only(&mut self, selected: OptionId) {
        let ids: Vec<OptionId> = self.graph.options().map(|(id, _)| id).collect();
        for id in ids {
            if let Some(option) = self.graph.option_mut(id) {
                option.selected = id == selected;
            }
        }
    }
}
