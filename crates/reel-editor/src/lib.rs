// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Headless editing of Reel story graphs.
//!
//! [`EditorSession`] is everything a node-graph window needs apart from the
//! pixels: it owns the graph and the canvas pan, turns pointer input into
//! graph mutations, and answers with plain values. Context menus come back as
//! [`ContextMenu`] trees whose leaves carry a [`MenuAction`]; node bodies are
//! described by [`NodeCard`]s and links by [`Connector`]s. A UI shell draws
//! those and feeds the user's picks back through [`EditorSession::apply`].
//!
//! # Design
//!
//! Interaction state is an explicit [`EditorMode`] on the session. Waiting
//! for the user to pick a target video ("Connect Existing Video Node") is a
//! mode, not a window-global, so several sessions can coexist.
//!
//! User-action failures (a stale handle from an outdated menu, connecting an
//! option that already has a parent) are logged and returned as
//! [`ActionOutcome::Rejected`]; they never abort the session.
//!
//! Coordinates: events and presentation values use window space. Node rects
//! live in canvas space; `canvas = window - pan`.

mod menu;
mod persist;
mod present;
mod session;

pub use menu::{ActionOutcome, ContextMenu, MenuAction, MenuEntry, MenuTarget};
pub use persist::{LoadOutcome, PersistError};
pub use present::{Connector, ConnectorKind, NodeCard, RUNTIME_HINT};
pub use session::{EditorEvent, EditorMode, EditorSession, PointerButton, Response};
