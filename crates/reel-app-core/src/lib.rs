// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for Reel tools (config store port, prefs).
//! Keeps editor/player adapters thin and framework-agnostic.

pub mod config;
pub mod prefs;
