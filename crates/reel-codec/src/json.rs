// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON text form of [`PersistedGraph`].

use crate::{CodecError, PersistedGraph};

/// Parse story JSON. Missing fields take their defaults.
pub fn from_json(bytes: &[u8]) -> Result<PersistedGraph, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Human-editable, indented story JSON.
pub fn to_json_pretty(graph: &PersistedGraph) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec_pretty(graph)?)
}
