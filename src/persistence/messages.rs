//! Message types for area file operations.

use bevy::prelude::*;
use std::path::PathBuf;

use crate::area::Vertex;

/// Finishes a click that closes the current ring. `name: None` means the
/// user cancelled the name prompt.
#[derive(Message)]
pub struct CloseRingRequest {
    pub vertex: Vertex,
    pub name: Option<String>,
}

#[derive(Message)]
pub struct ImportAreasRequest {
    pub paths: Vec<PathBuf>,
}
