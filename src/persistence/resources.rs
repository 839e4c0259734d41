//! Resource types for area file state tracking.

use bevy::prelude::*;
use bevy::tasks::Task;
use std::path::PathBuf;

use crate::area::{AreaError, PolygonRing};

/// Last export failure, shown to the user until dismissed
#[derive(Resource, Default)]
pub struct AreaExportError {
    pub message: Option<String>,
}

/// Per-file import failures from the last import, shown until dismissed
#[derive(Resource, Default)]
pub struct AreaImportError {
    pub messages: Vec<String>,
}

/// Most recently written area file
#[derive(Resource, Default)]
pub struct LastExport {
    pub path: Option<PathBuf>,
}

/// Tracks the running import for the busy modal
#[derive(Resource, Default)]
pub struct AsyncImportOperation {
    pub is_importing: bool,
    pub operation_description: Option<String>,
}

/// Decoded ring (or the reason it could not be decoded) for one file
pub struct ImportedFile {
    pub path: PathBuf,
    pub ring: Result<PolygonRing, AreaError>,
}

#[derive(Component)]
pub struct ImportAreasTask(pub Task<Vec<ImportedFile>>);
