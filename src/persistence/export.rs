//! Area export: writes a ring to `<exports_dir>/<name>.enum` as it closes.

use bevy::prelude::*;
use std::path::{Path, PathBuf};

use crate::area::{
    export, write_area_file, AreaError, AreaMetadata, AreaSink, ClickOutcome,
    CoordinateTransform, PolygonRing,
};
use crate::config::AppConfig;
use crate::editor::AreaEditor;

use super::messages::CloseRingRequest;
use super::resources::{AreaExportError, LastExport};

/// Writes each ring it receives as an area file. Without a name every export
/// is abandoned.
pub struct AreaFileSink<'a> {
    name: Option<&'a str>,
    transform: &'a CoordinateTransform,
    metadata: &'a AreaMetadata,
    exports_dir: &'a Path,
    written: Option<PathBuf>,
}

impl<'a> AreaFileSink<'a> {
    pub fn new(
        name: Option<&'a str>,
        transform: &'a CoordinateTransform,
        metadata: &'a AreaMetadata,
        exports_dir: &'a Path,
    ) -> Self {
        Self {
            name,
            transform,
            metadata,
            exports_dir,
            written: None,
        }
    }

    /// Path of the file written by the last successful export
    pub fn written(&self) -> Option<&Path> {
        self.written.as_deref()
    }
}

impl AreaSink for AreaFileSink<'_> {
    fn export(&mut self, ring: &PolygonRing) -> Result<(), AreaError> {
        let name = self.name.ok_or(AreaError::EmptyName)?;
        let area = export(ring, self.transform, name, self.metadata)?;
        let path = write_area_file(self.exports_dir, &area)?;
        self.written = Some(path);
        Ok(())
    }
}

/// Completes a closing click once the name prompt has been answered
pub fn close_ring_system(
    mut events: MessageReader<CloseRingRequest>,
    mut editor: ResMut<AreaEditor>,
    config: Res<AppConfig>,
    mut export_error: ResMut<AreaExportError>,
    mut last_export: ResMut<LastExport>,
) {
    let editor = &mut *editor;
    let Some(transform) = editor.transform else {
        events.clear();
        return;
    };

    let exports_dir = config.exports_dir();
    for event in events.read() {
        let mut sink = AreaFileSink::new(
            event.name.as_deref(),
            &transform,
            &editor.metadata,
            &exports_dir,
        );

        match editor.session.click(event.vertex, &mut sink) {
            Ok(ClickOutcome::Closed { closed, .. }) => {
                if let Some(path) = sink.written() {
                    info!("Exported ring {} to {:?}", closed.index(), path);
                    last_export.path = Some(path.to_path_buf());
                }
                export_error.message = None;
            }
            Ok(ClickOutcome::Abandoned) => {
                info!("No input provided, area not exported");
            }
            Ok(ClickOutcome::Added { .. }) => {
                // Only reachable if the ring changed while the prompt was open
                warn!("Ring no longer closes at ({}, {})", event.vertex.x, event.vertex.y);
            }
            Err(e) => {
                error!("Failed to export area: {}", e);
                export_error.message = Some(e.to_string());
            }
        }
    }
}

pub fn ensure_exports_directory(config: Res<AppConfig>) {
    let dir = config.exports_dir();
    if !dir.exists()
        && let Err(e) = std::fs::create_dir_all(&dir)
    {
        warn!("Failed to create exports directory {:?}: {}", dir, e);
    }
}
