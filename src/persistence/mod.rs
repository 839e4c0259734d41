//! Area file persistence: exporting closed rings and importing area files.
//!
//! Export runs synchronously inside the closing click so a ring is never
//! observed closed but still current. Import reads and decodes files on the
//! I/O task pool and commits finished rings to the session when the task
//! completes.
//!
//! ## Module Structure
//!
//! - [`messages`] - Message types for export/import requests
//! - [`resources`] - Error, status and task tracking resources
//! - [`export`] - [`AreaFileSink`] and the ring-closing system
//! - [`import`] - Import task spawning and polling

mod export;
mod import;
mod messages;
mod resources;

pub use export::AreaFileSink;
pub use messages::{CloseRingRequest, ImportAreasRequest};
pub use resources::{AreaExportError, AreaImportError, AsyncImportOperation, LastExport};

use bevy::prelude::*;

use crate::config::ConfigLoaded;

pub struct AreaFilesPlugin;

impl Plugin for AreaFilesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AreaExportError>()
            .init_resource::<AreaImportError>()
            .init_resource::<AsyncImportOperation>()
            .init_resource::<LastExport>()
            .add_message::<CloseRingRequest>()
            .add_message::<ImportAreasRequest>()
            .add_systems(Startup, export::ensure_exports_directory.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    export::close_ring_system.run_if(on_message::<CloseRingRequest>),
                    import::import_areas_system.run_if(on_message::<ImportAreasRequest>),
                    import::poll_import_tasks,
                ),
            );
    }
}
