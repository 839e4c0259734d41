mod backdrop;
mod camera;
mod input;
mod params;
mod rendering;

pub use backdrop::{AreaEditor, EditorSetupError};
pub use camera::EditorCamera;
pub use input::CursorPixel;

use bevy::prelude::*;

use crate::config::ConfigLoaded;

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AreaEditor>()
            .init_resource::<EditorSetupError>()
            .init_resource::<CursorPixel>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    backdrop::setup_area_editor.after(ConfigLoaded),
                ),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan,
                    camera::camera_zoom,
                    camera::apply_camera_zoom,
                    camera::reset_camera,
                ),
            )
            .add_systems(
                Update,
                (
                    input::track_cursor_pixel,
                    input::handle_area_click,
                    input::handle_discard_shortcut,
                    rendering::render_rings,
                    rendering::render_latch_preview,
                )
                    .chain(),
            );
    }
}
