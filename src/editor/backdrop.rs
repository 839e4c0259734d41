//! Reference image backdrop and the editor state built around it.
//!
//! The image sprite is centred on the world origin with one world unit per
//! image pixel. Image pixels have their origin at the top-left corner and Y
//! pointing down, world space has Y pointing up.

use bevy::prelude::*;
use std::path::Path;

use crate::area::{
    AreaError, AreaMetadata, CalibrationCorners, CoordinateTransform, EditorSession, Vertex,
};
use crate::config::{AppConfig, AppConfigData};

/// Editing state for the traced areas
#[derive(Resource, Default)]
pub struct AreaEditor {
    pub session: EditorSession,
    /// Available once the reference image size is known and calibration is valid
    pub transform: Option<CoordinateTransform>,
    pub metadata: AreaMetadata,
}

impl AreaEditor {
    /// Image extent, if the editor is usable
    pub fn extent(&self) -> Option<(u32, u32)> {
        self.transform.map(|t| t.extent())
    }
}

/// Reason the editor could not be set up, shown to the user
#[derive(Resource, Default)]
pub struct EditorSetupError {
    pub message: Option<String>,
}

#[derive(Component)]
pub struct ReferenceBackdrop;

/// Converts a world position to the image pixel it falls in.
pub fn world_to_pixel(world: Vec2, extent: (u32, u32)) -> Vertex {
    let half_w = extent.0 as f32 / 2.0;
    let half_h = extent.1 as f32 / 2.0;
    Vertex::new(
        (world.x + half_w).floor() as i32,
        (half_h - world.y).floor() as i32,
    )
}

/// World position of a pixel's top-left corner.
pub fn pixel_to_world(pixel: Vertex, extent: (u32, u32)) -> Vec2 {
    let half_w = extent.0 as f32 / 2.0;
    let half_h = extent.1 as f32 / 2.0;
    Vec2::new(pixel.x as f32 - half_w, half_h - pixel.y as f32)
}

/// Reads the image size from its header and builds the transform.
fn build_transform(
    image_path: &Path,
    calibration: CalibrationCorners,
) -> Result<CoordinateTransform, String> {
    let (width, height) = image::image_dimensions(image_path)
        .map_err(|e| format!("Could not read reference image {:?}: {}", image_path, e))?;
    CoordinateTransform::new(calibration, width, height).map_err(|e: AreaError| e.to_string())
}

/// Validates the editing settings from the config and sizes the transform.
fn prepare_editor(config: &AppConfigData) -> Result<(EditorSession, CoordinateTransform), String> {
    let session = EditorSession::with_latch_radius(config.latch_radius)
        .map_err(|e| format!("Bad latch_radius in config: {}", e))?;
    let transform = build_transform(&config.reference_image, config.calibration)?;
    Ok((session, transform))
}

/// Startup system: size the transform from the image and spawn the backdrop sprite
pub fn setup_area_editor(
    mut commands: Commands,
    config: Res<AppConfig>,
    asset_server: Res<AssetServer>,
    mut editor: ResMut<AreaEditor>,
    mut setup_error: ResMut<EditorSetupError>,
) {
    let (session, transform) = match prepare_editor(&config.data) {
        Ok(prepared) => prepared,
        Err(message) => {
            error!("{}", message);
            setup_error.message = Some(message);
            return;
        }
    };

    let image_path = &config.data.reference_image;
    let (width, height) = transform.extent();
    info!(
        "Reference image {:?} is {}x{}, calibration {:?}",
        image_path,
        width,
        height,
        transform.corners()
    );
    editor.session = session;
    editor.transform = Some(transform);

    // Absolute paths keep the image loadable from outside the assets folder
    let asset_path = std::fs::canonicalize(image_path).unwrap_or_else(|_| image_path.clone());
    let texture: Handle<Image> = asset_server.load(asset_path);
    commands.spawn((
        Sprite::from_image(texture),
        Transform::from_translation(Vec3::ZERO),
        ReferenceBackdrop,
    ));
}
