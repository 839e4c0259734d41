//! Editor camera: middle-drag pan, wheel zoom, Home to recentre on the image.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::constants::{MAX_ZOOM_SCALE, MIN_ZOOM_SCALE};

#[derive(Component)]
pub struct EditorCamera;

#[derive(Component)]
pub struct CameraZoom {
    pub scale: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl CameraZoom {
    /// Applies one wheel step. Scrolling up zooms in.
    pub fn apply_scroll(&mut self, unit: MouseScrollUnit, amount: f32) {
        let step = match unit {
            MouseScrollUnit::Line => amount * 0.1,
            MouseScrollUnit::Pixel => amount * 0.001,
        };
        self.scale = (self.scale - step).clamp(MIN_ZOOM_SCALE, MAX_ZOOM_SCALE);
    }
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        EditorCamera,
        CameraZoom::default(),
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut camera_query: Query<(&mut Transform, &CameraZoom), With<EditorCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Middle) {
        mouse_motion.clear();
        return;
    }

    let Ok((mut transform, zoom)) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        let delta = event.delta * zoom.scale;
        transform.translation.x -= delta.x;
        transform.translation.y += delta.y;
    }
}

pub fn camera_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut CameraZoom, With<EditorCamera>>,
) {
    let Ok(mut zoom) = camera_query.single_mut() else {
        return;
    };

    for event in scroll_events.read() {
        zoom.apply_scroll(event.unit, event.y);
    }
}

pub fn apply_camera_zoom(
    mut camera_query: Query<
        (&CameraZoom, &mut Projection),
        (With<EditorCamera>, Changed<CameraZoom>),
    >,
) {
    for (zoom, mut projection) in camera_query.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = zoom.scale;
        }
    }
}

/// The reference image is centred on the origin, so resetting the view
/// recentres it at 1:1.
pub fn reset_camera(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut camera_query: Query<(&mut Transform, &mut CameraZoom), With<EditorCamera>>,
) {
    if !keyboard.just_pressed(KeyCode::Home) {
        return;
    }

    let Ok((mut transform, mut zoom)) = camera_query.single_mut() else {
        return;
    };
    transform.translation.x = 0.0;
    transform.translation.y = 0.0;
    zoom.scale = 1.0;
}
