//! Pointer and keyboard input driving the editing session.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::area::{ClickOutcome, Vertex};
use crate::config::AppConfig;
use crate::persistence::AreaFileSink;
use crate::ui::{AreaNamePrompt, DialogState};

use super::backdrop::{world_to_pixel, AreaEditor};
use super::params::{is_cursor_over_ui, CameraParams};

/// Image pixel under the cursor, refreshed every frame for the toolbar readout
#[derive(Resource, Default)]
pub struct CursorPixel {
    pub pixel: Option<Vertex>,
}

pub fn track_cursor_pixel(
    camera: CameraParams,
    editor: Res<AreaEditor>,
    mut cursor: ResMut<CursorPixel>,
) {
    let pixel = editor.transform.and_then(|transform| {
        let world = camera.cursor_world_pos()?;
        let pixel = world_to_pixel(world, transform.extent());
        transform.contains(pixel).then_some(pixel)
    });
    if cursor.pixel != pixel {
        cursor.pixel = pixel;
    }
}

#[allow(clippy::too_many_arguments)]
pub fn handle_area_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    camera: CameraParams,
    mut editor: ResMut<AreaEditor>,
    mut name_prompt: ResMut<AreaNamePrompt>,
    dialog_state: Res<DialogState>,
    config: Res<AppConfig>,
    mut contexts: EguiContexts,
) {
    let left = mouse_button.just_pressed(MouseButton::Left);
    let right = mouse_button.just_pressed(MouseButton::Right);
    if !left && !right {
        return;
    }

    if dialog_state.any_modal_open || is_cursor_over_ui(&mut contexts) {
        return;
    }

    let Some(transform) = editor.transform else {
        return;
    };

    let Some(world_pos) = camera.cursor_world_pos() else {
        return;
    };
    let pixel = world_to_pixel(world_pos, transform.extent());

    if right {
        // Nearest point of the current ring, however far from the click
        editor.session.right_click(pixel);
        return;
    }

    if !transform.contains(pixel) {
        return;
    }

    info!(
        "Clicked point ({}, {}), game coordinate {}",
        pixel.x,
        pixel.y,
        transform.to_game_coordinate(pixel)
    );

    let preview = editor.session.preview(pixel);
    if preview.closes_ring {
        // Closing needs a name first; the prompt finishes the click
        name_prompt.open(preview.vertex);
        return;
    }

    let editor = &mut *editor;
    let exports_dir = config.exports_dir();
    let mut sink = AreaFileSink::new(None, &transform, &editor.metadata, &exports_dir);
    match editor.session.click(pixel, &mut sink) {
        Ok(ClickOutcome::Added { vertex, latched: true }) => {
            debug!("Latched onto existing vertex ({}, {})", vertex.x, vertex.y);
        }
        Ok(_) => {}
        Err(e) => error!("Click failed: {}", e),
    }
}

/// Escape drops the ring under construction
pub fn handle_discard_shortcut(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut editor: ResMut<AreaEditor>,
    dialog_state: Res<DialogState>,
    mut contexts: EguiContexts,
) {
    if dialog_state.any_modal_open {
        return;
    }

    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    if keyboard.just_pressed(KeyCode::Escape) && !editor.session.current().is_empty() {
        editor.session.clear_current();
        info!("Discarded current ring");
    }
}
