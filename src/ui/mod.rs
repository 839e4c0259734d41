mod area_name;
mod dialogs;
mod toolbar;

pub use area_name::AreaNamePrompt;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigResetNotification;
use crate::editor::EditorSetupError;
use crate::persistence::{AreaExportError, AreaImportError, AsyncImportOperation};

/// Resource that tracks whether any modal dialog is currently open.
/// Editor input handlers check this so clicks on a dialog never reach
/// the session.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    name_prompt: Res<AreaNamePrompt>,
    export_error: Res<AreaExportError>,
    import_error: Res<AreaImportError>,
    async_op: Res<AsyncImportOperation>,
    config_reset: Res<ConfigResetNotification>,
    setup_error: Res<EditorSetupError>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = name_prompt.is_open()
        || export_error.message.is_some()
        || !import_error.messages.is_empty()
        || async_op.is_importing
        || config_reset.show
        || setup_error.message.is_some();
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<AreaNamePrompt>()
            .add_systems(EguiPrimaryContextPass, toolbar::toolbar_ui)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    area_name::area_name_prompt_ui,
                    dialogs::export_error_dialog_ui,
                    dialogs::import_error_dialog_ui,
                    dialogs::setup_error_dialog_ui,
                    dialogs::config_reset_notification_ui,
                    dialogs::import_progress_modal_ui,
                )
                    .after(toolbar::toolbar_ui),
            )
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}
