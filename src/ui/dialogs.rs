//! Error, notification and progress dialogs.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::ConfigResetNotification;
use crate::editor::EditorSetupError;
use crate::persistence::{AreaExportError, AreaImportError, AsyncImportOperation};

fn error_window(ctx: &egui::Context, title: &str, lines: &[String]) -> bool {
    let mut dismissed = false;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                for line in lines {
                    ui.colored_label(egui::Color32::RED, line);
                }
            });
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    dismissed
}

pub fn export_error_dialog_ui(
    mut contexts: EguiContexts,
    mut export_error: ResMut<AreaExportError>,
) -> Result {
    let Some(message) = export_error.message.clone() else {
        return Ok(());
    };

    if error_window(contexts.ctx_mut()?, "Export Error", &[message]) {
        export_error.message = None;
    }
    Ok(())
}

pub fn import_error_dialog_ui(
    mut contexts: EguiContexts,
    mut import_error: ResMut<AreaImportError>,
) -> Result {
    if import_error.messages.is_empty() {
        return Ok(());
    }

    if error_window(contexts.ctx_mut()?, "Import Error", &import_error.messages) {
        import_error.messages.clear();
    }
    Ok(())
}

/// Shown when the editor could not start; there is nothing to dismiss to
pub fn setup_error_dialog_ui(
    mut contexts: EguiContexts,
    setup_error: Res<EditorSetupError>,
) -> Result {
    let Some(message) = &setup_error.message else {
        return Ok(());
    };

    egui::Window::new("Editor Unavailable")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.colored_label(egui::Color32::RED, message);
            ui.add_space(5.0);
            ui.label(
                egui::RichText::new(
                    "Check reference_image, calibration and latch_radius in config.json.",
                )
                .weak(),
            );
        });
    Ok(())
}

pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Configuration Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Settings were reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.label(egui::RichText::new(reason).weak());
            }
            ui.add_space(5.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });
    Ok(())
}

pub fn import_progress_modal_ui(
    mut contexts: EguiContexts,
    async_op: Res<AsyncImportOperation>,
) -> Result {
    if !async_op.is_importing {
        return Ok(());
    }

    egui::Window::new("Please Wait")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(
                    async_op
                        .operation_description
                        .as_deref()
                        .unwrap_or("Importing..."),
                );
            });
        });
    Ok(())
}
