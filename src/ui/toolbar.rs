use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::area::AREA_FILE_EXTENSION;
use crate::config::{AppConfig, UpdateLastImportDirRequest};
use crate::editor::{AreaEditor, CursorPixel};
use crate::persistence::{AsyncImportOperation, ImportAreasRequest, LastExport};

use super::DialogState;

/// Main toolbar: import, ring counts, cursor readout and last export
#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    editor: Res<AreaEditor>,
    cursor: Res<CursorPixel>,
    config: Res<AppConfig>,
    last_export: Res<LastExport>,
    async_op: Res<AsyncImportOperation>,
    dialog_state: Res<DialogState>,
    mut import_events: MessageWriter<ImportAreasRequest>,
    mut import_dir_events: MessageWriter<UpdateLastImportDirRequest>,
) -> Result {
    let mut import_clicked = false;

    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 8.0;

                let can_import = editor.transform.is_some()
                    && !async_op.is_importing
                    && !dialog_state.any_modal_open;
                if ui
                    .add_enabled(
                        can_import,
                        egui::Button::new(egui::RichText::new("Import Areas...").strong())
                            .min_size(egui::vec2(0.0, 24.0)),
                    )
                    .clicked()
                {
                    import_clicked = true;
                }

                ui.separator();

                let completed = editor.session.completed().count();
                let current = editor.session.current();
                ui.label(format!(
                    "Areas: {}  |  Current ring: {} points, {} edges",
                    completed,
                    current.len(),
                    current.edge_count()
                ));

                ui.separator();

                let readout = match (editor.transform, cursor.pixel) {
                    (Some(transform), Some(pixel)) => format!(
                        "({}, {})  {}",
                        pixel.x,
                        pixel.y,
                        transform.to_game_coordinate(pixel)
                    ),
                    _ => "-".to_string(),
                };
                ui.label(egui::RichText::new(readout).monospace());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(path) = &last_export.path {
                        ui.label(
                            egui::RichText::new(format!("Exported {}", path.display()))
                                .weak()
                                .small(),
                        );
                    }
                });
            });
        });

    if import_clicked {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("Area Files", &[AREA_FILE_EXTENSION])
            .set_title("Select areas to import");
        let start_dir = config
            .data
            .last_import_dir
            .clone()
            .unwrap_or_else(|| config.exports_dir());
        if start_dir.is_dir() {
            dialog = dialog.set_directory(start_dir);
        }

        if let Some(paths) = dialog.pick_files() {
            if let Some(parent) = paths.first().and_then(|p| p.parent()) {
                import_dir_events.write(UpdateLastImportDirRequest {
                    path: parent.to_path_buf(),
                });
            }
            import_events.write(ImportAreasRequest { paths });
        }
    }

    Ok(())
}
