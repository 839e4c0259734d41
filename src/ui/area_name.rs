//! "What's the name of the area?" prompt shown when a click closes a ring.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::area::Vertex;
use crate::persistence::CloseRingRequest;

#[derive(Resource, Default)]
pub struct AreaNamePrompt {
    /// Latched vertex of the closing click, held until the prompt is answered
    pub pending: Option<Vertex>,
    pub name: String,
    focus_requested: bool,
}

impl AreaNamePrompt {
    pub fn open(&mut self, vertex: Vertex) {
        self.pending = Some(vertex);
        self.name.clear();
        self.focus_requested = false;
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Closes the prompt and builds the request that finishes the click.
    fn answer(&mut self, confirmed: bool) -> Option<CloseRingRequest> {
        let vertex = self.pending.take()?;
        let name = confirmed.then(|| std::mem::take(&mut self.name));
        Some(CloseRingRequest { vertex, name })
    }
}

pub fn area_name_prompt_ui(
    mut contexts: EguiContexts,
    mut prompt: ResMut<AreaNamePrompt>,
    mut close_events: MessageWriter<CloseRingRequest>,
) -> Result {
    if !prompt.is_open() {
        return Ok(());
    }

    let mut confirmed = None;
    egui::Window::new("Export Area")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("What's the name of the area?");
            let response = ui.text_edit_singleline(&mut prompt.name);
            if !prompt.focus_requested {
                response.request_focus();
                prompt.focus_requested = true;
            }

            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let escape = ui.input(|i| i.key_pressed(egui::Key::Escape));

            ui.horizontal(|ui| {
                if ui.button("Export").clicked() || enter {
                    confirmed = Some(true);
                }
                if ui.button("Cancel").clicked() || escape {
                    confirmed = Some(false);
                }
            });
        });

    if let Some(confirmed) = confirmed
        && let Some(request) = prompt.answer(confirmed)
    {
        close_events.write(request);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_default_closed() {
        let prompt = AreaNamePrompt::default();
        assert!(!prompt.is_open());
    }

    #[test]
    fn test_confirm_carries_name() {
        let mut prompt = AreaNamePrompt::default();
        prompt.open(Vertex::new(10, 10));
        prompt.name = "Lumbridge".to_string();

        let request = prompt.answer(true).unwrap();
        assert_eq!(request.vertex, Vertex::new(10, 10));
        assert_eq!(request.name.as_deref(), Some("Lumbridge"));
        assert!(!prompt.is_open());
    }

    #[test]
    fn test_cancel_sends_no_name() {
        let mut prompt = AreaNamePrompt::default();
        prompt.open(Vertex::new(3, 4));
        prompt.name = "ignored".to_string();

        let request = prompt.answer(false).unwrap();
        assert!(request.name.is_none());
        assert!(prompt.answer(false).is_none());
    }

    #[test]
    fn test_reopen_clears_previous_name() {
        let mut prompt = AreaNamePrompt::default();
        prompt.open(Vertex::new(1, 1));
        prompt.name = "old".to_string();
        prompt.open(Vertex::new(2, 2));
        assert!(prompt.name.is_empty());
        assert_eq!(prompt.pending, Some(Vertex::new(2, 2)));
    }
}
