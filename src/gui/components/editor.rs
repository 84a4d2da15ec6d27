use std::time::Instant;

use eframe::egui;

use crate::gui::constants::ITEM_SPACING;
use crate::session::{Focus, Session};

/// Right panel: title line and content body of the current note
///
/// Only user edits reach `Session::edit_*`; the buffers are re-read from the
/// session every frame, so selection changes never count as edits. Widget
/// ids carry the note id so undo history never crosses notes.
pub fn ui(ui: &mut egui::Ui, session: &mut Session, focus: Option<Focus>) {
    let note = session.current().cloned();
    let enabled = note.is_some();

    ui.add_enabled_ui(enabled, |ui| {
        let mut title = session.title().to_owned();
        let title_response = ui.add(
            egui::TextEdit::singleline(&mut title)
                .id(egui::Id::new(("note_title", &note)))
                .hint_text("Note Title")
                .font(egui::TextStyle::Heading)
                .desired_width(f32::INFINITY),
        );
        if title_response.changed() {
            session.edit_title(title, Instant::now());
        }
        if focus == Some(Focus::Title) {
            title_response.request_focus();
        }

        ui.add_space(ITEM_SPACING);

        let mut content = session.content().to_owned();
        let content_response = egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_sized(
                    ui.available_size(),
                    egui::TextEdit::multiline(&mut content)
                        .id(egui::Id::new(("note_content", &note)))
                        .hint_text("Write your note here..."),
                )
            })
            .inner;
        if content_response.changed() {
            session.edit_content(content, Instant::now());
        }
        if focus == Some(Focus::Content) {
            content_response.request_focus();
        }
    });
}
