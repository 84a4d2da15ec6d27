use eframe::egui;

use crate::gui::constants::*;
use crate::notes::NoteId;
use crate::session::Session;

/// Left panel: search box, note list and the action buttons
pub fn ui(ui: &mut egui::Ui, session: &Session) -> NoteListAction {
    let mut action = NoteListAction::None;

    let mut query = session.query().to_owned();
    let search = egui::TextEdit::singleline(&mut query)
        .hint_text("Search notes...")
        .desired_width(f32::INFINITY);
    if ui.add(search).changed() {
        action = NoteListAction::Search(query);
    }

    ui.add_space(ITEM_SPACING);

    // Leave room for the button rows below the list
    let buttons_height = 3.0 * ui.spacing().interact_size.y + SECTION_SPACING;
    let list_height = (ui.available_height() - buttons_height).max(0.0);
    egui::ScrollArea::vertical()
        .max_height(list_height)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if session.visible().is_empty() {
                ui.weak(if session.query().is_empty() {
                    "No notes yet"
                } else {
                    "No matching notes"
                });
            }
            for id in session.visible() {
                let selected = session.current() == Some(id);
                if ui.selectable_label(selected, session.label_for(id)).clicked() {
                    action = NoteListAction::Select(id.clone());
                }
            }
        });

    ui.add_space(ITEM_SPACING);

    ui.horizontal(|ui| {
        if ui.button("➕ New Note").clicked() {
            action = NoteListAction::New;
        }
        if ui.button("🗑 Delete Note").clicked() {
            action = NoteListAction::Delete;
        }
        if ui.button("✏ Rename Note").clicked() {
            action = NoteListAction::Rename;
        }
    });

    ui.add_space(ITEM_SPACING);

    if ui.button("🌗 Toggle Theme").clicked() {
        action = NoteListAction::ToggleTheme;
    }

    action
}

#[derive(Debug, Clone, PartialEq)]
pub enum NoteListAction {
    None,
    Search(String),
    Select(NoteId),
    New,
    Delete,
    Rename,
    ToggleTheme,
}
