use eframe::egui;

use crate::gui::constants::*;
use crate::session::{Notice, NoticeKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialogAction {
    None,
    Dismiss,
    ConfirmDelete,
    CancelDelete,
}

/// Blocking message box for errors and hints
pub fn notice(ctx: &egui::Context, notice: &Notice) -> DialogAction {
    let mut action = DialogAction::None;

    egui::Modal::new(egui::Id::new("notice_dialog")).show(ctx, |ui| {
        ui.set_max_width(360.0);
        ui.label(egui::RichText::new(&notice.title).strong());
        ui.add_space(ITEM_SPACING);
        match notice.kind {
            NoticeKind::Error => {
                ui.colored_label(ERROR_COLOR, &notice.message);
            }
            NoticeKind::Info => {
                ui.label(&notice.message);
            }
        }
        ui.add_space(ITEM_SPACING);
        if ui.button("OK").clicked() {
            action = DialogAction::Dismiss;
        }
    });

    action
}

pub fn confirm_delete(ctx: &egui::Context, title: &str) -> DialogAction {
    let mut action = DialogAction::None;

    egui::Modal::new(egui::Id::new("confirm_delete_dialog")).show(ctx, |ui| {
        ui.label(egui::RichText::new("Confirm Delete").strong());
        ui.add_space(ITEM_SPACING);
        ui.label(format!("Are you sure you want to delete '{title}'?"));
        ui.colored_label(ERROR_COLOR, "This cannot be undone!");
        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            if ui.button("Yes").clicked() {
                action = DialogAction::ConfirmDelete;
            }
            if ui.button("No").clicked() {
                action = DialogAction::CancelDelete;
            }
        });
    });

    action
}
