//! Notes window implemented with egui/eframe

use std::time::Instant;

use anyhow::{anyhow, Result};
use eframe::{egui, CreationContext, NativeOptions};
use tracing::{info, warn};

use super::components::dialogs::{self, DialogAction};
use super::components::note_list::{self, NoteListAction};
use super::components::editor;
use super::constants::*;
use crate::session::Session;
use crate::theme::ThemeManager;

struct NotesApp {
    session: Session,
    themes: ThemeManager,
    confirm_delete: bool,
}

impl NotesApp {
    fn new(cc: &CreationContext<'_>, session: Session, themes: ThemeManager) -> Self {
        info!(notes = session.store().len(), theme = %themes.current(), "Initializing notes window");
        themes.apply(&cc.egui_ctx);
        Self {
            session,
            themes,
            confirm_delete: false,
        }
    }

    fn handle_list_action(&mut self, ctx: &egui::Context, action: NoteListAction) {
        if action == NoteListAction::None {
            return;
        }
        // Focus requests and notices are picked up on the next frame
        ctx.request_repaint();

        match action {
            NoteListAction::None => {}
            NoteListAction::Search(query) => self.session.set_query(query),
            NoteListAction::Select(id) => self.session.select(Some(id)),
            NoteListAction::New => {
                self.session.create_note();
            }
            NoteListAction::Delete => {
                if self.session.current().is_some() {
                    self.confirm_delete = true;
                } else {
                    // Reports "No Note Selected"
                    self.session.delete_current();
                }
            }
            NoteListAction::Rename => self.session.rename_current(),
            NoteListAction::ToggleTheme => {
                self.themes.toggle();
                self.themes.apply(ctx);
            }
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(notice) = self.session.notice() {
            if dialogs::notice(ctx, notice) == DialogAction::Dismiss {
                self.session.dismiss_notice();
            }
            return;
        }

        if self.confirm_delete {
            let title = match self.session.current() {
                Some(id) => self.session.label_for(id).to_owned(),
                None => {
                    self.confirm_delete = false;
                    return;
                }
            };
            match dialogs::confirm_delete(ctx, &title) {
                DialogAction::ConfirmDelete => {
                    self.confirm_delete = false;
                    self.session.delete_current();
                }
                DialogAction::CancelDelete => self.confirm_delete = false,
                _ => {}
            }
        }
    }
}

impl eframe::App for NotesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.session.tick(Instant::now());
        let focus = self.session.take_focus_request();

        let action = egui::SidePanel::left("note_list")
            .min_width(LIST_MIN_WIDTH)
            .show(ctx, |ui| {
                ui.add_space(ITEM_SPACING);
                note_list::ui(ui, &self.session)
            })
            .inner;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(ITEM_SPACING);
            editor::ui(ui, &mut self.session, focus);
        });

        self.handle_list_action(ctx, action);
        self.show_dialogs(ctx);

        // Wake up for the pending auto-save even if the user stops typing
        if let Some(wait) = self.session.next_autosave_in(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.session.shutdown();
        if let Some(notice) = self.session.notice() {
            warn!(message = %notice.message, "Unsaved changes on exit");
        }
        info!("Notes window exiting");
    }
}

pub fn run_gui(session: Session, themes: ThemeManager) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(NotesApp::new(cc, session, themes)))),
    )
    .map_err(|err| anyhow!("Failed to launch notes window: {err}"))
}
