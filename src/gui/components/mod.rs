pub mod dialogs;
pub mod editor;
pub mod note_list;
