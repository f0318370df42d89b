//! Native pickers and message boxes.
use bydadb_core::Error;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;

pub fn select_usb_path() -> Option<PathBuf> {
    FileDialog::new().set_title("Select USB Drive").pick_folder()
}

pub fn select_apk_files() -> Option<Vec<PathBuf>> {
    FileDialog::new()
        .set_title("Select APK Files")
        .add_filter("APK Files", &["apk"])
        .pick_files()
}

fn message(level: MessageLevel, title: &str, text: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(text)
        .set_buttons(MessageButtons::Ok)
        .show();
}

pub fn info(title: &str, text: &str) {
    message(MessageLevel::Info, title, text);
}

/// Shows `err` under a title chosen by its kind.
pub fn error(err: &Error) {
    tracing::warn!(kind = %err.kind(), error = %err, "reporting failure");
    message(MessageLevel::Error, err.kind().title(), &err.user_message());
}
