//! The top-level menu and the wording of outcomes.
use bydadb_core::{Error, ErrorKind};
use console::style;

pub const BANNER: &str = "\
                           -----------------------------
                          |       BYD ADB Assistant      |
                          |       Made by KMA, 2025      |
                           -----------------------------";

pub const OPTIONS: [&str; 2] = [
    "1. Install required APKs to USB Drive (necessary to use option 2)",
    "2. Install APKs using ADB",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    CopyToUsb,
    InstallOverAdb,
}

impl Choice {
    /// Maps the typed menu entry to a choice. Only `1` and `2` are valid.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Choice::CopyToUsb),
            "2" => Some(Choice::InstallOverAdb),
            _ => None,
        }
    }
}

/// Prints a failed operation. Cancellation is not an error from the user's
/// point of view, so it gets a plain line.
pub fn report(err: &Error) {
    tracing::debug!(kind = %err.kind(), error = %err, "operation failed");
    match err.kind() {
        ErrorKind::Cancelled => println!("\n{}", style("Operation cancelled.").yellow()),
        kind => println!(
            "\n{} {}",
            style(format!("{}:", kind.title())).red().bold(),
            err.user_message()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_and_two_are_choices() {
        assert_eq!(Choice::parse("1"), Some(Choice::CopyToUsb));
        assert_eq!(Choice::parse(" 2\n"), Some(Choice::InstallOverAdb));
        assert_eq!(Choice::parse("3"), None);
        assert_eq!(Choice::parse(""), None);
        assert_eq!(Choice::parse("one"), None);
        assert_eq!(Choice::parse("12"), None);
    }
}
