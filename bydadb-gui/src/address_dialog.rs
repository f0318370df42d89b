//! The "Enter or Select IP Address" window.
use eframe::egui;

/// What the user did with the address window this frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddressChoice {
    /// An address was picked or typed and confirmed.
    Chosen(String),
    /// The window was closed without an address.
    Dismissed,
}

pub struct AddressDialog {
    entry: String,
    recent: Vec<String>,
}

impl AddressDialog {
    /// `recent` is oldest first, as stored; it is shown newest first.
    pub fn new(recent: Vec<String>) -> Self {
        Self {
            entry: String::new(),
            recent: recent.into_iter().rev().collect(),
        }
    }

    /// Draws the window. Returns `Some` once the user is done with it.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<AddressChoice> {
        let mut picked: Option<String> = None;
        let mut ok_clicked = false;
        let mut open = true;

        egui::Window::new("Enter or Select IP Address")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("Enter your car's IP address:").size(14.0));
                    ui.add_space(4.0);
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.entry)
                            .hint_text("192.168.1.100")
                            .desired_width(240.0),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        ok_clicked = true;
                    }

                    if !self.recent.is_empty() {
                        ui.add_space(10.0);
                        ui.label(egui::RichText::new("Previously used IPs:").size(14.0));
                        for ip in &self.recent {
                            if ui.add_sized([200.0, 24.0], egui::Button::new(ip)).clicked() {
                                picked = Some(ip.clone());
                            }
                        }
                    }

                    ui.add_space(10.0);
                    if ui.add_sized([100.0, 24.0], egui::Button::new("OK")).clicked() {
                        ok_clicked = true;
                    }
                });
            });

        if !open {
            return Some(AddressChoice::Dismissed);
        }
        if picked.is_some() || ok_clicked {
            return Some(resolve(picked.as_deref(), &self.entry));
        }
        None
    }
}

/// A clicked recent address wins over the text field; an empty result means
/// the user gave nothing.
fn resolve(picked: Option<&str>, typed: &str) -> AddressChoice {
    let address = picked.unwrap_or(typed).trim();
    if address.is_empty() {
        AddressChoice::Dismissed
    } else {
        AddressChoice::Chosen(address.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_button_beats_typed_text() {
        assert_eq!(
            resolve(Some("10.0.0.2"), "10.0.0.9"),
            AddressChoice::Chosen("10.0.0.2".into())
        );
    }

    #[test]
    fn typed_text_is_trimmed() {
        assert_eq!(
            resolve(None, " 192.168.1.100 "),
            AddressChoice::Chosen("192.168.1.100".into())
        );
    }

    #[test]
    fn nothing_entered_dismisses() {
        assert_eq!(resolve(None, "   "), AddressChoice::Dismissed);
    }

    #[test]
    fn newest_address_is_listed_first() {
        let dialog = AddressDialog::new(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(dialog.recent, vec!["c", "b", "a"]);
    }
}
