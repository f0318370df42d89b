use crate::address_dialog::{AddressChoice, AddressDialog};
use crate::dialogs;
use crate::job::InstallJob;
use bydadb_core::{CancelToken, Config, copy, install};
use eframe::egui;
use std::time::Duration;
use tracing::{info, warn};

pub struct AssistantApp {
    config: Config,
    address_dialog: Option<AddressDialog>,
    job: Option<InstallJob>,
}

impl AssistantApp {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            address_dialog: None,
            job: None,
        }
    }

    fn busy(&self) -> bool {
        self.address_dialog.is_some() || self.job.is_some()
    }

    fn handle_copy_to_usb(&mut self) {
        let Some(usb_path) = dialogs::select_usb_path() else {
            return;
        };

        match copy::run(
            &self.config.apk_dir,
            &usb_path,
            &CancelToken::new(),
            |_| {},
            |c| info!(file = %c.file_name, "copied"),
        ) {
            Ok(summary) if summary.is_empty() => {
                dialogs::info("No APKs", "No APK files found in the folder.");
            }
            Ok(_) => dialogs::info(
                "Success",
                "All APKs have been successfully copied to the USB drive.",
            ),
            Err(e) => dialogs::error(&e),
        }
    }

    fn open_address_dialog(&mut self) {
        let recent = self.config.recent_addresses().load().unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable recent address file");
            Vec::new()
        });
        self.address_dialog = Some(AddressDialog::new(recent));
    }

    fn start_install(&mut self, address: String) {
        let Some(packages) = dialogs::select_apk_files() else {
            return;
        };
        if packages.is_empty() {
            return;
        }

        // Bad input is reported here rather than from the worker.
        if let Err(e) = install::preflight(&address, &packages) {
            dialogs::error(&e);
            return;
        }

        self.job = Some(InstallJob::spawn(
            self.config.bridge(),
            self.config.recent_addresses(),
            address,
            packages,
            self.config.install_timeout,
        ));
    }

    fn show_progress(&mut self, ctx: &egui::Context) {
        let Some(job) = self.job.as_mut() else {
            return;
        };

        if let Some(outcome) = job.poll() {
            self.job = None;
            match outcome {
                Ok(_) => dialogs::info("Success", "All APKs have been installed successfully!"),
                Err(e) => dialogs::error(&e),
            }
            return;
        }

        let remaining = job.remaining().as_secs();
        egui::Window::new("Installing APKs")
            .collapsible(false)
            .resizable(false)
            .fixed_size([400.0, 200.0])
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.add(egui::Spinner::new());
                    ui.label(egui::RichText::new(job.status()).size(14.0));
                    ui.add_space(10.0);
                    ui.weak(format!("Giving up in {remaining} s"));
                });
            });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

impl eframe::App for AssistantApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let enabled = !self.busy();
        let mut copy_clicked = false;
        let mut install_clicked = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(10.0);
                ui.label(egui::RichText::new("Welcome to BYD ADB Assistant").size(20.0));
                ui.add_space(5.0);
                ui.label(
                    egui::RichText::new(
                        "You can use this utility to install APKs on your BYD car using ADB.",
                    )
                    .size(14.0),
                );
                ui.add_space(10.0);

                copy_clicked = ui
                    .add_enabled(
                        enabled,
                        egui::Button::new("Install Required APKs to USB Drive")
                            .min_size([320.0, 28.0].into()),
                    )
                    .clicked();
                ui.add_space(5.0);
                install_clicked = ui
                    .add_enabled(
                        enabled,
                        egui::Button::new("Install APKs using ADB").min_size([320.0, 28.0].into()),
                    )
                    .clicked();

                ui.add_space(10.0);
                ui.small("Made by Khalifa Alahmedi, 2025.");
                ui.small("Open-Source and free forever <3");
            });
        });

        if copy_clicked {
            self.handle_copy_to_usb();
        }
        if install_clicked {
            self.open_address_dialog();
        }

        if let Some(dialog) = self.address_dialog.as_mut() {
            match dialog.show(ctx) {
                Some(AddressChoice::Chosen(address)) => {
                    self.address_dialog = None;
                    self.start_install(address);
                }
                Some(AddressChoice::Dismissed) => self.address_dialog = None,
                None => {}
            }
        }

        self.show_progress(ctx);
    }
}
