mod cli;
mod menu;

use anyhow::Result;
use bydadb_core::install::InstallEvent;
use bydadb_core::{CancelToken, Config, DeviceAddress, UsbDrive, copy, install, platform};
use clap::Parser;
use cli::Cli;
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use menu::Choice;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const MANUAL_PATH: &str = "Enter a path manually";
const NEW_ADDRESS: &str = "Enter a new address";

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn prompt_text(prompt: &str) -> Result<String> {
    let text: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?;
    Ok(text.trim().to_string())
}

/// Lets the user pick a detected USB drive, or type a path if none fits.
fn select_usb_path(drives: &[UsbDrive]) -> Result<PathBuf> {
    if drives.is_empty() {
        return Ok(PathBuf::from(prompt_text("Enter the path to your USB drive")?));
    }

    let mut items: Vec<String> = drives.iter().map(|d| d.to_string()).collect();
    items.push(MANUAL_PATH.to_string());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select your USB drive")
        .items(&items)
        .default(0)
        .interact()?;

    match drives.get(selection) {
        Some(drive) => Ok(drive.mount_point.clone()),
        None => Ok(PathBuf::from(prompt_text("Enter the path to your USB drive")?)),
    }
}

/// Offers the recently used addresses, newest first, before asking for one.
fn select_address(recent: &[String]) -> Result<String> {
    if recent.is_empty() {
        return prompt_text("Enter your car's IP address (e.g., 192.168.1.100)");
    }

    let mut items: Vec<String> = recent.iter().rev().cloned().collect();
    items.push(NEW_ADDRESS.to_string());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select your car's IP address")
        .items(&items)
        .default(0)
        .interact()?;

    if selection + 1 == items.len() {
        prompt_text("Enter your car's IP address (e.g., 192.168.1.100)")
    } else {
        Ok(items[selection].clone())
    }
}

fn copy_to_usb(config: &Config, cancel: &CancelToken) -> Result<()> {
    let drives = platform::get_removable_drives();
    let usb_path = select_usb_path(&drives)?;

    println!("Copying APKs to USB drive...");

    let copy_pb = ProgressBar::new(0);
    let on_start = |count: usize| {
        copy_pb.set_length(count as u64);
        copy_pb.set_prefix("Copying");
        copy_pb.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:12} [{elapsed_precise}] [{bar:40.green/black}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("■ "),
        );
    };
    let on_copied = |copied: &copy::CopiedPackage| {
        copy_pb.println(format!(
            "Copied {} to {}",
            copied.file_name,
            usb_path.display()
        ));
        copy_pb.inc(1);
    };

    let result = copy::run(&config.apk_dir, &usb_path, cancel, on_start, on_copied);
    match result {
        Ok(summary) if summary.is_empty() => {
            copy_pb.finish_and_clear();
            println!(
                "No APK files found in {}.",
                style(config.apk_dir.display()).cyan()
            );
        }
        Ok(summary) => {
            copy_pb.finish_with_message("Copy complete.");
            println!(
                "\n✨ All {} APKs ({}) have been successfully copied to {}.",
                summary.count(),
                HumanBytes(summary.total_bytes()),
                style(usb_path.display()).cyan()
            );
        }
        Err(e) => {
            copy_pb.finish_and_clear();
            return Err(e.into());
        }
    }

    Ok(())
}

fn install_over_adb(config: &Config, cancel: &CancelToken) -> Result<()> {
    let store = config.recent_addresses();
    let recent = store.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable recent address file");
        Vec::new()
    });

    // Reject a bad address before asking for anything else.
    let address = DeviceAddress::parse(&select_address(&recent)?)?;

    let mut packages = Vec::new();
    loop {
        let path = PathBuf::from(prompt_text(
            "Enter the full path to the APK file you want to install",
        )?);
        if !path.is_file() {
            return Err(bydadb_core::Error::PackageMissing(path).into());
        }
        packages.push(path);

        let another = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Install another APK?")
            .default(false)
            .interact()?;
        if !another {
            break;
        }
    }

    println!();
    println!("  Car:  {}", style(&address).cyan());
    for package in &packages {
        println!("  APK:  {}", style(package.display()).cyan());
    }
    println!();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    let on_event = |event: &InstallEvent| match event {
        InstallEvent::Connected(_) | InstallEvent::Installed { .. } => {
            spinner.println(format!("{} {}", style("✔").green(), event.describe()));
        }
        _ => spinner.set_message(event.describe()),
    };

    let mut bridge = config.bridge();
    let result = install::run(
        &mut bridge,
        &store,
        address.as_str(),
        &packages,
        cancel,
        on_event,
    );

    match result {
        Ok(summary) => {
            spinner.finish_and_clear();
            let noun = if summary.count() == 1 { "APK" } else { "APKs" };
            println!(
                "\n✨ {} {} installed successfully on {}!",
                summary.count(),
                noun,
                style(&address).cyan()
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());
    let config = cli.config();

    // Ctrl+C clears this flag; copies check it between files and installs
    // between steps.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;
    let cancel = CancelToken::from_flag(running);

    println!();
    println!("{}", menu::BANNER);
    println!();
    println!(
        "Welcome to BYD ADB Assistant! This tool lets you install apps on your BYD car easily using Android Debug Bridge."
    );
    println!();
    println!("Please select an option:");
    for option in menu::OPTIONS {
        println!("{option}");
    }
    println!();

    let outcome = match Choice::parse(&prompt_text("Enter your choice (1 or 2)")?) {
        Some(Choice::CopyToUsb) => copy_to_usb(&config, &cancel),
        Some(Choice::InstallOverAdb) => install_over_adb(&config, &cancel),
        None => {
            println!("Invalid choice. Exiting.");
            return Ok(());
        }
    };

    // Operation failures are reported, not propagated; only terminal and
    // prompt failures reach the caller.
    if let Err(e) = outcome {
        match e.downcast_ref::<bydadb_core::Error>() {
            Some(err) => menu::report(err),
            None => return Err(e),
        }
    }

    Ok(())
}
