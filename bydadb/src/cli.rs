use bydadb_core::Config;
use bydadb_core::bridge::DEFAULT_DEVICE_PORT;
use bydadb_core::config::DEFAULT_APK_DIR;
use bydadb_core::store;
use clap::{ArgAction, Parser};
use std::net::SocketAddrV4;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bydadb")]
#[command(about = "Install APKs on your BYD car using Android Debug Bridge", version)]
pub struct Cli {
    /// Folder holding the APKs copied by option 1
    #[arg(long, value_name = "DIR", default_value = DEFAULT_APK_DIR)]
    pub apk_dir: PathBuf,

    /// File remembering the last three car addresses
    #[arg(long, value_name = "FILE", default_value = store::DEFAULT_FILE)]
    pub ips_file: PathBuf,

    /// Address of the local ADB server
    #[arg(long, value_name = "HOST:PORT", default_value = "127.0.0.1:5037")]
    pub adb_server: SocketAddrV4,

    /// ADB port on the car
    #[arg(long, value_name = "PORT", default_value_t = DEFAULT_DEVICE_PORT)]
    pub device_port: u16,

    /// Print more diagnostics to stderr (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            apk_dir: self.apk_dir.clone(),
            recent_file: self.ips_file.clone(),
            adb_server: self.adb_server,
            device_port: self.device_port,
            ..Config::default()
        }
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
