use bydadb_core::Config;
use bydadb_core::bridge::DEFAULT_DEVICE_PORT;
use bydadb_core::config::DEFAULT_APK_DIR;
use bydadb_core::store;
use clap::Parser;
use std::net::SocketAddrV4;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bydadb-gui")]
#[command(about = "BYD ADB Assistant, graphical edition", version)]
pub struct Args {
    /// Folder holding the APKs copied to the USB drive
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

    /// Seconds before an install run is abandoned
    #[arg(long, value_name = "SECS", default_value_t = 180)]
    pub timeout: u64,
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            apk_dir: self.apk_dir.clone(),
            recent_file: self.ips_file.clone(),
            adb_server: self.adb_server,
            device_port: self.device_port,
            install_timeout: std::time::Duration::from_secs(self.timeout),
        }
    }
}
