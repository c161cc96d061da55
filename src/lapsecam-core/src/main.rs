//! Lapsecam - duty-cycled wake/capture/upload/sleep camera controller
//!
//! No command-line surface: behavior is entirely driven by the persisted
//! configuration and the remote control plane.

use anyhow::{Context, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use lapsecam_capture::{CaptureService, SensorProfile};
use lapsecam_core::config::DeviceConfig;
use lapsecam_core::controller::{Controller, CycleExit};
use lapsecam_core::drivers::{HostedControl, HostedIllumination, HostedLink, HostedSensor};
use lapsecam_core::platform::HostPlatform;
use lapsecam_core::store::{ConfigStore, FileStore};
use lapsecam_core::window::SystemClock;
use lapsecam_net::Connectivity;
use lapsecam_upload::HttpUploader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    info!("lapsecam {} starting", env!("CARGO_PKG_VERSION"));

    let data_dir = FileStore::default_dir();
    info!("data directory: {:?}", data_dir);

    let mut store = FileStore::new(&data_dir);
    if !store.config_path().exists() {
        store
            .save(&DeviceConfig::default())
            .context("writing default config")?;
        warn!(
            "wrote default config to {:?}; set wifi and endpoint before deployment",
            store.config_path()
        );
    }

    let capture = CaptureService::new(
        Box::new(HostedSensor::default()),
        Box::new(HostedIllumination),
        SensorProfile::default(),
    );
    let connectivity = Connectivity::new(HostedLink::default(), HostedControl);
    let uploader = HttpUploader::new().context("building http client")?;

    let mut controller = Controller::new(
        Box::new(store),
        Box::new(SystemClock),
        Box::new(HostPlatform),
        capture,
        connectivity,
        uploader,
    );

    // On the device each cycle ends in timer-wake deep sleep and boots
    // fresh from flash; the host build sleeps in place and loops back to
    // Boot, which reconstructs all volatile state the same way.
    loop {
        let (outcome, exit) = controller.run_cycle().await;
        info!("cycle complete: {:?}", outcome);

        match exit {
            CycleExit::Restart => info!("restart requested, booting again"),
            CycleExit::Sleep(duration) => {
                info!("deep sleep for {:?}", duration);
                tokio::time::sleep(duration).await;
            }
        }
    }
}
