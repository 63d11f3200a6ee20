//! # spotswitchd — spotswitch daemon
//!
//! Composition root that wires the adapters together and runs the
//! schedule executor.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Build the virtual device fleet and seed the schedule store
//! - Construct the executor, injecting adapters via port traits
//! - Tick once per minute until shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod seed;

use spotswitch_adapter_storage_memory::MemoryScheduleStore;
use spotswitch_adapter_virtual::VirtualDeviceRegistry;
use spotswitch_app::executor::ScheduleExecutor;
use spotswitch_app::ports::SystemClock;
use tracing_subscriber::EnvFilter;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Devices & schedules
    let registry = VirtualDeviceRegistry::default();
    let store = MemoryScheduleStore::default();

    let seed_file = seed::load(config.schedules_path())?;
    seed::build_fleet(&seed_file, &registry);
    for schedule in seed::build_schedules(&seed_file, &registry) {
        store.insert(schedule);
    }
    tracing::info!(
        path = config.schedules_path(),
        devices = registry.device_count(),
        schedules = store.schedule_count(),
        "seed loaded"
    );

    // Executor: the registry serves as both directory and actuator.
    let executor = ScheduleExecutor::new(store, registry.clone(), registry, SystemClock);

    tokio::select! {
        () = executor.run(config.tick_interval()) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
        }
    }

    Ok(())
}
