//! Sensor facade demo against a scripted mock platform

use nalgebra::{UnitQuaternion, Vector3};
use sensor_facade::{
    ConfigurationManager, JsonFormatter, ManualClock, MockPlatform, PermissionBehavior, Position, SensorManager,
    ServiceStatus, StartupEvent, TextFormatter,
};
use tracing_subscriber::EnvFilter;

/// Seoul City Hall, used as the simulated fix
const DEMO_FIX: Position = Position {
    latitude: 37.5663,
    longitude: 126.9779,
    altitude: 38.0,
};

fn demo_platform() -> MockPlatform {
    MockPlatform::new()
        .with_permission(PermissionBehavior::GrantAfterChecks(2))
        .with_status_script([
            ServiceStatus::Initializing,
            ServiceStatus::Initializing,
            ServiceStatus::Running,
        ])
        .with_fix(DEMO_FIX)
        .with_headings(21.5, 13.0)
        .with_attitude(UnitQuaternion::from_euler_angles(0.0, 0.0, 0.5))
        .with_rate_script([
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.02, 0.01, 0.0),
            Vector3::new(0.4, 0.1, 0.05),
            Vector3::new(0.41, 0.1, 0.05),
        ])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let json_output = args.iter().any(|arg| arg == "--json");
    let config_path = args.iter().skip(1).find(|arg| !arg.starts_with("--"));

    let config = match config_path {
        Some(path) => ConfigurationManager::from_file(path)?.get_config().clone(),
        None => ConfigurationManager::new().get_config().clone(),
    };
    let max_wait_seconds = config.max_wait_seconds;

    let mut manager = SensorManager::with_config(demo_platform(), config)?;
    manager.subscribe(Box::new(|event: &StartupEvent| {
        if let StartupEvent::Finished(report) = event {
            tracing::info!(
                outcome = ?report.outcome,
                seconds_waited = report.seconds_waited,
                remaining_budget = report.remaining_budget,
                "startup finished"
            );
        }
    }));

    // Simulated time keeps the demo instant
    let mut clock = ManualClock::new();
    let report = manager.start_service(max_wait_seconds, &mut clock);
    if !report.outcome.is_started() {
        tracing::error!(outcome = ?report.outcome, "location service did not start");
        return Err("location service startup failed".into());
    }

    let snapshot = manager.snapshot();
    if json_output {
        println!("{}", JsonFormatter::pretty().format_json(&snapshot)?);
    } else {
        print!("{}", TextFormatter::default().format_text(&snapshot));
    }

    let target = Position::new(37.5796, 126.9770, 120.0);
    println!(
        "Distance to target: {:.1} m (2D), {:.1} (3D, altitude scaled)",
        manager.distance2d(target.latitude, target.longitude),
        manager.distance3d(target.latitude, target.longitude, target.altitude)
    );

    for sample in 0..4 {
        println!("Motion sample {}: moving = {}", sample, manager.is_moving());
    }

    Ok(())
}
