use std::env;
use std::error::Error;

use camino::Utf8PathBuf;
use ecliptic_apex::apex_model::ApexModel;
use ecliptic_apex::config::ApexConfig;
use ecliptic_apex::direction::EclipticPole;
use ecliptic_apex::hemisphere::Hemisphere;
use ecliptic_apex::peaks::reference_heights;
use ecliptic_apex::session::ApexSession;
use hifitime::{Epoch, Unit};
use tracing_subscriber::{fmt, EnvFilter};

/// Print the absolute maximum of both hemispheres, then replay one hour of
/// simulated time at 30 s per frame through the throttled session.
///
/// Usage: `cargo run --example apex_demo [data_dir | config.json]`
///
/// Without an argument the model runs on the bare ellipsoid.
fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let config = match env::args().nth(1).map(Utf8PathBuf::from) {
        Some(path) if path.extension() == Some("json") => ApexConfig::from_json_file(&path)?,
        Some(dir) => ApexConfig::with_data_dir(&dir),
        None => ApexConfig::default(),
    };
    let model = ApexModel::load(&config);

    let now = Epoch::now()?;
    for hemisphere in Hemisphere::ALL {
        let session = ApexSession::new(model.clone(), hemisphere, true);
        let Some(best) = session.absolute_maximum() else {
            continue;
        };
        println!("Absolute maximum ({hemisphere})");
        print!("{best}");
        if let Some(next) = session.next_absolute_maximum(&now) {
            println!("next occurrence: {next}");
        }

        for reference in reference_heights(hemisphere) {
            println!(
                "  {:<34} {:>10.3} km {:>+9.1} m",
                reference.peak.name, reference.height_km, reference.advantage
            );
        }
        println!();
    }

    let mut session = ApexSession::new(model, Hemisphere::North, true);
    let pole = EclipticPole::default();
    for frame in 0..120 {
        let epoch = now + (frame as f64 * 30.0) * Unit::Second;
        if let Some(apex) = session.tick(epoch, &pole) {
            if frame % 20 == 0 {
                println!("{epoch}");
                print!("{apex}");
            }
        }
    }
    Ok(())
}
