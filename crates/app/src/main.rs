//! Posture sweep driver
//!
//! Usage: `posture-sweep [scenario.json] [output_dir]`
//!
//! Without a scenario file the built-in reference subject is swept. Each
//! sweep is written to `<output_dir>/<index>_<name>.csv`, and the full
//! analysis of the base posture to `<output_dir>/base_posture.json`.
//! Set `POSTURE_LOG=debug` (or `trace`) for per-query output.

mod output;
mod scenario;
mod sweep;

use std::env;
use std::fs;
use std::path::PathBuf;

use biomechanics::BodyModel;
use log::{info, LevelFilter};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use crate::scenario::Scenario;

fn log_level() -> LevelFilter {
    env::var("POSTURE_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let level = log_level();
    let mut config = ConfigBuilder::new();
    if level <= LevelFilter::Info {
        // A sweep builds hundreds of models; keep their summaries out of the way
        config.add_filter_ignore_str("biomechanics::model");
    }
    TermLogger::init(level, config.build(), TerminalMode::Mixed, ColorChoice::Auto)?;

    let mut args = env::args().skip(1);
    let scenario = match args.next() {
        Some(path) => {
            info!("loading scenario from {path}");
            Scenario::from_file(&path)?
        }
        None => {
            info!("no scenario given, using the reference subject");
            Scenario::default()
        }
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "sweeps".to_string()));
    fs::create_dir_all(&out_dir)?;

    let model = BodyModel::new(scenario.params)?;
    let analysis = model.analyze(&scenario.base_angles)?;
    info!(
        "base posture CoM: ({:.4}, {:.4}) m",
        analysis.body_com.x, analysis.body_com.y
    );
    for load in &analysis.joint_loads {
        info!(
            "{}: Fx={:.1} N, Fy={:.1} N, M={:.2} N·m",
            load.joint, load.force.x, load.force.y, load.moment
        );
    }
    fs::write(out_dir.join("base_posture.json"), serde_json::to_string_pretty(&analysis)?)?;

    for (index, entry) in scenario.sweeps.iter().enumerate() {
        let spec = &entry.sweep;
        let series = spec.run(&scenario.params, &entry.base(&scenario.base_angles))?;
        let path = out_dir.join(format!("{index:02}_{}.csv", spec.name()));
        output::write_series_file(&path, spec.parameter_label(), &series)?;
        info!("wrote {}", path.display());
    }

    Ok(())
}
