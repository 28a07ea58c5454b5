//! Replays a JSON file of per-frame detections through a `LineCounter`,
//! prints the per-class tallies and saves the session record.
//!
//! Usage: replay_detections [SCENARIO_JSON] [OUTPUT_DIR] [CONFIG_JSON]
//! Set `RUST_LOG=debug` to see track registration and retirement.

use std::env;
use std::error::Error;
use std::path::PathBuf;

use crosstrack_rs::palette::class_color;
use crosstrack_rs::{CounterConfig, Detection, LineCounter};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct ScenarioJson {
    name: String,
    #[serde(default)]
    line_y: Option<i32>,
    frames: Vec<FrameJson>,
}

#[derive(Debug, Deserialize)]
struct FrameJson {
    detections: Vec<(i32, i32, i32, i32, usize)>,
}

const CLASS_NAMES: [&str; 7] = [
    "ambulance",
    "auto",
    "bicycle",
    "bus",
    "car",
    "motorbike",
    "truck",
];

fn class_name(class_id: usize) -> String {
    CLASS_NAMES
        .get(class_id)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("class {}", class_id))
}

fn print_usage() {
    println!("Usage: replay_detections [SCENARIO_JSON] [OUTPUT_DIR] [CONFIG_JSON]");
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        print_usage();
        return Ok(());
    }

    let scenario_path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/scenarios/two_lane_crossing.json"));
    let output_dir = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/output"));
    let mut config = match args.get(3) {
        Some(path) => CounterConfig::from_path(path)?,
        None => CounterConfig::default(),
    };

    let scenario: ScenarioJson =
        serde_json::from_reader(std::fs::File::open(&scenario_path)?)?;
    if let Some(line_y) = scenario.line_y {
        config = config.with_line_y(line_y);
    }
    let mut counter = LineCounter::from_config(&config)?;

    for frame in scenario.frames.iter() {
        let detections: Vec<Detection> = frame.detections.iter().map(|&d| d.into()).collect();
        let output = counter.process_frame(&detections);
        for event in output.events.iter() {
            println!(
                "frame {:>4}: track {} ({}) {:?}",
                counter.frame_count(),
                event.track_id,
                class_name(event.class_id),
                event.direction
            );
        }
    }

    let session = counter.session();
    println!("{}: {} frames", scenario.name, counter.frame_count());
    for class_id in session.classes() {
        let [r, g, b] = class_color(class_id);
        println!(
            "  \x1b[38;2;{};{};{}m{:<10}\x1b[0m in {:>3}  out {:>3}",
            r,
            g,
            b,
            class_name(class_id),
            session.entry_count(class_id),
            session.exit_count(class_id)
        );
    }
    println!("  net {}", session.net());

    let path = counter.save_session("video", &output_dir)?;
    println!("Saved session to {}", path.display());
    Ok(())
}
