//! Generate a session report for validation testing

use synheart_gaze::{classify_json, GazeConfig};

fn main() {
    let json = r#"{
        "velocity": [0.3, 0.4, 0.5, 0.6],
        "fixation": [0.1, 0.2, 0.3, 0.4],
        "performance": [0.5, 0.6, 0.7, 0.8],
        "biofeedback": [0.4, 0.5, 0.6, 0.7],
        "pupillometry": [0.2, 0.35, 0.3]
    }"#;

    match classify_json(json, &GazeConfig::default()) {
        Ok(report) => print!("{report}"),
        Err(e) => eprintln!("Error: {e:?}"),
    }
}
