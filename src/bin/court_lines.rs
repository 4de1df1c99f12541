use court_vision::annotate::Annotator;
use court_vision::color::ColorSegmenter;
use court_vision::config::court::CourtLinesConfig;
use court_vision::config::load_config;
use court_vision::image::io::{load_frame, save_frame, save_mask, write_json_file};
use court_vision::lines::LineDetector;
use court_vision::types::DetectedLine;
use serde::Serialize;
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: CourtLinesConfig = load_config(Path::new(&config_path))?;

    let frame = load_frame(&config.input)?;
    let frame = match config.resize_width {
        Some(width) => frame.resize_to_width(width),
        None => frame,
    };

    let start = Instant::now();
    let segmenter = ColorSegmenter::new(config.color);
    let detector = LineDetector::new(&config.detector).map_err(|e| e.to_string())?;
    let mask = segmenter.segment(&frame).map_err(|e| e.to_string())?;
    let detection = detector.detect(&mask);
    let corners = detection
        .clustered
        .as_deref()
        .map(|c| detector.corners(c, frame.width(), frame.height()))
        .unwrap_or_default();
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    let summary = CourtLinesSummary {
        width: frame.width(),
        height: frame.height(),
        latency_ms,
        line_count: detection.lines.len(),
        lines: detection.lines.clone(),
        clustered_lines: detection.clustered.clone(),
        corners,
    };
    write_json_file(&config.output.lines_json, &summary)?;
    println!(
        "Saved {} lines to {} ({:.1} ms)",
        summary.line_count,
        config.output.lines_json.display(),
        latency_ms
    );

    if let Some(path) = &config.output.edges_image {
        save_mask(&detection.edges, path)?;
        println!("Saved edge map to {}", path.display());
    }
    if let Some(path) = &config.output.annotated_image {
        let drawn = detection.clustered.as_ref().unwrap_or(&detection.lines);
        let segments = detector.segments(drawn, &mask);
        save_frame(&Annotator::default().render_lines(&frame, &segments), path)?;
        println!("Saved annotated image to {}", path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: court_lines <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CourtLinesSummary {
    width: usize,
    height: usize,
    latency_ms: f64,
    line_count: usize,
    lines: Vec<DetectedLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    clustered_lines: Option<Vec<DetectedLine>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    corners: Vec<[f32; 2]>,
}
