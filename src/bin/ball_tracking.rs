use court_vision::annotate::Annotator;
use court_vision::calibration::{CalibrationFile, CalibrationProvider, Undistorter};
use court_vision::config::load_config;
use court_vision::config::tracking::{BallTrackingConfig, InputConfig};
use court_vision::diagnostics::RunReport;
use court_vision::image::io::{save_frame, save_mask, write_json_file};
use court_vision::pipeline::{Pipeline, Tracker};
use court_vision::source::ImageSequenceSource;
use std::env;
use std::ops::ControlFlow;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: BallTrackingConfig = load_config(Path::new(&config_path))?;

    let mut source = open_source(&config.input)?;
    if source.is_empty() {
        return Err("No input frames found".to_string());
    }

    let mut pipeline = Pipeline::new(&config.params).map_err(|e| e.to_string())?;
    if let Some(path) = &config.calibration {
        let record = CalibrationFile::new(path)
            .with_min_views(config.min_calibration_views)
            .calibrate()
            .map_err(|e| format!("Calibration from {} failed: {e}", path.display()))?;
        let first = &source.paths()[0];
        let (w, h) = image::image_dimensions(first)
            .map_err(|e| format!("Failed to read {}: {e}", first.display()))?;
        let undistorter =
            Undistorter::new(record, w as usize, h as usize).map_err(|e| e.to_string())?;
        pipeline = pipeline.with_undistorter(undistorter);
    }

    let mut tracker = Tracker::new(pipeline, Annotator::default(), config.params.trail_capacity);
    let output = &config.output;
    let mut write_error: Option<String> = None;
    let report: RunReport = tracker
        .run(&mut source, |tracked| {
            if let Some(dir) = &output.annotated_dir {
                let path = dir.join(format!("frame_{:05}.png", tracked.index));
                if let Err(err) = save_frame(tracked.annotated, &path) {
                    write_error = Some(err);
                    return ControlFlow::Break(());
                }
            }
            if let Some(dir) = &output.mask_dir {
                let path = dir.join(format!("mask_{:05}.png", tracked.index));
                if let Err(err) = save_mask(&tracked.analysis.ball_mask, &path) {
                    write_error = Some(err);
                    return ControlFlow::Break(());
                }
            }
            if let Some(obj) = &tracked.analysis.object {
                println!(
                    "frame {:5}: center=({:.1}, {:.1}) r={:.1} distance={} offset={}",
                    tracked.index,
                    obj.center[0],
                    obj.center[1],
                    obj.radius,
                    obj.distance_estimate
                        .map_or_else(|| "-".to_string(), |d| format!("{d:.2}")),
                    obj.center_offset_px
                        .map_or_else(|| "-".to_string(), |o| o.to_string()),
                );
            } else {
                println!("frame {:5}: no object", tracked.index);
            }
            match output.max_frames {
                Some(max) if tracked.index + 1 >= max => ControlFlow::Break(()),
                _ => ControlFlow::Continue(()),
            }
        })
        .map_err(|e| e.to_string())?;
    if let Some(err) = write_error {
        return Err(err);
    }

    println!(
        "Processed {} frames: {} detections, {} skipped",
        report.frames, report.detections, report.skipped
    );
    if let Some(path) = &output.report_json {
        write_json_file(path, &report)?;
        println!("Run report written to {}", path.display());
    }
    Ok(())
}

fn open_source(input: &InputConfig) -> Result<ImageSequenceSource, String> {
    match input {
        InputConfig::Dir { dir, extensions } => {
            let exts: Vec<&str> = extensions.iter().map(String::as_str).collect();
            ImageSequenceSource::from_dir(dir, &exts)
                .map_err(|e| format!("Failed to list {}: {e}", dir.display()))
        }
        InputConfig::Frames { frames } => Ok(ImageSequenceSource::new(frames.clone())),
    }
}

fn usage() -> String {
    "Usage: ball_tracking <config.json>".to_string()
}
