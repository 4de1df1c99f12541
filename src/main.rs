use court_vision::image::Frame;
use court_vision::{Pipeline, PipelineParams};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

fn main() {
    // Demo stub: paints a green ball on a gray court and runs the pipeline
    let mut img = RgbImage::from_pixel(640, 480, Rgb([110, 110, 110]));
    draw_filled_circle_mut(&mut img, (320, 240), 40, Rgb([60, 200, 60]));
    let frame = Frame::from_rgb_image(img);

    let pipeline = match Pipeline::new(&PipelineParams::default()) {
        Ok(p) => p,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    match pipeline.analyze(&frame) {
        Ok(analysis) => match analysis.object {
            Some(obj) => println!(
                "center=({:.1}, {:.1}) radius={:.1} distance={:?} latency_ms={:.3}",
                obj.center[0],
                obj.center[1],
                obj.radius,
                obj.distance_estimate,
                analysis.timings.total_ms
            ),
            None => println!("no object, latency_ms={:.3}", analysis.timings.total_ms),
        },
        Err(err) => eprintln!("Error: {err}"),
    }
}
