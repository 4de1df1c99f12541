use court_vision::image::Frame;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

pub const COURT_GRAY: [u8; 3] = [110, 110, 110];
pub const BALL_GREEN: [u8; 3] = [60, 200, 60];
pub const LINE_WHITE: [u8; 3] = [240, 240, 240];

/// Uniform gray frame with one green ball.
pub fn ball_frame(width: u32, height: u32, center: (i32, i32), radius: i32) -> Frame {
    let mut img = RgbImage::from_pixel(width, height, Rgb(COURT_GRAY));
    draw_filled_circle_mut(&mut img, center, radius, Rgb(BALL_GREEN));
    Frame::from_rgb_image(img)
}

/// Gray frame crossed by one horizontal and one vertical white stripe.
pub fn court_frame(width: u32, height: u32, row: i32, col: i32, stripe: u32) -> Frame {
    let mut img = RgbImage::from_pixel(width, height, Rgb(COURT_GRAY));
    draw_filled_rect_mut(&mut img, Rect::at(0, row).of_size(width, stripe), Rgb(LINE_WHITE));
    draw_filled_rect_mut(&mut img, Rect::at(col, 0).of_size(stripe, height), Rgb(LINE_WHITE));
    Frame::from_rgb_image(img)
}

/// Ball frame with a horizontal gray seam of `seam` rows through its center.
pub fn seamed_ball_frame(
    width: u32,
    height: u32,
    center: (i32, i32),
    radius: i32,
    seam: u32,
) -> Frame {
    let mut img = RgbImage::from_pixel(width, height, Rgb(COURT_GRAY));
    draw_filled_circle_mut(&mut img, center, radius, Rgb(BALL_GREEN));
    let top = center.1 - (seam / 2) as i32;
    draw_filled_rect_mut(&mut img, Rect::at(0, top).of_size(width, seam), Rgb(COURT_GRAY));
    Frame::from_rgb_image(img)
}

/// Gray frame with a green bar `length` pixels long and one pixel tall.
pub fn bar_frame(width: u32, height: u32, origin: (i32, i32), length: u32) -> Frame {
    let mut img = RgbImage::from_pixel(width, height, Rgb(COURT_GRAY));
    let bar = Rect::at(origin.0, origin.1).of_size(length, 1);
    draw_filled_rect_mut(&mut img, bar, Rgb(BALL_GREEN));
    Frame::from_rgb_image(img)
}
