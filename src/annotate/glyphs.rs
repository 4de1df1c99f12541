//! 3×5 bitmap glyphs for numeric overlays.
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

pub const GLYPH_W: i32 = 3;
pub const GLYPH_H: i32 = 5;

/// Rows top to bottom; bit 2 is the leftmost column.
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        ' ' => [0; 5],
        _ => return None,
    };
    Some(rows)
}

/// Draw `text` with its top-left corner at `(x, y)`, each glyph cell
/// `scale` pixels wide. Unsupported characters are skipped.
pub fn draw_text(img: &mut RgbImage, text: &str, x: i32, y: i32, scale: u32, color: Rgb<u8>) {
    let scale = scale.max(1);
    let advance = (GLYPH_W + 1) * scale as i32;
    let mut cursor = x;
    for c in text.chars() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                    let px = cursor + col * scale as i32;
                    let py = y + row as i32 * scale as i32;
                    draw_filled_rect_mut(img, Rect::at(px, py).of_size(scale, scale), color);
                }
            }
        }
        cursor += advance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_is_drawn_in_center_column() {
        let mut img = RgbImage::new(10, 10);
        let white = Rgb([255, 255, 255]);
        draw_text(&mut img, "1", 0, 0, 1, white);
        assert_eq!(*img.get_pixel(1, 0), white);
        assert_eq!(*img.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(0, 4), white);
    }

    #[test]
    fn unknown_characters_are_skipped() {
        let mut img = RgbImage::new(8, 8);
        draw_text(&mut img, "?", 0, 0, 2, Rgb([255, 0, 0]));
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0]));
    }
}
