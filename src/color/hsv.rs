/// Convert one RGB pixel to 8-bit HSV (H in `[0, 180)`, S and V in `[0, 255]`).
#[inline]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let v = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let diff = v - min;

    let s = if v > 0.0 { diff * 255.0 / v } else { 0.0 };

    let mut h = if diff <= 0.0 {
        0.0
    } else if v == rf {
        60.0 * (gf - bf) / diff
    } else if v == gf {
        120.0 + 60.0 * (bf - rf) / diff
    } else {
        240.0 + 60.0 * (rf - gf) / diff
    };
    if h < 0.0 {
        h += 360.0;
    }

    let h8 = (h * 0.5).round() as u32 % 180;
    [h8 as u8, s.round().min(255.0) as u8, v as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 0), [60, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 0, 255), [120, 255, 255]);
    }

    #[test]
    fn grays_have_no_hue_or_saturation() {
        assert_eq!(rgb_to_hsv(0, 0, 0), [0, 0, 0]);
        assert_eq!(rgb_to_hsv(128, 128, 128), [0, 0, 128]);
        assert_eq!(rgb_to_hsv(255, 255, 255), [0, 0, 255]);
    }

    #[test]
    fn magenta_wraps_into_upper_hue_range() {
        let [h, s, v] = rgb_to_hsv(255, 0, 255);
        assert_eq!(h, 150);
        assert_eq!(s, 255);
        assert_eq!(v, 255);
    }
}
