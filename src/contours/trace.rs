//! Suzuki–Abe border following on a binary mask.
//!
//! The mask is copied into a zero-padded `i32` label grid. Foreground starts
//! as `1`; each traced border gets a sequence number `nbd >= 2` written back
//! into the grid (negated where the border exits to the right). The frame
//! itself counts as border `1`, a hole border with no parent, which makes the
//! parent rule uniform:
//!
//! - new border and the last-met border `lnbd` of the same kind → share a parent
//! - different kinds → `lnbd` is the parent
use super::Point2i;
use crate::image::{ImageView, Mask};

/// 8-connected offsets in counter-clockwise order (image y points down).
const NEIGHBORHOOD: [[i32; 2]; 8] = [
    [1, 0],
    [1, -1],
    [0, -1],
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, 1],
    [1, 1],
];

/// A traced border before retrieval-mode filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Border {
    pub points: Vec<Point2i>,
    /// True for the inner border of a hole.
    pub hole: bool,
    /// Index of the enclosing border in the output vector.
    pub parent: Option<usize>,
}

/// Linear offsets into the padded grid, repeated twice so `s + 8` stays valid.
fn neighborhood_deltas(stride: isize) -> [isize; 16] {
    let mut deltas = [0isize; 16];
    for (i, [dx, dy]) in NEIGHBORHOOD.iter().enumerate() {
        let d = *dx as isize + *dy as isize * stride;
        deltas[i] = d;
        deltas[i + 8] = d;
    }
    deltas
}

fn follow_border(
    grid: &mut [i32],
    start: usize,
    nbd: i32,
    mut point: Point2i,
    hole: bool,
    deltas: &[isize; 16],
) -> Vec<Point2i> {
    let mut points = Vec::new();
    let at = |pos: usize, s: usize| (pos as isize + deltas[s]) as usize;

    // Look clockwise from the entry direction for the first foreground neighbour.
    let mut s: usize = if hole { 0 } else { 4 };
    let s_entry = s;
    let mut first;
    loop {
        s = (s + 7) & 7;
        first = at(start, s);
        if grid[first] != 0 || s == s_entry {
            break;
        }
    }

    if grid[first] == 0 {
        // Isolated pixel.
        grid[start] = -nbd;
        points.push(point);
        return points;
    }

    let mut current = start;
    loop {
        let s_end = s;
        let mut next;
        loop {
            s = (s + 1) & 15;
            next = at(current, s);
            if grid[next] != 0 {
                break;
            }
        }
        s &= 7;

        // The scan wrapped past the east neighbour: this pixel exits right.
        // `s == 0` wraps to usize::MAX and never counts.
        if s.wrapping_sub(1) < s_end {
            grid[current] = -nbd;
        } else if grid[current] == 1 {
            grid[current] = nbd;
        }

        points.push(point);
        point.x += NEIGHBORHOOD[s][0];
        point.y += NEIGHBORHOOD[s][1];

        if next == start && current == first {
            break;
        }
        current = next;
        s = (s + 4) & 7;
    }
    points
}

/// Trace every outer and hole border of `mask` with its parent link.
pub fn trace_borders(mask: &Mask) -> Vec<Border> {
    let (w, h) = mask.dims();
    let stride = w + 2;
    let mut grid = vec![0i32; stride * (h + 2)];
    for (y, row) in mask.rows().enumerate() {
        let base = (y + 1) * stride + 1;
        for (x, &v) in row.iter().enumerate() {
            grid[base + x] = i32::from(v != 0);
        }
    }

    let deltas = neighborhood_deltas(stride as isize);
    let mut borders: Vec<Border> = Vec::new();
    let mut nbd = 1i32;

    // Border `nbd` lives at `borders[nbd - 2]`; `1` is the frame.
    let kind_of = |borders: &[Border], label: i32| -> (bool, Option<usize>) {
        if label <= 1 {
            (true, None)
        } else {
            let b = &borders[(label - 2) as usize];
            (b.hole, b.parent)
        }
    };

    for y in 0..h {
        let mut lnbd = 1i32;
        for x in 0..w {
            let pos = (y + 1) * stride + x + 1;
            let pix = grid[pos];
            if pix == 0 {
                continue;
            }

            let outer = pix == 1 && grid[pos - 1] == 0;
            let hole = !outer && pix >= 1 && grid[pos + 1] == 0;

            if outer || hole {
                if hole && pix > 1 {
                    lnbd = pix;
                }
                nbd += 1;
                let (last_is_hole, last_parent) = kind_of(&borders, lnbd);
                let parent = if hole == last_is_hole {
                    last_parent
                } else if lnbd <= 1 {
                    None
                } else {
                    Some((lnbd - 2) as usize)
                };
                let start = Point2i::new(x as i32, y as i32);
                let points = follow_border(&mut grid, pos, nbd, start, hole, &deltas);
                borders.push(Border {
                    points,
                    hole,
                    parent,
                });
            }

            let after = grid[pos];
            if after != 0 && after != 1 {
                lnbd = after.abs();
            }
        }
    }

    borders
}
