//! Edge detection: Sobel gradients of configurable aperture and a Canny
//! detector with non-maximum suppression and hysteresis.
//!
//! Gradients are computed on `[0, 1]` intensity planes; Canny thresholds are
//! given in 8-bit units so the usual `low/high` pairs (e.g. 150/200) carry
//! over unchanged.

pub mod canny;
pub mod grad;

pub use canny::{Canny, CannyParams};
pub use grad::{sobel_gradients, Grad};
