//! Owned camera frame: single-channel intensity or interleaved RGB bytes.
//!
//! Frames are never mutated by a pipeline stage; stages that transform a frame
//! return a new one.
use crate::error::VisionError;
use image::{imageops, DynamicImage, GrayImage, RgbImage};
use serde::{Deserialize, Serialize};

use super::ImageF32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    Gray,
    Rgb,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Gray => 1,
            PixelFormat::Rgb => 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    w: usize,
    h: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap a raw row-major buffer, checking its length.
    pub fn from_raw(
        w: usize,
        h: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, VisionError> {
        let expected = w * h * format.channels();
        if data.len() != expected {
            return Err(VisionError::FrameSizeMismatch {
                w,
                h,
                expected,
                found: data.len(),
            });
        }
        Ok(Self { w, h, format, data })
    }

    /// Frame with this one's size and format over new bytes of equal length.
    pub(crate) fn with_data(&self, data: Vec<u8>) -> Frame {
        debug_assert_eq!(data.len(), self.data.len());
        Frame {
            w: self.w,
            h: self.h,
            format: self.format,
            data,
        }
    }

    /// Uniform RGB frame.
    pub fn filled_rgb(w: usize, h: usize, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(w * h * 3);
        for _ in 0..w * h {
            data.extend_from_slice(&rgb);
        }
        Self {
            w,
            h,
            format: PixelFormat::Rgb,
            data,
        }
    }

    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (w, h) = (img.width() as usize, img.height() as usize);
        Self {
            w,
            h,
            format: PixelFormat::Rgb,
            data: img.into_raw(),
        }
    }

    pub fn from_gray_image(img: GrayImage) -> Self {
        let (w, h) = (img.width() as usize, img.height() as usize);
        Self {
            w,
            h,
            format: PixelFormat::Gray,
            data: img.into_raw(),
        }
    }

    /// Decoded images with color are kept as RGB, everything else as gray.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        if img.color().has_color() {
            Self::from_rgb_image(img.into_rgb8())
        } else {
            Self::from_gray_image(img.into_luma8())
        }
    }

    /// Copy into an `image` RGB buffer (gray is replicated to three channels).
    pub fn to_rgb_image(&self) -> RgbImage {
        let data = match self.format {
            PixelFormat::Rgb => self.data.clone(),
            PixelFormat::Gray => self.data.iter().flat_map(|&v| [v, v, v]).collect(),
        };
        // Length is checked at construction.
        RgbImage::from_raw(self.w as u32, self.h as u32, data)
            .unwrap_or_else(|| RgbImage::new(self.w as u32, self.h as u32))
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Channel values of the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let c = self.format.channels();
        let start = (y * self.w + x) * c;
        &self.data[start..start + c]
    }

    /// Interleaved bytes of row `y`.
    #[inline]
    pub fn row_bytes(&self, y: usize) -> &[u8] {
        let stride = self.w * self.format.channels();
        &self.data[y * stride..(y + 1) * stride]
    }

    pub fn require_format(&self, expected: PixelFormat) -> Result<(), VisionError> {
        if self.format != expected {
            return Err(VisionError::InvalidFrameFormat {
                expected,
                found: self.format,
            });
        }
        Ok(())
    }

    /// Luma plane in `[0, 1]` using BT.601 weights.
    pub fn to_gray(&self) -> ImageF32 {
        let mut out = ImageF32::new(self.w, self.h);
        match self.format {
            PixelFormat::Gray => {
                for (dst, &v) in out.data.iter_mut().zip(&self.data) {
                    *dst = v as f32 / 255.0;
                }
            }
            PixelFormat::Rgb => {
                for (dst, px) in out.data.iter_mut().zip(self.data.chunks_exact(3)) {
                    let luma = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
                    *dst = luma / 255.0;
                }
            }
        }
        out
    }

    /// Resize to `width` keeping the aspect ratio.
    pub fn resize_to_width(&self, width: usize) -> Frame {
        if width == 0 || width == self.w || self.w == 0 {
            return self.clone();
        }
        let height = ((self.h as f64 * width as f64 / self.w as f64).round() as u32).max(1);
        match self.format {
            PixelFormat::Rgb => Frame::from_rgb_image(imageops::resize(
                &self.to_rgb_image(),
                width as u32,
                height,
                imageops::FilterType::Triangle,
            )),
            PixelFormat::Gray => {
                let gray = GrayImage::from_raw(self.w as u32, self.h as u32, self.data.clone())
                    .unwrap_or_else(|| GrayImage::new(self.w as u32, self.h as u32));
                Frame::from_gray_image(imageops::resize(
                    &gray,
                    width as u32,
                    height,
                    imageops::FilterType::Triangle,
                ))
            }
        }
    }
}
