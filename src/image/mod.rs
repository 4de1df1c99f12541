pub mod f32;
pub mod frame;
pub mod io;
pub mod mask;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::frame::{Frame, PixelFormat};
pub use self::mask::Mask;
pub use self::traits::{ImageView, ImageViewMut, Rows};
