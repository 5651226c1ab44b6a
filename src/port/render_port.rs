//! Render target abstraction: an acquire/present surface plus the two
//! primitive draw operations the indicator needs.

use crate::error::LocatorResult;
use crate::render::transform::Transform2D;

/// Packed RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Opaque black
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Pack into 0xRRGGBBAA.
    pub fn to_rgba_u32(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }
}

/// A small raster image, e.g. the navigation-arrow marker.
#[derive(Debug, Clone)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Bitmap {
    /// Create a bitmap filled with one color.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color.to_rgba_u32(); (width * height) as usize],
        }
    }

    /// Create a bitmap from raw 0xRRGGBBAA pixels (row-major).
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> LocatorResult<Self> {
        if pixels.len() != (width * height) as usize {
            return Err(crate::error::LocatorError::config(format!(
                "bitmap of {width}x{height} needs {} pixels, got {}",
                width * height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Geometric center in local coordinates.
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Borrow the raw pixels.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

/// The primitive draw operations available within one acquired frame.
pub trait Canvas {
    /// Fill the whole surface with one color.
    fn clear(&mut self, color: Color);

    /// Blit a bitmap under an affine transform.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, transform: &Transform2D);
}

/// Port that abstracts the drawing target.
///
/// Each tick acquires the exclusive drawing handle, performs all drawing,
/// and presents before the tick ends; no other thread draws concurrently.
pub trait RenderSurface: Send {
    /// Acquire the exclusive drawing handle for this frame.
    ///
    /// # Errors
    ///
    /// Fails when the surface is unavailable, e.g. mid-teardown; the tick
    /// is then aborted silently.
    fn acquire(&mut self) -> LocatorResult<&mut dyn Canvas>;

    /// Release the handle and present the frame.
    fn present(&mut self) -> LocatorResult<()>;
}
