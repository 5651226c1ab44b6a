//! In-memory render surface that records primitive draw calls.
//!
//! Stands in for a real windowing backend in tests and the demo binary.
//! A [`SurfaceProbe`] cloned off before the surface moves into the loop
//! thread gives external code a read-only view of what was drawn.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{LocatorError, LocatorResult};
use crate::port::render_port::{Bitmap, Canvas, Color, RenderSurface};
use crate::render::transform::Transform2D;

/// One recorded `draw_bitmap` invocation.
#[derive(Debug, Clone)]
pub struct DrawCall {
    /// The transform the bitmap was drawn under.
    pub transform: Transform2D,
    /// Source bitmap dimensions.
    pub icon_size: (u32, u32),
    /// Where the bitmap center landed, in surface pixels.
    pub center_px: (f32, f32),
}

/// Read-only view into a [`BufferSurface`] that may live on another thread.
#[derive(Debug, Clone)]
pub struct SurfaceProbe {
    frames: Arc<AtomicU64>,
    last_draw: Arc<Mutex<Option<DrawCall>>>,
}

impl SurfaceProbe {
    /// Number of frames presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// The most recent bitmap draw, if any frame drew one.
    pub fn last_draw(&self) -> Option<DrawCall> {
        self.last_draw.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

struct BufferCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    last_draw: Arc<Mutex<Option<DrawCall>>>,
}

impl Canvas for BufferCanvas {
    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_rgba_u32());
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, transform: &Transform2D) {
        let center = transform.apply(bitmap.center());
        let call = DrawCall {
            transform: *transform,
            icon_size: (bitmap.width(), bitmap.height()),
            center_px: center,
        };
        *self.last_draw.lock().unwrap_or_else(|e| e.into_inner()) = Some(call);

        // Mark the transformed center pixel so the buffer shows where the
        // marker went without a full rotated blit.
        let (cx, cy) = (center.0.round() as i64, center.1.round() as i64);
        if (0..i64::from(self.width)).contains(&cx) && (0..i64::from(self.height)).contains(&cy) {
            let idx = cy as usize * self.width as usize + cx as usize;
            self.pixels[idx] = bitmap.pixels().first().copied().unwrap_or(0);
        }
    }
}

/// A plain pixel-buffer implementation of [`RenderSurface`].
pub struct BufferSurface {
    canvas: BufferCanvas,
    locked: bool,
    frames: Arc<AtomicU64>,
}

impl BufferSurface {
    /// Create a surface of the given pixel dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: BufferCanvas {
                width,
                height,
                pixels: vec![0; (width * height) as usize],
                last_draw: Arc::new(Mutex::new(None)),
            },
            locked: false,
            frames: Arc::new(AtomicU64::new(0)),
        }
    }

    /// A probe for observing this surface from another thread.
    pub fn probe(&self) -> SurfaceProbe {
        SurfaceProbe {
            frames: Arc::clone(&self.frames),
            last_draw: Arc::clone(&self.canvas.last_draw),
        }
    }

    /// Borrow the current pixel buffer.
    pub fn pixels(&self) -> &[u32] {
        &self.canvas.pixels
    }
}

impl RenderSurface for BufferSurface {
    fn acquire(&mut self) -> LocatorResult<&mut dyn Canvas> {
        if self.locked {
            return Err(LocatorError::draw("surface already locked"));
        }
        self.locked = true;
        Ok(&mut self.canvas)
    }

    fn present(&mut self) -> LocatorResult<()> {
        if !self.locked {
            return Err(LocatorError::draw("present without a locked canvas"));
        }
        self.locked = false;
        self.frames.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
