// Current size of the drawable surface. Written by the resize adapter,
// read by every particle once per tick.

use std::cell::Cell;

#[derive(Debug, Default)]
pub struct Viewport {
    width: Cell<u32>,
    height: Cell<u32>,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Viewport {
        let viewport = Viewport::default();
        viewport.resize(width, height);
        viewport
    }

    /// Negative or non-finite reports collapse to zero rather than failing.
    pub fn resize(&self, width: f64, height: f64) {
        let width = clamp_dimension(width);
        let height = clamp_dimension(height);
        if width == 0 || height == 0 {
            log::warn!("viewport reported as {}x{}", width, height);
        }
        self.width.set(width);
        self.height.set(height);
    }

    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn height(&self) -> u32 {
        self.height.get()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width.get(), self.height.get())
    }
}

fn clamp_dimension(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(u32::MAX as f64) as u32
    } else {
        0
    }
}
