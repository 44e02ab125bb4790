//! Abstract drawing target for the constellation.
//!
//! The browser implementation lives in `canvas`; `RecordingSurface` keeps
//! the draw calls in memory so the field can run without a display.

use crate::color::Color;
use std::cell::RefCell;
use std::rc::Rc;

pub trait Surface {
    /// Current pixel size of the backing surface.
    fn dimensions(&self) -> (u32, u32);
    fn clear(&mut self, width: u32, height: u32);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, width: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear {
        width: u32,
        height: u32,
    },
    Circle {
        center: [f64; 2],
        radius: f64,
        color: Color,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        width: f64,
    },
}

/// Headless surface. Clones share the same call log, so a copy handed to
/// the scheduler can still be inspected from outside.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    calls: Rc<RefCell<Vec<DrawCall>>>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> RecordingSurface {
        RecordingSurface {
            width,
            height,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.borrow().clone()
    }

    pub fn take_calls(&self) -> Vec<DrawCall> {
        self.calls.borrow_mut().drain(..).collect()
    }

    pub fn lines(&self) -> Vec<DrawCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, DrawCall::Line { .. }))
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }
}

impl Surface for RecordingSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, width: u32, height: u32) {
        self.calls.borrow_mut().push(DrawCall::Clear { width, height });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.calls.borrow_mut().push(DrawCall::Circle {
            center: [x, y],
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, width: f64) {
        self.calls.borrow_mut().push(DrawCall::Line {
            from,
            to,
            color,
            width,
        });
    }
}
