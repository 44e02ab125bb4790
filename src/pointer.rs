// Last known pointer position over the page, or None once it has left

use std::cell::Cell;

#[derive(Debug, Default)]
pub struct PointerTracker {
    position: Cell<Option<[f64; 2]>>,
}

impl PointerTracker {
    pub fn new() -> PointerTracker {
        PointerTracker::default()
    }

    pub fn move_to(&self, x: f64, y: f64) {
        self.position.set(Some([x, y]));
    }

    pub fn leave(&self) {
        self.position.set(None);
    }

    pub fn position(&self) -> Option<[f64; 2]> {
        self.position.get()
    }
}
