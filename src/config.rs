// Tunables for the constellation field. Defaults match the look of the
// original site background.

use wasm_bindgen::prelude::*;

pub const DEFAULT_PARTICLE_COUNT: u32 = 60;
pub const DEFAULT_CONNECTION_DISTANCE: f64 = 150.0;
pub const DEFAULT_MOUSE_DISTANCE: f64 = 200.0;
pub const DEFAULT_SPEED_RANGE: f64 = 0.5;
pub const DEFAULT_MIN_RADIUS: f64 = 1.0;
pub const DEFAULT_RADIUS_SPREAD: f64 = 2.0;
pub const CONNECTION_LINE_WIDTH: f64 = 1.0;
pub const POINTER_LINE_WIDTH: f64 = 0.5;

// Attribute on <html> the theme toggle writes to
pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const DARK_THEME_VALUE: &str = "dark";

#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: u32,
    /// Particles closer than this are joined by a line.
    pub connection_distance: f64,
    /// Particles closer than this to the pointer are joined to it.
    pub mouse_distance: f64,
    /// Width of the symmetric range each velocity component is drawn from.
    pub speed_range: f64,
    pub min_radius: f64,
    pub radius_spread: f64,
    pub connection_line_width: f64,
    pub pointer_line_width: f64,
}

#[wasm_bindgen]
impl FieldConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FieldConfig {
        FieldConfig::default()
    }

    pub fn max_speed(&self) -> f64 {
        self.speed_range / 2.0
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: DEFAULT_PARTICLE_COUNT,
            connection_distance: DEFAULT_CONNECTION_DISTANCE,
            mouse_distance: DEFAULT_MOUSE_DISTANCE,
            speed_range: DEFAULT_SPEED_RANGE,
            min_radius: DEFAULT_MIN_RADIUS,
            radius_spread: DEFAULT_RADIUS_SPREAD,
            connection_line_width: CONNECTION_LINE_WIDTH,
            pointer_line_width: POINTER_LINE_WIDTH,
        }
    }
}
