// Simple particle struct to keep track of position, velocity and size.
// Radius and speed are fixed at creation, only position and the sign of
// each velocity component change.

use crate::color::Color;
use crate::surface::Surface;
use crate::viewport::Viewport;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, radius: f64) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
        }
    }

    // Bounce flips velocity but leaves the position where it landed, so a
    // particle can sit just outside the edge for a frame before heading back.
    pub fn update(&mut self, viewport: &Viewport) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];

        let (width, height) = viewport.size();
        if self.pos[0] < 0.0 || self.pos[0] > width as f64 {
            self.vel[0] *= -1.0;
        }
        if self.pos[1] < 0.0 || self.pos[1] > height as f64 {
            self.vel[1] *= -1.0;
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, color: Color) {
        surface.fill_circle(self.pos[0], self.pos[1], self.radius, color);
    }
}
