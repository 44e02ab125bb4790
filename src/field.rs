// The constellation: a fixed set of drifting particles joined by lines
// when they come close to each other or to the pointer.

use crate::config::FieldConfig;
use crate::palette::Palette;
use crate::particle::Particle;
use crate::pointer::PointerTracker;
use crate::surface::Surface;
use crate::viewport::Viewport;
use crate::Timer;
use rand::Rng;
use std::rc::Rc;
use vecmath::Vector2;

/// True when `a` and `b` are strictly closer than `max_distance`.
pub fn connects(a: Vector2<f64>, b: Vector2<f64>, max_distance: f64) -> bool {
    vecmath::vec2_len(vecmath::vec2_sub(a, b)) < max_distance
}

#[derive(Clone, Debug)]
pub struct ConstellationField {
    config: FieldConfig,
    particles: Vec<Particle>,
    viewport: Rc<Viewport>,
    palette: Rc<Palette>,
    pointer: Rc<PointerTracker>,
}

impl ConstellationField {
    /// Scatters `config.particle_count` particles uniformly over the
    /// current viewport with small random velocities.
    pub fn initialize<R: Rng + ?Sized>(
        config: FieldConfig,
        viewport: Rc<Viewport>,
        palette: Rc<Palette>,
        pointer: Rc<PointerTracker>,
        rng: &mut R,
    ) -> ConstellationField {
        let (width, height) = viewport.size();
        let count = config.particle_count as usize;
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let pos_x = rng.gen::<f64>() * width as f64;
            let pos_y = rng.gen::<f64>() * height as f64;
            let vel_x = (rng.gen::<f64>() - 0.5) * config.speed_range;
            let vel_y = (rng.gen::<f64>() - 0.5) * config.speed_range;
            let radius = rng.gen::<f64>() * config.radius_spread + config.min_radius;
            particles.push(Particle::new(pos_x, pos_y, vel_x, vel_y, radius));
        }
        log::debug!(
            "constellation initialized with {} particles over {}x{}",
            count,
            width,
            height
        );
        ConstellationField::from_particles(config, particles, viewport, palette, pointer)
    }

    pub fn from_particles(
        config: FieldConfig,
        particles: Vec<Particle>,
        viewport: Rc<Viewport>,
        palette: Rc<Palette>,
        pointer: Rc<PointerTracker>,
    ) -> ConstellationField {
        ConstellationField {
            config,
            particles,
            viewport,
            palette,
            pointer,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// One full frame: move and draw every particle, then the pairwise
    /// lines, then the lines to the pointer if it is over the page.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let _timer = Timer::new("ConstellationField::step");
        let (width, height) = self.viewport.size();
        let point_color = self.palette.point_color();
        let line_color = self.palette.line_color();

        surface.clear(width, height);

        for particle in &mut self.particles {
            particle.update(&self.viewport);
            particle.draw(surface, point_color);
        }

        // O(n^2), fine for a few hundred particles at most
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                if connects(a.pos, b.pos, self.config.connection_distance) {
                    surface.stroke_line(
                        a.pos,
                        b.pos,
                        line_color,
                        self.config.connection_line_width,
                    );
                }
            }
        }

        if let Some(pointer) = self.pointer.position() {
            for particle in &self.particles {
                if connects(particle.pos, pointer, self.config.mouse_distance) {
                    surface.stroke_line(
                        particle.pos,
                        pointer,
                        point_color,
                        self.config.pointer_line_width,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Theme;
    use crate::surface::{DrawCall, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Cells {
        viewport: Rc<Viewport>,
        palette: Rc<Palette>,
        pointer: Rc<PointerTracker>,
    }

    fn cells(width: f64, height: f64) -> Cells {
        Cells {
            viewport: Rc::new(Viewport::new(width, height)),
            palette: Rc::new(Palette::new(Theme::Light)),
            pointer: Rc::new(PointerTracker::new()),
        }
    }

    fn seeded_field(cells: &Cells, seed: u64) -> ConstellationField {
        let mut rng = StdRng::seed_from_u64(seed);
        ConstellationField::initialize(
            FieldConfig::default(),
            Rc::clone(&cells.viewport),
            Rc::clone(&cells.palette),
            Rc::clone(&cells.pointer),
            &mut rng,
        )
    }

    fn still_field(cells: &Cells, positions: &[[f64; 2]]) -> ConstellationField {
        let particles = positions
            .iter()
            .map(|p| Particle::new(p[0], p[1], 0.0, 0.0, 1.0))
            .collect();
        ConstellationField::from_particles(
            FieldConfig::default(),
            particles,
            Rc::clone(&cells.viewport),
            Rc::clone(&cells.palette),
            Rc::clone(&cells.pointer),
        )
    }

    fn line_ends(surface: &RecordingSurface) -> Vec<([f64; 2], [f64; 2])> {
        surface
            .lines()
            .into_iter()
            .filter_map(|call| match call {
                DrawCall::Line { from, to, .. } => Some((from, to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn initial_particles_are_inside_with_bounded_speed() {
        let cells = cells(800.0, 600.0);
        let field = seeded_field(&cells, 7);
        let config = FieldConfig::default();
        assert_eq!(field.particles().len(), 60);
        for p in field.particles() {
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 800.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 600.0);
            assert!(p.vel[0].abs() <= config.max_speed());
            assert!(p.vel[1].abs() <= config.max_speed());
            assert!(p.radius >= 1.0 && p.radius < 3.0);
        }
    }

    #[test]
    fn particles_stay_near_bounds_and_count_is_fixed() {
        let cells = cells(300.0, 200.0);
        let mut field = seeded_field(&cells, 11);
        let mut surface = RecordingSurface::new(300, 200);
        let speeds: Vec<[f64; 2]> = field
            .particles()
            .iter()
            .map(|p| [p.vel[0].abs(), p.vel[1].abs()])
            .collect();

        for _ in 0..2000 {
            let before: Vec<Particle> = field.particles().to_vec();
            field.step(&mut surface);
            surface.take_calls();
            assert_eq!(field.particles().len(), 60);

            for ((p, old), speed) in field.particles().iter().zip(&before).zip(&speeds) {
                assert!(p.pos[0] >= -p.radius && p.pos[0] <= 300.0 + p.radius);
                assert!(p.pos[1] >= -p.radius && p.pos[1] <= 200.0 + p.radius);
                assert_eq!([p.vel[0].abs(), p.vel[1].abs()], *speed);
                assert_eq!(p.radius, old.radius);

                let crossed_x = p.pos[0] < 0.0 || p.pos[0] > 300.0;
                let crossed_y = p.pos[1] < 0.0 || p.pos[1] > 200.0;
                assert_eq!(p.vel[0] != old.vel[0], crossed_x);
                assert_eq!(p.vel[1] != old.vel[1], crossed_y);
            }
        }
    }

    #[test]
    fn connection_predicate_is_symmetric() {
        let cells = cells(800.0, 600.0);
        let field = seeded_field(&cells, 3);
        for distance in &[0.0, 50.0, 150.0, 400.0] {
            for a in field.particles() {
                for b in field.particles() {
                    assert_eq!(
                        connects(a.pos, b.pos, *distance),
                        connects(b.pos, a.pos, *distance)
                    );
                }
            }
        }
    }

    #[test]
    fn same_state_draws_same_connections() {
        let cells = cells(640.0, 480.0);
        let field = seeded_field(&cells, 42);
        let mut first = field.clone();
        let mut second = field;
        let mut a = RecordingSurface::new(640, 480);
        let mut b = RecordingSurface::new(640, 480);

        first.step(&mut a);
        second.step(&mut b);

        assert_eq!(a.calls(), b.calls());
        assert!(!a.lines().is_empty());
    }

    #[test]
    fn step_clears_then_draws_every_particle() {
        let cells = cells(640.0, 480.0);
        let mut field = seeded_field(&cells, 5);
        let mut surface = RecordingSurface::new(640, 480);
        field.step(&mut surface);

        let calls = surface.calls();
        assert_eq!(calls[0], DrawCall::Clear { width: 640, height: 480 });
        let circles = calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Circle { .. }))
            .count();
        assert_eq!(circles, 60);
    }

    #[test]
    fn close_pairs_get_one_thin_line() {
        let cells = cells(1000.0, 1000.0);
        let mut field = still_field(&cells, &[[0.0, 0.0], [100.0, 0.0], [400.0, 0.0]]);
        let mut surface = RecordingSurface::new(1000, 1000);
        field.step(&mut surface);

        assert_eq!(
            surface.lines(),
            vec![DrawCall::Line {
                from: [0.0, 0.0],
                to: [100.0, 0.0],
                color: Palette::LIGHT_LINE,
                width: 1.0,
            }]
        );
    }

    #[test]
    fn exactly_at_threshold_is_not_connected() {
        let cells = cells(1000.0, 1000.0);
        let mut field = still_field(&cells, &[[0.0, 0.0], [150.0, 0.0]]);
        let mut surface = RecordingSurface::new(1000, 1000);
        field.step(&mut surface);
        assert!(surface.lines().is_empty());
    }

    #[test]
    fn pointer_within_mouse_distance_is_connected() {
        let cells = cells(1000.0, 1000.0);
        let mut field = still_field(&cells, &[[0.0, 0.0]]);
        let mut surface = RecordingSurface::new(1000, 1000);

        cells.pointer.move_to(100.0, 0.0);
        field.step(&mut surface);
        assert_eq!(
            surface.lines(),
            vec![DrawCall::Line {
                from: [0.0, 0.0],
                to: [100.0, 0.0],
                color: Palette::LIGHT_POINT,
                width: 0.5,
            }]
        );

        surface.take_calls();
        cells.pointer.move_to(250.0, 0.0);
        field.step(&mut surface);
        assert!(surface.lines().is_empty());
    }

    #[test]
    fn absent_pointer_draws_no_pointer_lines() {
        let cells = cells(1000.0, 1000.0);
        let mut field = still_field(&cells, &[[10.0, 10.0]]);
        let mut surface = RecordingSurface::new(1000, 1000);

        cells.pointer.move_to(12.0, 12.0);
        cells.pointer.leave();
        field.step(&mut surface);
        assert!(surface.lines().is_empty());
    }

    #[test]
    fn theme_change_shows_up_on_next_step() {
        let cells = cells(1000.0, 1000.0);
        let mut field = still_field(&cells, &[[0.0, 0.0], [10.0, 0.0]]);
        let mut surface = RecordingSurface::new(1000, 1000);
        field.step(&mut surface);
        let before_particles = field.particles().to_vec();

        surface.take_calls();
        cells.palette.set_theme(Theme::Dark);
        field.step(&mut surface);

        assert_eq!(field.particles(), &before_particles[..]);
        assert_eq!(cells.viewport.size(), (1000, 1000));
        let calls = surface.calls();
        assert!(calls.contains(&DrawCall::Circle {
            center: [0.0, 0.0],
            radius: 1.0,
            color: Palette::DARK_POINT,
        }));
        assert_eq!(
            line_ends(&surface),
            vec![([0.0, 0.0], [10.0, 0.0])]
        );
        assert!(surface.lines().iter().all(|call| matches!(
            call,
            DrawCall::Line { color, .. } if *color == Palette::DARK_LINE
        )));
    }

    #[test]
    fn collapsed_viewport_recovers_on_valid_resize() {
        let cells = cells(500.0, 500.0);
        let mut field = seeded_field(&cells, 9);
        let mut surface = RecordingSurface::new(500, 500);
        let speeds: Vec<[f64; 2]> = field
            .particles()
            .iter()
            .map(|p| [p.vel[0].abs(), p.vel[1].abs()])
            .collect();

        cells.viewport.resize(-1.0, 0.0);
        for _ in 0..10 {
            field.step(&mut surface);
        }
        assert_eq!(field.particles().len(), 60);
        assert!(surface.calls().contains(&DrawCall::Clear { width: 0, height: 0 }));

        cells.viewport.resize(500.0, 500.0);
        surface.take_calls();
        for _ in 0..200 {
            field.step(&mut surface);
            assert_eq!(
                surface.take_calls()[0],
                DrawCall::Clear { width: 500, height: 500 }
            );
            for (p, speed) in field.particles().iter().zip(&speeds) {
                assert!(p.pos[0] >= -p.radius && p.pos[0] <= 500.0 + p.radius);
                assert!(p.pos[1] >= -p.radius && p.pos[1] <= 500.0 + p.radius);
                assert_eq!([p.vel[0].abs(), p.vel[1].abs()], *speed);
            }
        }
        assert_eq!(field.particles().len(), 60);
    }
}
