// Simple particle struct to keep track of individual position, velocity, size and color

use crate::color::Color;
use crate::config::Palette;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub color: Color,
}

impl Particle {
    pub const MIN_SIZE: f64 = 0.5;
    pub const SIZE_RANGE: f64 = 2.0;
    pub const VELOCITY_RANGE: f64 = 0.25;

    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, size: f64, color: Color) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            size,
            color,
        }
    }

    pub fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64, palette: &Palette) -> Particle {
        let mut particle = Particle::new(0.0, 0.0, 0.0, 0.0, Particle::MIN_SIZE, palette.colors()[0]);
        particle.respawn(rng, width, height, palette);
        particle
    }

    // Overwrites every field in place. Scaling a [0, 1) sample keeps a zero
    // sized surface valid where gen_range would panic on an empty range.
    pub fn respawn<R: Rng>(&mut self, rng: &mut R, width: f64, height: f64, palette: &Palette) {
        self.pos = [rng.gen::<f64>() * width, rng.gen::<f64>() * height];
        self.size = rng.gen::<f64>() * Particle::SIZE_RANGE + Particle::MIN_SIZE;
        self.vel = [
            (rng.gen::<f64>() - 0.5) * Particle::VELOCITY_RANGE,
            (rng.gen::<f64>() - 0.5) * Particle::VELOCITY_RANGE,
        ];
        let color_idx = rng.gen_range(0, palette.len());
        self.color = palette.colors()[color_idx];
    }

    pub fn advance(&mut self) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
    }

    // Edges themselves count as inside, so a particle can sit exactly on the
    // far edge for one frame before it is respawned
    pub fn is_out_of_bounds(&self, width: f64, height: f64) -> bool {
        let [x, y] = self.pos;
        x < 0.0 || x > width || y < 0.0 || y > height
    }
}
