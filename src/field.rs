// The particle field: a fixed arena of particles drifting over a surface of
// the viewport's size. Pure simulation, the browser side lives in animation.rs

use crate::config::{FieldConfig, Palette};
use crate::particle::Particle;
use crate::renderer::RenderCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct ParticleField {
    particles: Vec<Particle>,
    palette: Palette,
    glow_blur: f64,
    width: f64,
    height: f64,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: FieldConfig, width: f64, height: f64) -> Self {
        ParticleField::with_rng(config, width, height, StdRng::from_entropy())
    }

    pub fn with_rng(config: FieldConfig, width: f64, height: f64, mut rng: StdRng) -> Self {
        let FieldConfig {
            particle_count,
            palette,
            glow_blur,
        } = config;
        let mut particles = Vec::with_capacity(particle_count);
        for _ in 0..particle_count {
            particles.push(Particle::spawn(&mut rng, width, height, &palette));
        }
        ParticleField {
            particles,
            palette,
            glow_blur,
            width,
            height,
            rng,
        }
    }

    pub fn update(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.advance();
            if particle.is_out_of_bounds(width, height) {
                particle.respawn(&mut self.rng, width, height, &self.palette);
            }
        }
    }

    /// Commands for the current state. Does not touch the particles, so two
    /// calls without an `update` in between yield the same frame.
    pub fn draw(&self) -> Vec<RenderCommand> {
        let mut commands = Vec::with_capacity(self.particles.len() + 1);
        commands.push(RenderCommand::Clear {
            width: self.width,
            height: self.height,
        });
        commands.extend(self.particles.iter().map(|p| RenderCommand::Circle {
            x: p.pos[0],
            y: p.pos[1],
            radius: p.size,
            color: p.color,
            glow: self.glow_blur,
        }));
        commands
    }

    /// One frame: advance every particle, then describe the frame.
    pub fn step(&mut self) -> Vec<RenderCommand> {
        self.update();
        self.draw()
    }

    // Positions are left alone; particles outside the new bounds respawn on
    // their next update
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn reset(&mut self, index: usize) -> bool {
        match self.particles.get_mut(index) {
            Some(particle) => {
                particle.respawn(&mut self.rng, self.width, self.height, &self.palette);
                true
            }
            None => false,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn field(count: usize, width: f64, height: f64, seed: u64) -> ParticleField {
        let config = FieldConfig::default().with_particle_count(count);
        ParticleField::with_rng(config, width, height, StdRng::seed_from_u64(seed))
    }

    fn in_bounds(p: &Particle, width: f64, height: f64) -> bool {
        p.pos[0] >= 0.0 && p.pos[0] < width && p.pos[1] >= 0.0 && p.pos[1] < height
    }

    #[test]
    fn default_field_structure() {
        let config = FieldConfig::default();
        let palette = config.palette.clone();
        let f = ParticleField::with_rng(config, 1024.0, 768.0, StdRng::seed_from_u64(42));
        assert_eq!(f.len(), 70);
        for p in f.particles() {
            assert!(in_bounds(p, 1024.0, 768.0));
            assert!(p.size >= 0.5 && p.size < 2.5);
            assert!(p.vel[0].abs() <= 0.125 && p.vel[1].abs() <= 0.125);
            assert!(palette.colors().contains(&p.color));
        }
    }

    #[test]
    fn count_is_constant_across_steps_and_resizes() {
        let mut f = field(70, 200.0, 100.0, 3);
        for i in 0..2000 {
            if i % 500 == 0 {
                f.resize(100.0 + i as f64 / 10.0, 50.0);
            }
            f.step();
            assert_eq!(f.len(), 70);
        }
    }

    #[test]
    fn no_particle_stays_out_of_bounds_after_update() {
        // small surface so respawns happen constantly
        let mut f = field(70, 4.0, 3.0, 11);
        for _ in 0..5000 {
            f.update();
            for p in f.particles() {
                assert!(!p.is_out_of_bounds(4.0, 3.0));
            }
        }
    }

    #[test]
    fn particle_leaving_right_edge_is_respawned() {
        let mut f = field(1, 800.0, 600.0, 5);
        {
            let p = &mut f.particles_mut()[0];
            p.pos = [800.0 - 0.05, 300.0];
            p.vel = [0.1, 0.0];
        }
        f.update();
        let p = f.particles()[0];
        assert!(in_bounds(&p, 800.0, 600.0));
        // fresh velocity from the respawn, not the one we planted
        assert_ne!(p.vel, [0.1, 0.0]);
    }

    #[test]
    fn shrink_keeps_positions_until_next_update() {
        let mut f = field(1, 800.0, 600.0, 9);
        {
            let p = &mut f.particles_mut()[0];
            p.pos = [750.0, 500.0];
            p.vel = [0.0, 0.0];
        }
        f.resize(400.0, 300.0);
        assert_eq!(f.particles()[0].pos, [750.0, 500.0]);
        assert_eq!((f.width(), f.height()), (400.0, 300.0));

        f.update();
        assert!(in_bounds(&f.particles()[0], 400.0, 300.0));
    }

    #[test]
    fn single_color_palette() {
        let only = Color::from_hex("#123456").unwrap();
        let config = FieldConfig::default()
            .with_particle_count(50)
            .with_palette(Palette::new(vec![only]).unwrap());
        let mut f = ParticleField::with_rng(config, 3.0, 3.0, StdRng::seed_from_u64(2));
        for _ in 0..500 {
            f.step();
            assert!(f.particles().iter().all(|p| p.color == only));
        }
    }

    #[test]
    fn reset_only_touches_its_slot() {
        let mut f = field(10, 500.0, 500.0, 21);
        let before = f.particles().to_vec();
        assert!(f.reset(4));
        for (i, (old, new)) in before.iter().zip(f.particles()).enumerate() {
            if i == 4 {
                assert_ne!(old, new);
            } else {
                assert_eq!(old, new);
            }
        }
        assert!(!f.reset(10));
        assert_eq!(f.len(), 10);
    }

    #[test]
    fn draw_is_idempotent() {
        let mut f = field(70, 640.0, 480.0, 8);
        f.step();
        let first = f.draw();
        let second = f.draw();
        assert_eq!(first, second);
        assert_eq!(first.len(), 71);
        assert_eq!(
            first[0],
            RenderCommand::Clear {
                width: 640.0,
                height: 480.0
            }
        );
    }

    #[test]
    fn draw_mirrors_particles() {
        let f = field(3, 100.0, 100.0, 4);
        let commands = f.draw();
        for (p, command) in f.particles().iter().zip(&commands[1..]) {
            assert_eq!(
                *command,
                RenderCommand::Circle {
                    x: p.pos[0],
                    y: p.pos[1],
                    radius: p.size,
                    color: p.color,
                    glow: 6.0,
                }
            );
        }
    }

    #[test]
    fn zero_area_surface_is_not_an_error() {
        let mut f = field(70, 0.0, 0.0, 13);
        for _ in 0..10 {
            let commands = f.step();
            assert_eq!(commands.len(), 71);
        }
        assert!(f.particles().iter().all(|p| p.pos == [0.0, 0.0]));
        f.resize(300.0, 200.0);
        for _ in 0..3000 {
            f.update();
        }
        assert_eq!(f.len(), 70);
    }

    #[test]
    fn empty_field() {
        let mut f = field(0, 100.0, 100.0, 1);
        assert!(f.is_empty());
        assert_eq!(f.step().len(), 1);
    }
}
