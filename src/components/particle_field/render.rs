//! Per-frame drawing of the particle field.

use super::particles::ParticleField;
use super::surface::Surface;

/// Runs one animation frame: clear, advance every particle, draw.
pub fn render_frame<S: Surface + ?Sized>(field: &mut ParticleField, surface: &mut S) {
	surface.clear();
	field.step();
	draw_particles(field, surface);
}

/// Draws the field as it currently is, without advancing it.
pub fn draw_particles<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) {
	for p in field.particles() {
		surface.fill_circle(p.x, p.y, p.size, p.color);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::config::{Color, FieldConfig, ParticleCount};
	use super::super::particles::Particle;
	use super::super::surface::RecordingSurface;
	use super::*;

	#[test]
	fn test_frame_clears_then_draws_every_particle() {
		let config = FieldConfig {
			count: ParticleCount::Fixed(25),
			..FieldConfig::default()
		};
		let mut field = ParticleField::new(config, 200.0, 100.0, &mut SmallRng::seed_from_u64(7));
		let mut surface = RecordingSurface::new(200, 100);

		render_frame(&mut field, &mut surface);
		render_frame(&mut field, &mut surface);

		assert_eq!(surface.clears, 2);
		assert_eq!(surface.circles.len(), 25);
		for &(x, y, r, _) in &surface.circles {
			assert!((0.0..=200.0).contains(&x));
			assert!((0.0..=100.0).contains(&y));
			assert!(r >= 0.5 && r <= 2.5);
		}
	}

	#[test]
	fn test_frame_draws_updated_positions() {
		let color = Color::rgba(1, 2, 3, 0.5);
		let mut field = ParticleField::with_particles(
			FieldConfig::default(),
			800.0,
			600.0,
			vec![Particle {
				x: 799.0,
				y: 300.0,
				vx: 5.0,
				vy: 0.0,
				size: 2.0,
				color,
			}],
		);
		let mut surface = RecordingSurface::new(800, 600);

		render_frame(&mut field, &mut surface);
		assert_eq!(surface.circles, vec![(800.0, 300.0, 2.0, color)]);

		render_frame(&mut field, &mut surface);
		assert_eq!(surface.circles, vec![(795.0, 300.0, 2.0, color)]);
	}
}
