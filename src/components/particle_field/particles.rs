//! Bouncing background particles.
//!
//! Particles move in straight lines and reflect off the surface edges. There
//! is no interaction between particles, so one frame is a single O(n) pass.

use rand::Rng;

use super::config::{Color, FieldConfig};

/// A single drifting particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Position in px
	pub x: f64,
	/// Position in px
	pub y: f64,
	/// Horizontal velocity in px/frame
	pub vx: f64,
	/// Vertical velocity in px/frame
	pub vy: f64,
	/// Radius
	pub size: f64,
	/// Fill color including alpha
	pub color: Color,
}

impl Particle {
	/// Creates a particle with a random position inside `width` x `height`
	/// and a random size, velocity and alpha drawn from `config`.
	pub fn random<R: Rng + ?Sized>(
		config: &FieldConfig,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		let alpha = config.alpha_min + rng.random::<f64>() * (config.alpha_max - config.alpha_min);

		Self {
			x: rng.random::<f64>() * width.max(0.0),
			y: rng.random::<f64>() * height.max(0.0),
			vx: (rng.random::<f64>() - 0.5) * 2.0 * config.max_speed,
			vy: (rng.random::<f64>() - 0.5) * 2.0 * config.max_speed,
			size: config.size_min + rng.random::<f64>() * (config.size_max - config.size_min),
			color: config.color.with_alpha(config.color.a * alpha),
		}
	}

	/// Advances one frame and reflects off the edges of `width` x `height`.
	///
	/// A particle that would leave the surface is put back on the edge it
	/// crossed and its velocity on that axis is pointed inwards.
	pub fn update(&mut self, width: f64, height: f64) {
		self.x += self.vx;
		self.y += self.vy;

		(self.x, self.vx) = reflect(self.x, self.vx, width);
		(self.y, self.vy) = reflect(self.y, self.vy, height);
	}
}

fn reflect(pos: f64, vel: f64, max: f64) -> (f64, f64) {
	if pos < 0.0 {
		(0.0, vel.abs())
	} else if pos > max {
		(max.max(0.0), -vel.abs())
	} else {
		(pos, vel)
	}
}

/// Owns every particle on one surface.
pub struct ParticleField {
	particles: Vec<Particle>,
	config: FieldConfig,
	width: f64,
	height: f64,
}

impl ParticleField {
	/// Creates a field over `width` x `height` and fills it per `config`.
	pub fn new<R: Rng + ?Sized>(config: FieldConfig, width: f64, height: f64, rng: &mut R) -> Self {
		let mut field = Self {
			particles: Vec::new(),
			config: config.normalized(),
			width,
			height,
		};
		field.regenerate(rng);
		field
	}

	/// Builds a field from existing particles. Mostly useful for replaying a
	/// known layout.
	pub fn with_particles(
		config: FieldConfig,
		width: f64,
		height: f64,
		particles: Vec<Particle>,
	) -> Self {
		Self {
			particles,
			config: config.normalized(),
			width,
			height,
		}
	}

	fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
		let count = particle_count(&self.config, self.width, self.height);
		self.particles.clear();
		self.particles.reserve(count);
		for _ in 0..count {
			self.particles
				.push(Particle::random(&self.config, self.width, self.height, rng));
		}
	}

	/// Advance every particle by one frame.
	pub fn step(&mut self) {
		let (w, h) = (self.width, self.height);
		for p in &mut self.particles {
			p.update(w, h);
		}
	}

	/// Adopt new surface bounds and replace the whole particle set.
	pub fn resize<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
		self.width = width;
		self.height = height;
		self.regenerate(rng);
	}

	/// Particles in draw order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Current bounds, in px.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// See [`ParticleField::width`].
	pub fn height(&self) -> f64 {
		self.height
	}
}

/// Number of particles generated for a `width` x `height` surface.
pub fn particle_count(config: &FieldConfig, width: f64, height: f64) -> usize {
	config.count.for_surface(width, height)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::config::ParticleCount;
	use super::*;

	fn rng() -> SmallRng {
		SmallRng::seed_from_u64(0x5eed)
	}

	fn in_bounds(field: &ParticleField) -> bool {
		field.particles().iter().all(|p| {
			(0.0..=field.width()).contains(&p.x) && (0.0..=field.height()).contains(&p.y)
		})
	}

	fn single(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
		Particle {
			x,
			y,
			vx,
			vy,
			size: 1.0,
			color: Color::rgb(0, 0, 0),
		}
	}

	#[test]
	fn test_initial_particles_within_ranges() {
		let config = FieldConfig::default();
		let field = ParticleField::new(config.clone(), 800.0, 600.0, &mut rng());

		assert_eq!(field.particles().len(), 200);
		for p in field.particles() {
			assert!((0.0..800.0).contains(&p.x));
			assert!((0.0..600.0).contains(&p.y));
			assert!(p.size >= config.size_min && p.size <= config.size_max);
			assert!(p.vx.abs() <= config.max_speed);
			assert!(p.vy.abs() <= config.max_speed);
		}
	}

	#[test]
	fn test_alpha_randomized_within_range() {
		let config = FieldConfig {
			alpha_min: 0.2,
			alpha_max: 0.6,
			..FieldConfig::default()
		};
		let field = ParticleField::new(config, 300.0, 300.0, &mut rng());
		for p in field.particles() {
			assert!((0.2..=0.6).contains(&p.color.a));
			assert_eq!((p.color.r, p.color.g, p.color.b), (0x3b, 0x82, 0xf6));
		}
	}

	#[test]
	fn test_particles_stay_in_bounds() {
		let config = FieldConfig {
			max_speed: 25.0,
			..FieldConfig::default()
		};
		let mut field = ParticleField::new(config, 320.0, 240.0, &mut rng());
		for _ in 0..2_000 {
			field.step();
			assert!(in_bounds(&field));
		}
	}

	#[test]
	fn test_reflect_at_right_edge() {
		let mut field = ParticleField::with_particles(
			FieldConfig::default(),
			800.0,
			600.0,
			vec![single(799.0, 300.0, 5.0, 0.0)],
		);
		field.step();

		let p = &field.particles()[0];
		assert_eq!((p.vx, p.vy), (-5.0, 0.0));
		assert!(p.x <= 800.0);
		assert_eq!(p.y, 300.0);
	}

	#[test]
	fn test_reflect_flips_once_per_crossing() {
		let mut field = ParticleField::with_particles(
			FieldConfig::default(),
			100.0,
			100.0,
			vec![single(2.0, 50.0, -3.0, 0.0)],
		);

		field.step();
		assert_eq!(field.particles()[0].vx, 3.0);
		assert_eq!(field.particles()[0].x, 0.0);

		// Moving back inside must not flip again.
		field.step();
		assert_eq!(field.particles()[0].vx, 3.0);
		assert_eq!(field.particles()[0].x, 3.0);
	}

	#[test]
	fn test_corner_reflects_both_axes() {
		let mut p = single(99.0, 99.0, 4.0, 4.0);
		p.update(100.0, 100.0);
		assert_eq!((p.x, p.y), (100.0, 100.0));
		assert_eq!((p.vx, p.vy), (-4.0, -4.0));
	}

	#[test]
	fn test_density_count_on_small_surface() {
		let config = FieldConfig {
			count: ParticleCount::Density {
				area_per_particle: 9000.0,
				max: 100,
			},
			..FieldConfig::default()
		};
		let field = ParticleField::new(config, 100.0, 100.0, &mut rng());
		assert_eq!(field.particles().len(), 1);
	}

	#[test]
	fn test_resize_regenerates_for_new_area() {
		let config = FieldConfig {
			count: ParticleCount::Density {
				area_per_particle: 9000.0,
				max: 100,
			},
			..FieldConfig::default()
		};
		let mut rng = rng();
		let mut field = ParticleField::new(config, 800.0, 600.0, &mut rng);
		assert_eq!(field.particles().len(), 53);

		field.resize(400.0, 300.0, &mut rng);
		assert_eq!((field.width(), field.height()), (400.0, 300.0));
		assert_eq!(field.particles().len(), 13);
		assert!(field.particles().iter().all(|p| p.x < 400.0 && p.y < 300.0));
	}

	#[test]
	fn test_resize_same_dimensions_keeps_count() {
		let config = FieldConfig {
			count: ParticleCount::Density {
				area_per_particle: 5000.0,
				max: 500,
			},
			..FieldConfig::default()
		};
		let mut rng = rng();
		let mut field = ParticleField::new(config, 640.0, 480.0, &mut rng);

		field.resize(640.0, 480.0, &mut rng);
		let first = field.particles().len();
		field.resize(640.0, 480.0, &mut rng);
		assert_eq!(field.particles().len(), first);
	}

	#[test]
	fn test_zero_sized_surface() {
		let mut field = ParticleField::new(FieldConfig::default(), 0.0, 0.0, &mut rng());
		field.step();
		assert!(field.particles().iter().all(|p| p.x == 0.0 && p.y == 0.0));
	}
}
