//! Particle field configuration and colors.
//!
//! Every field is optional in the JSON form; missing values fall back to the
//! classic look: 200 small blue dots drifting slowly.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::FieldError;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	/// Red channel
	pub r: u8,
	/// Green channel
	pub g: u8,
	/// Blue channel
	pub b: u8,
	/// Opacity in `[0, 1]`
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha `a`.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same channels with alpha `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// `#rrggbb` for opaque colors, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

impl FromStr for Color {
	type Err = FieldError;

	/// Parses `#rrggbb`, `#rgb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let invalid = || FieldError::InvalidColor(s.to_string());

		if let Some(hex) = s.strip_prefix('#') {
			let channel = |range: std::ops::Range<usize>, wide: bool| {
				let digits = hex.get(range).ok_or_else(invalid)?;
				let v = u8::from_str_radix(digits, 16).map_err(|_| invalid())?;
				Ok::<u8, FieldError>(if wide { v } else { v * 17 })
			};
			return match hex.len() {
				6 => Ok(Color::rgb(
					channel(0..2, true)?,
					channel(2..4, true)?,
					channel(4..6, true)?,
				)),
				3 => Ok(Color::rgb(
					channel(0..1, false)?,
					channel(1..2, false)?,
					channel(2..3, false)?,
				)),
				_ => Err(invalid()),
			};
		}

		let body = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))
			.and_then(|rest| rest.strip_suffix(')'))
			.ok_or_else(invalid)?;
		let parts: Vec<&str> = body.split(',').map(str::trim).collect();
		if !(3..=4).contains(&parts.len()) {
			return Err(invalid());
		}
		let channel = |i: usize| parts[i].parse::<u8>().map_err(|_| invalid());
		let a = match parts.get(3) {
			Some(a) => {
				let a = a.parse::<f64>().map_err(|_| invalid())?;
				if !a.is_finite() {
					return Err(invalid());
				}
				a.clamp(0.0, 1.0)
			}
			None => 1.0,
		};
		Ok(Color::rgba(channel(0)?, channel(1)?, channel(2)?, a))
	}
}

impl TryFrom<String> for Color {
	type Error = FieldError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// How many particles a surface of a given size receives.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleCount {
	/// Same count regardless of surface size.
	Fixed(usize),
	/// One particle per `area_per_particle` square pixels, capped at `max`.
	Density {
		/// Square pixels per particle
		area_per_particle: f64,
		/// Upper bound on the count
		max: usize,
	},
}

impl ParticleCount {
	/// Number of particles for a `width` x `height` surface.
	pub fn for_surface(&self, width: f64, height: f64) -> usize {
		match *self {
			ParticleCount::Fixed(n) => n,
			ParticleCount::Density {
				area_per_particle,
				max,
			} => {
				if area_per_particle <= 0.0 {
					return max;
				}
				let area = width.max(0.0) * height.max(0.0);
				((area / area_per_particle).floor() as usize).min(max)
			}
		}
	}
}

impl Default for ParticleCount {
	fn default() -> Self {
		ParticleCount::Fixed(200)
	}
}

/// Complete configuration for the particle background.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Whether the background runs at all
	pub enabled: bool,
	/// Particle count policy
	pub count: ParticleCount,
	/// Minimum particle radius
	pub size_min: f64,
	/// Maximum particle radius
	pub size_max: f64,
	/// Largest absolute velocity component, px/frame
	pub max_speed: f64,
	/// Base color; each particle's alpha is scaled by its own random factor
	pub color: Color,
	/// Lower bound of the per-particle alpha
	pub alpha_min: f64,
	/// Upper bound of the per-particle alpha
	pub alpha_max: f64,
	/// Delay before regenerating on resize (0 = immediately)
	pub resize_debounce_ms: u32,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			count: ParticleCount::default(),
			size_min: 0.5,
			size_max: 2.5,
			max_speed: 0.75,
			color: Color::rgb(0x3b, 0x82, 0xf6),
			alpha_min: 1.0,
			alpha_max: 1.0,
			resize_debounce_ms: 0,
		}
	}
}

impl FieldConfig {
	/// Parses a JSON object, filling missing fields with defaults.
	pub fn from_json(json: &str) -> crate::Result<Self> {
		Ok(serde_json::from_str::<FieldConfig>(json)?.normalized())
	}

	/// Repairs ranges so that particle generation cannot fail.
	///
	/// Negative and non-finite values are clamped to zero, swapped bounds are
	/// put back in order, and every alpha (the color's included) is kept in
	/// `[0, 1]`.
	pub fn normalized(mut self) -> Self {
		let sane = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };

		self.size_min = sane(self.size_min);
		self.size_max = sane(self.size_max);
		if self.size_min > self.size_max {
			std::mem::swap(&mut self.size_min, &mut self.size_max);
		}

		self.max_speed = sane(self.max_speed);

		self.color.a = sane(self.color.a).min(1.0);

		self.alpha_min = sane(self.alpha_min).min(1.0);
		self.alpha_max = sane(self.alpha_max).min(1.0);
		if self.alpha_min > self.alpha_max {
			std::mem::swap(&mut self.alpha_min, &mut self.alpha_max);
		}

		if let ParticleCount::Density {
			area_per_particle, ..
		} = &mut self.count
		{
			*area_per_particle = sane(*area_per_particle);
		}
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_hex_colors() {
		assert_eq!("#3b82f6".parse::<Color>().unwrap(), Color::rgb(59, 130, 246));
		assert_eq!("#fff".parse::<Color>().unwrap(), Color::rgb(255, 255, 255));
		assert!("#12345".parse::<Color>().is_err());
		assert!("#gg0000".parse::<Color>().is_err());
	}

	#[test]
	fn test_parse_functional_colors() {
		assert_eq!(
			"rgb(10, 20, 30)".parse::<Color>().unwrap(),
			Color::rgb(10, 20, 30)
		);
		assert_eq!(
			"rgba(10, 20, 30, 0.5)".parse::<Color>().unwrap(),
			Color::rgba(10, 20, 30, 0.5)
		);
		assert!("rgb(10, 20)".parse::<Color>().is_err());
		assert!("rgba(1,2,3,NaN)".parse::<Color>().is_err());
		assert!("rgba(1, 2, 3, inf)".parse::<Color>().is_err());
		assert!("blue".parse::<Color>().is_err());
	}

	#[test]
	fn test_to_css() {
		assert_eq!(Color::rgb(59, 130, 246).to_css(), "#3b82f6");
		assert_eq!(
			Color::rgb(59, 130, 246).with_alpha(0.5).to_css(),
			"rgba(59, 130, 246, 0.5)"
		);
	}

	#[test]
	fn test_density_count() {
		let count = ParticleCount::Density {
			area_per_particle: 9000.0,
			max: 100,
		};
		assert_eq!(count.for_surface(100.0, 100.0), 1);
		assert_eq!(count.for_surface(800.0, 600.0), 53);
		assert_eq!(count.for_surface(1920.0, 1080.0), 100);
		assert_eq!(count.for_surface(0.0, 600.0), 0);
	}

	#[test]
	fn test_fixed_count_ignores_size() {
		assert_eq!(ParticleCount::Fixed(200).for_surface(1.0, 1.0), 200);
		assert_eq!(ParticleCount::Fixed(200).for_surface(4000.0, 4000.0), 200);
	}

	#[test]
	fn test_json_defaults() {
		let config = FieldConfig::from_json("{}").unwrap();
		assert_eq!(config, FieldConfig::default());
	}

	#[test]
	fn test_json_overrides() {
		let config = FieldConfig::from_json(
			r##"{
				"count": { "density": { "area_per_particle": 9000, "max": 100 } },
				"color": "#ff0000",
				"alpha_min": 0.3,
				"alpha_max": 0.8
			}"##,
		)
		.unwrap();
		assert_eq!(
			config.count,
			ParticleCount::Density {
				area_per_particle: 9000.0,
				max: 100
			}
		);
		assert_eq!(config.color, Color::rgb(255, 0, 0));
		assert_eq!(config.alpha_min, 0.3);
		assert_eq!(config.size_max, 2.5);
	}

	#[test]
	fn test_json_rejects_bad_color() {
		assert!(matches!(
			FieldConfig::from_json(r#"{ "color": "nope" }"#),
			Err(FieldError::Config(_))
		));
	}

	#[test]
	fn test_json_rejects_non_finite_alpha() {
		assert!(matches!(
			FieldConfig::from_json(r#"{ "color": "rgba(1,2,3,NaN)" }"#),
			Err(FieldError::Config(_))
		));
	}

	#[test]
	fn test_normalized_repairs_color_alpha() {
		let config = FieldConfig {
			color: Color::rgba(1, 2, 3, f64::NAN),
			..FieldConfig::default()
		}
		.normalized();
		assert_eq!(config.color.a, 0.0);
		assert_eq!(config.color.to_css(), "rgba(1, 2, 3, 0)");

		let config = FieldConfig {
			color: Color::rgba(1, 2, 3, 4.0),
			..FieldConfig::default()
		}
		.normalized();
		assert_eq!(config.color.to_css(), "#010203");
	}

	#[test]
	fn test_normalized_repairs_ranges() {
		let config = FieldConfig {
			size_min: 3.0,
			size_max: 1.0,
			max_speed: -2.0,
			alpha_min: 1.5,
			alpha_max: f64::NAN,
			..FieldConfig::default()
		}
		.normalized();
		assert_eq!((config.size_min, config.size_max), (1.0, 3.0));
		assert_eq!(config.max_speed, 0.0);
		assert_eq!((config.alpha_min, config.alpha_max), (0.0, 1.0));
	}
}
