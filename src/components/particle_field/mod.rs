//! Decorative particle background.
//!
//! A field of small dots drifts across a full-viewport canvas and bounces off
//! its edges. The simulation ([`ParticleField`]) knows nothing about the
//! browser; it is drawn through the [`Surface`] trait, which the canvas
//! implements.
//!
//! # Example
//!
//! ```ignore
//! use portfolio_fx::components::particle_field::{FieldConfig, ParticleCanvas, ParticleCount};
//!
//! let config = FieldConfig {
//!     count: ParticleCount::Density { area_per_particle: 9000.0, max: 100 },
//!     ..FieldConfig::default()
//! };
//!
//! view! { <ParticleCanvas config=config /> }
//! ```

mod component;
pub mod config;
mod particles;
mod render;
mod surface;

pub use component::{CANVAS_ID, CanvasHost, ParticleCanvas, attach};
pub use config::{Color, FieldConfig, ParticleCount};
pub use particles::{Particle, ParticleField, particle_count};
pub use render::{draw_particles, render_frame};
pub use surface::{CanvasSurface, Surface};
