//! Error type shared by the particle background and the page effects.
//!
//! None of these errors are fatal to the page. Callers log them and skip the
//! affected effect.

use thiserror::Error;

/// Failures that stop an effect from starting.
#[derive(Debug, Error)]
pub enum FieldError {
	/// The canvas exists but a 2D rendering context could not be obtained.
	#[error("2d drawing surface unavailable")]
	SurfaceUnavailable,

	/// The `particle-config` script element held malformed JSON.
	#[error("invalid particle config: {0}")]
	Config(#[from] serde_json::Error),

	/// A color string was neither `#rgb`, `#rrggbb`, nor `rgb()`/`rgba()`.
	#[error("invalid color `{0}`")]
	InvalidColor(String),

	/// A browser API call returned an exception.
	#[error("dom: {0}")]
	Dom(String),
}

impl From<wasm_bindgen::JsValue> for FieldError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		Self::Dom(format!("{value:?}"))
	}
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = FieldError> = std::result::Result<T, E>;
