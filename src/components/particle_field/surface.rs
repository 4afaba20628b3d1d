//! The drawing surface particles are rendered onto.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::config::Color;
use crate::error::{FieldError, Result};

/// A rectangular 2D drawing target.
pub trait Surface {
	/// Width in px
	fn width(&self) -> u32;
	/// Height in px
	fn height(&self) -> u32;
	/// Resize the backing store. Implementations may clear the contents.
	fn set_size(&mut self, width: u32, height: u32);
	/// Clear the whole surface.
	fn clear(&mut self);
	/// Draw a filled circle centered on `(x, y)`.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
}

/// A `<canvas>` element with its 2D context.
#[derive(Clone)]
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Acquires the 2D context of `canvas`.
	pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self> {
		let ctx = canvas
			.get_context("2d")?
			.ok_or(FieldError::SurfaceUnavailable)?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| FieldError::SurfaceUnavailable)?;
		Ok(Self { canvas, ctx })
	}
}

impl Surface for CanvasSurface {
	fn width(&self) -> u32 {
		self.canvas.width()
	}

	fn height(&self) -> u32 {
		self.canvas.height()
	}

	fn set_size(&mut self, width: u32, height: u32) {
		self.canvas.set_width(width);
		self.canvas.set_height(height);
	}

	fn clear(&mut self) {
		self.ctx.clear_rect(
			0.0,
			0.0,
			self.canvas.width() as f64,
			self.canvas.height() as f64,
		);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, PI * 2.0);
		self.ctx.fill();
	}
}

/// Records draw calls instead of painting. Used by tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
	pub width: u32,
	pub height: u32,
	pub clears: usize,
	pub circles: Vec<(f64, f64, f64, Color)>,
}

#[cfg(test)]
impl RecordingSurface {
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			..Self::default()
		}
	}
}

#[cfg(test)]
impl Surface for RecordingSurface {
	fn width(&self) -> u32 {
		self.width
	}

	fn height(&self) -> u32 {
		self.height
	}

	fn set_size(&mut self, width: u32, height: u32) {
		self.width = width;
		self.height = height;
		self.circles.clear();
	}

	fn clear(&mut self) {
		self.clears += 1;
		self.circles.clear();
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.circles.push((x, y, radius, color));
	}
}
