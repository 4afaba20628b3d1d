//! portfolio-fx: client-side effects for a static portfolio page.
//!
//! This crate renders a decorative particle background behind the page and
//! wires up the page's small interactive behaviours (theme toggle, smooth
//! navigation, reveal and hover animations, contact form feedback).

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;
pub mod frame_loop;
pub mod page;

pub use components::particle_field::{CanvasHost, FieldConfig, ParticleCanvas, ParticleCount};
pub use error::{FieldError, Result};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("portfolio-fx: logging initialized");
}

/// Load particle settings from a script element with id="particle-config".
/// Expected format: a JSON object with any subset of [`FieldConfig`] fields.
/// Falls back to the defaults when the element is missing or invalid.
fn load_config() -> FieldConfig {
	let Some(json_text) = config_text() else {
		return FieldConfig::default();
	};

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("portfolio-fx: loaded particle config: {:?}", config.count);
			config
		}
		Err(e) => {
			warn!("portfolio-fx: {}", e);
			FieldConfig::default()
		}
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

fn canvas_host() -> CanvasHost {
	web_sys::window()
		.and_then(|w| w.document())
		.map_or(CanvasHost::Mounted, |d| CanvasHost::find(&d))
}

/// Main application component.
/// Draws the particle background on the markup's `#particleCanvas` when there
/// is one, mounting a canvas otherwise, and installs the page effects once the
/// component is in the DOM.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let host = canvas_host();
	let mounts_canvas = host.mounts_canvas();
	if let CanvasHost::Markup(canvas) = host {
		components::particle_field::attach(canvas, config.clone());
	}

	Effect::new(move |_| {
		page::install();
	});

	view! {
		<Meta name="color-scheme" content="light dark" />
		{mounts_canvas.then(move || view! { <ParticleCanvas config=config /> })}
	}
}
