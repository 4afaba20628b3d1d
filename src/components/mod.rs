//! Leptos components.

pub mod particle_field;
