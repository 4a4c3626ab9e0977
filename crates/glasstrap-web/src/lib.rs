#![forbid(unsafe_code)]

//! WASM runner for the glasstrap shatter button.
//!
//! This crate provides [`ShatterRunner`], a `wasm-bindgen`-exported struct
//! that wraps `glasstrap_widget::ShatterButton` and exposes it to
//! JavaScript for host-driven execution: the page forwards activations and
//! pointer events, ticks the clock, and applies the drained JSON command
//! stream to the DOM.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::ShatterRunner;

// Runner core is used by the wasm module and by native tests.
#[cfg(any(target_arch = "wasm32", test))]
mod runner_core;
