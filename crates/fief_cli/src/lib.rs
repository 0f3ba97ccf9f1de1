//! Line-protocol driver for the fief rules engine.
//!
//! Commands arrive one per line on the input stream; the decision engine's
//! own commands are mirrored to the output stream in the identical wire
//! format. Result and error diagnostics go to a separate diagnostic
//! stream, so stdout carries nothing but commands.
//!
//! - [`protocol`] - bounded-line command parsing
//! - [`driver`] - the blocking read-dispatch-respond session loop
//! - [`render`] - text projection of the board's top-left corner

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod driver;
pub mod protocol;
pub mod render;
