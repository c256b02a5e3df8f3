//! PNG rendering of punched tape.

mod paint;

pub use paint::{TapeImageOptions, TapeImageStyle, render_tape_image};
