pub mod diff;
pub mod swatch;
