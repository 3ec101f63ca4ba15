pub mod blend;
pub mod ops;
