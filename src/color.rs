pub mod key;
pub mod model;
