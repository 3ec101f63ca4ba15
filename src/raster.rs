pub mod codec;
pub mod load;
pub mod svg;
