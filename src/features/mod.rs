pub mod encoder;
pub mod matrix;
