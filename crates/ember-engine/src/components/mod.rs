pub mod color;
pub mod particle;
