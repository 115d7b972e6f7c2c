pub mod disc;
pub mod surface;

pub use disc::{DiscBuffer, DiscInstance};
pub use surface::DrawSurface;
