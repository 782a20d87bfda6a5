pub mod culling;

pub use culling::{Culling, ViewBounds};
