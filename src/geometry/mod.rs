//! Geometric primitives for structured patches: faces, the regions surrounding
//! a patch interior, and boxes of signed cell indices.

mod face;
mod region;
mod window;

pub use face::{AXIS_NAMES, Face, FaceArray};
pub use region::{Region, Side};
pub use window::{IndexBox, IndexBoxIter};
