//! Dependency-Track API model types.

mod about;
mod component;
mod vex;

pub use about::*;
pub use component::*;
pub use vex::*;
