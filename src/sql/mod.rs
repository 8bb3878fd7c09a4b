//! Statement composition: identifiers come from closed enums only, values are bound parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
