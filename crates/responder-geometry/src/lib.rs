//! Pure math for gesture responders
//!
//! This crate contains the geometry primitives shared by the responder
//! runtime and its test harness.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::Point;
}
