//! Reading graphs from text and writing them out for visualization.
//!
//! This is the only part of the crate that touches `std::io`, algorithms work
//! on already built graphs.

pub mod dot;
pub mod pajek;

pub use dot::Dot;
pub use pajek::{AnyGraph, GraphKind};
