//! layerforge-core: a heuristic engine for minimizing edge crossings in
//! k-layer straight-line drawings of directed acyclic graphs.
//!
//! The crate has no notion of files or CLI flags; it owns the graph model,
//! the crossing/stretch accounting, the best-so-far and Pareto tracking,
//! and the heuristic library itself. [`engine::Engine`] ties these together
//! into the run loop a frontend drives.

pub mod controller;
pub mod crossing;
pub mod engine;
pub mod error;
pub mod graph;
pub mod heuristics;
pub mod rng;
pub mod snapshot;
pub mod sort;
pub mod tracker;

pub use error::{Error, Result};
