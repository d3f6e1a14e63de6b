#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// pixel-wise operations on binary images.
pub mod binary;

/// label maps and the filters working on them.
pub mod label_map;

/// module containing parallization utilities.
pub mod parallel;

/// binary geodesic reconstruction operators.
pub mod reconstruction;
