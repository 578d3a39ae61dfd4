//! Frame packing: distributing blocks over fixed-capacity slides.

/// Greedy in-order frame packer.
pub mod packer;
