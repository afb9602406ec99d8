//! Dataset model shared by every pipeline stage.
//!
//! # Responsibility
//! - Describe the raw node graph as fetched from the remote endpoint.
//! - Describe the heatmap entry that flows through generation, clustering,
//!   sorting and extraction.
//!
//! # Invariants
//! - `Group` is assigned once from the raw node and never changes.
//! - Unknown keys on raw nodes and entries survive a read/write cycle.

pub mod entry;
pub mod group;
pub mod raw;
