//! Pure dataset transformations, one module per pipeline stage.
//!
//! # Responsibility
//! - Hold every filtering, grouping and ordering rule of the pipeline.
//! - Stay free of file and network I/O so each rule is testable in memory.
//!
//! # Invariants
//! - Transformations take ownership of their input and return a complete
//!   replacement dataset; nothing is updated incrementally.

pub mod cluster;
pub mod heatmap;
pub mod labels;
pub mod ring;
pub mod subgraph;
pub mod swap;
