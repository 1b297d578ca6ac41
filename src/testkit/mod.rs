//! Testing infrastructure for procmap.
//!
//! Fluent construction of in-memory processes so tests and benches can
//! describe topologies in a few lines instead of JSON documents.
//!
//! # Quick Start
//!
//! ```rust
//! use procmap::testkit::ProcessBuilder;
//!
//! let process = ProcessBuilder::new()
//!     .start("start")
//!     .task("work")
//!     .end("end")
//!     .chain(&["start", "work", "end"])
//!     .build();
//!
//! assert_eq!(process.elements().sequence_flows.len(), 2);
//! ```

pub mod builders;
pub mod generators;

pub use builders::ProcessBuilder;
pub use generators::{layered_diamonds, linear_chain};
