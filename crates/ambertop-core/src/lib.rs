//! # ambertop
//!
//! A byte-faithful reader, writer and model for Amber prmtop topology
//! files.
//!
//! The crate is organized in three layers:
//!
//! - **[`schema`]: The Format.** The closed registry of block flags, their
//!   Fortran record formats and the canonical write order. Nothing here is
//!   inferred at runtime; the file format fixes it all.
//!
//! - **[`models`]: The Data.** The in-memory document ([`models::Prmtop`])
//!   with counts derived from its blocks, the header summary
//!   ([`models::Metadata`]) with its well-formedness invariants, and
//!   synthetic document construction from bare atomic numbers.
//!
//! - **[`io`]: The Codec.** A streaming loader that validates headers
//!   against the block data, a cheap metadata-only reader, and a writer
//!   that reproduces the reference generator's layout byte for byte.

pub mod io;
pub mod models;
pub mod schema;

pub use io::PrmtopError;
pub use models::{Metadata, Prmtop};
