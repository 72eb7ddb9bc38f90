//! In-memory topology model: the document itself, its header metadata,
//! geometry tags and the element table backing synthetic construction.

pub mod document;
pub mod elements;
pub mod kinds;
pub mod metadata;
pub mod synthetic;

pub use document::{Block, DocumentError, Prmtop};
pub use kinds::{BoxKind, PolarizableKind, SolvCapKind};
pub use metadata::{Metadata, MetadataError};
pub use synthetic::creation_stamp;
