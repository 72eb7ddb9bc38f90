//! Reading and writing of the fixed-width topology format.

pub mod error;
pub mod fields;
pub mod reader;
pub mod writer;

pub use error::PrmtopError;
pub use reader::{read_from, read_from_path, read_metadata_from, read_metadata_from_path};
pub use writer::{write_dated_to_path, write_to, write_to_path};
