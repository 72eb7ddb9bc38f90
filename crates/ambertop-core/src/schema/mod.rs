//! Static registry of prmtop block names and their on-disk formats.
//!
//! The flag set and the format attached to each flag are fixed by the file
//! format specification; both are pure lookup tables with no runtime error
//! conditions. The registry also fixes the canonical order in which blocks
//! are written, which affects only file layout but must be reproduced
//! exactly for byte-identical round trips.

pub mod flags;
pub mod formats;

pub use flags::{Flag, WRITE_ORDER};
pub use formats::{FormatKind, ValueKind};
