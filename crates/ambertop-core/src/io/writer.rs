//! Topology serializer.
//!
//! Blocks are emitted in the canonical LEaP order with LEaP's exact
//! padding quirks, so a load/write cycle reproduces a conforming file
//! byte for byte. Legacy placeholders dropped at load time (SOLTY,
//! JOIN_ARRAY, IROTAT, IPOL, the 10-12 hydrogen-bond tables) are
//! synthesized from the document's derived counts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use super::error::PrmtopError;
use super::fields::{FieldValue, format_field};
use crate::models::{Block, Prmtop, creation_stamp};
use crate::schema::{Flag, FormatKind, WRITE_ORDER};

fn version_line(version: &str, date_time: &str) -> String {
    format!(
        "{:<80}",
        format!("%VERSION  VERSION_STAMP = {version}  DATE = {date_time}")
    )
}

/// Rebuilds the raw POINTERS record from derived counts. The constraint
/// slots 12-14 repeat the without-hydrogen term counts and every
/// unsupported-feature slot is pinned to zero.
fn pointers_record(doc: &Prmtop) -> Vec<i64> {
    let mut record = vec![
        doc.atoms_num() as i64,
        doc.lj_types_num() as i64,
        doc.bonds_with_hydrogen_num() as i64,
        doc.bonds_without_hydrogen_num() as i64,
        doc.angles_with_hydrogen_num() as i64,
        doc.angles_without_hydrogen_num() as i64,
        doc.dihedrals_with_hydrogen_num() as i64,
        doc.dihedrals_without_hydrogen_num() as i64,
        0,
        0,
        doc.excluded_atoms_num() as i64,
        doc.residues_num() as i64,
        doc.bonds_without_hydrogen_num() as i64,
        doc.angles_without_hydrogen_num() as i64,
        doc.dihedrals_without_hydrogen_num() as i64,
        doc.bond_fftypes_num() as i64,
        doc.angle_fftypes_num() as i64,
        doc.dihedral_fftypes_num() as i64,
        doc.atom_fftypes_num() as i64,
        0,
        0,
        0,
        0,
        0,
        0,
        0,
        0,
        i64::from(doc.box_kind.code()),
        doc.residue_max_len(),
        i64::from(doc.solv_cap_kind.code()),
        doc.extra_points_num() as i64,
    ];
    if let Some(slices) = doc.pimd_slices_num {
        record.push(slices);
    }
    record
}

fn block_fields(block: &Block) -> Vec<FieldValue> {
    match block {
        Block::Int(values) | Block::IntTable { values, .. } => {
            values.iter().map(|&n| FieldValue::Int(n)).collect()
        }
        Block::Float(values) => values.iter().map(|&x| FieldValue::Float(x)).collect(),
        Block::Str(values) => values.iter().cloned().map(FieldValue::Str).collect(),
        Block::IntMatrix(matrix) => matrix
            .row_iter()
            .flat_map(|row| row.iter().copied().collect::<Vec<_>>())
            .map(FieldValue::Int)
            .collect(),
    }
}

fn write_block(
    writer: &mut impl Write,
    flag: Flag,
    values: &[FieldValue],
    comment: Option<&str>,
) -> Result<(), PrmtopError> {
    let format = flag.format();
    // The title carries a string-array %FORMAT header but its body is laid
    // out as one 80-column line.
    let layout = if flag == Flag::Title {
        FormatKind::Sentence
    } else {
        format
    };

    writeln!(writer, "{:<80}", format!("%FLAG {}", flag.name()))?;
    if let Some(comment) = comment {
        writeln!(writer, "{:<80}", format!("%COMMENT  {comment}"))?;
    }
    writeln!(writer, "{:<80}", format!("%FORMAT({})", format.written_spec()))?;

    if values.is_empty() {
        writeln!(writer)?;
        return Ok(());
    }

    let columns: Vec<String> = values
        .iter()
        .map(|value| format_field(value, layout))
        .collect();
    let per_line = layout.values_per_line();
    let rows = columns.chunks(per_line).count();
    for (index, chunk) in columns.chunks(per_line).enumerate() {
        let mut line = chunk.concat();
        if index == rows - 1 {
            let trimmed_len = line.trim_end().len();
            line.truncate(trimmed_len);
            if format == FormatKind::SmallStringArray && line.len() % 4 != 0 {
                let width = line.len().div_ceil(4) * 4;
                line = format!("{line:<width$}");
            } else if format == FormatKind::Sentence
                || flag == Flag::CmapCount
                || flag == Flag::Title
            {
                line = format!("{line:<80}");
            }
        }
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Writes the document in canonical block order.
///
/// The version stamp uses `doc.date_time` as-is; callers wanting a fresh
/// stamp update the field first.
pub fn write_to(doc: &Prmtop, writer: &mut impl Write) -> Result<(), PrmtopError> {
    writeln!(writer, "{}", version_line(&doc.version, &doc.date_time))?;

    for &flag in WRITE_ORDER {
        match flag {
            Flag::Title => {
                let title = FieldValue::Str(doc.name.clone());
                write_block(writer, flag, std::slice::from_ref(&title), None)?;
            }
            Flag::Pointers => {
                let fields: Vec<FieldValue> = pointers_record(doc)
                    .into_iter()
                    .map(FieldValue::Int)
                    .collect();
                write_block(writer, flag, &fields, None)?;
            }
            _ if flag.is_hbond() => {
                write_block(writer, flag, &[], None)?;
            }
            Flag::Solty => {
                let fields = vec![FieldValue::Float(0.0); doc.atom_fftypes_num()];
                write_block(writer, flag, &fields, None)?;
            }
            Flag::JoinArray | Flag::Irotat => {
                let fields = vec![FieldValue::Int(0); doc.atoms_num()];
                write_block(writer, flag, &fields, None)?;
            }
            Flag::Ipol => {
                let fields = [FieldValue::Int(i64::from(doc.polarizable_kind().code()))];
                write_block(writer, flag, &fields, None)?;
            }
            _ => match doc.blocks.get(&flag) {
                Some(block) => {
                    let comment = doc.cmap_comments.get(&flag).map(String::as_str);
                    write_block(writer, flag, &block_fields(block), comment)?;
                }
                // Optional flags keep their slot but are skipped when absent;
                // a missing required flag still gets an empty block.
                None if !flag.is_optional() => {
                    write_block(writer, flag, &[], None)?;
                }
                None => {}
            },
        }
    }
    debug!(atoms = doc.atoms_num(), "wrote topology");
    Ok(())
}

pub fn write_to_path<P: AsRef<Path>>(doc: &Prmtop, path: P) -> Result<(), PrmtopError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(doc, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes the document with a freshly generated creation stamp in the
/// version line, leaving `doc` untouched. This is the usual contract for
/// emitting a new file; `write_to_path` preserves the stored stamp for
/// byte-identical re-renders.
pub fn write_dated_to_path<P: AsRef<Path>>(doc: &Prmtop, path: P) -> Result<(), PrmtopError> {
    let mut stamped = doc.clone();
    stamped.date_time = creation_stamp();
    write_to_path(&stamped, path)
}
