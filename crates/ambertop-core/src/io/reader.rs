//! Streaming prmtop loader.
//!
//! A single forward pass over the file drives a small state machine: the
//! current `%FLAG` selects the destination block, the current `%FORMAT`
//! selects the column layout, and every other line is data. The header
//! record is decoded into [`Metadata`] on the way through and checked
//! against the counts derived from the blocks afterwards.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nalgebra::DMatrix;
use tracing::debug;

use super::error::PrmtopError;
use super::fields::{FieldValue, parse_data_line};
use crate::models::{Block, Metadata, Prmtop};
use crate::schema::{Flag, FormatKind, ValueKind};

const DEFAULT_VERSION: &str = "V0001.000";
const COMMENT_PREFIX_LEN: usize = "%COMMENT  ".len();

/// Decodes a `%VERSION` line. Stamps that do not carry the full
/// `VERSION_STAMP = ... DATE = ...` layout fall back to defaults rather
/// than failing the load.
fn parse_version_line(line: &str) -> (String, String) {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() >= 8 {
        (tokens[3].to_string(), format!("{}  {}", tokens[6], tokens[7]))
    } else {
        (DEFAULT_VERSION.to_string(), String::new())
    }
}

fn parse_flag_line(line: &str, line_num: usize) -> Result<Flag, PrmtopError> {
    let name = line.split_whitespace().last().unwrap_or("");
    Flag::from_name(name).ok_or_else(|| PrmtopError::UnknownFlag {
        line: line_num,
        name: name.to_string(),
    })
}

fn parse_format_line(line: &str, line_num: usize) -> Result<FormatKind, PrmtopError> {
    let spec = line
        .split('(')
        .next_back()
        .unwrap_or("")
        .trim_end()
        .trim_end_matches(')');
    FormatKind::from_spec(spec).ok_or_else(|| PrmtopError::UnknownFormat {
        line: line_num,
        spec: spec.to_string(),
    })
}

struct RawDocument {
    version: String,
    date_time: String,
    pointers: Vec<i64>,
    title: String,
    cmap_comments: HashMap<Flag, String>,
    blocks: Vec<(Flag, Vec<FieldValue>)>,
}

fn scan(reader: &mut impl BufRead) -> Result<RawDocument, PrmtopError> {
    let mut raw = RawDocument {
        version: DEFAULT_VERSION.to_string(),
        date_time: String::new(),
        pointers: Vec::new(),
        title: String::new(),
        cmap_comments: HashMap::new(),
        blocks: Vec::new(),
    };
    // Everything before the first %FLAG belongs to the title, which some
    // writers emit with a bogus %FORMAT; its layout is forced regardless.
    let mut flag = Flag::Title;
    let mut format = FormatKind::Sentence;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = line_num + 1;

        if line.starts_with("%VERSION") {
            (raw.version, raw.date_time) = parse_version_line(&line);
        } else if line.starts_with("%COMMENT") {
            if flag.is_cmap_parameter() {
                let comment = line.get(COMMENT_PREFIX_LEN..).unwrap_or("").trim();
                raw.cmap_comments.insert(flag, comment.to_string());
            }
        } else if line.starts_with("%FLAG") {
            flag = parse_flag_line(&line, line_num)?;
            if flag != Flag::Title && flag != Flag::Pointers {
                raw.blocks.push((flag, Vec::new()));
            }
        } else if line.starts_with("%FORMAT") {
            format = if flag == Flag::Title {
                FormatKind::Sentence
            } else {
                parse_format_line(&line, line_num)?
            };
        } else {
            let values = parse_data_line(&line, format)
                .map_err(|kind| PrmtopError::Parse { line: line_num, kind })?;
            match flag {
                Flag::Title => {
                    if raw.title.is_empty() {
                        if let Some(FieldValue::Str(text)) = values.into_iter().next() {
                            raw.title = text;
                        }
                    }
                }
                Flag::Pointers => {
                    for value in values {
                        if let FieldValue::Int(n) = value {
                            raw.pointers.push(n);
                        }
                    }
                }
                _ => {
                    if let Some((_, block)) = raw.blocks.last_mut() {
                        block.extend(values);
                    }
                }
            }
        }
    }
    Ok(raw)
}

/// Reads only the version stamp and the header record.
///
/// This never touches the data blocks, so it stays cheap on large
/// topologies as long as the header sits near the top of the file.
pub fn read_metadata_from(reader: &mut impl BufRead) -> Result<Metadata, PrmtopError> {
    let mut version = DEFAULT_VERSION.to_string();
    let mut date_time = String::new();
    let mut pointers = Vec::new();
    let mut in_pointers = false;
    let mut format = FormatKind::IntArray;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = line_num + 1;

        if line.starts_with("%VERSION") {
            (version, date_time) = parse_version_line(&line);
        } else if line.starts_with("%FLAG") {
            if in_pointers {
                break;
            }
            in_pointers = parse_flag_line(&line, line_num)? == Flag::Pointers;
        } else if line.starts_with("%FORMAT") {
            if in_pointers {
                format = parse_format_line(&line, line_num)?;
            }
        } else if in_pointers && !line.starts_with("%COMMENT") {
            let values = parse_data_line(&line, format)
                .map_err(|kind| PrmtopError::Parse { line: line_num, kind })?;
            for value in values {
                if let FieldValue::Int(n) = value {
                    pointers.push(n);
                }
            }
        }
    }
    Ok(Metadata::from_pointers(&pointers, version, date_time)?)
}

pub fn read_metadata_from_path<P: AsRef<Path>>(path: P) -> Result<Metadata, PrmtopError> {
    let file = File::open(path)?;
    read_metadata_from(&mut BufReader::new(file))
}

fn typed_block(flag: Flag, values: Vec<FieldValue>) -> Result<Block, PrmtopError> {
    let mismatch = |flag| PrmtopError::MalformedBlock {
        flag,
        reason: "data lines disagree with the block's value kind".to_string(),
    };
    match flag.format().value_kind() {
        ValueKind::Int => values
            .into_iter()
            .map(|value| match value {
                FieldValue::Int(n) => Ok(n),
                _ => Err(mismatch(flag)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Block::Int),
        ValueKind::Float => values
            .into_iter()
            .map(|value| match value {
                FieldValue::Float(x) => Ok(x),
                // Wide-integer columns inside a float block are tolerated;
                // some generators write whole floats without a decimal point.
                FieldValue::Int(n) => Ok(n as f64),
                _ => Err(mismatch(flag)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Block::Float),
        ValueKind::Str => values
            .into_iter()
            .map(|value| match value {
                FieldValue::Str(s) => Ok(s),
                _ => Err(mismatch(flag)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Block::Str),
    }
}

fn reshape(flag: Flag, block: Block) -> Result<Block, PrmtopError> {
    if let Some(width) = flag.term_row_width() {
        let Block::Int(values) = block else {
            return Err(PrmtopError::MalformedBlock {
                flag,
                reason: "bonded-term block is not an integer array".to_string(),
            });
        };
        if values.len() % width != 0 {
            return Err(PrmtopError::MalformedBlock {
                flag,
                reason: format!(
                    "{} values cannot form rows of {width}",
                    values.len()
                ),
            });
        }
        return Ok(Block::IntTable { width, values });
    }
    if flag == Flag::NonbondedParmIndex {
        let Block::Int(values) = block else {
            return Err(PrmtopError::MalformedBlock {
                flag,
                reason: "parameter index block is not an integer array".to_string(),
            });
        };
        let side = (values.len() as f64).sqrt() as usize;
        if side * side != values.len() {
            return Err(PrmtopError::MalformedBlock {
                flag,
                reason: format!("{} values do not form a square matrix", values.len()),
            });
        }
        return Ok(Block::IntMatrix(DMatrix::from_row_slice(side, side, &values)));
    }
    Ok(block)
}

fn check_zero_placeholder(flag: Flag, block: &Block) -> Result<(), PrmtopError> {
    let all_zero = match block {
        Block::Int(values) => values.iter().all(|&n| n == 0),
        Block::Float(values) => values.iter().all(|&x| x == 0.0),
        _ => false,
    };
    if all_zero {
        Ok(())
    } else {
        Err(PrmtopError::MalformedBlock {
            flag,
            reason: "placeholder block must be all zeros".to_string(),
        })
    }
}

fn check_consistency(doc: &Prmtop, metadata: &Metadata) -> Result<(), PrmtopError> {
    let checks: [(&'static str, i64, i64); 16] = [
        ("atoms", doc.atoms_num() as i64, metadata.atoms_num),
        ("lj-types", doc.lj_types_num() as i64, metadata.lj_types_num),
        (
            "bonds-with-hydrogen",
            doc.bonds_with_hydrogen_num() as i64,
            metadata.bonds_with_hydrogen_num,
        ),
        (
            "bonds-without-hydrogen",
            doc.bonds_without_hydrogen_num() as i64,
            metadata.bonds_without_hydrogen_num,
        ),
        (
            "angles-with-hydrogen",
            doc.angles_with_hydrogen_num() as i64,
            metadata.angles_with_hydrogen_num,
        ),
        (
            "angles-without-hydrogen",
            doc.angles_without_hydrogen_num() as i64,
            metadata.angles_without_hydrogen_num,
        ),
        (
            "dihedrals-with-hydrogen",
            doc.dihedrals_with_hydrogen_num() as i64,
            metadata.dihedrals_with_hydrogen_num,
        ),
        (
            "dihedrals-without-hydrogen",
            doc.dihedrals_without_hydrogen_num() as i64,
            metadata.dihedrals_without_hydrogen_num,
        ),
        (
            "excluded-atoms",
            doc.excluded_atoms_num() as i64,
            metadata.excluded_atoms_num,
        ),
        ("residues", doc.residues_num() as i64, metadata.residues_num),
        (
            "bond-fftypes",
            doc.bond_fftypes_num() as i64,
            metadata.bond_fftypes_num,
        ),
        (
            "angle-fftypes",
            doc.angle_fftypes_num() as i64,
            metadata.angle_fftypes_num,
        ),
        (
            "dihedral-fftypes",
            doc.dihedral_fftypes_num() as i64,
            metadata.dihedral_fftypes_num,
        ),
        (
            "atom-fftypes",
            doc.atom_fftypes_num() as i64,
            metadata.atom_fftypes_num,
        ),
        (
            "residue-max-len",
            doc.residue_max_len(),
            metadata.residue_max_len,
        ),
        (
            "extra-points",
            doc.extra_points_num() as i64,
            metadata.extra_points_num,
        ),
    ];
    for (field, derived, from_header) in checks {
        if derived != from_header {
            return Err(PrmtopError::Inconsistency {
                field,
                derived,
                from_header,
            });
        }
    }
    Ok(())
}

/// Reads a complete topology document.
///
/// Legacy placeholder blocks (SOLTY, JOIN_ARRAY, IROTAT) are validated and
/// dropped; IPOL and the empty 10-12 hydrogen-bond tables are dropped
/// unconditionally. All of them are re-synthesized on write.
pub fn read_from(reader: &mut impl BufRead) -> Result<Prmtop, PrmtopError> {
    let raw = scan(reader)?;
    let metadata =
        Metadata::from_pointers(&raw.pointers, raw.version.clone(), raw.date_time.clone())?;

    let mut blocks = HashMap::new();
    for (flag, values) in raw.blocks {
        let block = typed_block(flag, values)?;
        if flag.is_zero_placeholder() {
            check_zero_placeholder(flag, &block)?;
            continue;
        }
        if flag == Flag::Ipol || flag.is_hbond() {
            continue;
        }
        blocks.insert(flag, reshape(flag, block)?);
    }

    for flag in [Flag::AtomName, Flag::ResidueLabel, Flag::ResiduePointer] {
        if !blocks.contains_key(&flag) {
            return Err(PrmtopError::MissingBlock { flag });
        }
    }

    let doc = Prmtop {
        name: raw.title,
        version: raw.version,
        date_time: raw.date_time,
        box_kind: metadata.box_kind,
        solv_cap_kind: metadata.solv_cap_kind,
        pimd_slices_num: metadata.pimd_slices_num,
        cmap_comments: raw.cmap_comments,
        blocks,
    };
    check_consistency(&doc, &metadata)?;
    debug!(
        atoms = doc.atoms_num(),
        residues = doc.residues_num(),
        blocks = doc.blocks.len(),
        "loaded topology"
    );
    Ok(doc)
}

pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Prmtop, PrmtopError> {
    let file = File::open(path)?;
    read_from(&mut BufReader::new(file))
}
