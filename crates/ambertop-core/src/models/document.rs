use nalgebra::DMatrix;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use super::kinds::{BoxKind, PolarizableKind, SolvCapKind};
use crate::schema::Flag;

/// Atoms flagged as massless extra points carry this fftype label.
const EXTRA_POINT_FFTYPE: &str = "EP";

#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("block {} is missing from the document", .flag.name())]
    MissingBlock { flag: Flag },

    #[error("block {} does not hold the expected value kind", .flag.name())]
    WrongKind { flag: Flag },

    #[error(
        "molecule {molecule} declares {expected} atoms but the residue partition \
         accumulates {accumulated}"
    )]
    UnalignedMolecules {
        molecule: usize,
        expected: i64,
        accumulated: i64,
    },

    #[error("atomic number {znum} has no entry in the element table")]
    UnknownAtomicNumber { znum: u32 },

    #[error("cannot build a document from an empty atom list")]
    EmptyAtomList,
}

/// A named, homogeneously typed array from a prmtop file.
///
/// Bonded-term blocks are reshaped into tuple rows (`IntTable`) and the
/// nonbonded parameter index into a square matrix; everything else stays a
/// flat array. The writer flattens the shaped variants back to the on-disk
/// value sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Str(Vec<String>),
    /// Row-major tuples of fixed width: bonds (i, j, fftype), angles
    /// (i, j, k, fftype), dihedrals (i, j, k, l, fftype).
    IntTable { width: usize, values: Vec<i64> },
    /// Square LJ parameter lookup, indexed by a pair of LJ type indices.
    IntMatrix(DMatrix<i64>),
}

impl Block {
    /// Number of scalar values the block serializes to.
    pub fn value_count(&self) -> usize {
        match self {
            Block::Int(v) => v.len(),
            Block::Float(v) => v.len(),
            Block::Str(v) => v.len(),
            Block::IntTable { values, .. } => values.len(),
            Block::IntMatrix(m) => m.nrows() * m.ncols(),
        }
    }

    /// Number of logical rows: tuples for tables, scalars otherwise.
    pub fn row_count(&self) -> usize {
        match self {
            Block::IntTable { width, values } if *width > 0 => values.len() / width,
            other => other.value_count(),
        }
    }

    pub fn rows(&self) -> Option<impl Iterator<Item = &[i64]>> {
        match self {
            Block::IntTable { width, values } if *width > 0 => Some(values.chunks_exact(*width)),
            _ => None,
        }
    }
}

/// The full in-memory topology: title, header strings, geometry tags and
/// every stored block keyed by flag.
///
/// Counts are always derived from the blocks on access, never stored
/// redundantly, so mutations by callers (appending bonds, inflating
/// exclusion lists) are reflected in the next write automatically.
#[derive(Debug, Clone, PartialEq)]
pub struct Prmtop {
    pub name: String,
    pub version: String,
    pub date_time: String,
    pub box_kind: BoxKind,
    pub solv_cap_kind: SolvCapKind,
    pub pimd_slices_num: Option<i64>,
    pub cmap_comments: HashMap<Flag, String>,
    pub blocks: HashMap<Flag, Block>,
}

impl Prmtop {
    pub fn ints(&self, flag: Flag) -> Result<&[i64], DocumentError> {
        match self.blocks.get(&flag) {
            Some(Block::Int(values)) | Some(Block::IntTable { values, .. }) => Ok(values),
            Some(_) => Err(DocumentError::WrongKind { flag }),
            None => Err(DocumentError::MissingBlock { flag }),
        }
    }

    pub fn floats(&self, flag: Flag) -> Result<&[f64], DocumentError> {
        match self.blocks.get(&flag) {
            Some(Block::Float(values)) => Ok(values),
            Some(_) => Err(DocumentError::WrongKind { flag }),
            None => Err(DocumentError::MissingBlock { flag }),
        }
    }

    pub fn strs(&self, flag: Flag) -> Result<&[String], DocumentError> {
        match self.blocks.get(&flag) {
            Some(Block::Str(values)) => Ok(values),
            Some(_) => Err(DocumentError::WrongKind { flag }),
            None => Err(DocumentError::MissingBlock { flag }),
        }
    }

    fn row_count(&self, flag: Flag) -> usize {
        self.blocks.get(&flag).map_or(0, Block::row_count)
    }

    pub fn atoms_num(&self) -> usize {
        self.row_count(Flag::AtomName)
    }

    pub fn residues_num(&self) -> usize {
        self.row_count(Flag::ResidueLabel)
    }

    pub fn residue_labels(&self) -> &[String] {
        self.strs(Flag::ResidueLabel).unwrap_or(&[])
    }

    /// Atom count of each residue, from successive differences of the
    /// 1-indexed residue start array extended by the total atom count.
    pub fn residue_sizes(&self) -> Vec<i64> {
        let starts = match self.ints(Flag::ResiduePointer) {
            Ok(starts) => starts,
            Err(_) => return Vec::new(),
        };
        let atoms = self.atoms_num() as i64;
        starts
            .iter()
            .copied()
            .zip(starts.iter().copied().skip(1).chain([atoms + 1]))
            .map(|(start, next)| next - start)
            .collect()
    }

    pub fn residue_max_len(&self) -> i64 {
        self.residue_sizes().into_iter().max().unwrap_or(0)
    }

    pub fn excluded_atoms_num(&self) -> usize {
        self.row_count(Flag::ExcludedAtomsList)
    }

    pub fn bonds_with_hydrogen_num(&self) -> usize {
        self.row_count(Flag::BondsIncHydrogen)
    }

    pub fn bonds_without_hydrogen_num(&self) -> usize {
        self.row_count(Flag::BondsWithoutHydrogen)
    }

    pub fn bonds_num(&self) -> usize {
        self.bonds_with_hydrogen_num() + self.bonds_without_hydrogen_num()
    }

    pub fn bond_fftypes_num(&self) -> usize {
        self.row_count(Flag::BondForceConstant)
    }

    pub fn angles_with_hydrogen_num(&self) -> usize {
        self.row_count(Flag::AnglesIncHydrogen)
    }

    pub fn angles_without_hydrogen_num(&self) -> usize {
        self.row_count(Flag::AnglesWithoutHydrogen)
    }

    pub fn angles_num(&self) -> usize {
        self.angles_with_hydrogen_num() + self.angles_without_hydrogen_num()
    }

    pub fn angle_fftypes_num(&self) -> usize {
        self.row_count(Flag::AngleForceConstant)
    }

    pub fn dihedrals_with_hydrogen_num(&self) -> usize {
        self.row_count(Flag::DihedralsIncHydrogen)
    }

    pub fn dihedrals_without_hydrogen_num(&self) -> usize {
        self.row_count(Flag::DihedralsWithoutHydrogen)
    }

    pub fn dihedrals_num(&self) -> usize {
        self.dihedrals_with_hydrogen_num() + self.dihedrals_without_hydrogen_num()
    }

    pub fn dihedral_fftypes_num(&self) -> usize {
        self.row_count(Flag::DihedralForceConstant)
    }

    /// Side length of the square nonbonded parameter index matrix.
    pub fn lj_types_num(&self) -> usize {
        match self.blocks.get(&Flag::NonbondedParmIndex) {
            Some(Block::IntMatrix(matrix)) => matrix.nrows(),
            _ => 0,
        }
    }

    /// Number of distinct fftype labels, which fixes the SOLTY length.
    pub fn atom_fftypes_num(&self) -> usize {
        self.strs(Flag::AmberAtomType)
            .map(|types| {
                types
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<HashSet<_>>()
                    .len()
            })
            .unwrap_or(0)
    }

    pub fn extra_points_num(&self) -> usize {
        self.strs(Flag::AmberAtomType)
            .map(|types| {
                types
                    .iter()
                    .filter(|t| t.trim_end() == EXTRA_POINT_FFTYPE)
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn has_extra_points(&self) -> bool {
        self.extra_points_num() > 0
    }

    /// Inferred from which polarizability blocks are present; the IPOL
    /// value found in a file is never trusted.
    pub fn polarizable_kind(&self) -> PolarizableKind {
        if self.blocks.contains_key(&Flag::DipoleDampFactor) {
            PolarizableKind::PolarizableWithDipoleDamp
        } else if self.blocks.contains_key(&Flag::Polarizability) {
            PolarizableKind::Polarizable
        } else {
            PolarizableKind::NoPolarizable
        }
    }

    pub fn has_box(&self) -> bool {
        self.box_kind != BoxKind::NoBox
    }

    pub fn has_solv_cap(&self) -> bool {
        self.solv_cap_kind != SolvCapKind::NoSolvCap
    }

    pub fn has_c4_params(&self) -> bool {
        self.blocks.contains_key(&Flag::LennardJonesCcoef)
    }

    pub fn has_cmap_params(&self) -> bool {
        self.blocks.contains_key(&Flag::CmapCount)
    }

    /// Atom count of each molecule, when a molecule partition is present
    /// (box topologies only).
    pub fn molecule_atom_counts(&self) -> &[i64] {
        self.ints(Flag::AtomsPerMolecule).unwrap_or(&[])
    }

    /// Residue count of each molecule, derived by walking the residue
    /// sizes against the molecule atom counts.
    pub fn molecule_residue_counts(&self) -> Result<Vec<usize>, DocumentError> {
        let molecule_atoms = self.molecule_atom_counts();
        let residue_sizes = self.residue_sizes();
        let mut counts = Vec::with_capacity(molecule_atoms.len());
        let mut residues = residue_sizes.iter().copied();
        for (molecule, &expected) in molecule_atoms.iter().enumerate() {
            let mut accumulated = 0;
            let mut residue_count = 0;
            while accumulated < expected {
                match residues.next() {
                    Some(size) => {
                        accumulated += size;
                        residue_count += 1;
                    }
                    None => break,
                }
            }
            if accumulated != expected {
                return Err(DocumentError::UnalignedMolecules {
                    molecule,
                    expected,
                    accumulated,
                });
            }
            counts.push(residue_count);
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Block {
        Block::Str(names.iter().map(|n| format!("{:<4}", n)).collect())
    }

    fn three_waters() -> Prmtop {
        let mut blocks = HashMap::new();
        blocks.insert(
            Flag::AtomName,
            labels(&["O", "H1", "H2", "O", "H1", "H2", "O", "H1", "H2"]),
        );
        blocks.insert(
            Flag::AmberAtomType,
            labels(&["OW", "HW", "HW", "OW", "HW", "HW", "OW", "HW", "HW"]),
        );
        blocks.insert(Flag::ResidueLabel, labels(&["WAT", "WAT", "WAT"]));
        blocks.insert(Flag::ResiduePointer, Block::Int(vec![1, 4, 7]));
        blocks.insert(Flag::AtomsPerMolecule, Block::Int(vec![3, 3, 3]));
        blocks.insert(
            Flag::BondsIncHydrogen,
            Block::IntTable {
                width: 3,
                values: vec![0, 3, 1, 0, 6, 1, 9, 12, 1, 9, 15, 1, 18, 21, 1, 18, 24, 1],
            },
        );
        blocks.insert(
            Flag::NonbondedParmIndex,
            Block::IntMatrix(DMatrix::from_row_slice(2, 2, &[1, 2, 2, 3])),
        );
        Prmtop {
            name: "three waters".to_string(),
            version: "V0001.000".to_string(),
            date_time: String::new(),
            box_kind: BoxKind::Parallelepiped,
            solv_cap_kind: SolvCapKind::NoSolvCap,
            pimd_slices_num: None,
            cmap_comments: HashMap::new(),
            blocks,
        }
    }

    #[test]
    fn residue_sizes_come_from_pointer_differences() {
        let doc = three_waters();
        assert_eq!(doc.atoms_num(), 9);
        assert_eq!(doc.residues_num(), 3);
        assert_eq!(doc.residue_sizes(), vec![3, 3, 3]);
        assert_eq!(doc.residue_max_len(), 3);
    }

    #[test]
    fn bond_rows_are_counted_as_tuples() {
        let doc = three_waters();
        assert_eq!(doc.bonds_with_hydrogen_num(), 6);
        assert_eq!(doc.bonds_without_hydrogen_num(), 0);
        assert_eq!(doc.bonds_num(), 6);
        let block = &doc.blocks[&Flag::BondsIncHydrogen];
        let rows: Vec<&[i64]> = block.rows().unwrap().collect();
        assert_eq!(rows[0], &[0, 3, 1]);
        assert_eq!(rows.len(), 6);
    }

    #[test]
    fn lj_types_is_the_matrix_side() {
        assert_eq!(three_waters().lj_types_num(), 2);
    }

    #[test]
    fn fftype_count_is_distinct_labels() {
        assert_eq!(three_waters().atom_fftypes_num(), 2);
        assert_eq!(three_waters().extra_points_num(), 0);
    }

    #[test]
    fn extra_points_are_counted_by_fftype_label() {
        let mut doc = three_waters();
        doc.blocks
            .insert(Flag::AmberAtomType, labels(&["OW", "HW", "HW", "EP"]));
        assert_eq!(doc.extra_points_num(), 1);
        assert!(doc.has_extra_points());
    }

    #[test]
    fn molecule_partition_walks_residues() {
        let doc = three_waters();
        assert_eq!(doc.molecule_residue_counts().unwrap(), vec![1, 1, 1]);
    }

    #[test]
    fn unaligned_molecule_partition_is_an_error() {
        let mut doc = three_waters();
        doc.blocks
            .insert(Flag::AtomsPerMolecule, Block::Int(vec![4, 5]));
        assert_eq!(
            doc.molecule_residue_counts(),
            Err(DocumentError::UnalignedMolecules {
                molecule: 0,
                expected: 4,
                accumulated: 6
            })
        );
    }

    #[test]
    fn polarizable_kind_follows_block_presence() {
        let mut doc = three_waters();
        assert_eq!(doc.polarizable_kind(), PolarizableKind::NoPolarizable);
        doc.blocks
            .insert(Flag::Polarizability, Block::Float(vec![0.0; 9]));
        assert_eq!(doc.polarizable_kind(), PolarizableKind::Polarizable);
        doc.blocks
            .insert(Flag::DipoleDampFactor, Block::Float(vec![0.0; 9]));
        assert_eq!(
            doc.polarizable_kind(),
            PolarizableKind::PolarizableWithDipoleDamp
        );
    }
}
