use std::collections::HashMap;

use nalgebra::DMatrix;
use time::OffsetDateTime;
use time::macros::format_description;

use super::document::{Block, DocumentError, Prmtop};
use super::elements;
use super::kinds::{BoxKind, SolvCapKind};
use crate::schema::Flag;

const DEFAULT_VERSION: &str = "V0001.000";
const DEFAULT_RADIUS_SET: &str = "modified Bondi radii (mbondi)";

/// Timestamp in the layout version stamps use, e.g. `04/16/20  21:33:46`.
pub fn creation_stamp() -> String {
    let stamp = format_description!("[month]/[day]/[year repr:last_two]  [hour]:[minute]:[second]");
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(stamp).unwrap_or_default()
}

impl Prmtop {
    /// Builds a minimal yet well-formed topology from bare atomic numbers.
    ///
    /// Each atom becomes its own single-atom residue named and typed after
    /// its element symbol, with zero charge, tabulated mass, no bonded
    /// terms and a single zeroed Lennard-Jones type shared by all atoms.
    /// The result round-trips through the writer and satisfies every
    /// header constraint the loader enforces.
    pub fn dummy_from_atomic_numbers(
        name: &str,
        atomic_numbers: &[u32],
    ) -> Result<Self, DocumentError> {
        if atomic_numbers.is_empty() {
            return Err(DocumentError::EmptyAtomList);
        }
        let n = atomic_numbers.len();

        let mut symbols = Vec::with_capacity(n);
        let mut masses = Vec::with_capacity(n);
        for &znum in atomic_numbers {
            let element =
                elements::lookup(znum).ok_or(DocumentError::UnknownAtomicNumber { znum })?;
            symbols.push(format!("{:<4}", element.symbol));
            masses.push(element.mass);
        }

        let mut blocks = HashMap::new();
        blocks.insert(Flag::AtomName, Block::Str(symbols.clone()));
        blocks.insert(Flag::Charge, Block::Float(vec![0.0; n]));
        blocks.insert(
            Flag::AtomicNumber,
            Block::Int(atomic_numbers.iter().map(|&z| i64::from(z)).collect()),
        );
        blocks.insert(Flag::Mass, Block::Float(masses));
        blocks.insert(Flag::AtomTypeIndex, Block::Int(vec![1; n]));
        blocks.insert(Flag::NumberExcludedAtoms, Block::Int(vec![1; n]));
        blocks.insert(Flag::ExcludedAtomsList, Block::Int(vec![0; n]));
        blocks.insert(
            Flag::NonbondedParmIndex,
            Block::IntMatrix(DMatrix::from_element(1, 1, 1)),
        );
        blocks.insert(Flag::ResidueLabel, Block::Str(symbols.clone()));
        blocks.insert(
            Flag::ResiduePointer,
            Block::Int((1..=n as i64).collect()),
        );
        for flag in [
            Flag::BondForceConstant,
            Flag::BondEquilValue,
            Flag::AngleForceConstant,
            Flag::AngleEquilValue,
            Flag::DihedralForceConstant,
            Flag::DihedralPeriodicity,
            Flag::DihedralPhase,
        ] {
            blocks.insert(flag, Block::Float(vec![0.0]));
        }
        blocks.insert(Flag::SceeScaleFactor, Block::Float(vec![1.2]));
        blocks.insert(Flag::ScnbScaleFactor, Block::Float(vec![2.0]));
        blocks.insert(Flag::LennardJonesAcoef, Block::Float(vec![0.0]));
        blocks.insert(Flag::LennardJonesBcoef, Block::Float(vec![0.0]));
        for (flag, width) in [
            (Flag::BondsIncHydrogen, 3),
            (Flag::BondsWithoutHydrogen, 3),
            (Flag::AnglesIncHydrogen, 4),
            (Flag::AnglesWithoutHydrogen, 4),
            (Flag::DihedralsIncHydrogen, 5),
            (Flag::DihedralsWithoutHydrogen, 5),
        ] {
            blocks.insert(flag, Block::IntTable { width, values: Vec::new() });
        }
        blocks.insert(Flag::AmberAtomType, Block::Str(symbols));
        blocks.insert(
            Flag::TreeChainClassification,
            Block::Str(vec!["M   ".to_string(); n]),
        );
        blocks.insert(
            Flag::RadiusSet,
            Block::Str(vec![DEFAULT_RADIUS_SET.to_string()]),
        );
        blocks.insert(Flag::Radii, Block::Float(vec![0.0; n]));
        blocks.insert(Flag::Screen, Block::Float(vec![0.0; n]));

        Ok(Prmtop {
            name: name.to_string(),
            version: DEFAULT_VERSION.to_string(),
            date_time: creation_stamp(),
            box_kind: BoxKind::NoBox,
            solv_cap_kind: SolvCapKind::NoSolvCap,
            pimd_slices_num: None,
            cmap_comments: HashMap::new(),
            blocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy_document_derives_consistent_counts() {
        let doc = Prmtop::dummy_from_atomic_numbers("dummy", &[8, 1, 1]).unwrap();
        assert_eq!(doc.atoms_num(), 3);
        assert_eq!(doc.residues_num(), 3);
        assert_eq!(doc.residue_sizes(), vec![1, 1, 1]);
        assert_eq!(doc.lj_types_num(), 1);
        assert_eq!(doc.atom_fftypes_num(), 2);
        assert_eq!(doc.bonds_num(), 0);
        assert!(!doc.has_box());
        assert!(!doc.has_solv_cap());
    }

    #[test]
    fn dummy_document_names_atoms_after_elements() {
        let doc = Prmtop::dummy_from_atomic_numbers("dummy", &[6, 17]).unwrap();
        assert_eq!(doc.strs(Flag::AtomName).unwrap(), &["C   ", "Cl  "]);
        let masses = doc.floats(Flag::Mass).unwrap();
        assert!((masses[0] - 12.011).abs() < 1e-6);
    }

    #[test]
    fn unknown_atomic_number_is_rejected() {
        assert_eq!(
            Prmtop::dummy_from_atomic_numbers("dummy", &[999]),
            Err(DocumentError::UnknownAtomicNumber { znum: 999 })
        );
    }

    #[test]
    fn empty_atom_list_is_rejected() {
        assert_eq!(
            Prmtop::dummy_from_atomic_numbers("dummy", &[]),
            Err(DocumentError::EmptyAtomList)
        );
    }
}
