use serde::Serialize;
use thiserror::Error;

use super::kinds::{BoxKind, SolvCapKind};

/// Slots of the raw POINTERS record, by 0-based position.
const NATOM: usize = 0;
const NTYPES: usize = 1;
const NBONH: usize = 2;
const MBONA: usize = 3;
const NTHETH: usize = 4;
const MTHETA: usize = 5;
const NPHIH: usize = 6;
const MPHIA: usize = 7;
const NHPARM: usize = 8;
const NPARM: usize = 9;
const NNB: usize = 10;
const NRES: usize = 11;
const NBONA: usize = 12;
const NTHETA: usize = 13;
const NPHIA: usize = 14;
const NUMBND: usize = 15;
const NUMANG: usize = 16;
const NPTRA: usize = 17;
const NATYP: usize = 18;
const NPHB: usize = 19;
const PERT_FIRST: usize = 20;
const PERT_LAST: usize = 26;
const IFBOX: usize = 27;
const NMXRS: usize = 28;
const IFCAP: usize = 29;
const NUMEXTRA: usize = 30;
const NCOPY: usize = 31;

/// Structured failure raised while turning a raw POINTERS record into a
/// [`Metadata`] value. Construction fails closed: no summary is ever
/// produced from a record that violates an invariant or declares a
/// pre-modern file feature.
#[derive(Debug, Error, PartialEq)]
pub enum MetadataError {
    #[error("POINTERS block has {len} values, at least {NUMEXTRA} + 1 are required")]
    TooShort { len: usize },

    #[error("NHPARM is {value}, prmtops using NHPARM are not supported")]
    UnsupportedNhparm { value: i64 },

    #[error("ADDLES flag is {value}, prmtops created by addles are not supported")]
    UnsupportedAddles { value: i64 },

    #[error("{value} 10-12 hydrogen-bond types declared, HBOND terms are not supported")]
    UnsupportedHbondTerms { value: i64 },

    #[error("perturbation slot {index} is {value}, perturbation info is not supported")]
    UnsupportedPerturbation { index: usize, value: i64 },

    #[error(
        "{kind} constraint count is {constraint} but the without-hydrogen count is \
         {without_hydrogen}, constraints are not supported"
    )]
    UnsupportedConstraints {
        kind: &'static str,
        constraint: i64,
        without_hydrogen: i64,
    },

    #[error("atom count is {value}, must be >= 1")]
    AtomsNum { value: i64 },

    #[error("LJ index type count is {value}, must be >= 1")]
    LjTypesNum { value: i64 },

    #[error("atom fftype count is {value}, must be >= 1")]
    AtomFftypesNum { value: i64 },

    #[error("extra point count is {value}, must be >= 0")]
    ExtraPointsNum { value: i64 },

    #[error("residue count is {residues}, must be between 1 and the atom count {atoms}")]
    ResiduesNum { residues: i64, atoms: i64 },

    #[error(
        "max atoms per residue is {value}, must be between 1 and \
         atoms - (residues - 1) = {upper}"
    )]
    ResidueMaxLen { value: i64, upper: i64 },

    #[error("{kind} count {value} is negative")]
    NegativeTermCount { kind: &'static str, value: i64 },

    #[error("{terms} {kind} terms declared but the {kind} fftype count is zero")]
    TermsWithoutFftypes { kind: &'static str, terms: i64 },

    #[error("box kind code {code} is not recognized")]
    UnknownBoxCode { code: i64 },

    #[error("solvent cap code {code} is not recognized")]
    UnknownSolvCapCode { code: i64 },
}

/// Lightweight structural summary of a topology: the counts of the POINTERS
/// record plus the version/date header.
///
/// Much cheaper to obtain than the full document; since POINTERS sits near
/// the top of virtually every file, the fast path reads only a small prefix
/// of a potentially multi-megabyte topology.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub version: String,
    pub date_time: String,
    pub atoms_num: i64,
    pub lj_types_num: i64,
    pub bonds_with_hydrogen_num: i64,
    pub bonds_without_hydrogen_num: i64,
    pub angles_with_hydrogen_num: i64,
    pub angles_without_hydrogen_num: i64,
    pub dihedrals_with_hydrogen_num: i64,
    pub dihedrals_without_hydrogen_num: i64,
    pub excluded_atoms_num: i64,
    pub residues_num: i64,
    pub bond_fftypes_num: i64,
    pub angle_fftypes_num: i64,
    pub dihedral_fftypes_num: i64,
    pub atom_fftypes_num: i64,
    pub residue_max_len: i64,
    pub extra_points_num: i64,
    pub box_kind: BoxKind,
    pub solv_cap_kind: SolvCapKind,
    pub pimd_slices_num: Option<i64>,
}

impl Metadata {
    /// Builds the summary from a raw POINTERS record, enforcing every
    /// well-formedness invariant.
    pub fn from_pointers(
        pointers: &[i64],
        version: String,
        date_time: String,
    ) -> Result<Self, MetadataError> {
        if pointers.len() <= NUMEXTRA {
            return Err(MetadataError::TooShort {
                len: pointers.len(),
            });
        }

        // Legacy/unsupported feature slots first: their presence means the
        // whole file is a pre-modern variant, not just one bad count.
        if pointers[NHPARM] != 0 {
            return Err(MetadataError::UnsupportedNhparm {
                value: pointers[NHPARM],
            });
        }
        if pointers[NPARM] != 0 {
            return Err(MetadataError::UnsupportedAddles {
                value: pointers[NPARM],
            });
        }
        if pointers[NPHB] != 0 {
            return Err(MetadataError::UnsupportedHbondTerms {
                value: pointers[NPHB],
            });
        }
        for index in PERT_FIRST..=PERT_LAST {
            if pointers[index] != 0 {
                return Err(MetadataError::UnsupportedPerturbation {
                    index,
                    value: pointers[index],
                });
            }
        }
        for (kind, constraint, without_hydrogen) in [
            ("bond", pointers[NBONA], pointers[MBONA]),
            ("angle", pointers[NTHETA], pointers[MTHETA]),
            ("dihedral", pointers[NPHIA], pointers[MPHIA]),
        ] {
            if constraint != without_hydrogen {
                return Err(MetadataError::UnsupportedConstraints {
                    kind,
                    constraint,
                    without_hydrogen,
                });
            }
        }

        let atoms_num = pointers[NATOM];
        if atoms_num < 1 {
            return Err(MetadataError::AtomsNum { value: atoms_num });
        }
        if pointers[NTYPES] < 1 {
            return Err(MetadataError::LjTypesNum {
                value: pointers[NTYPES],
            });
        }
        if pointers[NATYP] < 1 {
            return Err(MetadataError::AtomFftypesNum {
                value: pointers[NATYP],
            });
        }
        if pointers[NUMEXTRA] < 0 {
            return Err(MetadataError::ExtraPointsNum {
                value: pointers[NUMEXTRA],
            });
        }

        let residues_num = pointers[NRES];
        if residues_num < 1 || residues_num > atoms_num {
            return Err(MetadataError::ResiduesNum {
                residues: residues_num,
                atoms: atoms_num,
            });
        }
        let residue_max_len = pointers[NMXRS];
        let upper = atoms_num - (residues_num - 1);
        if residue_max_len < 1 || residue_max_len > upper {
            return Err(MetadataError::ResidueMaxLen {
                value: residue_max_len,
                upper,
            });
        }

        for (kind, with_hydrogen, without_hydrogen, fftypes) in [
            ("bond", pointers[NBONH], pointers[MBONA], pointers[NUMBND]),
            ("angle", pointers[NTHETH], pointers[MTHETA], pointers[NUMANG]),
            ("dihedral", pointers[NPHIH], pointers[MPHIA], pointers[NPTRA]),
        ] {
            for value in [with_hydrogen, without_hydrogen, fftypes] {
                if value < 0 {
                    return Err(MetadataError::NegativeTermCount { kind, value });
                }
            }
            // A bonded term with no referenced parameter type is invalid.
            if with_hydrogen + without_hydrogen > 0 && fftypes == 0 {
                return Err(MetadataError::TermsWithoutFftypes {
                    kind,
                    terms: with_hydrogen + without_hydrogen,
                });
            }
        }

        let box_kind = BoxKind::from_code(pointers[IFBOX]).ok_or(
            MetadataError::UnknownBoxCode {
                code: pointers[IFBOX],
            },
        )?;
        let solv_cap_kind = SolvCapKind::from_code(pointers[IFCAP]).ok_or(
            MetadataError::UnknownSolvCapCode {
                code: pointers[IFCAP],
            },
        )?;

        Ok(Metadata {
            version,
            date_time,
            atoms_num,
            lj_types_num: pointers[NTYPES],
            bonds_with_hydrogen_num: pointers[NBONH],
            bonds_without_hydrogen_num: pointers[MBONA],
            angles_with_hydrogen_num: pointers[NTHETH],
            angles_without_hydrogen_num: pointers[MTHETA],
            dihedrals_with_hydrogen_num: pointers[NPHIH],
            dihedrals_without_hydrogen_num: pointers[MPHIA],
            excluded_atoms_num: pointers[NNB],
            residues_num,
            bond_fftypes_num: pointers[NUMBND],
            angle_fftypes_num: pointers[NUMANG],
            dihedral_fftypes_num: pointers[NPTRA],
            atom_fftypes_num: pointers[NATYP],
            residue_max_len,
            extra_points_num: pointers[NUMEXTRA],
            box_kind,
            solv_cap_kind,
            pimd_slices_num: pointers.get(NCOPY).copied(),
        })
    }

    pub fn has_box(&self) -> bool {
        self.box_kind != BoxKind::NoBox
    }

    pub fn has_solv_cap(&self) -> bool {
        self.solv_cap_kind != SolvCapKind::NoSolvCap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// POINTERS record of a water-trimer-like system: 7 atoms, 3 residues,
    /// parallelepiped box, no cap.
    const WATER_TRIMER: [i64; 31] = [
        7, 1, 2, 4, 2, 4, 2, 4, 0, 0, 10, 3, 4, 4, 4, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 4,
        0, 0,
    ];

    fn build(pointers: &[i64]) -> Result<Metadata, MetadataError> {
        Metadata::from_pointers(pointers, "V0001.000".to_string(), String::new())
    }

    #[test]
    fn water_trimer_record_is_summarized() {
        let meta = build(&WATER_TRIMER).unwrap();
        assert_eq!(meta.atoms_num, 7);
        assert_eq!(meta.residues_num, 3);
        assert_eq!(meta.box_kind, BoxKind::Parallelepiped);
        assert!(!meta.has_solv_cap());
        assert!(meta.has_box());
        assert_eq!(meta.bonds_with_hydrogen_num, 2);
        assert_eq!(meta.bonds_without_hydrogen_num, 4);
        assert_eq!(meta.pimd_slices_num, None);
    }

    #[test]
    fn pimd_slot_is_read_when_present() {
        let mut pointers = WATER_TRIMER.to_vec();
        pointers.push(8);
        assert_eq!(build(&pointers).unwrap().pimd_slices_num, Some(8));
    }

    #[test]
    fn more_residues_than_atoms_is_rejected() {
        let mut pointers = WATER_TRIMER;
        pointers[11] = 8;
        assert_eq!(
            build(&pointers),
            Err(MetadataError::ResiduesNum {
                residues: 8,
                atoms: 7
            })
        );
    }

    #[test]
    fn zero_atoms_is_rejected() {
        let mut pointers = WATER_TRIMER;
        pointers[0] = 0;
        assert_eq!(build(&pointers), Err(MetadataError::AtomsNum { value: 0 }));
    }

    #[test]
    fn max_residue_size_must_fit_the_partition() {
        // 7 atoms in 3 residues leaves at most 5 atoms for one residue.
        let mut pointers = WATER_TRIMER;
        pointers[28] = 6;
        assert_eq!(
            build(&pointers),
            Err(MetadataError::ResidueMaxLen { value: 6, upper: 5 })
        );
    }

    #[test]
    fn bonded_terms_without_fftypes_are_rejected() {
        let mut pointers = WATER_TRIMER;
        pointers[15] = 0; // bond fftype count
        assert_eq!(
            build(&pointers),
            Err(MetadataError::TermsWithoutFftypes {
                kind: "bond",
                terms: 6
            })
        );
    }

    #[test]
    fn legacy_feature_slots_are_hard_failures() {
        let mut nhparm = WATER_TRIMER;
        nhparm[8] = 1;
        assert_eq!(
            build(&nhparm),
            Err(MetadataError::UnsupportedNhparm { value: 1 })
        );

        let mut addles = WATER_TRIMER;
        addles[9] = 2;
        assert_eq!(
            build(&addles),
            Err(MetadataError::UnsupportedAddles { value: 2 })
        );

        let mut hbond = WATER_TRIMER;
        hbond[19] = 3;
        assert_eq!(
            build(&hbond),
            Err(MetadataError::UnsupportedHbondTerms { value: 3 })
        );

        let mut pert = WATER_TRIMER;
        pert[20] = 1;
        assert_eq!(
            build(&pert),
            Err(MetadataError::UnsupportedPerturbation { index: 20, value: 1 })
        );
    }

    #[test]
    fn mismatched_constraint_counts_are_hard_failures() {
        let mut pointers = WATER_TRIMER;
        pointers[12] = 3; // bond constraint count, without-H count is 4
        assert_eq!(
            build(&pointers),
            Err(MetadataError::UnsupportedConstraints {
                kind: "bond",
                constraint: 3,
                without_hydrogen: 4
            })
        );
    }

    #[test]
    fn truncated_records_are_rejected() {
        assert_eq!(
            build(&WATER_TRIMER[..20]),
            Err(MetadataError::TooShort { len: 20 })
        );
    }

    #[test]
    fn unknown_box_code_is_rejected() {
        let mut pointers = WATER_TRIMER;
        pointers[27] = 9;
        assert_eq!(build(&pointers), Err(MetadataError::UnknownBoxCode { code: 9 }));
    }
}
