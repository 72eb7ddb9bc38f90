use super::formats::FormatKind;
use phf::{Map, phf_map};

/// The closed set of `%FLAG` names a prmtop file may contain.
///
/// The set is fixed by the file format, not extensible at runtime; a name
/// outside this enumeration marks an unsupported file variant and is treated
/// as a hard parse error. Twenty numbered CMAP parameter slots exist because
/// LEaP writes one flag per correction map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flag {
    Title,
    Pointers,
    // Per-atom data.
    AtomName,
    Charge,
    AtomicNumber,
    Mass,
    AmberAtomType,
    AtomTypeIndex,
    TreeChainClassification,
    Radii,
    Screen,
    Polarizability,
    DipoleDampFactor,
    // Legacy per-atom placeholders, defined to be all-zero.
    JoinArray,
    Irotat,
    // Legacy per-fftype placeholder, defined to be all-zero.
    Solty,
    // Residue and molecule grouping.
    ResidueLabel,
    ResiduePointer,
    SolventPointers,
    AtomsPerMolecule,
    CapInfo,
    CapInfo2,
    BoxDimensions,
    // Bonded terms and their parameter tables.
    BondsIncHydrogen,
    BondsWithoutHydrogen,
    BondForceConstant,
    BondEquilValue,
    AnglesIncHydrogen,
    AnglesWithoutHydrogen,
    AngleForceConstant,
    AngleEquilValue,
    DihedralsIncHydrogen,
    DihedralsWithoutHydrogen,
    DihedralForceConstant,
    DihedralPeriodicity,
    DihedralPhase,
    SceeScaleFactor,
    ScnbScaleFactor,
    // Nonbonded exclusions and Lennard-Jones tables.
    NumberExcludedAtoms,
    ExcludedAtomsList,
    NonbondedParmIndex,
    LennardJonesAcoef,
    LennardJonesBcoef,
    LennardJonesCcoef,
    LennardJonesDcoef,
    LennardJonesDvalue,
    // Legacy 10-12 hydrogen-bond tables, always empty in supported files.
    HbondAcoef,
    HbondBcoef,
    Hbcut,
    // Implicit solvent radius set label.
    RadiusSet,
    // Polarizable force-field marker, recomputed on write.
    Ipol,
    // CMAP correction terms.
    CmapCount,
    CmapResolution,
    CmapIndex,
    CmapParameter01,
    CmapParameter02,
    CmapParameter03,
    CmapParameter04,
    CmapParameter05,
    CmapParameter06,
    CmapParameter07,
    CmapParameter08,
    CmapParameter09,
    CmapParameter10,
    CmapParameter11,
    CmapParameter12,
    CmapParameter13,
    CmapParameter14,
    CmapParameter15,
    CmapParameter16,
    CmapParameter17,
    CmapParameter18,
    CmapParameter19,
    CmapParameter20,
}

static FLAGS_BY_NAME: Map<&'static str, Flag> = phf_map! {
    "TITLE" => Flag::Title,
    "POINTERS" => Flag::Pointers,
    "ATOM_NAME" => Flag::AtomName,
    "CHARGE" => Flag::Charge,
    "ATOMIC_NUMBER" => Flag::AtomicNumber,
    "MASS" => Flag::Mass,
    "AMBER_ATOM_TYPE" => Flag::AmberAtomType,
    "ATOM_TYPE_INDEX" => Flag::AtomTypeIndex,
    "TREE_CHAIN_CLASSIFICATION" => Flag::TreeChainClassification,
    "RADII" => Flag::Radii,
    "SCREEN" => Flag::Screen,
    "POLARIZABILITY" => Flag::Polarizability,
    "DIPOLE_DAMP_FACTOR" => Flag::DipoleDampFactor,
    "JOIN_ARRAY" => Flag::JoinArray,
    "IROTAT" => Flag::Irotat,
    "SOLTY" => Flag::Solty,
    "RESIDUE_LABEL" => Flag::ResidueLabel,
    "RESIDUE_POINTER" => Flag::ResiduePointer,
    "SOLVENT_POINTERS" => Flag::SolventPointers,
    "ATOMS_PER_MOLECULE" => Flag::AtomsPerMolecule,
    "CAP_INFO" => Flag::CapInfo,
    "CAP_INFO2" => Flag::CapInfo2,
    "BOX_DIMENSIONS" => Flag::BoxDimensions,
    "BONDS_INC_HYDROGEN" => Flag::BondsIncHydrogen,
    "BONDS_WITHOUT_HYDROGEN" => Flag::BondsWithoutHydrogen,
    "BOND_FORCE_CONSTANT" => Flag::BondForceConstant,
    "BOND_EQUIL_VALUE" => Flag::BondEquilValue,
    "ANGLES_INC_HYDROGEN" => Flag::AnglesIncHydrogen,
    "ANGLES_WITHOUT_HYDROGEN" => Flag::AnglesWithoutHydrogen,
    "ANGLE_FORCE_CONSTANT" => Flag::AngleForceConstant,
    "ANGLE_EQUIL_VALUE" => Flag::AngleEquilValue,
    "DIHEDRALS_INC_HYDROGEN" => Flag::DihedralsIncHydrogen,
    "DIHEDRALS_WITHOUT_HYDROGEN" => Flag::DihedralsWithoutHydrogen,
    "DIHEDRAL_FORCE_CONSTANT" => Flag::DihedralForceConstant,
    "DIHEDRAL_PERIODICITY" => Flag::DihedralPeriodicity,
    "DIHEDRAL_PHASE" => Flag::DihedralPhase,
    "SCEE_SCALE_FACTOR" => Flag::SceeScaleFactor,
    "SCNB_SCALE_FACTOR" => Flag::ScnbScaleFactor,
    "NUMBER_EXCLUDED_ATOMS" => Flag::NumberExcludedAtoms,
    "EXCLUDED_ATOMS_LIST" => Flag::ExcludedAtomsList,
    "NONBONDED_PARM_INDEX" => Flag::NonbondedParmIndex,
    "LENNARD_JONES_ACOEF" => Flag::LennardJonesAcoef,
    "LENNARD_JONES_BCOEF" => Flag::LennardJonesBcoef,
    "LENNARD_JONES_CCOEF" => Flag::LennardJonesCcoef,
    "LENNARD_JONES_DCOEF" => Flag::LennardJonesDcoef,
    "LENNARD_JONES_DVALUE" => Flag::LennardJonesDvalue,
    "HBOND_ACOEF" => Flag::HbondAcoef,
    "HBOND_BCOEF" => Flag::HbondBcoef,
    "HBCUT" => Flag::Hbcut,
    "RADIUS_SET" => Flag::RadiusSet,
    "IPOL" => Flag::Ipol,
    "CMAP_COUNT" => Flag::CmapCount,
    "CMAP_RESOLUTION" => Flag::CmapResolution,
    "CMAP_INDEX" => Flag::CmapIndex,
    "CMAP_PARAMETER_01" => Flag::CmapParameter01,
    "CMAP_PARAMETER_02" => Flag::CmapParameter02,
    "CMAP_PARAMETER_03" => Flag::CmapParameter03,
    "CMAP_PARAMETER_04" => Flag::CmapParameter04,
    "CMAP_PARAMETER_05" => Flag::CmapParameter05,
    "CMAP_PARAMETER_06" => Flag::CmapParameter06,
    "CMAP_PARAMETER_07" => Flag::CmapParameter07,
    "CMAP_PARAMETER_08" => Flag::CmapParameter08,
    "CMAP_PARAMETER_09" => Flag::CmapParameter09,
    "CMAP_PARAMETER_10" => Flag::CmapParameter10,
    "CMAP_PARAMETER_11" => Flag::CmapParameter11,
    "CMAP_PARAMETER_12" => Flag::CmapParameter12,
    "CMAP_PARAMETER_13" => Flag::CmapParameter13,
    "CMAP_PARAMETER_14" => Flag::CmapParameter14,
    "CMAP_PARAMETER_15" => Flag::CmapParameter15,
    "CMAP_PARAMETER_16" => Flag::CmapParameter16,
    "CMAP_PARAMETER_17" => Flag::CmapParameter17,
    "CMAP_PARAMETER_18" => Flag::CmapParameter18,
    "CMAP_PARAMETER_19" => Flag::CmapParameter19,
    "CMAP_PARAMETER_20" => Flag::CmapParameter20,
};

/// Canonical block order for writing, matching LEaP's layout. Optional
/// flags keep their slot here and are simply skipped when absent.
pub static WRITE_ORDER: &[Flag] = &[
    Flag::Title,
    Flag::Pointers,
    Flag::AtomName,
    Flag::Charge,
    Flag::AtomicNumber,
    Flag::Mass,
    Flag::AtomTypeIndex,
    Flag::NumberExcludedAtoms,
    Flag::NonbondedParmIndex,
    Flag::ResidueLabel,
    Flag::ResiduePointer,
    Flag::BondForceConstant,
    Flag::BondEquilValue,
    Flag::AngleForceConstant,
    Flag::AngleEquilValue,
    Flag::DihedralForceConstant,
    Flag::DihedralPeriodicity,
    Flag::DihedralPhase,
    Flag::SceeScaleFactor,
    Flag::ScnbScaleFactor,
    Flag::Solty,
    Flag::LennardJonesAcoef,
    Flag::LennardJonesBcoef,
    Flag::LennardJonesCcoef,
    Flag::LennardJonesDcoef,
    Flag::LennardJonesDvalue,
    Flag::BondsIncHydrogen,
    Flag::BondsWithoutHydrogen,
    Flag::AnglesIncHydrogen,
    Flag::AnglesWithoutHydrogen,
    Flag::DihedralsIncHydrogen,
    Flag::DihedralsWithoutHydrogen,
    Flag::ExcludedAtomsList,
    Flag::HbondAcoef,
    Flag::HbondBcoef,
    Flag::Hbcut,
    Flag::AmberAtomType,
    Flag::TreeChainClassification,
    Flag::JoinArray,
    Flag::Irotat,
    Flag::SolventPointers,
    Flag::AtomsPerMolecule,
    Flag::BoxDimensions,
    Flag::CapInfo,
    Flag::CapInfo2,
    Flag::RadiusSet,
    Flag::Radii,
    Flag::Screen,
    Flag::Polarizability,
    Flag::DipoleDampFactor,
    Flag::Ipol,
    Flag::CmapCount,
    Flag::CmapResolution,
    Flag::CmapParameter01,
    Flag::CmapParameter02,
    Flag::CmapParameter03,
    Flag::CmapParameter04,
    Flag::CmapParameter05,
    Flag::CmapParameter06,
    Flag::CmapParameter07,
    Flag::CmapParameter08,
    Flag::CmapParameter09,
    Flag::CmapParameter10,
    Flag::CmapParameter11,
    Flag::CmapParameter12,
    Flag::CmapParameter13,
    Flag::CmapParameter14,
    Flag::CmapParameter15,
    Flag::CmapParameter16,
    Flag::CmapParameter17,
    Flag::CmapParameter18,
    Flag::CmapParameter19,
    Flag::CmapParameter20,
    Flag::CmapIndex,
];

impl Flag {
    /// The on-disk `%FLAG` name.
    pub fn name(self) -> &'static str {
        match self {
            Flag::Title => "TITLE",
            Flag::Pointers => "POINTERS",
            Flag::AtomName => "ATOM_NAME",
            Flag::Charge => "CHARGE",
            Flag::AtomicNumber => "ATOMIC_NUMBER",
            Flag::Mass => "MASS",
            Flag::AmberAtomType => "AMBER_ATOM_TYPE",
            Flag::AtomTypeIndex => "ATOM_TYPE_INDEX",
            Flag::TreeChainClassification => "TREE_CHAIN_CLASSIFICATION",
            Flag::Radii => "RADII",
            Flag::Screen => "SCREEN",
            Flag::Polarizability => "POLARIZABILITY",
            Flag::DipoleDampFactor => "DIPOLE_DAMP_FACTOR",
            Flag::JoinArray => "JOIN_ARRAY",
            Flag::Irotat => "IROTAT",
            Flag::Solty => "SOLTY",
            Flag::ResidueLabel => "RESIDUE_LABEL",
            Flag::ResiduePointer => "RESIDUE_POINTER",
            Flag::SolventPointers => "SOLVENT_POINTERS",
            Flag::AtomsPerMolecule => "ATOMS_PER_MOLECULE",
            Flag::CapInfo => "CAP_INFO",
            Flag::CapInfo2 => "CAP_INFO2",
            Flag::BoxDimensions => "BOX_DIMENSIONS",
            Flag::BondsIncHydrogen => "BONDS_INC_HYDROGEN",
            Flag::BondsWithoutHydrogen => "BONDS_WITHOUT_HYDROGEN",
            Flag::BondForceConstant => "BOND_FORCE_CONSTANT",
            Flag::BondEquilValue => "BOND_EQUIL_VALUE",
            Flag::AnglesIncHydrogen => "ANGLES_INC_HYDROGEN",
            Flag::AnglesWithoutHydrogen => "ANGLES_WITHOUT_HYDROGEN",
            Flag::AngleForceConstant => "ANGLE_FORCE_CONSTANT",
            Flag::AngleEquilValue => "ANGLE_EQUIL_VALUE",
            Flag::DihedralsIncHydrogen => "DIHEDRALS_INC_HYDROGEN",
            Flag::DihedralsWithoutHydrogen => "DIHEDRALS_WITHOUT_HYDROGEN",
            Flag::DihedralForceConstant => "DIHEDRAL_FORCE_CONSTANT",
            Flag::DihedralPeriodicity => "DIHEDRAL_PERIODICITY",
            Flag::DihedralPhase => "DIHEDRAL_PHASE",
            Flag::SceeScaleFactor => "SCEE_SCALE_FACTOR",
            Flag::ScnbScaleFactor => "SCNB_SCALE_FACTOR",
            Flag::NumberExcludedAtoms => "NUMBER_EXCLUDED_ATOMS",
            Flag::ExcludedAtomsList => "EXCLUDED_ATOMS_LIST",
            Flag::NonbondedParmIndex => "NONBONDED_PARM_INDEX",
            Flag::LennardJonesAcoef => "LENNARD_JONES_ACOEF",
            Flag::LennardJonesBcoef => "LENNARD_JONES_BCOEF",
            Flag::LennardJonesCcoef => "LENNARD_JONES_CCOEF",
            Flag::LennardJonesDcoef => "LENNARD_JONES_DCOEF",
            Flag::LennardJonesDvalue => "LENNARD_JONES_DVALUE",
            Flag::HbondAcoef => "HBOND_ACOEF",
            Flag::HbondBcoef => "HBOND_BCOEF",
            Flag::Hbcut => "HBCUT",
            Flag::RadiusSet => "RADIUS_SET",
            Flag::Ipol => "IPOL",
            Flag::CmapCount => "CMAP_COUNT",
            Flag::CmapResolution => "CMAP_RESOLUTION",
            Flag::CmapIndex => "CMAP_INDEX",
            Flag::CmapParameter01 => "CMAP_PARAMETER_01",
            Flag::CmapParameter02 => "CMAP_PARAMETER_02",
            Flag::CmapParameter03 => "CMAP_PARAMETER_03",
            Flag::CmapParameter04 => "CMAP_PARAMETER_04",
            Flag::CmapParameter05 => "CMAP_PARAMETER_05",
            Flag::CmapParameter06 => "CMAP_PARAMETER_06",
            Flag::CmapParameter07 => "CMAP_PARAMETER_07",
            Flag::CmapParameter08 => "CMAP_PARAMETER_08",
            Flag::CmapParameter09 => "CMAP_PARAMETER_09",
            Flag::CmapParameter10 => "CMAP_PARAMETER_10",
            Flag::CmapParameter11 => "CMAP_PARAMETER_11",
            Flag::CmapParameter12 => "CMAP_PARAMETER_12",
            Flag::CmapParameter13 => "CMAP_PARAMETER_13",
            Flag::CmapParameter14 => "CMAP_PARAMETER_14",
            Flag::CmapParameter15 => "CMAP_PARAMETER_15",
            Flag::CmapParameter16 => "CMAP_PARAMETER_16",
            Flag::CmapParameter17 => "CMAP_PARAMETER_17",
            Flag::CmapParameter18 => "CMAP_PARAMETER_18",
            Flag::CmapParameter19 => "CMAP_PARAMETER_19",
            Flag::CmapParameter20 => "CMAP_PARAMETER_20",
        }
    }

    /// Resolves a `%FLAG` name against the closed set.
    pub fn from_name(name: &str) -> Option<Self> {
        FLAGS_BY_NAME.get(name).copied()
    }

    /// The single canonical on-disk format for this block.
    pub fn format(self) -> FormatKind {
        match self {
            Flag::Title | Flag::AtomName | Flag::AmberAtomType | Flag::ResidueLabel => {
                FormatKind::SmallStringArray
            }
            Flag::TreeChainClassification => FormatKind::SmallStringArray,
            Flag::RadiusSet => FormatKind::Sentence,
            Flag::Pointers
            | Flag::AtomicNumber
            | Flag::AtomTypeIndex
            | Flag::JoinArray
            | Flag::Irotat
            | Flag::ResiduePointer
            | Flag::AtomsPerMolecule
            | Flag::CapInfo
            | Flag::BondsIncHydrogen
            | Flag::BondsWithoutHydrogen
            | Flag::AnglesIncHydrogen
            | Flag::AnglesWithoutHydrogen
            | Flag::DihedralsIncHydrogen
            | Flag::DihedralsWithoutHydrogen
            | Flag::NumberExcludedAtoms
            | Flag::ExcludedAtomsList
            | Flag::NonbondedParmIndex => FormatKind::IntArray,
            Flag::Ipol => FormatKind::OneInteger,
            Flag::CmapCount => FormatKind::TwoIntegers,
            Flag::SolventPointers | Flag::LennardJonesDcoef => FormatKind::ThreeIntegers,
            Flag::CmapIndex => FormatKind::SixIntegers,
            Flag::CmapResolution => FormatKind::SmallIntArray,
            Flag::LennardJonesDvalue => FormatKind::OneFloat,
            Flag::Charge
            | Flag::Mass
            | Flag::Radii
            | Flag::Screen
            | Flag::Polarizability
            | Flag::DipoleDampFactor
            | Flag::Solty
            | Flag::BoxDimensions
            | Flag::CapInfo2
            | Flag::BondForceConstant
            | Flag::BondEquilValue
            | Flag::AngleForceConstant
            | Flag::AngleEquilValue
            | Flag::DihedralForceConstant
            | Flag::DihedralPeriodicity
            | Flag::DihedralPhase
            | Flag::SceeScaleFactor
            | Flag::ScnbScaleFactor
            | Flag::LennardJonesAcoef
            | Flag::LennardJonesBcoef
            | Flag::LennardJonesCcoef
            | Flag::HbondAcoef
            | Flag::HbondBcoef
            | Flag::Hbcut => FormatKind::FloatArray,
            _ => FormatKind::CmapFloatArray,
        }
    }

    /// Flags present only when a structural condition holds (polarizable
    /// force field, box, solvent cap, C4 terms, CMAP terms). Everything
    /// else is written unconditionally.
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            Flag::Polarizability
                | Flag::DipoleDampFactor
                | Flag::SolventPointers
                | Flag::AtomsPerMolecule
                | Flag::BoxDimensions
                | Flag::CapInfo
                | Flag::CapInfo2
                | Flag::LennardJonesCcoef
                | Flag::LennardJonesDcoef
                | Flag::LennardJonesDvalue
                | Flag::CmapCount
                | Flag::CmapResolution
                | Flag::CmapIndex
        ) || self.is_cmap_parameter()
    }

    /// One of the twenty numbered CMAP surface blocks, which may carry a
    /// free-text `%COMMENT` naming the residue the map applies to.
    pub fn is_cmap_parameter(self) -> bool {
        matches!(
            self,
            Flag::CmapParameter01
                | Flag::CmapParameter02
                | Flag::CmapParameter03
                | Flag::CmapParameter04
                | Flag::CmapParameter05
                | Flag::CmapParameter06
                | Flag::CmapParameter07
                | Flag::CmapParameter08
                | Flag::CmapParameter09
                | Flag::CmapParameter10
                | Flag::CmapParameter11
                | Flag::CmapParameter12
                | Flag::CmapParameter13
                | Flag::CmapParameter14
                | Flag::CmapParameter15
                | Flag::CmapParameter16
                | Flag::CmapParameter17
                | Flag::CmapParameter18
                | Flag::CmapParameter19
                | Flag::CmapParameter20
        )
    }

    /// Legacy 10-12 hydrogen-bond tables; empty in every supported file and
    /// re-synthesized as empty blocks on write.
    pub fn is_hbond(self) -> bool {
        matches!(self, Flag::HbondAcoef | Flag::HbondBcoef | Flag::Hbcut)
    }

    /// Placeholder arrays defined to be all-zero. Retained in no document;
    /// the writer rebuilds them from the atom and fftype counts.
    pub fn is_zero_placeholder(self) -> bool {
        matches!(self, Flag::Solty | Flag::JoinArray | Flag::Irotat)
    }

    /// Bonded-term blocks stored as tuple rows of the given width.
    pub fn term_row_width(self) -> Option<usize> {
        match self {
            Flag::BondsIncHydrogen | Flag::BondsWithoutHydrogen => Some(3),
            Flag::AnglesIncHydrogen | Flag::AnglesWithoutHydrogen => Some(4),
            Flag::DihedralsIncHydrogen | Flag::DihedralsWithoutHydrogen => Some(5),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::formats::ValueKind;

    #[test]
    fn every_flag_name_resolves_back_to_its_flag() {
        for &flag in WRITE_ORDER {
            assert_eq!(Flag::from_name(flag.name()), Some(flag));
        }
    }

    #[test]
    fn write_order_covers_the_whole_registry_once() {
        assert_eq!(WRITE_ORDER.len(), FLAGS_BY_NAME.len());
        let mut seen = std::collections::HashSet::new();
        for &flag in WRITE_ORDER {
            assert!(seen.insert(flag), "{} appears twice", flag.name());
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(Flag::from_name("PERT_BOND_ATOMS"), None);
        assert_eq!(Flag::from_name("pointers"), None);
    }

    #[test]
    fn cmap_parameter_blocks_use_the_cmap_float_format() {
        assert_eq!(
            Flag::CmapParameter01.format(),
            FormatKind::CmapFloatArray
        );
        assert_eq!(
            Flag::CmapParameter20.format(),
            FormatKind::CmapFloatArray
        );
        assert!(Flag::CmapParameter07.is_cmap_parameter());
        assert!(!Flag::CmapIndex.is_cmap_parameter());
    }

    #[test]
    fn legacy_placeholders_are_typed_like_their_on_disk_blocks() {
        assert_eq!(Flag::Solty.format().value_kind(), ValueKind::Float);
        assert_eq!(Flag::JoinArray.format().value_kind(), ValueKind::Int);
        assert_eq!(Flag::Irotat.format().value_kind(), ValueKind::Int);
    }

    #[test]
    fn bonded_term_row_widths() {
        assert_eq!(Flag::BondsIncHydrogen.term_row_width(), Some(3));
        assert_eq!(Flag::AnglesWithoutHydrogen.term_row_width(), Some(4));
        assert_eq!(Flag::DihedralsIncHydrogen.term_row_width(), Some(5));
        assert_eq!(Flag::NonbondedParmIndex.term_row_width(), None);
    }
}
