use serde::{Deserialize, Serialize};

/// Simulation cell geometry, as encoded in the POINTERS box slot.
///
/// The integer codes follow the modern scheme (`rect-cuboid` is a distinct
/// code 3); files written against the older three-code scheme are not
/// supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxKind {
    #[default]
    NoBox,
    /// Arbitrary cell angles.
    Parallelepiped,
    TruncOctahedron,
    /// All cell angles are 90 degrees.
    RectCuboid,
}

impl BoxKind {
    pub fn code(self) -> i64 {
        match self {
            BoxKind::NoBox => 0,
            BoxKind::Parallelepiped => 1,
            BoxKind::TruncOctahedron => 2,
            BoxKind::RectCuboid => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(BoxKind::NoBox),
            1 => Some(BoxKind::Parallelepiped),
            2 => Some(BoxKind::TruncOctahedron),
            3 => Some(BoxKind::RectCuboid),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoxKind::NoBox => "no-box",
            BoxKind::Parallelepiped => "parallelepiped",
            BoxKind::TruncOctahedron => "trunc-octahedron",
            BoxKind::RectCuboid => "rect-cuboid",
        }
    }
}

/// Solvent cap geometry, as encoded in the POINTERS cap slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolvCapKind {
    #[default]
    NoSolvCap,
    Sphere,
}

impl SolvCapKind {
    pub fn code(self) -> i64 {
        match self {
            SolvCapKind::NoSolvCap => 0,
            SolvCapKind::Sphere => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(SolvCapKind::NoSolvCap),
            1 => Some(SolvCapKind::Sphere),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolvCapKind::NoSolvCap => "no-solv-cap",
            SolvCapKind::Sphere => "sphere",
        }
    }
}

/// Polarizable force-field marker written to the IPOL block.
///
/// Never trusted from a file; it is recomputed from which polarizability
/// blocks the document actually carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolarizableKind {
    #[default]
    NoPolarizable,
    Polarizable,
    PolarizableWithDipoleDamp,
}

impl PolarizableKind {
    pub fn code(self) -> i64 {
        match self {
            PolarizableKind::NoPolarizable => 0,
            PolarizableKind::Polarizable => 1,
            PolarizableKind::PolarizableWithDipoleDamp => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PolarizableKind::NoPolarizable => "no-polarizable",
            PolarizableKind::Polarizable => "polarizable",
            PolarizableKind::PolarizableWithDipoleDamp => "polarizable-with-dipole-damp",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_codes_round_trip() {
        for code in 0..4 {
            let kind = BoxKind::from_code(code).unwrap();
            assert_eq!(kind.code(), code);
        }
        assert_eq!(BoxKind::from_code(4), None);
        assert_eq!(BoxKind::from_code(-1), None);
    }

    #[test]
    fn parallelepiped_is_code_one() {
        assert_eq!(BoxKind::from_code(1), Some(BoxKind::Parallelepiped));
        assert_eq!(BoxKind::Parallelepiped.as_str(), "parallelepiped");
    }

    #[test]
    fn cap_codes_round_trip() {
        assert_eq!(SolvCapKind::from_code(0), Some(SolvCapKind::NoSolvCap));
        assert_eq!(SolvCapKind::from_code(1), Some(SolvCapKind::Sphere));
        assert_eq!(SolvCapKind::from_code(2), None);
    }

    #[test]
    fn polarizable_codes_are_stable() {
        assert_eq!(PolarizableKind::NoPolarizable.code(), 0);
        assert_eq!(PolarizableKind::Polarizable.code(), 1);
        assert_eq!(PolarizableKind::PolarizableWithDipoleDamp.code(), 2);
        assert_eq!(
            PolarizableKind::PolarizableWithDipoleDamp.as_str(),
            "polarizable-with-dipole-damp"
        );
    }
}
