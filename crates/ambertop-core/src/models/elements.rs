use phf::{Map, phf_map};

/// Symbol and standard atomic mass for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub symbol: &'static str,
    pub mass: f64,
}

/// Elements indexed by atomic number. Covers the range that appears in
/// biomolecular force fields plus the common heavier halides.
#[rustfmt::skip]
pub static ELEMENTS: Map<u32, Element> = phf_map! {
    1u32 => Element { symbol: "H", mass: 1.008 },
    2u32 => Element { symbol: "He", mass: 4.0026 },
    3u32 => Element { symbol: "Li", mass: 6.94 },
    4u32 => Element { symbol: "Be", mass: 9.0122 },
    5u32 => Element { symbol: "B", mass: 10.81 },
    6u32 => Element { symbol: "C", mass: 12.011 },
    7u32 => Element { symbol: "N", mass: 14.007 },
    8u32 => Element { symbol: "O", mass: 15.999 },
    9u32 => Element { symbol: "F", mass: 18.998 },
    10u32 => Element { symbol: "Ne", mass: 20.180 },
    11u32 => Element { symbol: "Na", mass: 22.990 },
    12u32 => Element { symbol: "Mg", mass: 24.305 },
    13u32 => Element { symbol: "Al", mass: 26.982 },
    14u32 => Element { symbol: "Si", mass: 28.085 },
    15u32 => Element { symbol: "P", mass: 30.974 },
    16u32 => Element { symbol: "S", mass: 32.06 },
    17u32 => Element { symbol: "Cl", mass: 35.45 },
    18u32 => Element { symbol: "Ar", mass: 39.948 },
    19u32 => Element { symbol: "K", mass: 39.098 },
    20u32 => Element { symbol: "Ca", mass: 40.078 },
    21u32 => Element { symbol: "Sc", mass: 44.956 },
    22u32 => Element { symbol: "Ti", mass: 47.867 },
    23u32 => Element { symbol: "V", mass: 50.942 },
    24u32 => Element { symbol: "Cr", mass: 51.996 },
    25u32 => Element { symbol: "Mn", mass: 54.938 },
    26u32 => Element { symbol: "Fe", mass: 55.845 },
    27u32 => Element { symbol: "Co", mass: 58.933 },
    28u32 => Element { symbol: "Ni", mass: 58.693 },
    29u32 => Element { symbol: "Cu", mass: 63.546 },
    30u32 => Element { symbol: "Zn", mass: 65.38 },
    31u32 => Element { symbol: "Ga", mass: 69.723 },
    32u32 => Element { symbol: "Ge", mass: 72.630 },
    33u32 => Element { symbol: "As", mass: 74.922 },
    34u32 => Element { symbol: "Se", mass: 78.971 },
    35u32 => Element { symbol: "Br", mass: 79.904 },
    36u32 => Element { symbol: "Kr", mass: 83.798 },
    53u32 => Element { symbol: "I", mass: 126.90 },
    55u32 => Element { symbol: "Cs", mass: 132.91 },
};

pub fn lookup(atomic_number: u32) -> Option<&'static Element> {
    ELEMENTS.get(&atomic_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_organics_are_present() {
        assert_eq!(lookup(1).map(|e| e.symbol), Some("H"));
        assert_eq!(lookup(6).map(|e| e.symbol), Some("C"));
        assert_eq!(lookup(8).map(|e| e.symbol), Some("O"));
        assert!((lookup(6).map(|e| e.mass).unwrap_or_default() - 12.011).abs() < 1e-9);
    }

    #[test]
    fn out_of_table_atomic_numbers_are_absent() {
        assert!(lookup(0).is_none());
        assert!(lookup(42).is_none());
        assert!(lookup(200).is_none());
    }
}
