use phf::{Set, phf_set};

/// Symbol used for sites that do not correspond to any chemical element.
pub const UNKNOWN_ELEMENT: &str = "X";

/// Canonical element symbols, `H` through `Og`, plus the [`UNKNOWN_ELEMENT`] sentinel.
pub static CHEMICAL_SYMBOLS: Set<&'static str> = phf_set! {
    "X",
    "H", "He",
    "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar",
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe",
    "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy",
    "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt",
    "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
    "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf",
    "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds",
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
};

/// Returns `true` if `symbol` is a canonical element symbol (case-sensitive).
pub fn is_chemical_symbol(symbol: &str) -> bool {
    CHEMICAL_SYMBOLS.contains(symbol)
}

/// Looks up the static canonical spelling of `symbol`, if it is one.
pub fn canonical_symbol(symbol: &str) -> Option<&'static str> {
    CHEMICAL_SYMBOLS.get_key(symbol).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_contains_every_element_and_the_sentinel() {
        assert_eq!(CHEMICAL_SYMBOLS.len(), 119);
        assert!(is_chemical_symbol(UNKNOWN_ELEMENT));
    }

    #[test]
    fn is_chemical_symbol_recognizes_one_and_two_letter_symbols() {
        assert!(is_chemical_symbol("H"));
        assert!(is_chemical_symbol("Na"));
        assert!(is_chemical_symbol("Og"));
    }

    #[test]
    fn is_chemical_symbol_is_case_sensitive() {
        assert!(!is_chemical_symbol("NA"));
        assert!(!is_chemical_symbol("na"));
        assert!(!is_chemical_symbol("h"));
    }

    #[test]
    fn is_chemical_symbol_rejects_labels_and_empty_strings() {
        assert!(!is_chemical_symbol(""));
        assert!(!is_chemical_symbol("OW"));
        assert!(!is_chemical_symbol("H2"));
    }

    #[test]
    fn canonical_symbol_returns_static_spelling() {
        assert_eq!(canonical_symbol("Fe"), Some("Fe"));
        assert_eq!(canonical_symbol("Fe1"), None);
    }
}
