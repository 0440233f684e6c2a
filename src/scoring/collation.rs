use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::config::Collation;

const COMBINING_TILDE: char = '\u{0303}';

/// Primary-strength sort key: case and accents are ignored.
///
/// Each position holds the lowercase base letter and whether it is a Spanish `ñ`,
/// so `ñ` lands between `n` and `o` under [`Collation::Spanish`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey(Vec<(char, bool)>);

pub fn collation_key(name: &str, collation: Collation) -> CollationKey {
    let mut key: Vec<(char, bool)> = Vec::with_capacity(name.len());

    for c in name.nfd() {
        if is_combining_mark(c) {
            if c == COMBINING_TILDE && collation == Collation::Spanish {
                if let Some(last) = key.last_mut().filter(|(base, _)| *base == 'n') {
                    last.1 = true;
                }
            }
            continue;
        }
        key.extend(c.to_lowercase().map(|lower| (lower, false)));
    }

    CollationKey(key)
}

pub fn compare_names(a: &str, b: &str, collation: Collation) -> Ordering {
    collation_key(a, collation).cmp(&collation_key(b, collation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert_eq!(compare_names("alpha", "ALPHA", Collation::Spanish), Ordering::Equal);
        assert_eq!(compare_names("alpha", "Beta", Collation::Spanish), Ordering::Less);
        // plain byte order would put "Beta" before "alpha"
        assert!("Beta" < "alpha");
    }

    #[test]
    fn test_accents_ignored() {
        assert_eq!(compare_names("Águilas", "aguilas", Collation::Spanish), Ordering::Equal);
        assert_eq!(compare_names("Éxodo", "Exploradores", Collation::Spanish), Ordering::Less);
    }

    #[test]
    fn test_enye_sorts_after_n() {
        assert_eq!(compare_names("Ñandúes", "Nutrias", Collation::Spanish), Ordering::Greater);
        assert_eq!(compare_names("Ñandúes", "Osos", Collation::Spanish), Ordering::Less);
    }

    #[test]
    fn test_root_collation_folds_enye() {
        assert_eq!(compare_names("Ñandúes", "Nutrias", Collation::Root), Ordering::Less);
        assert_eq!(compare_names("Ñu", "nu", Collation::Root), Ordering::Equal);
    }
}
