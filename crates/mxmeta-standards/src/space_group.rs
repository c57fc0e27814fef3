//! The 65 Sohncke space groups admissible for chiral macromolecular crystals.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::vocabulary::Vocabulary;

/// International Tables number and full Hermann-Mauguin symbol.
const SPACE_GROUPS: &[(u16, &str)] = &[
    (1, "P 1"),
    (3, "P 1 2 1"),
    (4, "P 1 21 1"),
    (5, "C 1 2 1"),
    (16, "P 2 2 2"),
    (17, "P 2 2 21"),
    (18, "P 21 21 2"),
    (19, "P 21 21 21"),
    (20, "C 2 2 21"),
    (21, "C 2 2 2"),
    (22, "F 2 2 2"),
    (23, "I 2 2 2"),
    (24, "I 21 21 21"),
    (75, "P 4"),
    (76, "P 41"),
    (77, "P 42"),
    (78, "P 43"),
    (79, "I 4"),
    (80, "I 41"),
    (89, "P 4 2 2"),
    (90, "P 4 21 2"),
    (91, "P 41 2 2"),
    (92, "P 41 21 2"),
    (93, "P 42 2 2"),
    (94, "P 42 21 2"),
    (95, "P 43 2 2"),
    (96, "P 43 21 2"),
    (97, "I 4 2 2"),
    (98, "I 41 2 2"),
    (143, "P 3"),
    (144, "P 31"),
    (145, "P 32"),
    (146, "R 3"),
    (149, "P 3 1 2"),
    (150, "P 3 2 1"),
    (151, "P 31 1 2"),
    (152, "P 31 2 1"),
    (153, "P 32 1 2"),
    (154, "P 32 2 1"),
    (155, "R 3 2"),
    (168, "P 6"),
    (169, "P 61"),
    (170, "P 65"),
    (171, "P 62"),
    (172, "P 64"),
    (173, "P 63"),
    (177, "P 6 2 2"),
    (178, "P 61 2 2"),
    (179, "P 65 2 2"),
    (180, "P 62 2 2"),
    (181, "P 64 2 2"),
    (182, "P 63 2 2"),
    (195, "P 2 3"),
    (196, "F 2 3"),
    (197, "I 2 3"),
    (198, "P 21 3"),
    (199, "I 21 3"),
    (207, "P 4 3 2"),
    (208, "P 42 3 2"),
    (209, "F 4 3 2"),
    (210, "F 41 3 2"),
    (211, "I 4 3 2"),
    (212, "P 43 3 2"),
    (213, "P 41 3 2"),
    (214, "I 41 3 2"),
];

/// Short monoclinic and hexagonal-setting spellings.
const ALIASES: &[(&str, &str)] = &[
    ("P 2", "P 1 2 1"),
    ("P 21", "P 1 21 1"),
    ("C 2", "C 1 2 1"),
    ("I 1 2 1", "C 1 2 1"),
    ("I 2", "C 1 2 1"),
    ("H 3", "R 3"),
    ("H 3 2", "R 3 2"),
];

/// Symbol vocabulary without a fallback: unknown symbols stay unknown.
pub static SPACE_GROUP: LazyLock<Vocabulary> = LazyLock::new(|| {
    let pairs: Vec<_> = SPACE_GROUPS
        .iter()
        .map(|&(_, symbol)| (symbol, symbol))
        .chain(ALIASES.iter().copied())
        .collect();
    Vocabulary::new("space-group", &pairs)
});

static BY_NUMBER: LazyLock<HashMap<u16, &'static str>> =
    LazyLock::new(|| SPACE_GROUPS.iter().copied().collect());

static BY_SYMBOL: LazyLock<HashMap<&'static str, u16>> = LazyLock::new(|| {
    SPACE_GROUPS
        .iter()
        .map(|&(number, symbol)| (symbol, number))
        .collect()
});

/// Canonical symbol for a written symbol such as `"P212121"` or `"p 21 21 21"`.
pub fn canonical_symbol(symbol: &str) -> Option<&'static str> {
    SPACE_GROUP.lookup(symbol)
}

/// International Tables number for a written symbol.
pub fn space_group_number(symbol: &str) -> Option<u16> {
    canonical_symbol(symbol).and_then(|canonical| BY_SYMBOL.get(canonical).copied())
}

/// Canonical symbol for an International Tables number.
pub fn space_group_symbol(number: u16) -> Option<&'static str> {
    BY_NUMBER.get(&number).copied()
}

/// Canonical symbol for a number written as text, e.g. `"19"`.
pub fn symbol_for_number_text(number: &str) -> Option<&'static str> {
    number.trim().parse::<u16>().ok().and_then(space_group_symbol)
}
