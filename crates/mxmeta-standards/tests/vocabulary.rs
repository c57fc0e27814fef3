//! Tests for the shipped vocabulary tables.

use mxmeta_standards::{
    DETECTOR_TYPE, OTHER, SOFTWARE, SOURCE_TYPE, VocabularyKind, space_group_number,
};

#[test]
fn processing_software_lookup() {
    assert_eq!(SOFTWARE.canonicalize("AUTOPROCESS"), Some("Autoproc"));
    assert_eq!(SOFTWARE.canonicalize("FOOBAR123"), Some(OTHER));
    assert_eq!(SOFTWARE.canonicalize(" autoprocess "), Some("Autoproc"));
    assert_eq!(SOFTWARE.canonicalize(""), None);
}

#[test]
fn every_table_but_space_groups_falls_back_to_other() {
    for kind in VocabularyKind::ALL {
        let expected = (kind != VocabularyKind::SpaceGroup).then_some(OTHER);
        assert_eq!(kind.vocabulary().canonicalize("no such term"), expected, "{kind}");
    }
}

#[test]
fn canonical_software_terms_snapshot() {
    insta::assert_json_snapshot!(SOFTWARE.canonical_terms(), @r#"
    [
      "Aimless",
      "Autoproc",
      "BUSTER",
      "Coot",
      "DIALS",
      "HKL-2000",
      "MOLREP",
      "MOSFLM",
      "Other",
      "PDB_EXTRACT",
      "PHENIX",
      "Phaser",
      "Pointless",
      "REFMAC",
      "SCALA",
      "SHELX",
      "STARANISO",
      "TRUNCATE",
      "XDS",
      "XDSAPP",
      "XSCALE",
      "xia2"
    ]
    "#);
}

#[test]
fn source_and_detector_terms() {
    assert_eq!(
        SOURCE_TYPE.canonical_terms(),
        vec![
            "Free electron laser",
            "Liquid anode",
            "Other",
            "Rotating anode",
            "Sealed tube",
            "Synchrotron"
        ]
    );
    assert_eq!(
        DETECTOR_TYPE.canonical_terms(),
        vec!["CCD", "CMOS", "Image plate", "Other", "Pixel"]
    );
}

#[test]
fn space_group_symbols_resolve_to_numbers() {
    assert_eq!(space_group_number("P 43 21 2"), Some(96));
    assert_eq!(space_group_number("C2"), Some(5));
    assert_eq!(space_group_number("P 21/c"), None);
}
