//! End-to-end extraction from files on disk.

use std::fs;
use std::path::PathBuf;

use mxmeta_core::{
    CollectingSink, ImportError, ImportOptions, MetadataSink, MetadataTree, SourceFormat,
    import_file, import_into, load_document,
};
use tempfile::TempDir;

const ENTRY: &str = r"data_1ABC
_entry.id 1ABC
_struct.title 'Lysozyme at 100 K'
_struct_keywords.text 'HYDROLASE, LYSOZYME'
_exptl.method 'X-RAY DIFFRACTION'
_diffrn.id 1
_diffrn.ambient_temp 100
_diffrn_radiation_wavelength.id 1
_diffrn_radiation_wavelength.wavelength 0.9795
_diffrn_source.diffrn_id 1
_diffrn_source.source SYNCHROTRON
_diffrn_source.pdbx_synchrotron_site ESRF
_diffrn_source.pdbx_synchrotron_beamline ID23-1
_diffrn_detector.diffrn_id 1
_diffrn_detector.detector PIXEL
_diffrn_detector.type 'DECTRIS PILATUS 6M'
_symmetry.entry_id 1ABC
_symmetry.space_group_name_H-M 'P 43 21 2'
_symmetry.Int_Tables_number 96
_cell.entry_id 1ABC
_cell.length_a 78.900
_cell.length_b 78.900
_cell.length_c 37.100
_cell.angle_alpha 90.00
_cell.angle_beta 90.00
_cell.angle_gamma 90.00
loop_
_software.name
_software.classification
XDS     'data reduction'
AIMLESS 'data scaling'
PHASER  phasing
REFMAC  refinement
loop_
_reflns.pdbx_diffrn_id
_reflns.d_resolution_high
_reflns.d_resolution_low
_reflns.percent_possible_obs
1 1.800 50.00 99.1
2 2.100 50.00 98.0
loop_
_reflns_shell.pdbx_diffrn_id
_reflns_shell.d_res_high
_reflns_shell.d_res_low
_reflns_shell.percent_possible_all
_reflns_shell.Rmerge_I_obs
1 1.80 1.85 97.5 0.612
2 2.10 2.15 96.0 0.450
1 3.00 3.10 99.9 0.040
_refine.pdbx_refine_id 'X-RAY DIFFRACTION'
_refine.ls_d_res_high 1.80
_refine.ls_R_factor_R_free 0.215
loop_
_citation.id
_citation.title
_citation.year
primary 'Lysozyme revisited' 2020
1       'Older work'         1999
loop_
_citation_author.citation_id
_citation_author.name
primary 'Smith, J.'
primary 'Doe, A.'
1       'Other, B.'
loop_
_entity_poly.entity_id
_entity_poly.type
_entity_poly.pdbx_seq_one_letter_code_can
_entity_poly.pdbx_strand_id
1 'polypeptide(L)'
;KVFGRCELAAAMKRHGLDNY
RGYSLGNWVCAAKFESNFNT
;
A,B
";

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn mmcif_entry_renders_full_tree() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "1abc.cif", ENTRY);
    let tree = import_file(&path, &ImportOptions::default()).unwrap();
    assert_eq!(tree.source(), "1ABC");
    insta::assert_snapshot!(tree.to_string().trim_end(), @r"
    pdbId: 1ABC
    title: Lysozyme at 100 K
    keywords
      - HYDROLASE
      - LYSOZYME
    experimentMethod
      - X-RAY DIFFRACTION
    dataCollection
      wavelength: 0.9795
      temperature: 100
      sourceType: Synchrotron
      beamline: ID23-1
      synchrotronSite: ESRF
      detectorType: Pixel
      detectorModel: DECTRIS PILATUS 6M
    crystal
      spaceGroup: P 43 21 2
      spaceGroupNumber: 96
      unitCell
        a: 78.900
        b: 78.900
        c: 37.100
        alpha: 90.00
        beta: 90.00
        gamma: 90.00
    processingSoftware
      - XDS
      - Aimless
    phasingSoftware
      - Phaser
    refinementSoftware
      - REFMAC
    dataProcessing
      resolutionHigh: 1.800
      resolutionLow: 50.00
      completeness: 99.1
    highResolutionShell
      resolutionHigh: 1.80
      resolutionLow: 1.85
      completeness: 97.5
      rMerge: 0.612
    refinement
      method: X-RAY DIFFRACTION
      resolutionHigh: 1.80
      rFree: 0.215
    citation
      title: Lysozyme revisited
      year: 2020
    citationAuthors
      - Smith, J.
      - Doe, A.
    polymerEntity
      entityId: 1
      type: polypeptide(L)
      sequence: KVFGRCELAAAMKRHGLDNYRGYSLGNWVCAAKFESNFNT
      chains
        - A
        - B
    ");
}

#[test]
fn second_diffraction_set_selects_its_own_rows() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "1abc.cif", ENTRY);
    let options = ImportOptions::default()
        .with_diffraction_set("2")
        .with_citation("1");
    let tree = import_file(&path, &options).unwrap();

    let shell = tree.field("highResolutionShell").unwrap();
    insta::assert_json_snapshot!(shell, @r#"
    {
      "name": "highResolutionShell",
      "children": [
        {
          "name": "resolutionHigh",
          "value": "2.10"
        },
        {
          "name": "resolutionLow",
          "value": "2.15"
        },
        {
          "name": "completeness",
          "value": "96.0"
        },
        {
          "name": "rMerge",
          "value": "0.450"
        }
      ]
    }
    "#);
    assert_eq!(
        tree.field("dataProcessing")
            .and_then(|field| field.child_value("resolutionHigh")),
        Some("2.100")
    );
    assert_eq!(
        tree.field("citation").and_then(|field| field.child_value("year")),
        Some("1999")
    );
    assert_eq!(
        tree.field("citationAuthors").map(|field| field.listed_values()),
        Some(vec!["Other, B."])
    );
}

#[test]
fn unknown_set_yields_no_statistics() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "1abc.cif", ENTRY);
    let options = ImportOptions::default().with_diffraction_set("7");
    let tree = import_file(&path, &options).unwrap();
    assert!(tree.field("dataProcessing").is_none());
    assert!(tree.field("highResolutionShell").is_none());
    assert!(tree.field("pdbId").is_some());
}

#[test]
fn xds_log_feeds_the_same_catalog() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "CORRECT.LP",
        "\
 SPACE_GROUP_NUMBER=   96
 UNIT_CELL_CONSTANTS=    78.90    78.90    37.10  90.000  90.000  90.000
 DETECTOR=EIGER
 X-RAY_WAVELENGTH=  1.000000
  50.00   1.60
 SUBSET OF INTENSITY DATA WITH SIGNAL/NOISE >= -3.0 AS FUNCTION OF RESOLUTION
     3.20   9000  1500  1510  99.3%  2.9%  3.1%  8990  40.00  3.2%  99.9*  5  0.900  700
     1.80  22000  5200  5400  96.3% 60.0% 62.0% 21000   2.40 65.0%  72.4*  1  0.800 2100
    total  90000 15000 15300  98.0%  4.8%  5.0% 89000  18.30  5.2%  99.8*  3  0.850 8000
",
    );

    let tree = import_file(&path, &ImportOptions::default()).unwrap();
    assert_eq!(tree.source(), "XDS_CORRECT");
    let crystal = tree.field("crystal").unwrap();
    assert_eq!(crystal.child_value("spaceGroup"), Some("P 43 21 2"));
    let collection = tree.field("dataCollection").unwrap();
    assert_eq!(collection.child_value("detectorType"), Some("Pixel"));
    assert_eq!(collection.child_value("detectorModel"), Some("EIGER"));
    let shell = tree.field("highResolutionShell").unwrap();
    assert_eq!(shell.child_value("resolutionHigh"), Some("1.80"));
    assert_eq!(shell.child_value("ccHalf"), Some("0.724"));
    assert_eq!(
        tree.field("processingSoftware").map(|field| field.listed_values()),
        Some(vec!["XDS"])
    );
}

#[test]
fn cbf_header_with_forced_format() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "header.txt",
        "# Detector: PILATUS 6M, S/N 60-0100\n# Wavelength 0.97950 A\n# Detector_distance 0.15915 m\n",
    );
    let options = ImportOptions::default().with_format(SourceFormat::Cbf);
    let tree = import_file(&path, &options).unwrap();
    let collection = tree.field("dataCollection").unwrap();
    assert_eq!(collection.child_value("detectorDistance"), Some("159.15"));
    assert_eq!(collection.child_value("detectorType"), Some("Pixel"));
}

#[test]
fn corrupt_file_is_wrapped_with_its_name() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.cif", "data_x\nloop_\n_a.b\n_a.c\n1 2 3\n");
    let err = import_file(&path, &ImportOptions::default()).unwrap_err();
    let ImportError::Corrupt { source_name, .. } = &err else {
        panic!("expected corruption, got {err:?}");
    };
    assert!(source_name.ends_with("broken.cif"));
    assert!(load_document(&path, None).is_err());
}

#[test]
fn options_load_from_json() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "options.json", r#"{ "citation_selector": "1" }"#);
    let options = ImportOptions::load(&path).unwrap();
    assert_eq!(options.citation_selector, "1");
    assert!(options.active_set().is_default());

    let bad = write(&dir, "bad.json", "{ not json");
    assert!(matches!(
        ImportOptions::load(&bad),
        Err(ImportError::OptionsParse { .. })
    ));
}

struct FailingSink;

impl MetadataSink for FailingSink {
    fn publish(&mut self, _tree: &MetadataTree) -> anyhow::Result<()> {
        anyhow::bail!("disk full")
    }
}

#[test]
fn sink_receives_tree_and_failures_carry_context() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "1abc.cif", ENTRY);

    let mut sink = CollectingSink::new();
    let tree = import_into(&path, &ImportOptions::default(), &mut sink).unwrap();
    assert_eq!(sink.trees(), [tree]);
    assert!(sink.trees()[0].by_name().contains_key("crystal"));

    let err = import_into(&path, &ImportOptions::default(), &mut FailingSink).unwrap_err();
    assert!(err.to_string().starts_with("failed to publish metadata for"));
    assert_eq!(err.root_cause().to_string(), "disk full");
}
