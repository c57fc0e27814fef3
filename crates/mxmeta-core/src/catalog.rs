//! The mmCIF mapping catalog.
//!
//! Each entry names the categories it reads and the mapping tree applied to
//! them. Scanner profiles emit the same `category.item` names as mmCIF, so
//! one catalog serves every source format.

use mxmeta_map::{CategoryGenerator, FieldMapper, Transform, ValueFilter};
use mxmeta_model::{Document, IndexValue};
use mxmeta_standards::{DETECTOR_TYPE, SOFTWARE, SOURCE_TYPE, SPACE_GROUP};

use crate::options::ImportOptions;
use crate::selection::{reflns_selector, shell_selector, target_resolution};

/// `software.classification` values reported as processing software.
pub const PROCESSING_CLASSIFICATIONS: [&str; 4] = [
    "data reduction",
    "data scaling",
    "data processing",
    "data collection",
];

/// Categories an entry reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    Single(&'static str),
    /// Merged into one view, columns prefixed with their category name.
    Merged(&'static [&'static str]),
}

impl CategorySource {
    pub fn categories(&self) -> &[&'static str] {
        match self {
            CategorySource::Single(name) => std::slice::from_ref(name),
            CategorySource::Merged(names) => names,
        }
    }
}

/// One catalog entry: a category source and the tree mapped over it.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub source: CategorySource,
    pub mapper: FieldMapper,
    /// Narrows merged data-collection categories to one diffraction set.
    pub set: Option<IndexValue>,
}

impl CatalogEntry {
    pub fn single(category: &'static str, mapper: FieldMapper) -> Self {
        Self {
            source: CategorySource::Single(category),
            mapper,
            set: None,
        }
    }

    pub fn merged(categories: &'static [&'static str], mapper: FieldMapper) -> Self {
        Self {
            source: CategorySource::Merged(categories),
            mapper,
            set: None,
        }
    }

    #[must_use]
    pub fn for_set(mut self, set: IndexValue) -> Self {
        self.set = Some(set);
        self
    }
}

const DATA_COLLECTION: &[&str] = &[
    "diffrn_radiation_wavelength",
    "diffrn",
    "diffrn_source",
    "diffrn_detector",
    "diffrn_measurement",
    "diffrn_scan",
    "diffrn_scan_axis",
];

const CRYSTAL: &[&str] = &["symmetry", "cell"];

/// Builds the catalog for `document`.
///
/// The high-resolution shell selector depends on the overall resolution of
/// the active diffraction set, which is read from `document` up front.
pub fn mmcif_catalog(document: &Document, options: &ImportOptions) -> Vec<CatalogEntry> {
    let set = options.active_set();
    let target = target_resolution(document.category("reflns"), &set);

    vec![
        CatalogEntry::single("entry", FieldMapper::basic("pdbId", "id")),
        CatalogEntry::single("struct", FieldMapper::basic("title", "title")),
        CatalogEntry::single(
            "struct_keywords",
            FieldMapper::nested(
                "keywords",
                vec![FieldMapper::value_only(
                    "text",
                    Transform::split_list(","),
                )],
            ),
        ),
        CatalogEntry::single(
            "pdbx_database_status",
            FieldMapper::basic("depositionDate", "recvd_initial_deposition_date"),
        ),
        CatalogEntry::single(
            "exptl",
            FieldMapper::nested(
                "experimentMethod",
                vec![FieldMapper::value_only("method", Transform::identity())],
            ),
        ),
        CatalogEntry::merged(DATA_COLLECTION, data_collection()).for_set(set.clone()),
        CatalogEntry::merged(CRYSTAL, crystal()),
        CatalogEntry::single("exptl_crystal_grow", crystallization()),
        CatalogEntry::single(
            "software",
            software("processingSoftware", PROCESSING_CLASSIFICATIONS.to_vec()),
        ),
        CatalogEntry::single("software", software("phasingSoftware", vec!["phasing"])),
        CatalogEntry::single(
            "software",
            software("refinementSoftware", vec!["refinement"]),
        ),
        CatalogEntry::single(
            "reflns",
            FieldMapper::filtered(
                CategoryGenerator::Select(reflns_selector(set.clone())),
                vec![data_processing()],
            ),
        ),
        CatalogEntry::single(
            "reflns_shell",
            FieldMapper::filtered(
                CategoryGenerator::Select(shell_selector(target, set)),
                vec![high_resolution_shell()],
            ),
        ),
        CatalogEntry::single("refine", refinement()),
        CatalogEntry::single("citation", citation(&options.citation_selector)),
        CatalogEntry::single(
            "citation_author",
            FieldMapper::filtered(
                CategoryGenerator::where_eq("citation_id", options.citation_selector.as_str()),
                vec![FieldMapper::nested(
                    "citationAuthors",
                    vec![FieldMapper::value_only("name", Transform::identity())],
                )],
            ),
        ),
        CatalogEntry::single("entity_poly", polymer_entity()),
    ]
}

fn data_collection() -> FieldMapper {
    FieldMapper::filtered(
        CategoryGenerator::Flatten,
        vec![FieldMapper::nested(
            "dataCollection",
            vec![
                FieldMapper::basic("wavelength", "diffrn_radiation_wavelength_wavelength")
                    .with_filter(ValueFilter::numeric_range(0.0, 10.0)),
                FieldMapper::basic("temperature", "diffrn_ambient_temp"),
                FieldMapper::basic("sourceType", "diffrn_source_source")
                    .with_transform(Transform::vocabulary(&SOURCE_TYPE)),
                FieldMapper::basic("beamline", "diffrn_source_pdbx_synchrotron_beamline"),
                FieldMapper::basic("synchrotronSite", "diffrn_source_pdbx_synchrotron_site"),
                FieldMapper::basic("detectorType", "diffrn_detector_detector")
                    .with_transform(Transform::vocabulary(&DETECTOR_TYPE)),
                FieldMapper::basic("detectorModel", "diffrn_detector_type"),
                FieldMapper::basic(
                    "detectorDistance",
                    "diffrn_measurement_sample_detector_distance",
                ),
                FieldMapper::basic("oscillationRange", "diffrn_scan_axis_angle_increment"),
                FieldMapper::basic("exposureTime", "diffrn_scan_integration_time"),
                FieldMapper::basic("collectionDate", "diffrn_detector_pdbx_collection_date"),
            ],
        )],
    )
}

fn crystal() -> FieldMapper {
    FieldMapper::filtered(
        CategoryGenerator::Flatten,
        vec![FieldMapper::nested(
            "crystal",
            vec![
                FieldMapper::basic("spaceGroup", "symmetry_space_group_name_H-M")
                    .with_transform(Transform::vocabulary_or_raw(&SPACE_GROUP)),
                FieldMapper::basic("spaceGroupNumber", "symmetry_Int_Tables_number"),
                FieldMapper::nested(
                    "unitCell",
                    vec![
                        FieldMapper::basic("a", "cell_length_a"),
                        FieldMapper::basic("b", "cell_length_b"),
                        FieldMapper::basic("c", "cell_length_c"),
                        FieldMapper::basic("alpha", "cell_angle_alpha"),
                        FieldMapper::basic("beta", "cell_angle_beta"),
                        FieldMapper::basic("gamma", "cell_angle_gamma"),
                    ],
                ),
            ],
        )],
    )
}

fn crystallization() -> FieldMapper {
    FieldMapper::filtered(
        CategoryGenerator::Flatten,
        vec![FieldMapper::nested(
            "crystallization",
            vec![
                FieldMapper::basic("method", "method"),
                FieldMapper::basic("pH", "pH").with_filter(ValueFilter::numeric_range(0.0, 14.0)),
                FieldMapper::basic("temperature", "temp"),
                FieldMapper::basic("details", "pdbx_details"),
            ],
        )],
    )
}

fn software(name: &'static str, classifications: Vec<&'static str>) -> FieldMapper {
    FieldMapper::filtered(
        CategoryGenerator::where_any("classification", classifications),
        vec![FieldMapper::nested(
            name,
            vec![FieldMapper::value_only(
                "name",
                Transform::vocabulary(&SOFTWARE),
            )],
        )],
    )
}

fn data_processing() -> FieldMapper {
    FieldMapper::nested(
        "dataProcessing",
        vec![
            FieldMapper::basic("resolutionHigh", "d_resolution_high"),
            FieldMapper::basic("resolutionLow", "d_resolution_low"),
            FieldMapper::basic("completeness", "percent_possible_obs"),
            FieldMapper::basic("meanIOverSigma", "pdbx_netI_over_sigmaI"),
            FieldMapper::basic("rMerge", "pdbx_Rmerge_I_obs"),
            FieldMapper::basic("rMeas", "pdbx_Rrim_I_all"),
            FieldMapper::basic("ccHalf", "pdbx_CC_half"),
            FieldMapper::basic("redundancy", "pdbx_redundancy"),
            FieldMapper::basic("uniqueReflections", "number_obs"),
        ],
    )
}

fn high_resolution_shell() -> FieldMapper {
    FieldMapper::nested(
        "highResolutionShell",
        vec![
            FieldMapper::basic("resolutionHigh", "d_res_high"),
            FieldMapper::basic("resolutionLow", "d_res_low"),
            FieldMapper::basic("completeness", "percent_possible_all"),
            FieldMapper::basic("meanIOverSigma", "meanI_over_sigI_obs"),
            FieldMapper::basic("rMerge", "Rmerge_I_obs"),
            FieldMapper::basic("rMeas", "pdbx_Rrim_I_all"),
            FieldMapper::basic("ccHalf", "pdbx_CC_half"),
            FieldMapper::basic("redundancy", "pdbx_redundancy"),
            FieldMapper::basic("uniqueReflections", "number_unique_obs"),
            FieldMapper::invisible("pdbx_diffrn_id"),
        ],
    )
}

fn refinement() -> FieldMapper {
    FieldMapper::filtered(
        CategoryGenerator::Flatten,
        vec![FieldMapper::nested(
            "refinement",
            vec![
                FieldMapper::basic("method", "pdbx_refine_id"),
                FieldMapper::basic("resolutionHigh", "ls_d_res_high"),
                FieldMapper::basic("resolutionLow", "ls_d_res_low"),
                FieldMapper::basic("rWork", "ls_R_factor_R_work"),
                FieldMapper::basic("rFree", "ls_R_factor_R_free"),
                FieldMapper::basic("reflections", "ls_number_reflns_obs"),
            ],
        )],
    )
}

fn citation(selector: &str) -> FieldMapper {
    FieldMapper::filtered(
        CategoryGenerator::where_eq("id", selector),
        vec![FieldMapper::nested(
            "citation",
            vec![
                FieldMapper::basic("title", "title"),
                FieldMapper::basic("journal", "journal_abbrev"),
                FieldMapper::basic("volume", "journal_volume"),
                FieldMapper::basic("year", "year"),
                FieldMapper::basic("doi", "pdbx_database_id_DOI"),
                FieldMapper::basic("pubmed", "pdbx_database_id_PubMed"),
            ],
        )],
    )
}

fn polymer_entity() -> FieldMapper {
    FieldMapper::filtered(
        CategoryGenerator::Flatten,
        vec![FieldMapper::nested(
            "polymerEntity",
            vec![
                FieldMapper::basic("entityId", "entity_id"),
                FieldMapper::basic("type", "type"),
                FieldMapper::basic("sequence", "pdbx_seq_one_letter_code_can")
                    .with_transform(Transform::compact_sequence()),
                FieldMapper::nested(
                    "chains",
                    vec![FieldMapper::value_only(
                        "pdbx_strand_id",
                        Transform::split_list(","),
                    )],
                ),
            ],
        )],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_references_columns() {
        let catalog = mmcif_catalog(&Document::new("x", Vec::new()), &ImportOptions::default());
        assert!(!catalog.is_empty());
        for entry in &catalog {
            assert!(
                !entry.mapper.referenced_columns().is_empty(),
                "{:?} maps nothing",
                entry.source
            );
        }
    }

    #[test]
    fn merged_sources_list_their_categories() {
        assert_eq!(CategorySource::Single("refine").categories(), ["refine"]);
        assert_eq!(CategorySource::Merged(CRYSTAL).categories(), ["symmetry", "cell"]);
    }
}
