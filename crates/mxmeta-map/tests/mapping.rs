//! End-to-end tests for mapping trees over merged categories.

use mxmeta_map::{CategoryGenerator, FieldMapper, Transform, map_all};
use mxmeta_model::{Category, Column, MergedCategory};
use mxmeta_standards::{SOFTWARE, SOURCE_TYPE};

fn data_collection() -> Vec<FieldMapper> {
    vec![FieldMapper::filtered(
        CategoryGenerator::Flatten,
        vec![FieldMapper::nested(
            "dataCollection",
            vec![
                FieldMapper::basic("wavelength", "diffrn_radiation_wavelength_wavelength"),
                FieldMapper::basic("temperature", "diffrn_ambient_temp"),
                FieldMapper::basic("sourceType", "diffrn_source_source")
                    .with_transform(Transform::vocabulary(&SOURCE_TYPE)),
            ],
        )],
    )]
}

#[test]
fn merged_source_and_environment_form_one_field() {
    let wavelength = Category::single_row("diffrn_radiation_wavelength", [("wavelength", "1.27")]);
    let diffrn = Category::single_row("diffrn", [("ambient_temp", "100")]);
    let merged = MergedCategory::merge(&[&wavelength, &diffrn]);

    let fields = map_all(&data_collection(), &merged);
    insta::assert_json_snapshot!(fields, @r#"
    [
      {
        "name": "dataCollection",
        "children": [
          {
            "name": "wavelength",
            "value": "1.27"
          },
          {
            "name": "temperature",
            "value": "100"
          }
        ]
      }
    ]
    "#);
}

#[test]
fn mapping_twice_is_identical() {
    let source = Category::new(
        "diffrn_source",
        vec![Column::from_values("source", ["SYNCHROTRON", "ROTATING ANODE"])],
    )
    .unwrap();
    let merged = MergedCategory::merge(&[&source]);
    let mappers = data_collection();
    let first = map_all(&mappers, &merged);
    let second = map_all(&mappers, &merged);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(first[1].child_value("sourceType"), Some("Rotating anode"));
}

#[test]
fn software_tree_renders() {
    let software = Category::new(
        "software",
        vec![
            Column::from_values("name", ["XDS", "AIMLESS", "REFMAC"]),
            Column::from_values(
                "classification",
                ["data reduction", "data scaling", "refinement"],
            ),
        ],
    )
    .unwrap();
    let mappers = vec![
        FieldMapper::nested(
            "processingSoftware",
            vec![FieldMapper::filtered(
                CategoryGenerator::where_any("classification", ["data reduction", "data scaling"]),
                vec![FieldMapper::value_only("name", Transform::vocabulary(&SOFTWARE))],
            )],
        ),
        FieldMapper::nested(
            "refinementSoftware",
            vec![FieldMapper::filtered(
                CategoryGenerator::where_eq("classification", "refinement"),
                vec![FieldMapper::value_only("name", Transform::vocabulary(&SOFTWARE))],
            )],
        ),
    ];
    let rendered: String = map_all(&mappers, &software)
        .iter()
        .map(ToString::to_string)
        .collect();
    insta::assert_snapshot!(rendered.trim_end(), @r"
    processingSoftware
      - XDS
      - Aimless
    refinementSoftware
      - REFMAC
    ");
}
