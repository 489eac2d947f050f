//! Integration tests that run the subset and identifier-copy flows against
//! real NetCDF files on disk.

use nc_subset::dataset::{Values, Variable};
use nc_subset::netcdf_io::{read_dataset, write_dataset};
use nc_subset::subset::{read_id_list, subset_by_id, SubsetOutcome};
use ndarray::{Array1, Array2, ArrayD};
use netcdf::{create, open, AttributeValue};
use std::collections::BTreeSet;
use std::path::Path;
use tempfile::tempdir;

/// Writes a forcing-style test file: hruId over "hru", runoff over
/// ("time", "hru"), gruId over "gru", timeOffset over "time".
fn create_forcing_file(path: &Path, with_history: bool) {
    let mut file = create(path).expect("Failed to create NetCDF file");

    file.add_dimension("hru", 4).expect("Failed to add dimension hru");
    file.add_dimension("time", 2).expect("Failed to add dimension time");
    file.add_dimension("gru", 2).expect("Failed to add dimension gru");

    {
        let mut var = file
            .add_variable::<i32>("hruId", &["hru"])
            .expect("Failed to add hruId");
        var.put_attribute("long_name", "hydrologic response unit ID")
            .expect("Failed to add attribute");
        var.put(Array1::from(vec![1i32, 2, 3, 4]).view(), ..)
            .expect("Failed to write hruId");
    }

    {
        let mut var = file
            .add_variable::<f32>("runoff", &["time", "hru"])
            .expect("Failed to add runoff");
        var.put_attribute("units", "mm/d").expect("Failed to add attribute");
        var.put_attribute("_FillValue", -999.0f32)
            .expect("Failed to add attribute");
        let data =
            Array2::from_shape_vec((2, 4), vec![0.1f32, 0.2, 0.3, 0.4, 1.1, 1.2, 1.3, 1.4])
                .expect("Failed to build runoff data");
        var.put(data.view(), ..).expect("Failed to write runoff");
    }

    {
        let mut var = file
            .add_variable::<i64>("gruId", &["gru"])
            .expect("Failed to add gruId");
        var.put(Array1::from(vec![10i64, 20]).view(), ..)
            .expect("Failed to write gruId");
    }

    {
        let mut var = file
            .add_variable::<f64>("timeOffset", &["time"])
            .expect("Failed to add timeOffset");
        var.put(Array1::from(vec![0.5f64, 1.5]).view(), ..)
            .expect("Failed to write timeOffset");
    }

    file.add_attribute("title", "Test Dataset")
        .expect("Failed to add global attribute");
    if with_history {
        file.add_attribute("history", "Wed Jan  1 00:00:00 2020: created test file\n")
            .expect("Failed to add history attribute");
    }
}

#[test]
fn test_subset_flow_through_files() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("forcing.nc");
    let id_path = temp_dir.path().join("ids.txt");
    let output_path = temp_dir.path().join("forcing_subset.nc");

    create_forcing_file(&input_path, true);
    std::fs::write(&id_path, "1\n2\n3\n999\n").expect("Failed to write ID file");

    let ids = read_id_list(&id_path).expect("Failed to read ID file");
    let dataset = read_dataset(&input_path).expect("Failed to read dataset");

    let SubsetOutcome {
        mut dataset,
        missing,
    } = subset_by_id(&dataset, "hruId", &ids, false).expect("Subset failed");

    let expected_missing: BTreeSet<i64> = [999].into_iter().collect();
    assert_eq!(missing, expected_missing);

    dataset.prepend_history("Thu Aug  6 12:00:00 2026: subset-by-id hruId forcing.nc ids.txt forcing_subset.nc\n");
    write_dataset(&dataset, &output_path).expect("Failed to write output");

    // Raw checks through the netcdf crate
    let file = open(&output_path).expect("Failed to open output");

    let hru_id = file.variable("hruId").expect("hruId missing from output");
    assert_eq!(hru_id.dimensions()[0].len(), 3);
    let hru_values: Vec<i32> = hru_id
        .get_values::<i32, _>(..)
        .expect("Failed to read hruId");
    assert_eq!(hru_values, vec![1, 2, 3]);

    let runoff = file.variable("runoff").expect("runoff missing from output");
    let runoff_values: Vec<f32> = runoff
        .get_values::<f32, _>(..)
        .expect("Failed to read runoff");
    assert_eq!(runoff_values, vec![0.1, 0.2, 0.3, 1.1, 1.2, 1.3]);

    let time_offset = file
        .variable("timeOffset")
        .expect("timeOffset missing from output");
    let time_values: Vec<f64> = time_offset
        .get_values::<f64, _>(..)
        .expect("Failed to read timeOffset");
    assert_eq!(time_values, vec![0.5, 1.5]);

    // Model-level checks: element types and history provenance
    let reread = read_dataset(&output_path).expect("Failed to re-read output");
    assert_eq!(reread.variable("hruId").unwrap().values.type_name(), "int32");
    assert_eq!(reread.variable("runoff").unwrap().values.type_name(), "float32");
    assert_eq!(reread.variable("gruId").unwrap().values.type_name(), "int64");
    assert_eq!(
        reread.variable("timeOffset").unwrap().values.type_name(),
        "float64"
    );

    match reread.attribute("history") {
        Some(AttributeValue::Str(history)) => {
            assert!(history.starts_with("Thu Aug  6 12:00:00 2026: subset-by-id"));
            assert!(history.ends_with("created test file\n"));
        }
        other => panic!("Expected string history attribute, got {:?}", other),
    }

    match reread.attribute("title") {
        Some(AttributeValue::Str(title)) => assert_eq!(title, "Test Dataset"),
        other => panic!("Expected title attribute, got {:?}", other),
    }
}

#[test]
fn test_subset_with_drop_through_files() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("forcing.nc");
    let output_path = temp_dir.path().join("forcing_drop.nc");

    create_forcing_file(&input_path, false);

    let ids: BTreeSet<i64> = [2, 3].into_iter().collect();
    let dataset = read_dataset(&input_path).expect("Failed to read dataset");
    let outcome = subset_by_id(&dataset, "hruId", &ids, true).expect("Subset failed");
    write_dataset(&outcome.dataset, &output_path).expect("Failed to write output");

    let file = open(&output_path).expect("Failed to open output");
    let mut names: Vec<String> = file.variables().map(|v| v.name()).collect();
    names.sort();
    assert_eq!(names, vec!["hruId".to_string(), "runoff".to_string()]);

    let hru_values: Vec<i32> = file
        .variable("hruId")
        .expect("hruId missing")
        .get_values::<i32, _>(..)
        .expect("Failed to read hruId");
    assert_eq!(hru_values, vec![2, 3]);
}

#[test]
fn test_history_is_exactly_one_line_when_absent() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("forcing.nc");
    let output_path = temp_dir.path().join("forcing_out.nc");

    create_forcing_file(&input_path, false);

    let ids: BTreeSet<i64> = [1, 2, 3, 4].into_iter().collect();
    let dataset = read_dataset(&input_path).expect("Failed to read dataset");
    let SubsetOutcome { mut dataset, .. } =
        subset_by_id(&dataset, "hruId", &ids, false).expect("Subset failed");

    let line = "Thu Aug  6 12:00:00 2026: subset-by-hru forcing.nc ids.txt out/\n";
    dataset.prepend_history(line);
    write_dataset(&dataset, &output_path).expect("Failed to write output");

    let reread = read_dataset(&output_path).expect("Failed to re-read output");
    match reread.attribute("history") {
        Some(AttributeValue::Str(history)) => assert_eq!(history, line),
        other => panic!("Expected string history attribute, got {:?}", other),
    }
}

#[test]
fn test_add_identifier_flow() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let target_path = temp_dir.path().join("output.nc");
    let donor_path = temp_dir.path().join("attributes.nc");
    let merged_path = temp_dir.path().join("merged.nc");

    // Target file without gruId
    {
        let mut file = create(&target_path).expect("Failed to create target file");
        file.add_dimension("gru", 3).expect("Failed to add dimension");
        let mut var = file
            .add_variable::<f64>("gruArea", &["gru"])
            .expect("Failed to add gruArea");
        var.put(Array1::from(vec![1.0f64, 2.0, 3.0]).view(), ..)
            .expect("Failed to write gruArea");
    }

    // Donor file carrying gruId over the same axis
    {
        let mut file = create(&donor_path).expect("Failed to create donor file");
        file.add_dimension("gru", 3).expect("Failed to add dimension");
        let mut var = file
            .add_variable::<i32>("gruId", &["gru"])
            .expect("Failed to add gruId");
        var.put(Array1::from(vec![10i32, 20, 30]).view(), ..)
            .expect("Failed to write gruId");
    }

    let mut target = read_dataset(&target_path).expect("Failed to read target");
    let donor = read_dataset(&donor_path).expect("Failed to read donor");

    let gru_id = donor.variable("gruId").expect("gruId missing from donor").clone();
    target
        .insert_variable(gru_id)
        .expect("Failed to insert gruId");
    target.prepend_history("Thu Aug  6 12:00:00 2026: add-identifier output.nc attributes.nc merged.nc\n");
    write_dataset(&target, &merged_path).expect("Failed to write merged file");

    let file = open(&merged_path).expect("Failed to open merged file");
    let gru_values: Vec<i32> = file
        .variable("gruId")
        .expect("gruId missing from merged file")
        .get_values::<i32, _>(..)
        .expect("Failed to read gruId");
    assert_eq!(gru_values, vec![10, 20, 30]);

    let area_values: Vec<f64> = file
        .variable("gruArea")
        .expect("gruArea missing from merged file")
        .get_values::<f64, _>(..)
        .expect("Failed to read gruArea");
    assert_eq!(area_values, vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_roundtrip_preserves_model() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("roundtrip.nc");

    let mut dataset = nc_subset::dataset::Dataset::new();
    dataset
        .insert_variable(Variable {
            name: "hruId".to_string(),
            dimensions: vec!["hru".to_string()],
            values: Values::I32(ArrayD::from_shape_vec(vec![3], vec![7, 8, 9]).unwrap()),
            attributes: vec![("units".to_string(), AttributeValue::Str("-".to_string()))],
        })
        .expect("Failed to insert variable");
    dataset.set_attribute("title", AttributeValue::Str("Roundtrip".to_string()));

    write_dataset(&dataset, &path).expect("Failed to write dataset");
    let reread = read_dataset(&path).expect("Failed to read dataset back");

    let var = reread.variable("hruId").expect("hruId missing");
    assert_eq!(var.dimensions, vec!["hru".to_string()]);
    assert_eq!(
        var.values,
        Values::I32(ArrayD::from_shape_vec(vec![3], vec![7, 8, 9]).unwrap())
    );
    assert_eq!(reread.dimensions.len_of("hru"), Some(3));
}
