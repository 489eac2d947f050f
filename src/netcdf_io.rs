//! NetCDF file I/O for the in-memory dataset model
//!
//! This module loads a whole NetCDF file into a [`Dataset`] and stores a
//! [`Dataset`] back out, preserving element types, dimension order, and
//! attributes in both directions.

use crate::dataset::{Dataset, Values, Variable};
use crate::errors::{NcSubsetError, Result};
use ndarray::ArrayD;
use netcdf::types::{FloatType, IntType, NcVariableType};
use netcdf::{create, open};
use std::{fs, path::Path};

/// Reads an entire NetCDF file into memory.
///
/// All dimensions are registered up front so declaration order survives a
/// round trip, then every variable is loaded with its native element type.
///
/// # Errors
///
/// Fails when the file cannot be opened, when a variable carries an element
/// type outside the numeric set in [`Values`], or when declared shapes are
/// inconsistent.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let file = open(path)?;

    let mut dataset = Dataset::new();
    for dim in file.dimensions() {
        dataset.dimensions.declare(&dim.name(), dim.len())?;
    }

    for attr in file.attributes() {
        dataset.attributes.push((attr.name().to_string(), attr.value()?));
    }

    for var in file.variables() {
        let dimensions: Vec<String> = var
            .dimensions()
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        let shape: Vec<usize> = var
            .dimensions()
            .iter()
            .map(netcdf::Dimension::len)
            .collect();

        let values = read_values(&var, shape)?;

        let mut attributes = Vec::new();
        for attr in var.attributes() {
            attributes.push((attr.name().to_string(), attr.value()?));
        }

        dataset.insert_variable(Variable {
            name: var.name(),
            dimensions,
            values,
            attributes,
        })?;
    }

    Ok(dataset)
}

/// Loads one variable's data with the element type it is stored as.
fn read_values(var: &netcdf::Variable, shape: Vec<usize>) -> Result<Values> {
    macro_rules! load {
        ($t:ty, $variant:ident) => {{
            let data = var.get_values::<$t, _>(..)?;
            Values::$variant(ArrayD::from_shape_vec(shape, data)?)
        }};
    }

    let values = match var.vartype() {
        NcVariableType::Int(IntType::I8) => load!(i8, I8),
        NcVariableType::Int(IntType::U8) => load!(u8, U8),
        NcVariableType::Int(IntType::I16) => load!(i16, I16),
        NcVariableType::Int(IntType::U16) => load!(u16, U16),
        NcVariableType::Int(IntType::I32) => load!(i32, I32),
        NcVariableType::Int(IntType::U32) => load!(u32, U32),
        NcVariableType::Int(IntType::I64) => load!(i64, I64),
        NcVariableType::Int(IntType::U64) => load!(u64, U64),
        NcVariableType::Float(FloatType::F32) => load!(f32, F32),
        NcVariableType::Float(FloatType::F64) => load!(f64, F64),
        other => {
            return Err(NcSubsetError::UnsupportedType {
                var: var.name(),
                kind: format!("{:?}", other).to_lowercase(),
            })
        }
    };

    Ok(values)
}

/// Writes a dataset to a new NetCDF file, replacing any existing file.
///
/// Dimensions are defined in registry order, each variable is created with
/// its original element type, attributes are written before the data so
/// `_FillValue` lands while the variable is still in define mode, and
/// global attributes go last.
pub fn write_dataset(dataset: &Dataset, path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }

    let mut file = create(path)?;

    for dim in dataset.dimensions.iter() {
        file.add_dimension(&dim.name, dim.len)?;
    }

    for var in dataset.variables() {
        let dim_refs: Vec<&str> = var.dimensions.iter().map(String::as_str).collect();
        write_variable(&mut file, var, &dim_refs)?;
    }

    for (name, value) in &dataset.attributes {
        file.add_attribute(name, value.clone())?;
    }

    Ok(())
}

/// Creates one variable and writes its attributes and data.
fn write_variable(file: &mut netcdf::FileMut, var: &Variable, dim_refs: &[&str]) -> Result<()> {
    macro_rules! store {
        ($t:ty, $data:expr) => {{
            let mut new_var = file.add_variable::<$t>(&var.name, dim_refs)?;
            for (name, value) in &var.attributes {
                new_var.put_attribute(name, value.clone())?;
            }
            new_var.put($data.view(), ..)?;
        }};
    }

    match &var.values {
        Values::I8(a) => store!(i8, a),
        Values::U8(a) => store!(u8, a),
        Values::I16(a) => store!(i16, a),
        Values::U16(a) => store!(u16, a),
        Values::I32(a) => store!(i32, a),
        Values::U32(a) => store!(u32, a),
        Values::I64(a) => store!(i64, a),
        Values::U64(a) => store!(u64, a),
        Values::F32(a) => store!(f32, a),
        Values::F64(a) => store!(f64, a),
    }

    Ok(())
}
