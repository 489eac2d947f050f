//! In-memory dataset model with explicit element types
//!
//! A [`Dataset`] holds named variables, a registry of named dimensions, and
//! global attributes. Variables reference dimensions by name only; lengths
//! live in the [`DimensionRegistry`]. The element type of each variable is
//! carried by the [`Values`] variant, so any transformation that maps a
//! `Values` to a `Values` of the same variant preserves the element type.

use crate::errors::{NcSubsetError, Result};
use ndarray::{ArrayD, Axis};
use netcdf::AttributeValue;
use std::collections::BTreeSet;

/// Name of the global attribute holding the provenance log.
pub const HISTORY_ATTR: &str = "history";

/// Type-tagged n-dimensional value buffer for one variable.
///
/// One variant per NetCDF element type the tools carry. Text, compound, and
/// other exotic types are rejected when a file is read.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    I8(ArrayD<i8>),
    U8(ArrayD<u8>),
    I16(ArrayD<i16>),
    U16(ArrayD<u16>),
    I32(ArrayD<i32>),
    U32(ArrayD<u32>),
    I64(ArrayD<i64>),
    U64(ArrayD<u64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

/// Runs `$body` against the array inside whichever variant `$value` is.
macro_rules! with_values {
    ($value:expr, $arr:ident => $body:expr) => {
        match $value {
            Values::I8($arr) => $body,
            Values::U8($arr) => $body,
            Values::I16($arr) => $body,
            Values::U16($arr) => $body,
            Values::I32($arr) => $body,
            Values::U32($arr) => $body,
            Values::I64($arr) => $body,
            Values::U64($arr) => $body,
            Values::F32($arr) => $body,
            Values::F64($arr) => $body,
        }
    };
}

/// Like `with_values!`, but rewraps the result in the same variant, so the
/// element type of the output equals the element type of the input.
macro_rules! map_values {
    ($value:expr, $arr:ident => $body:expr) => {
        match $value {
            Values::I8($arr) => Values::I8($body),
            Values::U8($arr) => Values::U8($body),
            Values::I16($arr) => Values::I16($body),
            Values::U16($arr) => Values::U16($body),
            Values::I32($arr) => Values::I32($body),
            Values::U32($arr) => Values::U32($body),
            Values::I64($arr) => Values::I64($body),
            Values::U64($arr) => Values::U64($body),
            Values::F32($arr) => Values::F32($body),
            Values::F64($arr) => Values::F64($body),
        }
    };
}

/// Exact conversion of one element to an integer identifier.
///
/// Integers convert when they fit in `i64`; floats convert only when they
/// are integral and in range. Everything else is not an identifier.
trait ToId: Copy {
    fn to_id(self) -> Option<i64>;
}

macro_rules! int_to_id {
    ($($t:ty),*) => {
        $(impl ToId for $t {
            fn to_id(self) -> Option<i64> {
                i64::try_from(self).ok()
            }
        })*
    };
}

int_to_id!(i8, u8, i16, u16, i32, u32, i64, u64);

impl ToId for f64 {
    fn to_id(self) -> Option<i64> {
        if self.is_finite() && self.fract() == 0.0 && self >= i64::MIN as f64 && self <= i64::MAX as f64
        {
            Some(self as i64)
        } else {
            None
        }
    }
}

impl ToId for f32 {
    fn to_id(self) -> Option<i64> {
        f64::from(self).to_id()
    }
}

impl Values {
    /// Shape of the underlying array.
    pub fn shape(&self) -> &[usize] {
        with_values!(self, a => a.shape())
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        with_values!(self, a => a.ndim())
    }

    /// Element type name in NetCDF convention (`int32`, `float64`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Values::I8(_) => "int8",
            Values::U8(_) => "uint8",
            Values::I16(_) => "int16",
            Values::U16(_) => "uint16",
            Values::I32(_) => "int32",
            Values::U32(_) => "uint32",
            Values::I64(_) => "int64",
            Values::U64(_) => "uint64",
            Values::F32(_) => "float32",
            Values::F64(_) => "float64",
        }
    }

    /// Gathers `indices` along `axis` into a new buffer of the same element
    /// type. This is a pure selection: kept positions appear in the order
    /// listed, nothing is promoted or filled.
    pub fn select(&self, axis: usize, indices: &[usize]) -> Values {
        map_values!(self, a => a.select(Axis(axis), indices))
    }

    /// Element-wise membership test against a set of integer identifiers.
    pub fn membership_mask(&self, ids: &BTreeSet<i64>) -> ArrayD<bool> {
        with_values!(self, a => a.mapv(|v| v.to_id().map_or(false, |id| ids.contains(&id))))
    }

    /// The set of integer identifiers occurring in this buffer.
    pub fn id_set(&self) -> BTreeSet<i64> {
        with_values!(self, a => a.iter().filter_map(|v| v.to_id()).collect())
    }
}

/// A named axis with a declared length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub len: usize,
}

/// Ordered registry of dimensions, shared by name across variables.
#[derive(Debug, Clone, Default)]
pub struct DimensionRegistry {
    dims: Vec<Dimension>,
}

impl DimensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a dimension, or validates the length when it already exists.
    pub fn declare(&mut self, name: &str, len: usize) -> Result<()> {
        match self.dims.iter().find(|d| d.name == name) {
            Some(existing) if existing.len != len => Err(NcSubsetError::DimensionMismatch {
                dim: name.to_string(),
                declared: existing.len,
                len,
            }),
            Some(_) => Ok(()),
            None => {
                self.dims.push(Dimension {
                    name: name.to_string(),
                    len,
                });
                Ok(())
            }
        }
    }

    pub fn len_of(&self, name: &str) -> Option<usize> {
        self.dims.iter().find(|d| d.name == name).map(|d| d.len)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dimension> {
        self.dims.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }
}

/// A named, typed array tagged with the dimensions it varies along.
///
/// `dimensions` is ordered and corresponds axis-by-axis to the shape of
/// `values`. A variable with no dimensions is a scalar.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub dimensions: Vec<String>,
    pub values: Values,
    pub attributes: Vec<(String, AttributeValue)>,
}

/// In-memory representation of one NetCDF file.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub dimensions: DimensionRegistry,
    variables: Vec<Variable>,
    pub attributes: Vec<(String, AttributeValue)>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a variable by name.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Variables in insertion order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Inserts a variable, registering its dimensions in the process.
    ///
    /// The variable's dimension list must match the rank of its data, and
    /// each dimension length must agree with any previous declaration. An
    /// existing variable with the same name is replaced.
    pub fn insert_variable(&mut self, variable: Variable) -> Result<()> {
        if variable.dimensions.len() != variable.values.ndim() {
            return Err(NcSubsetError::Generic(format!(
                "Variable '{}' names {} dimensions but its data has rank {}",
                variable.name,
                variable.dimensions.len(),
                variable.values.ndim()
            )));
        }
        for (dim, &len) in variable.dimensions.iter().zip(variable.values.shape()) {
            self.dimensions.declare(dim, len)?;
        }
        match self.variables.iter_mut().find(|v| v.name == variable.name) {
            Some(slot) => *slot = variable,
            None => self.variables.push(variable),
        }
        Ok(())
    }

    /// Looks up a global attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value)
    }

    /// Sets a global attribute, replacing any existing value in place.
    pub fn set_attribute(&mut self, name: &str, value: AttributeValue) {
        match self
            .attributes
            .iter_mut()
            .find(|(attr_name, _)| attr_name == name)
        {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    /// Prepends a provenance line to the `history` attribute, most recent
    /// first. `line` is expected to end with a newline.
    pub fn prepend_history(&mut self, line: &str) {
        let prior = match self.attribute(HISTORY_ATTR) {
            Some(AttributeValue::Str(existing)) => existing.clone(),
            _ => String::new(),
        };
        self.set_attribute(HISTORY_ATTR, AttributeValue::Str(format!("{line}{prior}")));
    }
}
