//! Dimension-aware subsetting of datasets by identifier values
//!
//! The filter splits a dataset's variables into a filterable group, whose
//! dimensions intersect the identifier variable's dimensions, and a
//! pass-through group, which is carried unmodified. Filterable variables are
//! rebuilt by gathering the kept indices along each shared axis, so element
//! types are never widened and no cast-back step is needed.

use crate::dataset::{Dataset, Variable};
use crate::errors::{NcSubsetError, Result};
use ndarray::Axis;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Result of one subset operation: the filtered dataset plus the requested
/// identifiers that do not occur in it.
#[derive(Debug)]
pub struct SubsetOutcome {
    pub dataset: Dataset,
    pub missing: BTreeSet<i64>,
}

/// Reads an identifier list, one integer per line.
///
/// Surrounding whitespace is tolerated; any other non-integer token,
/// including a blank interior line, is an error naming the line.
pub fn read_id_list(path: &Path) -> Result<BTreeSet<i64>> {
    let content = fs::read_to_string(path)?;

    let mut ids = BTreeSet::new();
    for (index, line) in content.lines().enumerate() {
        let token = line.trim();
        let id = token
            .parse::<i64>()
            .map_err(|_| NcSubsetError::InvalidId {
                line: index + 1,
                token: token.to_string(),
            })?;
        ids.insert(id);
    }

    Ok(ids)
}

/// Subsets `dataset` to the records whose `id_var` value is in `ids`.
///
/// A variable is filtered when its dimension set intersects the identifier
/// variable's dimension set; along each shared dimension, a position is
/// kept when its slice of the identifier variable contains at least one
/// value in `ids` (for the usual one-dimensional identifier this is simply
/// "the value is in the set"). All other variables pass through unchanged,
/// or are omitted entirely when `drop_unrelated` is set.
///
/// The caller is responsible for the provenance update; this function does
/// not touch the history attribute.
///
/// # Errors
///
/// Fails with [`NcSubsetError::VariableNotFound`] when `id_var` is not in
/// the dataset. An empty `ids` set is not an error and produces an empty
/// selection.
pub fn subset_by_id(
    dataset: &Dataset,
    id_var: &str,
    ids: &BTreeSet<i64>,
    drop_unrelated: bool,
) -> Result<SubsetOutcome> {
    let identifier = dataset
        .variable(id_var)
        .ok_or_else(|| NcSubsetError::VariableNotFound {
            var: id_var.to_string(),
        })?;

    let mask = identifier.values.membership_mask(ids);

    // Kept indices along each subset dimension. A position survives when
    // any element of its slice matches.
    let mut kept: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (axis, dim) in identifier.dimensions.iter().enumerate() {
        let indices: Vec<usize> = (0..mask.shape()[axis])
            .filter(|&k| mask.index_axis(Axis(axis), k).iter().any(|&m| m))
            .collect();
        kept.insert(dim.as_str(), indices);
    }

    let mut subset = Dataset::new();
    subset.attributes = dataset.attributes.clone();

    for var in dataset.variables() {
        let filterable = var.dimensions.iter().any(|d| kept.contains_key(d.as_str()));
        if !filterable {
            if !drop_unrelated {
                subset.insert_variable(var.clone())?;
            }
            continue;
        }

        let mut values = var.values.clone();
        for (axis, dim) in var.dimensions.iter().enumerate() {
            if let Some(indices) = kept.get(dim.as_str()) {
                values = values.select(axis, indices);
            }
        }
        subset.insert_variable(Variable {
            values,
            ..var.clone()
        })?;
    }

    // Identifiers that were asked for but are absent from the result. When
    // the identifier variable itself was dropped, nothing was retained.
    let retained = subset
        .variable(id_var)
        .map(|v| v.values.id_set())
        .unwrap_or_default();
    let missing = ids.difference(&retained).copied().collect();

    Ok(SubsetOutcome {
        dataset: subset,
        missing,
    })
}

/// Reports requested identifiers that were not found, one per line.
pub fn print_missing(missing: &BTreeSet<i64>) {
    if missing.is_empty() {
        return;
    }
    println!("Missing IDs: ");
    for id in missing {
        println!("{id}");
    }
}
