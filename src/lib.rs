//! nc-subset: NetCDF identifier-based subsetting utilities
//!
//! A small Rust library and set of command-line tools for manipulating
//! NetCDF files with labeled dimensions and variables. The tools cover two
//! jobs: copying an identifier variable from one file into another, and
//! subsetting a file's records to the rows whose identifier value appears
//! in a supplied list.
//!
//! ## Key Features
//!
//! - **Dimension-Aware Subsetting**: variables sharing a dimension with the
//!   identifier variable are filtered together; unrelated variables pass
//!   through untouched (or are dropped on request)
//! - **Type Preservation**: selection is an explicit index gather, so every
//!   output variable keeps the exact element type it had in the input
//! - **Missing-ID Reporting**: identifiers requested but absent from the
//!   result are reported after the write
//! - **History Provenance**: every write prepends a timestamped invocation
//!   line to the dataset's history attribute
//!
//! ## Module Organization
//!
//! - [`dataset`]: typed in-memory model of a NetCDF file
//! - [`subset`]: the dimension-aware subset filter and ID-list parsing
//! - [`netcdf_io`]: whole-file NetCDF load and store
//! - [`cli`]: command-line argument definitions for the three tools
//! - [`errors`]: centralized error handling
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use nc_subset::prelude::*;
//! use std::collections::BTreeSet;
//! use std::path::Path;
//!
//! let dataset = read_dataset(Path::new("forcing.nc")).unwrap();
//! let ids: BTreeSet<i64> = [1, 2, 3].into_iter().collect();
//!
//! let SubsetOutcome { mut dataset, missing } =
//!     subset_by_id(&dataset, "hruId", &ids, false).unwrap();
//!
//! dataset.prepend_history("2026-08-06 12:00:00: subset run\n");
//! write_dataset(&dataset, Path::new("forcing_subset.nc")).unwrap();
//! assert!(missing.is_empty());
//! ```

// Core modules
pub mod cli;
pub mod dataset;
pub mod errors;
pub mod netcdf_io;
pub mod subset;

// Direct re-exports for the public API
pub use dataset::*;
pub use errors::*;
pub use netcdf_io::*;
pub use subset::*;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::dataset::{Dataset, DimensionRegistry, Values, Variable};
    pub use crate::errors::{NcSubsetError, Result};
    pub use crate::netcdf_io::{read_dataset, write_dataset};
    pub use crate::subset::{print_missing, read_id_list, subset_by_id, SubsetOutcome};
}
