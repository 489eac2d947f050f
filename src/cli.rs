//! Defines command-line interface options using `clap` for the nc-subset tools.

use chrono::Local;
use clap::Parser;
use std::env;
use std::path::PathBuf;

/// Add the gruId variable from a donor attribute file to another NetCDF file.
///
/// The assumption is that the file to which the gruId is added has the same
/// ordering along the gru dimension as the attribute file.
#[derive(Parser, Debug)]
#[command(
    name = "add-identifier",
    version,
    about = "Add a gruId from an attribute file to another NetCDF file"
)]
pub struct AddIdentifierArgs {
    /// Path of NetCDF file to which gruId will be added
    pub input_file: PathBuf,

    /// Path of NetCDF file from which the gruId will be taken
    pub gruid_file: PathBuf,

    /// Path of output NetCDF file
    pub output_file: PathBuf,
}

/// Subset a NetCDF file based on a list of IDs.
#[derive(Parser, Debug)]
#[command(
    name = "subset-by-id",
    version,
    about = "Subset a NetCDF file based on a list of IDs"
)]
pub struct SubsetByIdArgs {
    /// Variable ID to subset on (e.g. 'hruId')
    pub id: String,

    /// Path of NetCDF file that will be subset
    pub ncfile: PathBuf,

    /// Path of file with list of IDs
    pub idfile: PathBuf,

    /// Path of subsetted output file
    pub ofile: PathBuf,

    /// Drop the variables that are not associated with the same dimension(s) as the ID used in subsetting
    #[arg(short, long)]
    pub drop: bool,
}

/// Subset a NetCDF file based on a list of hruIds.
#[derive(Parser, Debug)]
#[command(
    name = "subset-by-hru",
    version,
    about = "Subset a NetCDF file based on a list of hruIds"
)]
pub struct SubsetByHruArgs {
    /// Path of NetCDF file that will be subset
    pub ncfile: PathBuf,

    /// Path of file with list of hruIds
    pub idfile: PathBuf,

    /// Directory where the subsetted file will be written, named after the input file
    pub opath: PathBuf,
}

/// Provenance line for the history attribute: the local timestamp followed
/// by the full invocation command line, newline-terminated.
pub fn invocation_line() -> String {
    let argv: Vec<String> = env::args().collect();
    format!("{}: {}\n", Local::now().format("%c"), argv.join(" "))
}
