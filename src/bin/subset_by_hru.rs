//! Entry point for the subset-by-hru tool.
//! Fixed-variable variant of subset-by-id: subsets on hruId and writes the
//! result into an output directory under the input file's base name.

use clap::Parser;
use nc_subset::cli::{invocation_line, SubsetByHruArgs};
use nc_subset::netcdf_io::{read_dataset, write_dataset};
use nc_subset::subset::{print_missing, read_id_list, subset_by_id, SubsetOutcome};

const HRU_ID: &str = "hruId";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = SubsetByHruArgs::parse();

    let ids = read_id_list(&args.idfile)?;
    let dataset = read_dataset(&args.ncfile)?;

    let SubsetOutcome {
        mut dataset,
        missing,
    } = subset_by_id(&dataset, HRU_ID, &ids, false)?;

    dataset.prepend_history(&invocation_line());

    let file_name = args
        .ncfile
        .file_name()
        .ok_or("Input path has no file name")?;
    write_dataset(&dataset, &args.opath.join(file_name))?;

    print_missing(&missing);

    Ok(())
}
