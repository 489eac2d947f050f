//! Entry point for the subset-by-id tool.
//! Subsets a NetCDF file to the records whose identifier variable value is
//! listed in an ID file, then reports any IDs that were not found.

use clap::Parser;
use nc_subset::cli::{invocation_line, SubsetByIdArgs};
use nc_subset::netcdf_io::{read_dataset, write_dataset};
use nc_subset::subset::{print_missing, read_id_list, subset_by_id, SubsetOutcome};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = SubsetByIdArgs::parse();

    let ids = read_id_list(&args.idfile)?;
    let dataset = read_dataset(&args.ncfile)?;

    let SubsetOutcome {
        mut dataset,
        missing,
    } = subset_by_id(&dataset, &args.id, &ids, args.drop)?;

    dataset.prepend_history(&invocation_line());
    write_dataset(&dataset, &args.ofile)?;

    print_missing(&missing);

    Ok(())
}
