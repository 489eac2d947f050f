//! Entry point for the add-identifier tool.
//! Copies the gruId variable from a donor attribute file into another
//! NetCDF file and writes the combined result.

use clap::Parser;
use nc_subset::cli::{invocation_line, AddIdentifierArgs};
use nc_subset::errors::NcSubsetError;
use nc_subset::netcdf_io::{read_dataset, write_dataset};

const GRU_ID: &str = "gruId";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = AddIdentifierArgs::parse();

    let mut target = read_dataset(&args.input_file)?;
    let donor = read_dataset(&args.gruid_file)?;

    // Positional alignment along the gru dimension is assumed, not checked;
    // only the dimension length is validated on insert.
    let gru_id = donor
        .variable(GRU_ID)
        .ok_or_else(|| NcSubsetError::VariableNotFound {
            var: GRU_ID.to_string(),
        })?
        .clone();
    target.insert_variable(gru_id)?;

    target.prepend_history(&invocation_line());
    write_dataset(&target, &args.output_file)?;

    Ok(())
}
