use tracing::info;

use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use ambertop::io;

/// Fully loads the topology; the loader rejects unknown flags, malformed
/// blocks and headers that disagree with the block data.
pub fn run(args: CheckArgs) -> Result<()> {
    info!("Validating {}.", args.input.display());
    let doc = io::read_from_path(&args.input).map_err(|source| CliError::Topology {
        path: args.input.clone(),
        source,
    })?;

    println!(
        "{}: {} atoms, {} residues, {} bonds, {} angles, {} dihedrals",
        args.input.display(),
        doc.atoms_num(),
        doc.residues_num(),
        doc.bonds_num(),
        doc.angles_num(),
        doc.dihedrals_num(),
    );
    Ok(())
}
