use tracing::info;

use crate::cli::InfoArgs;
use crate::error::{CliError, Result};
use ambertop::Metadata;
use ambertop::io;

pub fn run(args: InfoArgs) -> Result<()> {
    info!("Reading header summary from {}.", args.input.display());
    let metadata = io::read_metadata_from_path(&args.input).map_err(|source| {
        CliError::Topology {
            path: args.input.clone(),
            source,
        }
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    } else {
        print_summary(&metadata);
    }
    Ok(())
}

fn print_summary(metadata: &Metadata) {
    println!("version:                    {}", metadata.version);
    println!("date:                       {}", metadata.date_time);
    println!("atoms:                      {}", metadata.atoms_num);
    println!("residues:                   {}", metadata.residues_num);
    println!("largest residue:            {}", metadata.residue_max_len);
    println!("LJ types:                   {}", metadata.lj_types_num);
    println!("atom fftypes:               {}", metadata.atom_fftypes_num);
    println!(
        "bonds (with/without H):     {}/{}",
        metadata.bonds_with_hydrogen_num, metadata.bonds_without_hydrogen_num
    );
    println!(
        "angles (with/without H):    {}/{}",
        metadata.angles_with_hydrogen_num, metadata.angles_without_hydrogen_num
    );
    println!(
        "dihedrals (with/without H): {}/{}",
        metadata.dihedrals_with_hydrogen_num, metadata.dihedrals_without_hydrogen_num
    );
    println!("excluded atoms:             {}", metadata.excluded_atoms_num);
    println!("extra points:               {}", metadata.extra_points_num);
    println!("box:                        {}", metadata.box_kind.as_str());
    println!("solvent cap:                {}", metadata.solv_cap_kind.as_str());
    if let Some(slices) = metadata.pimd_slices_num {
        println!("PIMD slices:                {slices}");
    }
}
