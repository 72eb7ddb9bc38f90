use tracing::info;

use crate::cli::RewriteArgs;
use crate::error::{CliError, Result};
use ambertop::io;

pub fn run(args: RewriteArgs) -> Result<()> {
    info!(
        "Rewriting {} to {}.",
        args.input.display(),
        args.output.display()
    );
    let doc = io::read_from_path(&args.input).map_err(|source| CliError::Topology {
        path: args.input.clone(),
        source,
    })?;

    let written = if args.keep_date {
        io::write_to_path(&doc, &args.output)
    } else {
        io::write_dated_to_path(&doc, &args.output)
    };
    written.map_err(|source| CliError::Topology {
        path: args.output.clone(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambertop::Prmtop;

    #[test]
    fn rewrite_with_kept_date_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.prmtop");
        let output = dir.path().join("out.prmtop");

        let doc = Prmtop::dummy_from_atomic_numbers("rewrite test", &[8, 1, 1]).unwrap();
        io::write_to_path(&doc, &input).unwrap();

        run(RewriteArgs {
            input: input.clone(),
            output: output.clone(),
            keep_date: true,
        })
        .unwrap();

        let before = std::fs::read(&input).unwrap();
        let after = std::fs::read(&output).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn rewrite_stamps_a_fresh_date_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.prmtop");
        let output = dir.path().join("out.prmtop");

        let mut doc = Prmtop::dummy_from_atomic_numbers("rewrite test", &[6]).unwrap();
        doc.date_time = "01/01/90  00:00:00".to_string();
        io::write_to_path(&doc, &input).unwrap();

        run(RewriteArgs {
            input,
            output: output.clone(),
            keep_date: false,
        })
        .unwrap();

        let rewritten = io::read_from_path(&output).unwrap();
        assert_ne!(rewritten.date_time, "01/01/90  00:00:00");
    }
}
