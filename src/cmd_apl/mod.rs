//! Subcommand modules for the `apl` binary.

use cmd_lib::run_cmd;

pub mod check;
pub mod hic;
pub mod repeat;

// Pipeline preamble shared by `hic` and `repeat`
pub(crate) fn echo_paths(outdir: &str) -> anyhow::Result<()> {
    let curdir = std::env::current_dir()?;

    run_cmd!(echo "==> Paths")?;
    run_cmd!(echo "    \"curdir\" = ${curdir:?}")?;
    run_cmd!(echo "    \"outdir\" = ${outdir}")?;

    Ok(())
}
