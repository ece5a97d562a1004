extern crate clap;
use clap::*;

mod cmd_apl;

fn main() -> anyhow::Result<()> {
    let app = Command::new("apl")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`apl` - Assembly PipeLines")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_apl::hic::make_subcommand())
        .subcommand(cmd_apl::repeat::make_subcommand())
        .subcommand(cmd_apl::check::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* Pipelines:
    * hic    - Hi-C scaffolding: bwa, ALLHiC, juicebox scripts, 3d-dna
    * repeat - Repeat annotation: RepeatModeler, EDTA, DeepTE, RepeatMasker

* Utilities:
    * check - Report which required external binaries are on PATH

Each pipeline is a fixed sequence of external commands; the first nonzero
exit aborts the rest. `--dry-run` prints the commands without running them.

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("hic", sub_matches)) => cmd_apl::hic::execute(sub_matches),
        Some(("repeat", sub_matches)) => cmd_apl::repeat::execute(sub_matches),
        Some(("check", sub_matches)) => cmd_apl::check::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
