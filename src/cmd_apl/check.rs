use apl::libs::run;
use clap::*;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("check")
        .about("Check that the required external binaries are on PATH")
        .after_help(
            r###"
Prints one line per required binary with its resolved path, or MISSING.
Exits nonzero when anything is missing.

Examples:
    apl check
    apl check --pipeline hic

"###,
        )
        .arg(
            Arg::new("pipeline")
                .long("pipeline")
                .num_args(1)
                .default_value("all")
                .value_parser(["hic", "repeat", "all"])
                .help("Which pipeline's binaries to check"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let opt_pipeline = args.get_one::<String>("pipeline").unwrap();

    let mut bins: Vec<&str> = vec![];
    if opt_pipeline == "hic" || opt_pipeline == "all" {
        bins.extend_from_slice(run::HIC_BINS);
    }
    if opt_pipeline == "repeat" || opt_pipeline == "all" {
        bins.extend_from_slice(run::REPEAT_BINS);
    }
    bins.sort_unstable();
    bins.dedup();

    let mut missing = 0;
    for bin in &bins {
        match which::which(bin) {
            Ok(path) => println!("{:<20} ok  {}", bin, path.display()),
            Err(_) => {
                println!("{:<20} MISSING", bin);
                missing += 1;
            }
        }
    }

    if missing > 0 {
        anyhow::bail!("{} of {} required binaries missing", missing, bins.len());
    }

    Ok(())
}
