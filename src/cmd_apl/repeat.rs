use crate::cmd_apl::echo_paths;
use apl::libs::run::{self, Step};
use clap::*;
use std::{env, fs};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("repeat")
        .about("Pipeline - repeat annotation with RepeatModeler, EDTA, DeepTE and RepeatMasker")
        .after_help(
            r###"
Fixed step sequence:
    1.  BuildDatabase          rmblast database from the genome
    2.  RepeatModeler          de novo repeat families (*-families.fa)
    3.  EDTA.pl                full EDTA annotation (*.mod.EDTA.TElib.fa)
    4.  grep | seqtk subseq    split the EDTA library into LTR/unknown
                               and known entries
    5.  DeepTE.py              classify the unknown LTRs (plants model)
    6.  sed                    rename DeepTE families to LTR/Copia,
                               LTR/Gypsy or LTR/unknown
    7.  cat                    merge classified and known LTRs, then add
                               the RepeatModeler families (repeat.lib.fa)
    8.  RepeatMasker           mask the genome with the merged library

* The `*.mod.EDTA.TElib.fa` and `*-families.fa` globs are expanded by
  the shell inside --outdir, so run each genome in its own directory
* DeepTE runs inside its conda environment (`conda activate DeepTE`)
* The first failing step aborts the pipeline with a nonzero exit
* --dry-run prints the commands without executing anything, and skips
  the PATH and input-file checks

Examples:
    apl repeat -g genome.fa -t 16 \
        -l EDTA/database/rice6.9.5.liban \
        -d ~/share/DeepTE \
        -p ~/share/DeepTE/models/Plants_model

    # Inspect the command sequence only
    apl repeat -g genome.fa -l curated.liban -d DeepTE -p Plants_model --dry-run

"###,
        )
        .arg(
            Arg::new("genome")
                .long("genome")
                .short('g')
                .required(true)
                .num_args(1)
                .help("Path to the genome file"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('t')
                .num_args(1)
                .default_value("4")
                .value_parser(value_parser!(usize))
                .help("Number of threads for RepeatModeler, EDTA and RepeatMasker"),
        )
        .arg(
            Arg::new("curatedlib")
                .long("curatedlib")
                .short('l')
                .required(true)
                .num_args(1)
                .help("Curated TE library passed to EDTA, e.g. rice6.9.5.liban"),
        )
        .arg(
            Arg::new("deepte_dir")
                .long("deepte_dir")
                .short('d')
                .required(true)
                .num_args(1)
                .help("DeepTE installation directory"),
        )
        .arg(
            Arg::new("plants_model_dir")
                .long("plants_model_dir")
                .short('p')
                .required(true)
                .num_args(1)
                .help("DeepTE plants model directory"),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .short('o')
                .num_args(1)
                .default_value(".")
                .help("Output location"),
        )
        .arg(
            Arg::new("dry_run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Print step commands without executing them"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let mut genome = args.get_one::<String>("genome").unwrap().to_string();
    let mut curatedlib = args.get_one::<String>("curatedlib").unwrap().to_string();
    let mut deepte_dir = args.get_one::<String>("deepte_dir").unwrap().to_string();
    let mut plants_model_dir = args
        .get_one::<String>("plants_model_dir")
        .unwrap()
        .to_string();

    let opt_threads = *args.get_one::<usize>("threads").unwrap();

    let outdir = args.get_one::<String>("outdir").unwrap();
    let is_dry = args.get_flag("dry_run");

    let curdir = env::current_dir()?;

    if !is_dry {
        run::check_installed(run::REPEAT_BINS)?;

        for infile in [&genome, &curatedlib] {
            if !std::path::Path::new(infile).is_file() {
                anyhow::bail!("input file not found: {}", infile);
            }
        }
        for dir in [&deepte_dir, &plants_model_dir] {
            if !std::path::Path::new(dir).is_dir() {
                anyhow::bail!("directory not found: {}", dir);
            }
        }

        genome = intspan::absolute_path(&genome)?.display().to_string();
        curatedlib = intspan::absolute_path(&curatedlib)?.display().to_string();
        deepte_dir = intspan::absolute_path(&deepte_dir)?.display().to_string();
        plants_model_dir = intspan::absolute_path(&plants_model_dir)?
            .display()
            .to_string();

        fs::create_dir_all(outdir)?;
        echo_paths(outdir)?;
        env::set_current_dir(outdir)?;
    }

    //----------------------------
    // Steps
    //----------------------------
    let steps = vec![
        Step::new(
            "Build database",
            format!("BuildDatabase -name {} -engine rmblast {}", genome, genome),
        ),
        Step::new(
            "RepeatModeler",
            format!("RepeatModeler -database {} -threads {}", genome, opt_threads),
        ),
        Step::new(
            "EDTA annotation",
            format!(
                "EDTA.pl --genome {} --species others --sensitive 1 --step all --anno 1 -t {} --force 1 --curatedlib {}",
                genome, opt_threads, curatedlib
            ),
        ),
        Step::new(
            "Extract unknown LTRs",
            "grep 'LTR/unknown' *.mod.EDTA.TElib.fa | sed 's/>//' | seqtk subseq *.mod.EDTA.TElib.fa - > LTR_unknown.fa",
        ),
        Step::new(
            "Extract known LTRs",
            "grep -v 'LTR/unknown' *.mod.EDTA.TElib.fa | sed 's/>//' | seqtk subseq *.mod.EDTA.TElib.fa - > LTR_known.fa",
        ),
        Step::new(
            "DeepTE classification",
            format!(
                "conda activate DeepTE && python {}/DeepTE.py -i LTR_unknown.fa -sp P -m_dir {} -fam LTR",
                deepte_dir, plants_model_dir
            ),
        ),
        Step::new(
            "Rename DeepTE families",
            r"sed 's/LTR\/unknown__ClassI_LTR_Copia/LTR\/Copia/' opt_DeepTE.fasta | sed 's/LTR\/unknown__ClassI_LTR_Gypsy/LTR\/Gypsy/' | sed 's/LTR\/unknown__ClassI_LTR/LTR\/unknown/' > LTR_unknown_DeepTE.fa",
        ),
        Step::new(
            "Merge LTR libraries",
            "cat LTR_unknown_DeepTE.fa LTR_known.fa > EDTA.TElib.fa",
        ),
        Step::new(
            "Merge repeat libraries",
            "cat EDTA.TElib.fa *-families.fa > repeat.lib.fa",
        ),
        Step::new(
            "RepeatMasker",
            format!(
                "RepeatMasker {} -lib repeat.lib.fa -poly -html -gff -pa {} -nolow -no_is -norna",
                genome, opt_threads
            ),
        ),
    ];

    run::run_steps(&steps, is_dry)?;

    //----------------------------
    // Done
    //----------------------------
    if !is_dry {
        env::set_current_dir(&curdir)?;
        println!("Repeat annotation pipeline completed successfully.");
    }

    Ok(())
}
