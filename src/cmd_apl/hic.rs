use crate::cmd_apl::echo_paths;
use apl::libs::run::{self, Step};
use clap::*;
use std::{env, fs};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("hic")
        .about("Pipeline - Hi-C scaffolding with bwa, ALLHiC, juicebox scripts and 3d-dna")
        .after_help(
            r###"
Fixed step sequence:
    1.  bwa index              index the genome
    2.  samtools faidx         create the .fai file
    3.  bwa mem                align the paired Hi-C reads
    4.  PreprocessSAMs.pl      filter the SAM file
    5.  samtools view          convert to a clean BAM
    6.  ALLHiC_partition       partition contigs into groups
    7.  allhic extract         extract CLM and RE frequencies
    8.  allhic optimize        order/orient each group (one run per group)
    9.  ALLHiC_build           build groups.asm.fasta and groups.agp
    10. agp2assembly.py        convert groups.agp to a .assembly file
    11. run-assembly-visualizer.sh
                               generate the .hic file from merged_nodups

* All intermediate and final files land in --outdir; input paths are
  resolved to absolute paths first
* `juicebox_scripts/` and `3d-dna/` must be present under --outdir, as
  the last two steps call them by relative path
* The first failing step aborts the pipeline with a nonzero exit
* --dry-run prints the commands without executing anything, and skips
  the PATH and input-file checks

Examples:
    # Chromosome-level scaffolding with 11 groups
    apl hic -g genome.fa --fq1 hic_1.fq.gz --fq2 hic_2.fq.gz \
        -m merged_nodups.txt -t 32

    # HindIII-digested library, 8 pseudo-chromosomes
    apl hic -g genome.fa --fq1 hic_1.fq.gz --fq2 hic_2.fq.gz \
        -m merged_nodups.txt -k 8 -e AAGCTT --enzyme HINDIII

    # Inspect the command sequence only
    apl hic -g genome.fa --fq1 r1.fq --fq2 r2.fq -m mnd.txt --dry-run

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
            Arg::new("fq1")
                .long("fq1")
                .required(true)
                .num_args(1)
                .help("Paired Hi-C reads, mate 1"),
        )
        .arg(
            Arg::new("fq2")
                .long("fq2")
                .required(true)
                .num_args(1)
                .help("Paired Hi-C reads, mate 2"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('t')
                .num_args(1)
                .default_value("64")
                .value_parser(value_parser!(usize))
                .help("Number of threads for bwa and samtools"),
        )
        .arg(
            Arg::new("merged_nodups")
                .long("merged_nodups")
                .short('m')
                .required(true)
                .num_args(1)
                .help("merged_nodups.txt produced by juicer"),
        )
        .arg(
            Arg::new("groups")
                .long("groups")
                .short('k')
                .num_args(1)
                .default_value("11")
                .value_parser(value_parser!(usize))
                .help("Number of partition groups (expected chromosomes)"),
        )
        .arg(
            Arg::new("site")
                .long("site")
                .short('e')
                .num_args(1)
                .default_value("GATC")
                .help("Restriction site for ALLHiC_partition and allhic extract"),
        )
        .arg(
            Arg::new("enzyme")
                .long("enzyme")
                .num_args(1)
                .default_value("MBOI")
                .help("Enzyme name passed to PreprocessSAMs.pl"),
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
    let mut fq1 = args.get_one::<String>("fq1").unwrap().to_string();
    let mut fq2 = args.get_one::<String>("fq2").unwrap().to_string();
    let mut merged = args.get_one::<String>("merged_nodups").unwrap().to_string();

    let opt_threads = *args.get_one::<usize>("threads").unwrap();
    let opt_groups = *args.get_one::<usize>("groups").unwrap();
    let opt_site = args.get_one::<String>("site").unwrap();
    let opt_enzyme = args.get_one::<String>("enzyme").unwrap();

    let outdir = args.get_one::<String>("outdir").unwrap();
    let is_dry = args.get_flag("dry_run");

    let curdir = env::current_dir()?;

    if !is_dry {
        run::check_installed(run::HIC_BINS)?;

        for infile in [&genome, &fq1, &fq2, &merged] {
            if !std::path::Path::new(infile).is_file() {
                anyhow::bail!("input file not found: {}", infile);
            }
        }

        genome = intspan::absolute_path(&genome)?.display().to_string();
        fq1 = intspan::absolute_path(&fq1)?.display().to_string();
        fq2 = intspan::absolute_path(&fq2)?.display().to_string();
        merged = intspan::absolute_path(&merged)?.display().to_string();

        fs::create_dir_all(outdir)?;
        echo_paths(outdir)?;
        env::set_current_dir(outdir)?;
    }

    //----------------------------
    // Steps
    //----------------------------
    let mut steps = vec![
        Step::new("Index genome", format!("bwa index {}", genome)),
        Step::new("Create .fai file", format!("samtools faidx {}", genome)),
        Step::new(
            "Alignment",
            format!(
                "bwa mem -t {} {} {} {} > bwa.aln.sam",
                opt_threads, genome, fq1, fq2
            ),
        ),
        Step::new(
            "Filter SAM file",
            format!("PreprocessSAMs.pl bwa.aln.sam {} {}", genome, opt_enzyme),
        ),
        Step::new(
            "Convert SAM to BAM",
            format!(
                "samtools view -@ {} -bt {}.fai bwa.aln.REduced.paired_only.bam > allhic.clean.bam",
                opt_threads, genome
            ),
        ),
        Step::new(
            "Partition",
            format!(
                "ALLHiC_partition -b allhic.clean.bam -r {} -e {} -k {}",
                genome, opt_site, opt_groups
            ),
        ),
        Step::new(
            "Extract CLM",
            format!("allhic extract allhic.clean.bam {} --RE {}", genome, opt_site),
        ),
    ];

    // One optimize run per partition group; counts filenames follow the
    // ALLHiC_partition naming convention
    for i in 1..=opt_groups {
        steps.push(Step::new(
            format!("Optimize group {}", i),
            format!(
                "allhic optimize allhic.clean.counts_{}.{}g{}.txt allhic.clean.clm",
                opt_site, opt_groups, i
            ),
        ));
    }

    steps.push(Step::new(
        "Build final results",
        format!("ALLHiC_build {}", genome),
    ));
    steps.push(Step::new(
        "Generate assembly file",
        "python juicebox_scripts/agp2assembly.py groups.agp allhic.assembly",
    ));
    steps.push(Step::new(
        "Generate Hi-C file",
        format!(
            "3d-dna/visualize/run-assembly-visualizer.sh -p false allhic.assembly {}",
            merged
        ),
    ));

    run::run_steps(&steps, is_dry)?;

    //----------------------------
    // Done
    //----------------------------
    if !is_dry {
        env::set_current_dir(&curdir)?;
        println!("ALLHiC pipeline completed successfully.");
    }

    Ok(())
}
