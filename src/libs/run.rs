use anyhow::Context;

/// External binaries the Hi-C pipeline shells out to.
///
/// `3d-dna` and `juicebox_scripts` are invoked by relative path from the
/// working directory, so they are not checked here.
pub const HIC_BINS: &[&str] = &[
    "bwa",
    "samtools",
    "PreprocessSAMs.pl",
    "ALLHiC_partition",
    "allhic",
    "ALLHiC_build",
    "python",
];

/// External binaries the repeat-annotation pipeline shells out to.
pub const REPEAT_BINS: &[&str] = &[
    "BuildDatabase",
    "RepeatModeler",
    "EDTA.pl",
    "seqtk",
    "python",
    "RepeatMasker",
];

/// A single pipeline step: a display name plus the shell command to run.
///
/// The command is a plain `sh` command line, so redirections, pipes and
/// globs behave exactly as they would when typed into a shell.
///
/// ```
/// let step = apl::libs::run::Step::new("List", "ls -d /");
/// assert_eq!(step.name(), "List");
/// step.run().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Step {
    name: String,
    cmd: String,
}

impl Step {
    pub fn new(name: impl Into<String>, cmd: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cmd: cmd.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    /// Executes the command through `sh -c`, capturing stdout and stderr.
    ///
    /// A nonzero exit becomes an error carrying the captured stderr, so
    /// the caller can abort the remaining steps.
    pub fn run(&self) -> anyhow::Result<()> {
        let output = std::process::Command::new("sh")
            .arg("-c")
            .arg(&self.cmd)
            .output()
            .with_context(|| format!("failed to spawn `{}`", self.cmd))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "{} failed ({})\n  cmd: {}\n  stderr: {}",
                self.name,
                output.status,
                self.cmd,
                stderr.trim()
            );
        }

        Ok(())
    }
}

/// Runs steps in order, aborting on the first failure.
///
/// With `dry_run`, prints the numbered commands and executes nothing.
pub fn run_steps(steps: &[Step], dry_run: bool) -> anyhow::Result<()> {
    for (i, step) in steps.iter().enumerate() {
        if dry_run {
            println!("{:>2}\t{}\t{}", i + 1, step.name(), step.cmd());
            continue;
        }

        println!("==> Step {}: {}", i + 1, step.name());
        println!("    {}", step.cmd());
        step.run()?;
        println!("    {} completed successfully", step.name());
    }

    Ok(())
}

/// Bails if any of the binaries is missing from PATH.
pub fn check_installed(bins: &[&str]) -> anyhow::Result<()> {
    for bin in bins {
        if which::which(bin).is_err() {
            anyhow::bail!("{} not found in PATH. Please install it first.", bin);
        }
    }

    Ok(())
}
