use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

const PACKAGE: &str = "nes-core";

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for nes-core")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy on every target with warnings denied
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the library
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run unit and integration tests
    Test {
        /// Only doc tests
        #[arg(long)]
        doc: bool,
        /// Only tests whose path contains this filter (e.g. "ppu", "cpu::tests")
        #[arg(long)]
        filter: Option<String>,
    },
    /// Run criterion benchmarks
    Bench {
        /// Run only this bench target (cpu_bench or ppu_bench)
        bench: Option<String>,
    },
    /// Compare the CPU trace against nestest.log
    Nestest {
        #[arg(long)]
        rom: Option<PathBuf>,
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Run the 6502 functional test binary
    Functional {
        /// Path to 6502_functional_test.bin
        binary: PathBuf,
        /// Success trap address in hex when the build differs from the default
        #[arg(long)]
        success: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test { doc, filter } => run_test(doc, filter.as_deref()),
        Commands::Bench { bench } => run_bench(bench.as_deref()),
        Commands::Nestest { rom, log } => run_nestest(rom, log),
        Commands::Functional { binary, success } => run_functional(binary, success),
    }
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;
    run_task("Build", || run_build(false), verbose)?;
    run_task("Test", || run_test(false, None), verbose)?;

    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );

    Ok(())
}

fn cargo(subcommand: &str) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.arg(subcommand);
    cmd
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = cargo("fmt");
    cmd.arg("--all");

    if check {
        cmd.args(["--", "--check"]);
    }

    execute_command(&mut cmd)
}

fn run_clippy(fix: bool) -> Result<()> {
    let mut cmd = cargo("clippy");
    cmd.args(["--workspace", "--all-targets"]);

    if fix {
        cmd.args(["--fix", "--allow-dirty"]);
    } else {
        cmd.args(["--", "-D", "warnings"]);
    }

    execute_command(&mut cmd)
}

fn run_build(release: bool) -> Result<()> {
    let mut cmd = cargo("build");
    cmd.args(["-p", PACKAGE]);

    if release {
        cmd.arg("--release");
    }

    execute_command(&mut cmd)
}

fn run_test(doc: bool, filter: Option<&str>) -> Result<()> {
    let mut cmd = cargo("test");
    cmd.args(["-p", PACKAGE]);

    if doc {
        cmd.arg("--doc");
    }
    if let Some(filter) = filter {
        cmd.arg(filter);
    }

    execute_command(&mut cmd)
}

fn run_bench(bench: Option<&str>) -> Result<()> {
    let mut cmd = cargo("bench");
    cmd.args(["-p", PACKAGE]);

    if let Some(bench) = bench {
        cmd.args(["--bench", bench]);
    }

    execute_command(&mut cmd)
}

fn run_nestest(rom: Option<PathBuf>, log: Option<PathBuf>) -> Result<()> {
    println!("{}", "=== nestest ===".bold().blue());

    let mut cmd = cargo("test");
    cmd.args(["-p", PACKAGE, "--release", "--test", "nestest"]);

    for (var, path) in [("NESTEST_ROM", rom), ("NESTEST_LOG", log)] {
        if let Some(path) = path {
            require_file(&path)?;
            println!("{} {}: {}", "→".blue(), var, path.display().to_string().cyan());
            cmd.env(var, path);
        }
    }

    cmd.args(["--", "--ignored", "--nocapture"]);
    timed(|| execute_command(&mut cmd))
}

fn run_functional(binary: PathBuf, success: Option<String>) -> Result<()> {
    println!("{}", "=== 6502 functional test ===".bold().blue());

    require_file(&binary)?;
    println!(
        "{} Binary: {}",
        "✓".green(),
        binary.display().to_string().cyan()
    );

    let mut cmd = cargo("test");
    cmd.args(["-p", PACKAGE, "--release", "--test", "functional_test"])
        .env("NES_FUNCTIONAL_TEST_ROM", &binary);

    if let Some(success) = success {
        println!("{} Success trap: ${}", "→".blue(), success.bold());
        cmd.env("NES_FUNCTIONAL_TEST_SUCCESS", success);
    }

    cmd.args(["--", "--ignored", "--nocapture"]);
    timed(|| execute_command(&mut cmd))
}

fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        println!(
            "{} File not found: {}",
            "✗".red().bold(),
            path.display().to_string().yellow()
        );
        bail!("missing input file {}", path.display());
    }
    Ok(())
}

fn timed<F>(task: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    let start = Instant::now();
    task()?;
    println!(
        "\n{} {}",
        "✓ Completed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);

    let start = Instant::now();

    match task() {
        Ok(_) => {
            let elapsed = if verbose {
                format!("({:.2}s)", start.elapsed().as_secs_f64())
            } else {
                String::new()
            };
            println!("{} {}", "✓".green().bold(), elapsed);
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗".red().bold());
            Err(e)
        }
    }
}

fn execute_command(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        bail!("Command failed with exit code: {}", status);
    }

    Ok(())
}
