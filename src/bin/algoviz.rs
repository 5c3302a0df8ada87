use std::io::Write as _;
use std::path::PathBuf;

use algoviz::backtracking::{Difficulty, Sudoku};
use algoviz::{
    AlgorithmId, AlgorithmInput, AlgorithmResult, CancellationToken, DEFAULT_SPEED, FnSink,
    PlaybackControl, RunOptions, RunRequest, RunStatus, RunnerConfig, Snapshot,
};
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "algoviz", version)]
struct Cli {
    /// Log engine events to stderr (`RUST_LOG` takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every algorithm id with its kind tag.
    List,
    /// Run a request JSON to completion and print the outcome as JSON.
    Run(RunArgs),
    /// Print a preset Sudoku board as a run request, or solve it.
    Sudoku(SudokuArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input run request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Playback speed, 0 (slowest) to 100 (fastest).
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    speed: u8,

    /// Sleep between steps the way an interactive viewer would.
    #[arg(long)]
    realtime: bool,

    /// Print every snapshot as one JSON line before the outcome.
    #[arg(long)]
    snapshots: bool,
}

#[derive(Parser, Debug)]
struct SudokuArgs {
    /// Which preset board.
    #[arg(long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Solve the board and print the filled grid instead of the request.
    #[arg(long)]
    solve: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Run(args) => cmd_run(args),
        Command::Sudoku(args) => cmd_sudoku(args),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "algoviz=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_list() -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    for id in AlgorithmId::ALL {
        writeln!(out, "{:<24} {}", id.as_str(), id.kind())?;
    }
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let request = RunRequest::from_path(&args.in_path)
        .with_context(|| format!("load run request '{}'", args.in_path.display()))?;
    let config = if args.realtime {
        RunnerConfig::default()
    } else {
        RunnerConfig::unpaced()
    };
    let playback = PlaybackControl::new(args.speed);

    let print = args.snapshots;
    let mut write_err: Option<serde_json::Error> = None;
    let mut sink = FnSink(|snapshot: Snapshot| {
        if !print || write_err.is_some() {
            return;
        }
        match serde_json::to_string(&snapshot) {
            Ok(line) => println!("{line}"),
            Err(e) => write_err = Some(e),
        }
    });

    let outcome = algoviz::run_blocking(
        &request,
        &mut sink,
        &config,
        playback.view(),
        CancellationToken::never(),
    )
    .with_context(|| format!("run {}", request.algorithm))?;
    if let Some(e) = write_err {
        return Err(e).context("serialize snapshot");
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&outcome).context("serialize outcome")?
    );
    if outcome.status == RunStatus::Aborted {
        anyhow::bail!(
            "{} aborted: {}",
            outcome.algorithm,
            outcome.error.as_deref().unwrap_or("unknown invariant")
        );
    }
    Ok(())
}

fn cmd_sudoku(args: SudokuArgs) -> anyhow::Result<()> {
    let request = RunRequest::new(
        AlgorithmId::SudokuSolver,
        AlgorithmInput::Sudoku {
            board: Some(Sudoku::preset(args.difficulty).values()),
        },
    )
    .with_options(RunOptions {
        difficulty: args.difficulty,
        ..RunOptions::default()
    });
    if !args.solve {
        println!("{}", request.to_json_pretty()?);
        return Ok(());
    }

    let config = RunnerConfig::unpaced().with_record_steps(false);

    let outcome = algoviz::run_blocking(
        &request,
        &mut algoviz::NullSink,
        &config,
        PlaybackControl::default().view(),
        CancellationToken::never(),
    )?;
    let Some(AlgorithmResult::Sudoku(result)) = outcome.result else {
        anyhow::bail!("sudoku run ended as {:?}", outcome.status);
    };

    let mut out = std::io::stdout().lock();
    match result.solution {
        Some(board) => {
            for row in board.values() {
                let line: Vec<String> = row.iter().map(u8::to_string).collect();
                writeln!(out, "{}", line.join(" "))?;
            }
            writeln!(out, "solved {} in {} steps", args.difficulty, result.steps_taken)?;
        }
        None => writeln!(out, "{} board has no solution", args.difficulty)?,
    }
    Ok(())
}
