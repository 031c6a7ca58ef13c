mod fixture;

use animagus::{CallResult, ExecutionOptions, Root, render_error, run_root};
use clap::Parser;
use fixture::Fixture;
use miette::{IntoDiagnostic, Result, miette};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Animagus - evaluate query ASTs against an in-memory cell set
#[derive(Parser, Debug)]
#[command(name = "animagus")]
#[command(about = "Evaluate the calls of an animagus root", long_about = None)]
struct Args {
    /// JSON fixture with `args`, `params`, `cells` and `root` (`-` reads stdin)
    #[arg(default_value = "-")]
    fixture: PathBuf,

    /// Only evaluate the call with this name
    #[arg(long)]
    call: Option<String>,

    /// Maximum evaluation depth
    #[arg(long, default_value_t = ExecutionOptions::default().max_depth)]
    max_depth: usize,

    /// Maximum number of list elements one REDUCE, MAP or FILTER may process
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Print each call's AST before evaluating it (for debugging)
    #[arg(long)]
    debug_ast: bool,
}

fn select_calls(root: Root, name: Option<&str>) -> Result<Root> {
    let Some(name) = name else {
        return Ok(root);
    };
    let selected: Root = root.calls.into_iter().filter(|call| call.name == name).collect();
    if selected.calls.is_empty() {
        return Err(miette!("no call named `{name}` in the fixture"));
    }
    Ok(selected)
}

/// Print one line per call; errors go to stderr. Returns whether every call succeeded.
fn report(results: &[CallResult], out: &mut dyn Write) -> Result<bool> {
    let mut ok = true;
    for CallResult { name, result } in results {
        match result {
            Ok(value) => writeln!(out, "{name} = {value}").into_diagnostic()?,
            Err(err) => {
                ok = false;
                writeln!(out, "{name} failed").into_diagnostic()?;
                render_error(err);
            }
        }
    }
    Ok(ok)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let fixture = Fixture::load(&args.fixture)?;
    let options = ExecutionOptions {
        max_depth: args.max_depth,
        max_iterations: args.max_iterations,
    };
    let env = fixture.environment(&options);
    let root = select_calls(fixture.root, args.call.as_deref())?;
    tracing::debug!(calls = root.calls.len(), cells = env.cells().len(), "fixture loaded");

    if args.debug_ast {
        for call in &root.calls {
            println!("=== {} ===", call.name);
            println!("{:#?}", call.result);
            println!();
        }
    }

    let results = run_root(&root, &env, &options);
    let ok = report(&results, &mut std::io::stdout().lock())?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
