//! Hollow engine - CLI runner.
//!
//! ```text
//! hollow-engine <setup.json> [log-output.json]
//! hollow-engine --resume <record.json> [log-output.json]
//! ```
//!
//! Prints every pending instruction as one JSON line on stdout and reads one
//! `ResponseInput` JSON object per stdin line. Errors are printed as JSON and
//! the same instruction stays pending. On exit (game over or end of input)
//! the session record is written to the output path, or to stdout. A record
//! saved mid-game can be passed back with `--resume`.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hollow_engine::{
    load_record_file, load_setup_file, EngineError, GameEngine, ListenerRegistry, SessionObserver,
    TracingObserver,
};
use hollow_shared::{ModeratorInstruction, ResponseInput};

fn main() -> anyhow::Result<()> {
    // Load environment from repo root so HOLLOW_* overrides work from any cwd.
    load_dotenv_from_repo_root();

    // Logs go to stderr; stdout carries the protocol.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hollow_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut args = std::env::args().skip(1).peekable();
    let resume = args.next_if(|arg| arg == "--resume").is_some();
    let Some(input_path) = args.next().map(PathBuf::from) else {
        bail!("usage: hollow-engine [--resume] <setup.json|record.json> [log-output.json]");
    };
    let output = args.next().map(PathBuf::from);

    let observers: Vec<Box<dyn SessionObserver>> = vec![Box::new(TracingObserver)];
    let mut engine = if resume {
        let record = load_record_file(&input_path)
            .with_context(|| format!("loading {}", input_path.display()))?;
        GameEngine::resume(record, ListenerRegistry::standard(), observers)?
    } else {
        let setup = load_setup_file(&input_path)
            .with_context(|| format!("loading {}", input_path.display()))?;
        GameEngine::with_observers(setup, observers)?
    };

    tracing::info!("Starting Hollow engine");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    emit_pending(&mut out, engine.pending_instruction())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let input: ResponseInput = match serde_json::from_str(&line) {
            Ok(input) => input,
            Err(e) => {
                let report = json!({"error": "malformed_response", "message": e.to_string()});
                writeln!(out, "{}", report)?;
                continue;
            }
        };

        match engine.submit(input) {
            Ok(next) => emit_pending(&mut out, next)?,
            Err(e) => {
                writeln!(out, "{}", error_report(&e))?;
                if matches!(e, EngineError::Invariant(_) | EngineError::Poisoned) {
                    break;
                }
            }
        }
        if engine.session().is_finished() {
            break;
        }
    }

    write_record(&engine, output.as_deref(), &mut out)?;

    if engine.is_poisoned() {
        bail!("engine halted after an internal invariant violation");
    }
    if let Some(winner) = engine.session().winner() {
        tracing::info!(%winner, turn = engine.session().turn(), "Game over");
    }
    Ok(())
}

fn emit_pending(out: &mut impl Write, pending: Option<&ModeratorInstruction>) -> anyhow::Result<()> {
    if let Some(instruction) = pending {
        writeln!(out, "{}", serde_json::to_string(instruction)?)?;
    }
    Ok(())
}

fn error_report(error: &EngineError) -> serde_json::Value {
    let mut report = json!({
        "error": error.code(),
        "message": error.to_string(),
    });
    if let EngineError::Rule { violation, reissued } = error {
        report["violation"] = json!(violation);
        report["reissued"] = json!(reissued);
    }
    report
}

fn write_record(engine: &GameEngine, path: Option<&Path>, out: &mut impl Write) -> anyhow::Result<()> {
    let record = serde_json::to_string_pretty(&engine.session().record())?;
    match path {
        Some(path) => {
            std::fs::write(path, record).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "Session record written");
        }
        None => writeln!(out, "{}", record)?,
    }
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
