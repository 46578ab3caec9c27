use std::error::Error;
use std::fs::File;
use std::future::Future;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use clap::Parser;
use git_diff_cut::reader::CancellableReader;
use git_diff_cut::{DiffCutOutput, DiffCutSettings};
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "review-backend",
    about = "Cut a line window with context out of a single-hunk git diff"
)]
struct Cli {
    #[arg(long, help = "Diff file (default: stdin)")]
    diff: Option<PathBuf>,
    #[arg(long, help = "First line of the window (1-based)")]
    line_start: u32,
    #[arg(long, help = "Count line_start in new-file numbering")]
    line_start_new: bool,
    #[arg(long, help = "Last line of the window (inclusive)")]
    line_end: u32,
    #[arg(long, help = "Count line_end in new-file numbering")]
    line_end_new: bool,
    #[arg(long, help = "Context lines before the window (overrides DIFF_CUT_BEFORE_LINES)")]
    before: Option<usize>,
    #[arg(long, help = "Context lines after the window (overrides DIFF_CUT_AFTER_LINES)")]
    after: Option<usize>,
    #[arg(long, help = "Safety cap on window lines (overrides DIFF_CUT_LINE_LIMIT)")]
    limit: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file when there is one.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,git_diff_cut=info"))?;

    // Logs go to stderr; stdout carries the JSON result.
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut settings = DiffCutSettings::from_env()?;
    if let Some(n) = cli.before {
        settings.before_lines = n;
    }
    if let Some(n) = cli.after {
        settings.after_lines = n;
    }
    if let Some(n) = cli.limit {
        settings.line_limit = n;
    }
    let params = settings.params(
        cli.line_start,
        cli.line_start_new,
        cli.line_end,
        cli.line_end_new,
    );

    let input: Box<dyn Read + Send> = match &cli.diff {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };

    let token = CancellationToken::new();
    let reader = BufReader::new(CancellableReader::new(input, token.clone()));
    let cutter = settings.cutter();
    let job = tokio::task::spawn_blocking(move || cutter.cut(reader, &params));

    let Some(res) = await_cut(job, tokio::signal::ctrl_c(), &token).await? else {
        warn!("interrupted, diff read cancelled");
        // The runtime would wait on a worker stuck in `read` when dropped.
        std::process::exit(130);
    };
    let (window, hunk) = res?;

    let output = DiffCutOutput::new(window, hunk);
    info!(
        window = %output.header,
        hunk = %output.lines_header,
        lines = output.lines.len(),
        "diff cut ready"
    );

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Waits for the cut job, or for `interrupt` to fire first.
///
/// On interrupt the token is cancelled and `None` is returned without
/// joining the job. Cancellation only takes effect between reads: a worker
/// blocked inside `read` (an idle stdin, say) stays blocked until the
/// source produces data or closes.
async fn await_cut<T>(
    mut job: JoinHandle<T>,
    interrupt: impl Future,
    token: &CancellationToken,
) -> Result<Option<T>, JoinError> {
    tokio::select! {
        res = &mut job => res.map(Some),
        _ = interrupt => {
            token.cancel();
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[tokio::test]
    async fn finished_job_is_returned() {
        let token = CancellationToken::new();
        let job = tokio::task::spawn_blocking(|| 7);

        let out = await_cut(job, std::future::pending::<()>(), &token).await.unwrap();
        assert_eq!(out, Some(7));
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn interrupt_does_not_wait_for_a_blocked_read() {
        let token = CancellationToken::new();
        let (release, blocked) = mpsc::channel::<()>();
        // Stands in for a worker parked inside `stdin.read()`.
        let job = tokio::task::spawn_blocking(move || blocked.recv().is_ok());

        let out = await_cut(job, async {}, &token).await.unwrap();
        assert_eq!(out, None);
        assert!(token.is_cancelled());

        // Let the worker finish so the test runtime can shut down.
        release.send(()).unwrap();
    }
}
