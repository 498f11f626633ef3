use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tokio::task::JoinSet;

use crate::cli::Config;
use crate::labels::StatusLabels;
use crate::logging::READ_FAILURE_TARGET;
use crate::parse::AccessLogParser;
use crate::report;
use crate::source::{FileSource, LogSource};
use crate::stats::aggregate;

/// Result of running one source through parse → aggregate → report.
#[derive(Debug)]
pub enum FileOutcome {
    Reported { name: String, rows: usize, table: String },
    Failed { name: String, error: anyhow::Error },
}

impl FileOutcome {
    pub fn name(&self) -> &str {
        match self {
            FileOutcome::Reported { name, .. } | FileOutcome::Failed { name, .. } => name,
        }
    }
}

/// Application runtime: one independent pipeline per input, tables on stdout.
pub async fn run(config: Config) -> Result<()> {
    let parser = Arc::new(AccessLogParser::new()?);
    let labels = Arc::new(config.labels);
    let sources = config
        .inputs
        .into_iter()
        .map(|path| Box::new(FileSource::new(path)) as Box<dyn LogSource>);

    let out = Arc::new(Mutex::new(std::io::stdout()));
    let outcomes = run_sources(sources, parser, labels, out).await;

    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, FileOutcome::Failed { .. }))
        .count();
    tracing::debug!(files = outcomes.len(), failed, "all log files processed");
    // Unreadable files are reported individually and never fail the run.
    Ok(())
}

/// Spawn a task per source and wait for all of them. Each table is written to
/// `out` as soon as its own pipeline finishes, so tables appear in completion
/// order. The returned outcomes are in input order.
pub async fn run_sources<W>(
    sources: impl IntoIterator<Item = Box<dyn LogSource>>,
    parser: Arc<AccessLogParser>,
    labels: Arc<StatusLabels>,
    out: Arc<Mutex<W>>,
) -> Vec<FileOutcome>
where
    W: Write + Send + 'static,
{
    let mut tasks = JoinSet::new();
    for (index, source) in sources.into_iter().enumerate() {
        let parser = Arc::clone(&parser);
        let labels = Arc::clone(&labels);
        let out = Arc::clone(&out);
        tasks.spawn(async move {
            let outcome = process_file(source.as_ref(), &parser, &labels).await;
            emit(&outcome, &out);
            (index, outcome)
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(done) => outcomes.push(done),
            Err(err) => tracing::error!("log file task aborted: {err}"),
        }
    }
    outcomes.sort_by_key(|(index, _)| *index);
    outcomes.into_iter().map(|(_, outcome)| outcome).collect()
}

/// Read one source and build its summary table. Never fails: a read error
/// becomes `FileOutcome::Failed`.
pub async fn process_file(
    source: &dyn LogSource,
    parser: &AccessLogParser,
    labels: &StatusLabels,
) -> FileOutcome {
    let name = source.name();
    let text = match source.read_all().await {
        Ok(text) => text,
        Err(error) => return FileOutcome::Failed { name, error },
    };

    let counts = aggregate(parser.parse(&text));
    let lines = text.lines().count();
    tracing::debug!(
        path = %name,
        lines,
        matched = counts.total(),
        codes = counts.len(),
        "parsed log file"
    );

    let rows = report::rows(&counts, labels);
    let table = report::render(&name, &rows);
    FileOutcome::Reported {
        name,
        rows: rows.len(),
        table,
    }
}

fn emit<W: Write>(outcome: &FileOutcome, out: &Mutex<W>) {
    match outcome {
        FileOutcome::Reported { name, table, .. } => {
            let mut out = out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Err(err) = out.write_all(table.as_bytes()).and_then(|_| out.flush()) {
                tracing::warn!(path = %name, "failed to write report: {err}");
            }
        }
        FileOutcome::Failed { name, error } => {
            tracing::error!(
                target: READ_FAILURE_TARGET,
                path = %name,
                "error reading the log file: {error:#}"
            );
        }
    }
}
