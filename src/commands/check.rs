//! `tagcheck check` command.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::cli::Format;
use crate::config::{Config, Options};
use crate::context::ServiceContext;
use crate::fix::fix_until_stable;
use crate::ports::filesystem::FileSystem;
use crate::registry::RegistrySet;
use crate::source::SourceText;
use crate::verify::{check_source, Diagnostic};

/// Extensions of files picked up when a directory is checked.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// What to check and how.
#[derive(Debug, Clone)]
pub struct CheckArgs {
    /// Files or directories given on the command line.
    pub paths: Vec<PathBuf>,
    /// Write fixed files back.
    pub fix: bool,
    /// Explicit config file.
    pub config: Option<PathBuf>,
    /// Vocabulary directory overriding the config.
    pub data_dir: Option<PathBuf>,
    /// Output format.
    pub format: Format,
}

/// Findings for one analyzed file.
#[derive(Debug)]
pub struct FileReport {
    /// Path as it was reached.
    pub path: PathBuf,
    /// The text the diagnostics refer to (after fixes, with `--fix`).
    pub source: SourceText,
    /// Problems still present.
    pub diagnostics: Vec<Diagnostic>,
    /// Fixes written back to the file.
    pub fixed: usize,
    /// Why the file could not be read or written back.
    pub error: Option<String>,
}

/// Execute the `check` command.
///
/// # Errors
///
/// Returns an error string if configuration cannot be loaded, a path does
/// not exist, or any problem remains. A file that cannot be read or written
/// back is reported and the remaining files are still checked.
pub async fn run(ctx: &ServiceContext, args: &CheckArgs) -> Result<(), String> {
    let mut config = match &args.config {
        Some(path) => Config::load(ctx.fs.as_ref(), path)?,
        None => Config::discover(ctx.fs.as_ref(), Path::new("."))?,
    };
    if let Some(dir) = &args.data_dir {
        config.data_dir = Some(dir.clone());
    }

    let files = collect_sources(ctx.fs.as_ref(), &args.paths)?;
    debug!(files = files.len(), data_dir = %config.data_dir().display(), "checking sources");

    let registries = Arc::new(config.registries(ctx.fs.clone()));
    let reports = analyze_all(&ctx.fs, files, registries, Arc::new(config.options), args.fix).await?;

    let mut problems = 0;
    let mut failures = 0;
    for report in &reports {
        problems += report.diagnostics.len();
        if let Some(error) = &report.error {
            failures += 1;
            eprintln!("{error}");
        }
        match args.format {
            Format::Text => {
                if report.fixed > 0 {
                    println!("{}: fixed {} problem(s)", report.path.display(), report.fixed);
                }
                for line in render_text(report) {
                    println!("{line}");
                }
            }
            Format::Json => {
                if !report.diagnostics.is_empty() || report.fixed > 0 || report.error.is_some() {
                    let json = serde_json::to_string(&JsonReport::from(report))
                        .map_err(|e| format!("Failed to serialize report: {e}"))?;
                    println!("{json}");
                }
            }
        }
    }

    match (problems, failures) {
        (0, 0) => Ok(()),
        (problems, 0) => Err(format!("{problems} problem(s) found")),
        (problems, failures) => {
            Err(format!("{problems} problem(s) found, {failures} file(s) could not be checked"))
        }
    }
}

/// Expands `paths` into the list of source files to check.
///
/// Directories are walked recursively for files with a
/// [`SOURCE_EXTENSIONS`] extension, skipping `node_modules` and hidden
/// directories. Files named explicitly are always included. A file reached
/// more than once is kept at its first position only.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be listed.
pub fn collect_sources(fs: &dyn FileSystem, paths: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();
    for path in paths {
        if fs.is_dir(path) {
            walk(fs, path, &mut files)?;
        } else if fs.exists(path) {
            files.push(path.clone());
        } else {
            return Err(format!("No such file or directory: {}", path.display()));
        }
    }
    let mut seen = HashSet::new();
    files.retain(|file| seen.insert(file.clone()));
    Ok(files)
}

fn walk(fs: &dyn FileSystem, dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries =
        fs.list_dir(dir).map_err(|e| format!("Failed to list {}: {e}", dir.display()))?;
    for name in entries {
        if name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_str()) {
            continue;
        }
        let child = if dir == Path::new(".") { PathBuf::from(&name) } else { dir.join(&name) };
        if fs.is_dir(&child) {
            walk(fs, &child, files)?;
        } else if has_source_extension(&child) {
            files.push(child);
        }
    }
    Ok(())
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Analyzes every file concurrently against one shared registry set.
/// Reports come back in input order; a file that fails carries its error
/// in its own report.
async fn analyze_all(
    fs: &Arc<dyn FileSystem>,
    files: Vec<PathBuf>,
    registries: Arc<RegistrySet>,
    options: Arc<Options>,
    fix: bool,
) -> Result<Vec<FileReport>, String> {
    let mut tasks = JoinSet::new();
    for (position, path) in files.into_iter().enumerate() {
        let fs = fs.clone();
        let registries = registries.clone();
        let options = options.clone();
        tasks.spawn(async move {
            (position, analyze_file(fs.as_ref(), path, &registries, &options, fix).await)
        });
    }

    let mut reports = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (position, report) = joined.map_err(|e| format!("Analysis task failed: {e}"))?;
        reports.push((position, report));
    }
    reports.sort_by_key(|(position, _)| *position);
    Ok(reports.into_iter().map(|(_, report)| report).collect())
}

async fn analyze_file(
    fs: &dyn FileSystem,
    path: PathBuf,
    registries: &RegistrySet,
    options: &Options,
    fix: bool,
) -> FileReport {
    let text = match fs.read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            let error = format!("Failed to read {}: {e}", path.display());
            warn!(path = %path.display(), "skipping unreadable source");
            return FileReport {
                path,
                source: SourceText::new(String::new()),
                diagnostics: Vec::new(),
                fixed: 0,
                error: Some(error),
            };
        }
    };

    let mut fixed = 0;
    let mut error = None;
    let source = if fix {
        let outcome = fix_until_stable(&text, registries, options).await;
        if outcome.applied == 0 {
            SourceText::new(outcome.text)
        } else if let Err(e) = fs.write(&path, &outcome.text) {
            warn!(path = %path.display(), "could not write fixes");
            error = Some(format!("Failed to write {}: {e}", path.display()));
            SourceText::new(text)
        } else {
            info!(path = %path.display(), applied = outcome.applied, "wrote fixes");
            fixed = outcome.applied;
            SourceText::new(outcome.text)
        }
    } else {
        SourceText::new(text)
    };

    let diagnostics = check_source(&source, registries, options).await;
    FileReport { path, source, diagnostics, fixed, error }
}

/// Renders one report as `path:line:col  message  [messageId]` lines, each
/// followed by its indented suggestions.
#[must_use]
pub fn render_text(report: &FileReport) -> Vec<String> {
    let mut lines = Vec::new();
    for diagnostic in &report.diagnostics {
        let at = report.source.position(diagnostic.range.start);
        lines.push(format!(
            "{}:{}:{}  {}  [{}]",
            report.path.display(),
            at.line,
            at.column,
            diagnostic.message,
            diagnostic.message_id
        ));
        for suggestion in &diagnostic.suggestions {
            lines.push(format!("    {}  [{}]", suggestion.message, suggestion.message_id));
        }
    }
    lines
}

#[derive(Serialize)]
struct JsonReport<'a> {
    path: String,
    fixed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    problems: Vec<JsonProblem<'a>>,
}

#[derive(Serialize)]
struct JsonProblem<'a> {
    line: usize,
    column: usize,
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
}

impl<'a> From<&'a FileReport> for JsonReport<'a> {
    fn from(report: &'a FileReport) -> Self {
        let problems = report
            .diagnostics
            .iter()
            .map(|diagnostic| {
                let at = report.source.position(diagnostic.range.start);
                JsonProblem { line: at.line, column: at.column, diagnostic }
            })
            .collect();
        Self {
            path: report.path.display().to_string(),
            fixed: report.fixed,
            error: report.error.as_deref(),
            problems,
        }
    }
}
