//! # Quest Runner
//!
//! Lowers every script of a directory and emits one JSON report per script.
//!
//! ## Architecture
//!
//! ```text
//! collect_scripts → (rayon) lower_file → ScriptReport → stdout | <out>/<script>.json
//! ```
//!
//! A script that fails to read, parse or assemble is logged and skipped; the
//! other scripts are unaffected.

pub mod cli;
pub mod discover;

use anyhow::{Context, Result};
use cli::Cli;
use config::constants::QuestConfig;
use discover::collect_scripts;
use quest_ast::visitor::collect_invocations;
use quest_ast::{lower_script, DocumentKind, PipelineRegistry, Printer, QuestModule, RenderMode, Statement};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

// =============================================================================
// REPORTS
// =============================================================================

/// JSON document emitted for one script.
#[derive(Debug, Serialize)]
pub struct ScriptReport {
    /// Script path relative to the scanned directory.
    pub script: String,
    pub kind: DocumentKind,
    pub biz_module: String,
    /// Rendered processes and functions, in name order.
    pub units: Vec<RenderedUnit>,
    pub module: QuestModule,
}

/// Rendered text of one process or function.
#[derive(Debug, Serialize)]
pub struct RenderedUnit {
    /// `process` or `function`.
    pub unit: &'static str,
    pub name: String,
    pub text: String,
    /// Number of invocation leaves in the body; calls inside primary text are not counted.
    pub calls: usize,
}

/// Outcome counts of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Lower one script file into its report.
pub fn lower_file(
    path: &Path,
    root: &Path,
    registry: &PipelineRegistry,
    config: &QuestConfig,
    mode: RenderMode,
) -> Result<ScriptReport> {
    let source = fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let module = lower_script(&source, registry, config).with_context(|| format!("cannot lower {}", path.display()))?;

    let printer = Printer::new(mode).with_config(config);
    let units = rendered_units(&module, &printer);
    let script = path.strip_prefix(root).unwrap_or(path).display().to_string();
    tracing::debug!(%script, kind = %module.kind(), units = units.len(), "lowered script");

    Ok(ScriptReport { script, kind: module.kind(), biz_module: module.biz_module().to_string(), units, module })
}

fn rendered_units(module: &QuestModule, printer: &Printer) -> Vec<RenderedUnit> {
    let Some(service) = module.as_service() else { return Vec::new() };

    let unit = |unit: &'static str, name: &str, children: &[Statement]| RenderedUnit {
        unit,
        name: name.to_string(),
        text: printer.print_all(children),
        calls: collect_invocations(children).len(),
    };

    let processes = service.processes.values().map(|p| unit("process", &p.name, &p.children));
    let functions = service.functions.values().map(|f| unit("function", &f.name, &f.children));
    processes.chain(functions).collect()
}

/// Run the CLI: lower every script of `cli.script_dir` and emit reports.
pub fn run(cli: &Cli) -> Result<Summary> {
    let config = cli.quest_config()?;
    let scripts = collect_scripts(&cli.script_dir)?;
    tracing::info!(dir = %cli.script_dir.display(), scripts = scripts.len(), %config, "lowering scripts");

    let registry = PipelineRegistry::standard();
    let mode = if cli.source { RenderMode::Source } else { RenderMode::Content };

    let results: Vec<(&PathBuf, Result<ScriptReport>)> = scripts
        .par_iter()
        .map(|path| (path, lower_file(path, &cli.script_dir, &registry, &config, mode)))
        .collect();

    if let Some(out) = &cli.out {
        fs::create_dir_all(out).with_context(|| format!("cannot create {}", out.display()))?;
    }

    let mut summary = Summary::default();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    for (path, result) in results {
        match result {
            Ok(report) => {
                match &cli.out {
                    Some(out) => {
                        write_report(out, &report)?;
                    }
                    None => {
                        serde_json::to_writer(&mut stdout, &report)?;
                        writeln!(stdout)?;
                    }
                }
                summary.succeeded += 1;
            }
            Err(error) => {
                tracing::error!(script = %path.display(), "{error:#}");
                summary.failed += 1;
            }
        }
    }

    tracing::info!(succeeded = summary.succeeded, failed = summary.failed, "done");
    Ok(summary)
}

/// Write `<out>/<script path>.json`, creating parent directories.
///
/// The script's own extension is kept, so `a.quest` and `a.ql` get separate reports.
pub fn write_report(out: &Path, report: &ScriptReport) -> Result<PathBuf> {
    let target = out.join(format!("{}.json", report.script));
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&target, json).with_context(|| format!("cannot write {}", target.display()))?;
    Ok(target)
}

// =============================================================================
// TESTS
// =============================================================================
