//! Command-line driver for the promptcraft engine.
//!
//! Drafts live in JSON files; every mutating subcommand rewrites the file in
//! place. The engine itself never touches the filesystem.
//!
//! # Examples
//!
//! ```sh
//! promptcraft templates
//! promptcraft init --template code-review -o review.json
//! promptcraft set review.json objective "Review the retry logic in the payments client."
//! promptcraft synthesize review.json
//! promptcraft apply review.json starter-context
//! promptcraft guardrail review.json --add "Flag any unsafe block."
//! promptcraft export review.json
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use promptcraft::prelude::*;
use tracing::{Level, debug, info};

/// Build, score, and refine structured AI prompts.
#[derive(Parser)]
#[command(name = "promptcraft", version)]
struct Cli {
    /// Catalog JSON file. Defaults to the built-in catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Scoring config JSON file. Missing fields keep their defaults.
    #[arg(long, global = true)]
    scoring: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the catalog's templates.
    Templates,
    /// Create a fresh draft.
    Init {
        /// Template id. Defaults to the catalog's first template.
        #[arg(long)]
        template: Option<String>,
        /// Write the draft here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Set one section's value.
    Set {
        draft: PathBuf,
        section: String,
        /// New value. Read from stdin when omitted.
        value: Option<String>,
    },
    /// Switch the draft to another template (section values are discarded).
    Select { draft: PathBuf, template: String },
    /// Reseed the draft from its current template.
    Reset { draft: PathBuf },
    /// Score the draft and print the prompt, metrics, and insights.
    Synthesize {
        draft: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Apply one of the draft's current improvements by id.
    Apply { draft: PathBuf, improvement: String },
    /// Append a custom section.
    AddSection {
        draft: PathBuf,
        label: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List, toggle, or add guardrails.
    Guardrail(SelectionArgs),
    /// List, toggle, or add success criteria.
    Criterion(SelectionArgs),
    /// Write the export document for the draft.
    Export {
        draft: PathBuf,
        /// Output file. Defaults to `<template>-prompt.json` in the current directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the JSON Schema of a wire format.
    Schema {
        #[arg(value_enum)]
        kind: SchemaKind,
    },
}

#[derive(Args)]
struct SelectionArgs {
    draft: PathBuf,
    /// Flip selection of this entry.
    #[arg(long, conflicts_with = "add")]
    toggle: Option<String>,
    /// Select a free-text entry.
    #[arg(long)]
    add: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Prompt,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaKind {
    Draft,
    Catalog,
    Result,
    Export,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<String, String> {
    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    let config = match &cli.scoring {
        Some(path) => ScoringConfig::load(path)?,
        None => ScoringConfig::default(),
    };
    let synth = Synthesizer::new(catalog, config);
    let catalog = synth.catalog();

    match cli.command {
        Command::Templates => Ok(render_templates(catalog)),
        Command::Init { template, output } => {
            let draft = Draft::new(catalog, template.as_deref())?;
            match output {
                Some(path) => {
                    save_draft(&path, &draft)?;
                    Ok(format!("Created {} ({})\n", path.display(), draft.template_id))
                }
                None => to_json(&draft),
            }
        }
        Command::Set {
            draft: path,
            section,
            value,
        } => {
            let mut draft = load_draft(&path)?;
            let value = match value {
                Some(v) => v,
                None => std::io::read_to_string(std::io::stdin())
                    .map_err(|e| format!("failed to read value from stdin: {e}"))?,
            };
            if !draft.set_section_value(&section, value) {
                return Err(format!("unknown section '{section}'"));
            }
            save_draft(&path, &draft)?;
            Ok(String::new())
        }
        Command::Select {
            draft: path,
            template,
        } => {
            let mut draft = load_draft(&path)?;
            draft.select_template(catalog, &template)?;
            save_draft(&path, &draft)?;
            Ok(format!("Switched to {template}\n"))
        }
        Command::Reset { draft: path } => {
            let mut draft = load_draft(&path)?;
            draft.reset(catalog)?;
            save_draft(&path, &draft)?;
            Ok(format!("Reset {}\n", path.display()))
        }
        Command::Synthesize {
            draft: path,
            format,
        } => {
            let draft = load_draft(&path)?;
            let result = synth.synthesize(&draft.sections, &draft.options);
            match format {
                OutputFormat::Text => Ok(render_result(&result)),
                OutputFormat::Json => to_json(&result),
                OutputFormat::Prompt => Ok(format!("{}\n", result.prompt)),
            }
        }
        Command::Apply {
            draft: path,
            improvement,
        } => {
            let mut draft = load_draft(&path)?;
            let result = synth.synthesize(&draft.sections, &draft.options);
            let found = result
                .improvements
                .iter()
                .find(|i| i.id == improvement)
                .ok_or_else(|| {
                    let ids: Vec<&str> =
                        result.improvements.iter().map(|i| i.id.as_str()).collect();
                    format!(
                        "no improvement '{improvement}' (available: {})",
                        if ids.is_empty() { "none".to_string() } else { ids.join(", ") }
                    )
                })?;
            if draft.apply_improvement(found) {
                save_draft(&path, &draft)?;
                info!("Applied {} to {}", found.id, found.target_section_id);
                Ok(format!("Applied '{}' to {}\n", found.title, found.target_section_id))
            } else {
                Ok(format!("{} already contains the snippet\n", found.target_section_id))
            }
        }
        Command::AddSection {
            draft: path,
            label,
            description,
        } => {
            let mut draft = load_draft(&path)?;
            if !draft.add_section(&label, &description) {
                return Err(format!("cannot add section '{label}': empty or duplicate id"));
            }
            save_draft(&path, &draft)?;
            Ok(String::new())
        }
        Command::Guardrail(args) => {
            let mut draft = load_draft(&args.draft)?;
            let changed = match (&args.toggle, &args.add) {
                (Some(entry), _) => {
                    draft.toggle_guardrail(entry);
                    true
                }
                (None, Some(entry)) => draft.add_guardrail(entry),
                (None, None) => false,
            };
            if changed {
                save_draft(&args.draft, &draft)?;
            }
            let available = draft.available_guardrails(catalog);
            Ok(render_selection(&available, &draft.options.guardrails))
        }
        Command::Criterion(args) => {
            let mut draft = load_draft(&args.draft)?;
            let changed = match (&args.toggle, &args.add) {
                (Some(entry), _) => {
                    draft.toggle_success_criterion(entry);
                    true
                }
                (None, Some(entry)) => draft.add_success_criterion(entry),
                (None, None) => false,
            };
            if changed {
                save_draft(&args.draft, &draft)?;
            }
            let available = draft.available_success_criteria(catalog);
            Ok(render_selection(&available, &draft.options.success_criteria))
        }
        Command::Export {
            draft: path,
            output,
        } => {
            let draft = load_draft(&path)?;
            let template = draft
                .template(catalog)
                .ok_or_else(|| format!("unknown template '{}'", draft.template_id))?;
            let result = synth.synthesize(&draft.sections, &draft.options);
            let exported_at =
                chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
            let export = PromptExport::new(template, &draft.sections, &draft.options, &result)
                .with_exported_at(exported_at);
            let output = output.unwrap_or_else(|| PathBuf::from(export.file_name()));
            std::fs::write(&output, export.to_json()?)
                .map_err(|e| format!("failed to write export '{}': {e}", output.display()))?;
            Ok(format!("Exported {}\n", output.display()))
        }
        Command::Schema { kind } => {
            let schema = match kind {
                SchemaKind::Draft => json_schema_for::<Draft>(),
                SchemaKind::Catalog => json_schema_for::<Catalog>(),
                SchemaKind::Result => json_schema_for::<SynthesisResult>(),
                SchemaKind::Export => json_schema_for::<PromptExport>(),
            };
            to_json(&schema)
        }
    }
}

fn load_draft(path: &Path) -> Result<Draft, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read draft '{}': {e}", path.display()))?;
    let draft: Draft = serde_json::from_str(&data)
        .map_err(|e| format!("failed to parse draft '{}': {e}", path.display()))?;
    debug!("Loaded draft {} ({} sections)", path.display(), draft.sections.len());
    Ok(draft)
}

fn save_draft(path: &Path, draft: &Draft) -> Result<(), String> {
    let json = to_json(draft)?;
    std::fs::write(path, json)
        .map_err(|e| format!("failed to write draft '{}': {e}", path.display()))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value)
        .map(|s| s + "\n")
        .map_err(|e| format!("failed to serialize JSON: {e}"))
}

fn render_templates(catalog: &Catalog) -> String {
    let width = catalog.templates.iter().map(|t| t.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for t in &catalog.templates {
        let _ = writeln!(out, "{:<width$}  {} [{}]", t.id, t.name, t.category);
        let _ = writeln!(out, "{:<width$}  {}", "", t.description);
    }
    out
}

fn render_selection(available: &[String], selected: &OrderedSet) -> String {
    let mut out = String::new();
    for entry in available {
        let mark = if selected.contains(entry) { 'x' } else { ' ' };
        let _ = writeln!(out, "[{mark}] {entry}");
    }
    out
}

fn bar(score: f64) -> String {
    let filled = ((score * 20.0).round() as usize).min(20);
    format!("{}{}", "#".repeat(filled), ".".repeat(20 - filled))
}

fn render_result(result: &SynthesisResult) -> String {
    let mut out = String::new();
    let m = &result.metrics;

    let _ = writeln!(out, "== Prompt ==\n");
    let _ = writeln!(out, "{}\n", result.prompt);

    let _ = writeln!(out, "== Scores ==\n");
    for (label, score) in m.dimensions() {
        let _ = writeln!(out, "{label:<12} {score:.2} {}", bar(score));
    }
    let _ = writeln!(out, "{:<12} {:.2} {}", "Overall", m.overall, bar(m.overall));
    let _ = writeln!(
        out,
        "\n{} words, ~{} tokens\n",
        m.word_count, m.estimated_tokens
    );

    let _ = writeln!(out, "== Insights ==\n");
    if result.insights.is_empty() {
        let _ = writeln!(out, "Looking sharp. No issues found.");
    }
    for insight in &result.insights {
        let target = insight
            .target_section_id
            .as_deref()
            .map(|t| format!(" ({t})"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "[{}] {}{target}: {}",
            insight.severity, insight.title, insight.detail
        );
    }

    if !result.improvements.is_empty() {
        let _ = writeln!(out, "\n== Improvements ==\n");
        for imp in &result.improvements {
            let _ = writeln!(out, "{}  {} -> {}", imp.id, imp.title, imp.target_section_id);
        }
    }

    if !result.keywords.is_empty() {
        let _ = writeln!(out, "\n== Keywords ==\n\n{}", result.keywords.join(", "));
    }
    out
}
