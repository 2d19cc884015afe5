use crate::config::{Config, Target};
use crate::export::write_staged;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_compiler_html::compile_to_html;
use pagecraft_compiler_react::{compile_to_react, CompileOptions as ReactOptions};
use pagecraft_editor::{Document, Mutation};
use pagecraft_model::{IDGenerator, NodeSnapshot};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// JSON file holding an array of editing commands
    pub script: PathBuf,

    /// Target format (html, react, json); repeatable, defaults to the config's `emit`
    #[arg(short, long, value_enum)]
    pub target: Vec<Target>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Fail on the first rejected command instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Node ids are generated as `<seed>-1`, `<seed>-2`, ...
    #[arg(long, default_value = "node")]
    pub seed: String,
}

/// Outcome of replaying a command script
#[derive(Debug)]
pub struct Replay {
    pub document: Document,
    pub applied: usize,
    pub rejected: usize,
}

pub fn build(args: BuildArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let script_path = PathBuf::from(cwd).join(&args.script);
    let mutations = load_script(&script_path)?;

    let replay = replay(&mutations, &args.seed, args.strict)?;
    if replay.rejected > 0 {
        eprintln!(
            "{} {} of {} commands were rejected",
            "⚠️".yellow(),
            replay.rejected,
            mutations.len()
        );
    }

    let targets = if args.target.is_empty() {
        config.emit.clone()
    } else {
        args.target.clone()
    };

    // Render everything before touching the output directory
    let snapshot = replay.document.snapshot();
    let outputs = targets
        .iter()
        .map(|target| Ok((*target, render(*target, &snapshot, &config)?)))
        .collect::<Result<Vec<_>>>()?;

    if args.stdout {
        for (_, output) in outputs {
            println!("{}", output);
        }
        return Ok(());
    }

    println!("{}", "🔨 Building page...".bright_blue().bold());

    let out_dir = config.get_out_dir(cwd, args.out_dir.as_deref());
    for (target, output) in outputs {
        let path = write_staged(&out_dir, target.file_name(), &output)?;
        println!("  {} {}", "✓".green(), path.display());
    }

    println!();
    println!(
        "{} Applied {} commands, {} nodes",
        "✅".green(),
        replay.applied,
        replay.document.len()
    );

    Ok(())
}

pub fn load_script(path: &Path) -> Result<Vec<Mutation>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Cannot read script {}", path.display()))?;
    Mutation::from_script(&source).with_context(|| format!("Invalid script {}", path.display()))
}

/// Apply `mutations` in order to a fresh document.
///
/// Rejected commands leave the document untouched; they are skipped with a
/// warning, or abort the replay when `strict` is set.
pub fn replay(mutations: &[Mutation], seed: &str, strict: bool) -> Result<Replay> {
    let mut document = Document::with_id_generator(IDGenerator::from_seed(seed.to_string()));
    let mut applied = 0;
    let mut rejected = 0;

    for (index, mutation) in mutations.iter().enumerate() {
        match document.apply(mutation.clone()) {
            Ok(result) => {
                applied += 1;
                debug!(
                    index,
                    command = mutation.name(),
                    version = result.version,
                    "Applied command"
                );
            }
            Err(err) if strict => {
                return Err(anyhow!(
                    "Command #{} ({}) failed: {}",
                    index + 1,
                    mutation.name(),
                    err
                ));
            }
            Err(err) => {
                rejected += 1;
                warn!(index, command = mutation.name(), error = %err, "Skipped command");
            }
        }
    }

    Ok(Replay {
        document,
        applied,
        rejected,
    })
}

fn render(target: Target, snapshot: &[NodeSnapshot], config: &Config) -> Result<String> {
    let output = match target {
        Target::Html => compile_to_html(snapshot, config.html_options())?,
        Target::React => compile_to_react(snapshot, ReactOptions::default())?,
        Target::Json => serde_json::to_string_pretty(snapshot)?,
    };
    Ok(output)
}
