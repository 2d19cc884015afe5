use crate::config::{Config, Target, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

const EXAMPLE_SCRIPT_NAME: &str = "page.json";

/// Heading plus a two-column row, ids following the default `node` seed
const EXAMPLE_SCRIPT: &str = r##"[
  { "AddNode": { "kind": "heading" } },
  { "UpdateNode": { "node_id": "node-1", "patch": { "content": "Welcome" } } },
  { "AddNode": { "kind": "columns" } },
  { "UpdateNode": { "node_id": "node-3", "patch": { "content": "Left" } } },
  { "UpdateNode": { "node_id": "node-4", "patch": { "content": "Right" } } },
  { "AddNode": { "kind": "button" } },
  { "SetNodeStyle": { "node_id": "node-5", "property": "backgroundColor", "value": "#111827" } }
]
"##;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Formats to emit (html, react, json); defaults to html
    #[arg(short, long, value_enum)]
    pub target: Vec<Target>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Pagecraft project...".bright_blue().bold()
    );

    let mut config = Config::default();
    if !args.target.is_empty() {
        config.emit = args.target;
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let example_file = PathBuf::from(cwd).join(EXAMPLE_SCRIPT_NAME);
    if !example_file.exists() {
        fs::write(&example_file, EXAMPLE_SCRIPT)?;
        println!("  {} Created {}", "✓".green(), EXAMPLE_SCRIPT_NAME);
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", EXAMPLE_SCRIPT_NAME);
    println!("  2. Run: pagecraft build {}", EXAMPLE_SCRIPT_NAME);
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}
