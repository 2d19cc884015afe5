use clap::ValueEnum;
use pagecraft_compiler_html::CompileOptions as HtmlOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Html,
    React,
    Json,
}

impl Target {
    /// File written into the output directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Target::Html => "index.html",
            Target::React => "Website.jsx",
            Target::Json => "document.json",
        }
    }
}

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory exports are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Page title of HTML exports
    #[serde(default = "default_title")]
    pub title: String,

    /// Formats `build` emits when no `--target` is given
    #[serde(default = "default_emit")]
    pub emit: Vec<Target>,

    #[serde(default)]
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    #[serde(default = "default_indent")]
    pub indent: String,
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_title() -> String {
    "Generated Website".to_string()
}

fn default_emit() -> Vec<Target> {
    vec![Target::Html]
}

fn default_pretty() -> bool {
    true
}

fn default_indent() -> String {
    "  ".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Output directory, `--out-dir` taking precedence over the config
    pub fn get_out_dir(&self, cwd: &str, out_dir: Option<&str>) -> PathBuf {
        PathBuf::from(cwd).join(out_dir.unwrap_or(&self.out_dir))
    }

    pub fn html_options(&self) -> HtmlOptions {
        HtmlOptions {
            pretty: self.html.pretty,
            indent: self.html.indent.clone(),
            title: self.title.clone(),
            ..HtmlOptions::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            title: default_title(),
            emit: default_emit(),
            html: HtmlConfig::default(),
        }
    }
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            indent: default_indent(),
        }
    }
}
