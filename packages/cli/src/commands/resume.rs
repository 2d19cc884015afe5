use crate::config::Config;
use crate::export::write_staged;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_compiler_html::compile_resume_to_html;
use pagecraft_editor::SectionStore;
use pagecraft_model::{Section, SectionData};
use std::fs;
use std::path::PathBuf;

const RESUME_FILE_NAME: &str = "resume.html";

#[derive(Debug, Args)]
pub struct ResumeArgs {
    /// JSON file holding the resume sections (defaults to the sample resume)
    pub sections: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

pub fn resume(args: ResumeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = load_sections(args.sections.as_ref().map(|path| PathBuf::from(cwd).join(path)))?;

    let mut options = config.html_options();
    if let Some(name) = header_name(store.sections()) {
        options.title = format!("{} - Resume", name);
    }
    let html = compile_resume_to_html(store.sections(), options)?;

    if args.stdout {
        println!("{}", html);
        return Ok(());
    }

    let out_dir = config.get_out_dir(cwd, args.out_dir.as_deref());
    let path = write_staged(&out_dir, RESUME_FILE_NAME, &html)?;
    println!(
        "{} Exported {} sections → {}",
        "✅".green(),
        store.len(),
        path.display()
    );

    Ok(())
}

/// Sections from `path`, validated through the store, or the sample resume
fn load_sections(path: Option<PathBuf>) -> Result<SectionStore> {
    let mut store = SectionStore::seeded();

    if let Some(path) = path {
        let source = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read sections {}", path.display()))?;
        let sections: Vec<Section> = serde_json::from_str(&source)
            .with_context(|| format!("Invalid sections {}", path.display()))?;
        store.set_all(sections)?;
    }

    Ok(store)
}

fn header_name(sections: &[Section]) -> Option<&str> {
    sections.iter().find_map(|section| match &section.data {
        SectionData::Header(header) if !header.name.is_empty() => Some(header.name.as_str()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_exports_seed() {
        let dir = tempfile::tempdir().unwrap();

        resume(
            ResumeArgs {
                sections: None,
                out_dir: None,
                stdout: false,
            },
            dir.path().to_str().unwrap(),
        )
        .unwrap();

        let html = fs::read_to_string(dir.path().join("dist").join(RESUME_FILE_NAME)).unwrap();
        assert!(html.contains("<title>John Doe - Resume</title>"));
        assert!(html.contains("<h3>Skills</h3>"));
    }

    #[test]
    fn test_resume_reads_sections_file() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"[
            { "id": "s1", "type": "skills", "title": "Tools", "data": { "items": ["Rust", "SQL"] } },
            { "id": "s2", "type": "summary", "title": "About", "data": { "content": "Hi" } }
        ]"#;
        fs::write(dir.path().join("sections.json"), json).unwrap();

        let store = load_sections(Some(dir.path().join("sections.json"))).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.sections()[0].title, "Tools");
        assert_eq!(header_name(store.sections()), None);
    }

    #[test]
    fn test_resume_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"[
            { "id": "s1", "type": "summary", "title": "A", "data": { "content": "a" } },
            { "id": "s1", "type": "summary", "title": "B", "data": { "content": "b" } }
        ]"#;
        fs::write(dir.path().join("sections.json"), json).unwrap();

        assert!(load_sections(Some(dir.path().join("sections.json"))).is_err());
    }
}
