//! Resume page: a header block followed by one titled block per section,
//! in list order.

use crate::compiler::{compile_head, escape_html, CompileError, CompileOptions, Context};
use pagecraft_model::{EducationItem, ExperienceItem, HeaderData, Section, SectionData};
use tracing::debug;

const STYLESHEET: &[&str] = &[
    "body { font-family: sans-serif; color: #1F2937; }",
    ".resume { max-width: 800px; margin: 0 auto; padding: 1.5rem; }",
    ".resume-header { text-align: center; margin-bottom: 1.5rem; }",
    ".resume-section { margin-bottom: 1.5rem; }",
    ".resume-section h3 { border-bottom: 1px solid #D1D5DB; padding-bottom: 0.25rem; }",
    ".entry { margin-bottom: 1rem; }",
    ".entry-heading, .entry-meta { display: flex; justify-content: space-between; }",
    ".skills { display: flex; flex-wrap: wrap; gap: 0.5rem; list-style: none; padding: 0; }",
    ".skills li { padding: 0.25rem 0.75rem; background: #E5E7EB; border-radius: 9999px; }",
];

/// Compile resume sections to a standalone HTML page
pub fn compile_resume_to_html(
    sections: &[Section],
    options: CompileOptions,
) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(&mut ctx, Some(STYLESHEET));

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line("<main class=\"resume\">");
    ctx.indent();

    for section in sections {
        compile_section(section, &mut ctx);
    }

    ctx.dedent();
    ctx.add_line("</main>");
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    debug!(sections = sections.len(), "Compiled resume to HTML");
    Ok(ctx.get_output())
}

fn compile_section(section: &Section, ctx: &mut Context) {
    let class = match section.data {
        SectionData::Header(_) => "resume-header",
        _ => "resume-section",
    };
    ctx.add_line(&format!(
        "<section id=\"{}\" class=\"{}\">",
        escape_html(&section.id),
        class
    ));
    ctx.indent();

    match &section.data {
        SectionData::Header(header) => compile_header(header, ctx),
        SectionData::Summary { content } => {
            compile_title(section, ctx);
            ctx.add_line(&format!("<p>{}</p>", escape_html(content)));
        }
        SectionData::Experience { items } => {
            compile_title(section, ctx);
            for item in items {
                compile_experience(item, ctx);
            }
        }
        SectionData::Education { items } => {
            compile_title(section, ctx);
            for item in items {
                compile_education(item, ctx);
            }
        }
        SectionData::Skills { items } => {
            compile_title(section, ctx);
            ctx.add_line("<ul class=\"skills\">");
            ctx.indent();
            for skill in items {
                ctx.add_line(&format!("<li>{}</li>", escape_html(skill)));
            }
            ctx.dedent();
            ctx.add_line("</ul>");
        }
    }

    ctx.dedent();
    ctx.add_line("</section>");
}

fn compile_title(section: &Section, ctx: &mut Context) {
    ctx.add_line(&format!("<h3>{}</h3>", escape_html(&section.title)));
}

fn compile_header(header: &HeaderData, ctx: &mut Context) {
    ctx.add_line(&format!("<h1>{}</h1>", escape_html(&header.name)));
    ctx.add_line(&format!("<h2>{}</h2>", escape_html(&header.title)));

    let contact: Vec<String> = [&header.email, &header.phone, &header.address]
        .iter()
        .filter(|value| !value.is_empty())
        .map(|value| format!("<span>{}</span>", escape_html(value)))
        .collect();
    if !contact.is_empty() {
        ctx.add_line(&format!("<p class=\"contact\">{}</p>", contact.join(" &bull; ")));
    }
}

fn compile_experience(item: &ExperienceItem, ctx: &mut Context) {
    ctx.add_line("<div class=\"entry\">");
    ctx.indent();

    ctx.add_line(&format!(
        "<div class=\"entry-heading\"><h4>{}</h4><span>{} - {}</span></div>",
        escape_html(&item.job_title),
        escape_html(&item.start_date),
        escape_html(&item.end_date)
    ));
    ctx.add_line(&format!(
        "<div class=\"entry-meta\"><span>{}</span><span>{}</span></div>",
        escape_html(&item.company),
        escape_html(&item.location)
    ));
    if !item.description.is_empty() {
        ctx.add_line(&format!("<p>{}</p>", escape_html(&item.description)));
    }

    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_education(item: &EducationItem, ctx: &mut Context) {
    ctx.add_line("<div class=\"entry\">");
    ctx.indent();

    ctx.add_line(&format!(
        "<div class=\"entry-heading\"><h4>{}</h4><span>{}</span></div>",
        escape_html(&item.degree),
        escape_html(&item.year)
    ));
    ctx.add_line(&format!(
        "<div class=\"entry-meta\"><span>{}</span><span>{}</span></div>",
        escape_html(&item.institution),
        escape_html(&item.location)
    ));

    ctx.dedent();
    ctx.add_line("</div>");
}
