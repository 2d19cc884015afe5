//! # Pagecraft HTML Compiler
//!
//! Turns document snapshots and resume sections into standalone HTML pages.

mod compiler;
mod resume;


pub use compiler::{compile_to_html, css_property_name, CompileError, CompileOptions};
pub use resume::compile_resume_to_html;
