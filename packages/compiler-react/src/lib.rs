mod compiler;
mod context;

pub use compiler::{compile_to_react, style_key, CompileError};
pub use context::{CompileOptions, CompilerContext};

#[cfg(test)]
mod tests;
