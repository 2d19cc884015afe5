pub mod build;
pub mod init;
pub mod resume;

pub use build::{build, BuildArgs};
pub use init::{init, InitArgs};
pub use resume::{resume, ResumeArgs};
