pub mod error;
pub mod flags;
pub mod shell;

pub mod path;
pub mod process;
pub mod syntax;
pub mod token;
