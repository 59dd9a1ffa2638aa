pub mod prompts;
pub mod tools;

pub use prompts::*;
pub use tools::*;
