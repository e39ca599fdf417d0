pub mod shell;

pub use shell::{Report, Shell};
