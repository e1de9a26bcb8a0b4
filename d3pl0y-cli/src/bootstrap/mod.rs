//! Bootstrap checks that run before the deploy touches anything

pub mod prereq;

pub use prereq::{BinaryCheck, PrereqResult, check_prerequisites};
