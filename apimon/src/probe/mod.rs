//! プローブ実行と結果集計

pub mod aggregate;
pub mod runner;

pub use aggregate::{aggregate, format_failure};
pub use runner::ProbeRunner;
