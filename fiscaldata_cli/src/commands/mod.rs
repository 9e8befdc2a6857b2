//! CLI subcommand implementations.

pub mod avg_interest;
pub mod debt_limit;
