//! CLI library components for the ODA code tools.

pub mod logging;
pub mod retry;
pub mod tabular;
