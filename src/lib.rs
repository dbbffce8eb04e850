/// Budstech Admin - subscription administration console (TUI)
///
/// Credential-gated pages for managing subscriptions, reviewing
/// payments and a dashboard of revenue and plan statistics.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
