//! CLI subcommand implementations.

pub mod attendance;
pub mod contacts;
pub mod journals;
pub mod locations;
pub mod record;
pub mod util;
