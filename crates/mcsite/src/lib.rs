//! mcsite - status checks and webhook delivery for a Minecraft network's
//! community site, driven from the command line.

pub mod cli;
pub mod telemetry;

pub use cli::{Cli, Command, run};
