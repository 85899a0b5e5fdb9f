pub mod commands;
pub mod ips;
pub mod profile;
pub mod project;
pub mod scan;
pub mod workers;

pub use commands::{Cli, Commands};

use crate::context::AppContext;
use crate::errors::FalcoriaError;

pub async fn dispatch(ctx: &AppContext, command: Commands) -> Result<(), FalcoriaError> {
    match command {
        Commands::Scan(command) => scan::handle_scan(ctx, command).await,
        Commands::Project(command) => project::handle_project(ctx, command).await,
        Commands::Profile(command) => profile::handle_profile(ctx, command).await,
        Commands::Workers(command) => workers::handle_workers(ctx, command).await,
    }
}
