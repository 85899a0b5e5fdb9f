use chrono::Utc;

use crate::cli::commands::WorkersCommand;
use crate::context::AppContext;
use crate::errors::FalcoriaError;
use crate::printer;

pub async fn handle_workers(ctx: &AppContext, command: WorkersCommand) -> Result<(), FalcoriaError> {
    match command {
        WorkersCommand::Ips => {
            let workers = ctx.tasker().await?.workers_ips().await?;
            if workers.is_empty() {
                printer::warning("No active workers reported.");
                return Ok(());
            }
            printer::success("Fetched external IP addresses of active workers.");
            printer::workers(&workers, Utc::now());
            printer::blank();
            printer::plain(format!("{} workers online.", workers.len()));
            Ok(())
        }
    }
}
