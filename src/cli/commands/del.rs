use crate::cli::commands::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let existing = DeleteLogic::find(&mut pool, *id)?;
        let prompt = format!(
            "Delete seizure #{} ({}, {})? This action is irreversible.",
            id,
            existing.record.date_time_str(),
            existing.record.trigger
        );

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        DeleteLogic::apply(&mut pool, *id)?;
        success(format!("Seizure #{} has been deleted.", id));
    }

    Ok(())
}
