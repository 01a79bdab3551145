use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Record one seizure from command-line values.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        when,
        duration,
        trigger,
        desc,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let id = AddLogic::apply(
            &mut pool,
            when,
            duration.as_deref(),
            trigger.as_deref(),
            desc.as_deref(),
            cfg,
        )?;

        success(format!("Seizure #{} recorded.", id));
    }

    Ok(())
}
