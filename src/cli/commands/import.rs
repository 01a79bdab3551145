use crate::cli::commands::ask_confirmation;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::core::review::{render_batch, render_failures, render_outcome};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::formatting::parse_row_list;

/// Stage an import, show it for review, then commit what the user keeps.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import {
        file,
        dry_run,
        yes,
        exclude,
        year,
    } = cmd
    {
        let text = ImportLogic::read_input(file.as_deref())?;
        let mut batch = ImportLogic::stage(&text, cfg, *year);

        let format = batch
            .format
            .map(|f| f.to_string())
            .unwrap_or_else(|| "unknown".into());
        header(format!("Staged import ({})", format));

        if !batch.records.is_empty() {
            print!("{}", render_batch(&batch));
            println!();
        }

        if !batch.failures.is_empty() {
            warning(format!("{} line(s) could not be parsed:", batch.failures.len()));
            print!("{}", render_failures(&batch.failures));
            println!();
        }

        if batch.is_empty() {
            warning("Nothing could be parsed from the input.");
            return Ok(());
        }

        if let Some(list) = exclude {
            let rows = parse_row_list(list).map_err(AppError::InvalidRow)?;
            batch.retain_excluding(&rows)?;
            info(format!(
                "Excluded {} row(s); {} left to import.",
                rows.len(),
                batch.records.len()
            ));
        }

        if *dry_run {
            info(format!(
                "Dry run: {} record(s) would be imported.",
                batch.records.len()
            ));
            return Ok(());
        }

        if batch.records.is_empty() {
            warning("No records left to import.");
            return Ok(());
        }

        if !*yes
            && !ask_confirmation(&format!("Import {} record(s)?", batch.records.len()))
        {
            info("Import cancelled.");
            return Ok(());
        }

        let mut pool = DbPool::new(&cfg.database)?;
        let origin = file.clone().unwrap_or_else(|| "stdin".into());
        let outcome = ImportLogic::commit(&mut pool, batch, cfg, &origin);

        if outcome.failed == 0 {
            success(render_outcome(&outcome).trim_end());
        } else {
            warning(render_outcome(&outcome).trim_end());
        }
    }

    Ok(())
}
