use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::review::{render_stored, render_trigger_summary};
use crate::db::pool::DbPool;
use crate::db::store::{RecordStore, SqliteStore};
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::utils::date::parse_period;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, summary } = cmd {
        let bounds = parse_period(period.as_deref())?;

        let mut pool = DbPool::new(&cfg.database)?;
        let records = SqliteStore::new(&mut pool, "cli").list(bounds)?;

        if records.is_empty() {
            warning("No seizures recorded for the selected period.");
            return Ok(());
        }

        match period {
            Some(p) => header(format!("Seizures for {}", p)),
            None => header("All recorded seizures"),
        }
        print!("{}", render_stored(&records, cfg.description_preview_len));
        println!("\n{} record(s).", records.len());

        if *summary {
            println!();
            header("By trigger category");
            print!("{}", render_trigger_summary(&records));
        }
    }

    Ok(())
}
