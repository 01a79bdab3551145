// src/export/logic.rs

use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::load_records;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::RecordExport;
use crate::ui::messages::warning;
use crate::utils::date::parse_period;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export stored records.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"`, or a period expression
    ///   (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `start:end`)
    ///
    /// Returns the number of records written.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = parse_period(range)?;
        let records: Vec<RecordExport> = load_records(&pool.conn, bounds)?
            .iter()
            .map(RecordExport::from)
            .collect();

        if records.is_empty() {
            warning("No records found for selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&records, path)?,
            ExportFormat::Json => export_json(&records, path)?,
        }

        ttlog_soft(
            &pool.conn,
            "export",
            file,
            &format!("{} record(s) as {}", records.len(), format.as_str()),
        );

        Ok(records.len())
    }
}
