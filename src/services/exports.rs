//! Spreadsheet export of the whole store

use std::path::{Path, PathBuf};

use crate::{
    error::AppResult,
    render::spreadsheet,
    services::reports,
    store::VisitStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, rows: usize },
    NoData,
}

/// Write every record plus the whole-data summary to `path`
pub async fn export_spreadsheet<S>(store: &S, path: &Path) -> AppResult<ExportOutcome>
where
    S: VisitStore + ?Sized,
{
    let records = store.load_all().await?;
    let Some(summary) = reports::summarize(&records) else {
        return Ok(ExportOutcome::NoData);
    };

    let mut workbook = spreadsheet::build_workbook(&records, &summary)?;
    workbook.save(path)?;
    tracing::info!(path = %path.display(), rows = records.len(), "Spreadsheet exported");

    Ok(ExportOutcome::Written {
        path: path.to_path_buf(),
        rows: records.len(),
    })
}

/// Same workbook as [`export_spreadsheet`], kept in memory
pub async fn spreadsheet_bytes<S>(store: &S) -> AppResult<Option<Vec<u8>>>
where
    S: VisitStore + ?Sized,
{
    let records = store.load_all().await?;
    let Some(summary) = reports::summarize(&records) else {
        return Ok(None);
    };
    let mut workbook = spreadsheet::build_workbook(&records, &summary)?;
    Ok(Some(workbook.save_to_buffer()?))
}
