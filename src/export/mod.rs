use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::{info, warn};
use rand::{distributions::Alphanumeric, Rng};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::error::ApiError;
use crate::models::property::{MetricResult, PropertyRecord};

/// A finished result set, held in memory under its per-request handle until
/// the caller downloads it or the process exits.
#[derive(Debug, Clone)]
pub enum ResultTable {
    Records(Vec<PropertyRecord>),
    Metrics(Vec<MetricResult>),
}

/// In-memory result tables keyed by per-request handles. Each search or
/// metrics request gets its own handle, so overlapping requests never
/// clobber each other's results; downloading a table consumes its entry,
/// which keeps the map from growing for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct TableStore {
    tables: Arc<Mutex<HashMap<String, ResultTable>>>,
}

impl TableStore {
    pub fn new() -> TableStore {
        TableStore::default()
    }

    pub fn store(&self, prefix: &str, table: ResultTable) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();
        let name = format!("{prefix}-{suffix}");
        self.tables.lock().unwrap().insert(name.clone(), table);
        name
    }

    pub fn take(&self, name: &str) -> Option<ResultTable> {
        self.tables.lock().unwrap().remove(name)
    }

    pub fn len(&self) -> usize {
        self.tables.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const RECORD_HEADERS: [&str; 12] = [
    "Kohdenumero",
    "Osoite",
    "Myyntihinta",
    "Velaton",
    "Lainanosuus",
    "Hoitovastike",
    "Rahoitusvastike",
    "Koko",
    "Kerros",
    "Valmistunut",
    "Tontti",
    "Tontin_lunastusosuus",
];

const METRIC_HEADERS: [&str; 6] = [
    "kohdenumero",
    "kassavirta",
    "kassavirta_5",
    "kassavirta_10",
    "yield",
    "ROI",
];

fn export_error(e: XlsxError) -> ApiError {
    ApiError::Export(e.to_string())
}

pub fn workbook_bytes(table: &ResultTable) -> Result<Vec<u8>, ApiError> {
    match table {
        ResultTable::Records(records) => records_workbook(records),
        ResultTable::Metrics(metrics) => metrics_workbook(metrics),
    }
}

fn write_headers(worksheet: &mut Worksheet, headers: &[&str]) -> Result<(), ApiError> {
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(export_error)?;
    }
    Ok(())
}

fn records_workbook(records: &[PropertyRecord]) -> Result<Vec<u8>, ApiError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    write_headers(worksheet, &RECORD_HEADERS)?;

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet
            .write_string(row, 0, record.friendly_id.as_deref().unwrap_or(""))
            .map_err(export_error)?;
        worksheet
            .write_string(row, 1, record.address.as_deref().unwrap_or(""))
            .map_err(export_error)?;
        worksheet
            .write_number(row, 2, record.selling_price.unwrap_or(0.0))
            .map_err(export_error)?;
        worksheet
            .write_number(row, 3, record.debt_free_price.unwrap_or(0.0))
            .map_err(export_error)?;
        worksheet
            .write_number(row, 4, record.loan_share)
            .map_err(export_error)?;
        worksheet
            .write_number(row, 5, record.maintenance_charge)
            .map_err(export_error)?;
        worksheet
            .write_number(row, 6, record.financing_charge)
            .map_err(export_error)?;
        worksheet
            .write_number(row, 7, record.living_area.unwrap_or(0.0))
            .map_err(export_error)?;
        worksheet
            .write_number(row, 8, record.floor_level.unwrap_or(0) as f64)
            .map_err(export_error)?;
        worksheet
            .write_number(row, 9, record.construction_year.unwrap_or(0) as f64)
            .map_err(export_error)?;
        worksheet
            .write_string(row, 10, record.plot_holding.map(|p| p.label()).unwrap_or(""))
            .map_err(export_error)?;
        worksheet
            .write_number(row, 11, record.plot_buyout_share)
            .map_err(export_error)?;
    }

    workbook.save_to_buffer().map_err(export_error)
}

fn metrics_workbook(metrics: &[MetricResult]) -> Result<Vec<u8>, ApiError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    write_headers(worksheet, &METRIC_HEADERS)?;

    for (i, metric) in metrics.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet
            .write_string(row, 0, &metric.kohdenumero)
            .map_err(export_error)?;
        worksheet
            .write_number(row, 1, metric.kassavirta)
            .map_err(export_error)?;
        worksheet
            .write_number(row, 2, metric.kassavirta_5)
            .map_err(export_error)?;
        worksheet
            .write_number(row, 3, metric.kassavirta_10)
            .map_err(export_error)?;
        worksheet
            .write_number(row, 4, metric.gross_yield)
            .map_err(export_error)?;
        worksheet
            .write_number(row, 5, metric.roi)
            .map_err(export_error)?;
    }

    workbook.save_to_buffer().map_err(export_error)
}

/// Persist an exported workbook under the temp export directory so it can be
/// served; the whole directory is removed on shutdown.
pub fn persist(table: &str, bytes: &[u8], export_dir: &str) -> Result<PathBuf, ApiError> {
    fs::create_dir_all(export_dir).map_err(|e| ApiError::Export(e.to_string()))?;
    let path = Path::new(export_dir).join(format!("{table}.xlsx"));
    fs::write(&path, bytes).map_err(|e| ApiError::Export(e.to_string()))?;
    Ok(path)
}

pub fn cleanup(export_dir: &str) {
    if !Path::new(export_dir).exists() {
        return;
    }
    match fs::remove_dir_all(export_dir) {
        Ok(()) => info!("Removed export directory {export_dir}"),
        Err(e) => warn!("Could not remove export directory {export_dir}: {e}"),
    }
}
