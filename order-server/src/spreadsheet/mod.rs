//! Spreadsheet codec
//!
//! Reads the first worksheet of an uploaded workbook into header-keyed rows
//! (calamine) and writes a single-sheet `.xlsx` from a [`Table`]
//! (rust_xlsxwriter).

use std::collections::BTreeMap;
use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::{Days, NaiveDate};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("Unsupported or corrupt workbook: {0}")]
    Read(String),

    #[error("Workbook has no worksheets")]
    NoSheets,

    #[error("Failed to write workbook: {0}")]
    Write(#[from] XlsxError),
}

impl From<SpreadsheetError> for AppError {
    fn from(err: SpreadsheetError) -> Self {
        match err {
            SpreadsheetError::Read(_) | SpreadsheetError::NoSheets => {
                AppError::with_message(ErrorCode::UnsupportedFileFormat, err.to_string())
            }
            SpreadsheetError::Write(e) => {
                AppError::with_message(ErrorCode::SpreadsheetError, e.to_string())
            }
        }
    }
}

/// One data row of a sheet, keyed by header text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    /// 1-based row number as shown in a spreadsheet program
    pub number: usize,
    pub cells: BTreeMap<String, String>,
}

impl SheetRow {
    /// Trimmed, non-empty cell text
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .get(header)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

/// Read the first worksheet. Row 1 holds headers; blank rows are skipped.
pub fn read_rows(bytes: Vec<u8>) -> Result<Vec<SheetRow>, SpreadsheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| SpreadsheetError::Read(e.to_string()))?;
    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SpreadsheetError::NoSheets)?;
    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| SpreadsheetError::Read(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.iter().map(|c| cell_text(c).trim().to_string()).collect();
    let first_row = range.start().map(|(r, _)| r as usize + 1).unwrap_or(1);

    let mut out = Vec::new();
    for (offset, row) in rows.enumerate() {
        let cells: BTreeMap<String, String> = headers
            .iter()
            .zip(row.iter())
            .filter(|(h, _)| !h.is_empty())
            .map(|(h, c)| (h.clone(), cell_text(c)))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        if cells.is_empty() {
            continue;
        }
        out.push(SheetRow {
            number: first_row + offset + 1,
            cells,
        });
    }
    Ok(out)
}

/// Render a cell the way a user typed it
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64())
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format_number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

/// Whole numbers without a trailing `.0` (phone numbers, pin codes)
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Excel's 1900 date system, counting from 1899-12-30
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.floor() as u64))
}

/// Cell value written to an export
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn blank() -> Self {
        Cell::Text(String::new())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// A header row plus data rows, all of the same width
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

/// Encode `table` as a workbook with one sheet named `sheet`
pub fn write_table(sheet: &str, table: &Table) -> Result<Vec<u8>, SpreadsheetError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet)?;

    for (col, header) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    for (r, row) in table.rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(s) if s.is_empty() => {}
                Cell::Text(s) => {
                    worksheet.write_string(r, col as u16, s.as_str())?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(r, col as u16, *n)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
