//! Workbook preview extraction via calamine.
//!
//! Worksheets are streamed cell by cell and reading stops at the row limit,
//! so only the previewed rows are ever materialized. calamine yields the
//! cached result of formula cells, never the formula text.

use std::io::{Read, Seek};
use std::path::Path;

use calamine::{
    Cell, Data, DataRef, DataType, ExcelDateTime, Range, Reader, SheetType, Xlsx, open_workbook,
};
use chrono::{NaiveDateTime, TimeDelta, Timelike};

use crate::error::Result;
use crate::output::{JSON_EXTENSION, file_name, sibling_output, write_json};
use crate::types::{DocumentKind, SheetRows, WorkbookSummary};
use crate::{Extractor, ensure_exists};

pub const DEFAULT_ROW_LIMIT: usize = 50;

const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone)]
pub struct SheetExtractor {
    row_limit: usize,
}

impl Default for SheetExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_LIMIT)
    }
}

impl SheetExtractor {
    #[must_use]
    pub fn new(row_limit: usize) -> Self {
        Self { row_limit }
    }
}

impl Extractor for SheetExtractor {
    type Summary = WorkbookSummary;

    fn kind(&self) -> DocumentKind {
        DocumentKind::Spreadsheet
    }

    async fn extract(&self, path: &Path) -> Result<WorkbookSummary> {
        ensure_exists(self.kind(), path)?;
        tracing::info!(file = %file_name(path), "reading XLSX");

        let source = path.to_path_buf();
        let row_limit = self.row_limit;
        let sheets = tokio::task::spawn_blocking(move || read_sheets(&source, row_limit)).await??;

        let output_path = sibling_output(path, JSON_EXTENSION);
        write_json(&output_path, &sheets).await?;

        tracing::info!(output = %output_path.display(), "XLSX preview exported");
        Ok(WorkbookSummary {
            sheets: sheets.keys().cloned().collect(),
            output: file_name(&output_path),
        })
    }
}

/// Read up to `row_limit` rows of every worksheet, in workbook order.
///
/// Chart sheets and other non-grid sheets are skipped.
///
/// # Errors
///
/// Returns an error if the workbook cannot be opened or a sheet cannot be read.
pub fn read_sheets(path: &Path, row_limit: usize) -> Result<SheetRows> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let mut names = Vec::new();
    for sheet in workbook.sheets_metadata() {
        if sheet.typ == SheetType::WorkSheet {
            names.push(sheet.name.clone());
        } else {
            tracing::debug!(sheet = %sheet.name, kind = ?sheet.typ, "skipping non-worksheet");
        }
    }

    let mut sheets = SheetRows::new();
    for name in names {
        let rows = stream_rows(&mut workbook, &name, row_limit)?;
        tracing::debug!(sheet = %name, rows = rows.len(), "sheet captured");
        sheets.insert(name, rows);
    }

    Ok(sheets)
}

/// Worksheet parts store rows in ascending order, so the first cell past
/// `row_limit` ends the scan.
fn stream_rows<RS: Read + Seek>(
    workbook: &mut Xlsx<RS>,
    name: &str,
    row_limit: usize,
) -> Result<Vec<Vec<String>>> {
    let mut reader = workbook.worksheet_cells_reader(name)?;
    let declared_width = reader.dimensions().end.1 as usize + 1;

    let mut cells = Vec::new();
    while let Some(cell) = reader.next_cell()? {
        let position = cell.get_position();
        if position.0 as usize >= row_limit {
            break;
        }
        if matches!(cell.get_value(), DataRef::Empty) {
            continue;
        }
        cells.push(Cell::new(position, Data::from(cell.get_value().clone())));
    }

    Ok(capture_rows(
        &Range::from_sparse(cells),
        declared_width,
        row_limit,
    ))
}

/// Rows as they appear on the sheet grid, starting at A1.
///
/// calamine ranges start at the first used cell; leading rows and columns
/// are filled with empty strings so positions match the sheet. Rows are at
/// least `min_width` cells wide, which lets the sheet's declared dimension
/// widen a preview whose first rows are narrow.
#[must_use]
pub fn capture_rows(range: &Range<Data>, min_width: usize, row_limit: usize) -> Vec<Vec<String>> {
    let (Some((start_row, start_col)), Some((_, end_col))) = (range.start(), range.end()) else {
        return Vec::new();
    };
    let start_row = start_row as usize;
    let start_col = start_col as usize;
    let width = (end_col as usize + 1).max(min_width);

    let leading = start_row.min(row_limit);
    let mut rows = vec![vec![String::new(); width]; leading];

    for row in range.rows().take(row_limit - leading) {
        let mut cells = Vec::with_capacity(width);
        cells.resize(start_col, String::new());
        cells.extend(row.iter().map(cell_text));
        cells.resize(width, String::new());
        rows.push(cells);
    }

    rows
}

#[must_use]
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_owned(),
        Data::Bool(true) => "True".to_owned(),
        Data::Bool(false) => "False".to_owned(),
        Data::DateTime(serial) => serial_text(serial),
        Data::DateTimeIso(_) => cell.as_datetime().map_or_else(
            || cell.to_string().trim().to_owned(),
            |dt| datetime_text(&dt),
        ),
        other => other.to_string().trim().to_owned(),
    }
}

/// Durations render as `[-]D day[s], H:MM:SS`, serials in `[0, 1)` as a
/// time of day, and everything else as a full timestamp.
fn serial_text(serial: &ExcelDateTime) -> String {
    let elapsed = serial.as_duration();
    if serial.is_duration() {
        return elapsed.map_or_else(|| serial.as_f64().to_string(), duration_text);
    }
    if (0.0..1.0).contains(&serial.as_f64())
        && let Some(elapsed) = elapsed
        && elapsed.num_milliseconds() < MILLIS_PER_DAY
    {
        return time_of_day_text(elapsed.num_milliseconds());
    }
    serial
        .as_datetime()
        .map_or_else(|| serial.as_f64().to_string(), |dt| datetime_text(&dt))
}

fn datetime_text(dt: &NaiveDateTime) -> String {
    with_micros(
        dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        i64::from(dt.nanosecond() / 1_000),
    )
}

fn time_of_day_text(millis: i64) -> String {
    let secs = millis / 1_000;
    with_micros(
        format!("{:02}:{:02}:{:02}", secs / 3_600, secs / 60 % 60, secs % 60),
        millis % 1_000 * 1_000,
    )
}

/// Negative spans borrow a whole day, so one hour short of zero is
/// `-1 day, 23:00:00`.
fn duration_text(elapsed: TimeDelta) -> String {
    let millis = elapsed.num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    let rest = millis.rem_euclid(MILLIS_PER_DAY);
    let secs = rest / 1_000;
    let clock = with_micros(
        format!("{}:{:02}:{:02}", secs / 3_600, secs / 60 % 60, secs % 60),
        rest % 1_000 * 1_000,
    );
    match days {
        0 => clock,
        1 | -1 => format!("{days} day, {clock}"),
        _ => format!("{days} days, {clock}"),
    }
}

fn with_micros(text: String, micros: i64) -> String {
    if micros == 0 {
        text
    } else {
        format!("{text}.{micros:06}")
    }
}

#[cfg(test)]
mod tests {
    use calamine::ExcelDateTimeType;

    use super::*;

    fn range_at(start: (u32, u32), cells: &[&[Data]]) -> Range<Data> {
        let height = u32::try_from(cells.len()).unwrap();
        let width = u32::try_from(cells.iter().map(|r| r.len()).max().unwrap_or(0)).unwrap();
        let mut range = Range::new(start, (start.0 + height - 1, start.1 + width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                let pos = (
                    start.0 + u32::try_from(r).unwrap(),
                    start.1 + u32::try_from(c).unwrap(),
                );
                range.set_value(pos, value.clone());
            }
        }
        range
    }

    #[test]
    fn cells_become_trimmed_strings() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("  ABHA  ".into())), "ABHA");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Bool(true)), "True");
    }

    #[test]
    fn iso_datetime_cells_are_formatted() {
        let cell = Data::DateTimeIso("2024-08-07T13:45:00".into());
        assert_eq!(cell_text(&cell), "2024-08-07 13:45:00");
    }

    fn serial(value: f64) -> Data {
        Data::DateTime(ExcelDateTime::new(value, ExcelDateTimeType::DateTime, false))
    }

    fn span(value: f64) -> Data {
        Data::DateTime(ExcelDateTime::new(value, ExcelDateTimeType::TimeDelta, false))
    }

    #[test]
    fn serial_dates_render_as_timestamps() {
        assert_eq!(cell_text(&serial(45_511.0)), "2024-08-07 00:00:00");
        assert_eq!(cell_text(&serial(45_943.5)), "2025-10-13 12:00:00");
        assert_eq!(cell_text(&serial(45_943.541)), "2025-10-13 12:59:02.400000");
    }

    #[test]
    fn serials_below_one_day_render_as_time_of_day() {
        assert_eq!(cell_text(&serial(0.0)), "00:00:00");
        assert_eq!(cell_text(&serial(0.5)), "12:00:00");
        assert_eq!(cell_text(&serial(0.25 + 0.5 / 86_400.0)), "06:00:00.500000");
    }

    #[test]
    fn durations_render_as_day_counts_and_clock() {
        assert_eq!(cell_text(&span(0.25)), "6:00:00");
        assert_eq!(cell_text(&span(1.0 + 2.0 / 24.0)), "1 day, 2:00:00");
        assert_eq!(cell_text(&span(2.5)), "2 days, 12:00:00");
        assert_eq!(cell_text(&span(-1.0 / 24.0)), "-1 day, 23:00:00");
    }

    #[test]
    fn declared_width_pads_narrow_rows() {
        let range = range_at((0, 0), &[&[Data::String("API".into())]]);
        assert_eq!(capture_rows(&range, 3, 50), vec![vec!["API", "", ""]]);
        assert_eq!(capture_rows(&range, 1, 50), vec![vec!["API"]]);
    }

    #[test]
    fn rows_are_capped() {
        let row: &[Data] = &[Data::String("x".into())];
        let cells = vec![row; 80];
        let range = range_at((0, 0), &cells);

        assert_eq!(capture_rows(&range, 0, 50).len(), 50);
        assert_eq!(capture_rows(&range, 0, 100).len(), 80);
    }

    #[test]
    fn grid_is_padded_from_a1() {
        let range = range_at(
            (2, 1),
            &[
                &[Data::String("API".into()), Data::String("Method".into())],
                &[Data::String("/v1/otp".into()), Data::Empty],
            ],
        );

        let rows = capture_rows(&range, 0, 50);
        assert_eq!(
            rows,
            vec![
                vec!["", "", ""],
                vec!["", "", ""],
                vec!["", "API", "Method"],
                vec!["", "/v1/otp", ""],
            ]
        );
    }

    #[test]
    fn leading_padding_counts_toward_limit() {
        let range = range_at((3, 0), &[&[Data::Int(1)], &[Data::Int(2)]]);
        assert_eq!(capture_rows(&range, 0, 2), vec![vec![""], vec![""]]);
        assert_eq!(capture_rows(&range, 0, 4).last().unwrap(), &vec!["1"]);
    }

    #[test]
    fn empty_range_has_no_rows() {
        let range: Range<Data> = Range::empty();
        assert!(capture_rows(&range, 0, 50).is_empty());
    }
}
