//! Excel workbook export
//!
//! Amounts are written as numbers and dates as date cells, so the sheet can
//! be summed and sorted without re-parsing text. A single-sheet export ends
//! with a summary block; the grouped export puts each status on its own sheet.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use rust_xlsxwriter::{Color, ExcelDateTime, Format, FormatAlign, Formula, Workbook, Worksheet, XlsxError};

use core_kernel::{format_date, format_timestamp, Amount};
use domain_claims::{Claim, ClaimStatus};

use crate::export::{claim_record, ExportError, EXPORT_HEADERS};

pub const CLAIMS_SHEET: &str = "Insurance Claims";
pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const CURRENCY_FORMAT: &str = "₹#,##0.00";
const CLAIMED_COLUMN: u16 = 9;
const APPROVED_COLUMN: u16 = 10;
const MAX_COLUMN_WIDTH: usize = 50;
const GROUPED_COLUMN_WIDTH: f64 = 15.0;
/// Excel rejects longer sheet names
const MAX_SHEET_NAME: usize = 31;

struct Formats {
    header: Format,
    bold: Format,
    currency: Format,
    date: Format,
    timestamp: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Color::RGB(0x366092))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            bold: Format::new().set_bold(),
            currency: Format::new().set_num_format(CURRENCY_FORMAT),
            date: Format::new().set_num_format("yyyy-mm-dd"),
            timestamp: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
        }
    }
}

/// One "Insurance Claims" sheet followed by totals and the export stamp
pub fn claims_to_xlsx(claims: &[Claim], exported_at: DateTime<Utc>) -> Result<Vec<u8>, ExportError> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(CLAIMS_SHEET)?;

    write_header(sheet, &formats)?;
    let mut widths = EXPORT_HEADERS.map(str::len);
    for (row, claim) in (1u32..).zip(claims) {
        write_claim(sheet, row, claim, &formats)?;
        for (width, value) in widths.iter_mut().zip(claim_record(claim)) {
            *width = (*width).max(value.chars().count());
        }
    }
    for (col, width) in (0u16..).zip(widths) {
        sheet.set_column_width(col, (width + 2).min(MAX_COLUMN_WIDTH) as f64)?;
    }

    write_summary(sheet, claims, exported_at, &formats)?;
    Ok(workbook.save_to_buffer()?)
}

/// One sheet per status, in the order statuses first appear in `claims`
pub fn claims_by_status_to_xlsx(claims: &[Claim]) -> Result<Vec<u8>, ExportError> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();

    for (status, group) in group_by_status(claims) {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(status))?;
        write_header(sheet, &formats)?;
        for (row, claim) in (1u32..).zip(group) {
            write_claim(sheet, row, claim, &formats)?;
        }
        for col in (0u16..).take(EXPORT_HEADERS.len()) {
            sheet.set_column_width(col, GROUPED_COLUMN_WIDTH)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn group_by_status(claims: &[Claim]) -> Vec<(ClaimStatus, Vec<&Claim>)> {
    let mut groups: Vec<(ClaimStatus, Vec<&Claim>)> = Vec::new();
    for claim in claims {
        match groups.iter_mut().find(|(status, _)| *status == claim.claim_status) {
            Some((_, group)) => group.push(claim),
            None => groups.push((claim.claim_status, vec![claim])),
        }
    }
    groups
}

fn sheet_name(status: ClaimStatus) -> String {
    status.as_str().chars().take(MAX_SHEET_NAME).collect()
}

fn write_header(sheet: &mut Worksheet, formats: &Formats) -> Result<(), XlsxError> {
    for (col, title) in (0u16..).zip(EXPORT_HEADERS) {
        sheet.write_string_with_format(0, col, title, &formats.header)?;
    }
    Ok(())
}

fn write_claim(sheet: &mut Worksheet, row: u32, claim: &Claim, formats: &Formats) -> Result<(), XlsxError> {
    sheet.write_number(row, 0, claim.id.get() as f64)?;
    write_date(sheet, row, 1, claim.entry_date, formats)?;
    write_date(sheet, row, 2, claim.admission_date, formats)?;
    sheet.write_string(row, 3, claim.customer_name.as_str())?;
    sheet.write_string(row, 4, claim.policy_number.as_str())?;
    sheet.write_string(row, 5, claim.hospital_name.as_str())?;
    sheet.write_string(row, 6, claim.company_name.as_str())?;
    write_text(sheet, row, 7, claim.claim_number.as_deref())?;
    sheet.write_string(row, 8, claim.claim_status.as_str())?;
    write_amount(sheet, row, CLAIMED_COLUMN, claim.claimed_amount, formats)?;
    write_amount(sheet, row, APPROVED_COLUMN, claim.approved_amount, formats)?;
    sheet.write_string(row, 11, claim.claim_type.as_str())?;
    write_text(sheet, row, 12, claim.remark.as_deref())?;
    if let Some(parent) = claim.parent_claim_id {
        sheet.write_number(row, 13, parent.get() as f64)?;
    }
    write_text(sheet, row, 14, claim.tpa_name.as_deref())?;
    write_timestamp(sheet, row, 15, claim.created_at, formats)?;
    write_timestamp(sheet, row, 16, claim.updated_at, formats)?;
    Ok(())
}

fn write_text(sheet: &mut Worksheet, row: u32, col: u16, value: Option<&str>) -> Result<(), XlsxError> {
    if let Some(value) = value {
        sheet.write_string(row, col, value)?;
    }
    Ok(())
}

fn write_amount(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    amount: Option<Amount>,
    formats: &Formats,
) -> Result<(), XlsxError> {
    if let Some(amount) = amount {
        sheet.write_number_with_format(row, col, amount.to_f64(), &formats.currency)?;
    }
    Ok(())
}

/// Dates before 1900 have no Excel serial and are written as text
fn write_date(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    date: NaiveDate,
    formats: &Formats,
) -> Result<(), XlsxError> {
    match excel_date(date) {
        Some(cell) => sheet.write_datetime_with_format(row, col, &cell, &formats.date)?,
        None => sheet.write_string(row, col, format_date(date).as_str())?,
    };
    Ok(())
}

fn write_timestamp(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    at: DateTime<Utc>,
    formats: &Formats,
) -> Result<(), XlsxError> {
    let cell = excel_date(at.date_naive())
        .and_then(|day| day.and_hms(at.hour() as u16, at.minute() as u8, f64::from(at.second())).ok());
    match cell {
        Some(cell) => sheet.write_datetime_with_format(row, col, &cell, &formats.timestamp)?,
        None => sheet.write_string(row, col, format_timestamp(at).as_str())?,
    };
    Ok(())
}

fn excel_date(date: NaiveDate) -> Option<ExcelDateTime> {
    let year = u16::try_from(date.year()).ok()?;
    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8).ok()
}

fn write_summary(
    sheet: &mut Worksheet,
    claims: &[Claim],
    exported_at: DateTime<Utc>,
    formats: &Formats,
) -> Result<(), XlsxError> {
    let top = claims.len() as u32 + 2;
    let last_data_row = claims.len() + 1;

    sheet.write_string_with_format(top, 0, "Summary", &formats.bold)?;
    sheet.write_string(top + 1, 0, "Total Claims:")?;
    sheet.write_number(top + 1, 1, claims.len() as f64)?;

    let totals = [
        ("Total Claimed Amount:", CLAIMED_COLUMN, claims.iter().filter_map(|c| c.claimed_amount).sum::<Amount>()),
        ("Total Approved Amount:", APPROVED_COLUMN, claims.iter().filter_map(|c| c.approved_amount).sum::<Amount>()),
    ];
    for (offset, (label, col, total)) in (2u32..).zip(totals) {
        let letter = column_letter(col);
        let formula = Formula::new(format!("=SUM({letter}2:{letter}{last_data_row})"))
            .set_result(total.value().to_string());
        sheet.write_string(top + offset, 0, label)?;
        sheet.write_formula_with_format(top + offset, 1, formula, &formats.currency)?;
    }

    sheet.write_string(top + 5, 0, "Exported on:")?;
    sheet.write_string(top + 5, 1, format_timestamp(exported_at).as_str())?;
    Ok(())
}

/// Letter of a column in the first 26
fn column_letter(col: u16) -> char {
    char::from(b'A' + col as u8)
}
