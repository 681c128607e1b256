//! Claim exports: CSV here, Excel workbooks in [`crate::spreadsheet`]

use chrono::{DateTime, Utc};
use thiserror::Error;

use core_kernel::{format_date, format_timestamp};
use domain_claims::Claim;

/// Column titles shared by every export format
pub const EXPORT_HEADERS: [&str; 17] = [
    "Claim ID",
    "Entry Date",
    "Admission Date",
    "Customer Name",
    "Policy Number",
    "Hospital Name",
    "Company Name",
    "Claim Number",
    "Claim Status",
    "Claimed Amount",
    "Approved Amount",
    "Claim Type",
    "Remark",
    "Parent Claim ID",
    "TPA Name",
    "Created At",
    "Updated At",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer failed: {0}")]
    Buffer(String),

    #[error("Workbook write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Attachment name for an export taken at `now`, e.g. `insurance_claims_20240305_140709.csv`
pub fn export_filename(stem: &str, extension: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}.{}", stem, now.format("%Y%m%d_%H%M%S"), extension)
}

/// One claim as export text, in [`EXPORT_HEADERS`] order; absent values are empty
pub fn claim_record(claim: &Claim) -> [String; 17] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        claim.id.to_string(),
        format_date(claim.entry_date),
        format_date(claim.admission_date),
        claim.customer_name.clone(),
        claim.policy_number.clone(),
        claim.hospital_name.clone(),
        claim.company_name.to_string(),
        text(&claim.claim_number),
        claim.claim_status.to_string(),
        claim.claimed_amount.map(|a| a.to_string()).unwrap_or_default(),
        claim.approved_amount.map(|a| a.to_string()).unwrap_or_default(),
        claim.claim_type.to_string(),
        text(&claim.remark),
        claim.parent_claim_id.map(|id| id.to_string()).unwrap_or_default(),
        text(&claim.tpa_name),
        format_timestamp(claim.created_at),
        format_timestamp(claim.updated_at),
    ]
}

/// Writes claims as CSV with a header row
pub fn claims_to_csv(claims: &[Claim]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;
    for claim in claims {
        writer.write_record(claim_record(claim))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))
}
