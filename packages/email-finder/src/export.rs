//! Result exports: contact-import CSV, full CSV, JSON dump and a text summary.

use std::path::{Path, PathBuf};

use chrono::Local;
use csv::{QuoteStyle, WriterBuilder};
use tracing::{debug, info};

use crate::error::{FinderError, Result};
use crate::summary::BatchSummary;
use crate::types::LookupResult;

/// UTF-8 byte-order mark; spreadsheet apps use it to pick the encoding.
const BOM: &str = "\u{feff}";

pub const CONTACT_CSV_HEADERS: [&str; 8] = [
    "Email",
    "First Name",
    "Last Name",
    "Company Name",
    "Phone",
    "Job Title",
    "Country",
    "Email Type",
];

pub const FULL_CSV_HEADERS: [&str; 9] = [
    "Company Name",
    "Domain",
    "Email",
    "Email Type",
    "First Name",
    "Last Name",
    "Position",
    "Department",
    "Confidence",
];

/// Legal-form suffixes removed before building a "<Company> Team" name.
/// Longer forms come first so `, Inc.` wins over `, Inc`.
const COMPANY_SUFFIXES: &[&str] = &[
    ", LLC", " LLC", ", INC", " INC", ", Inc.", " Inc.", ", Inc", " Inc",
    ", CORP", " CORP", ", Corp.", " Corp.", ", Corp", " Corp",
    ", LTD", " LTD", ", Ltd.", " Ltd.", ", Ltd", " Ltd",
    ", CO", " CO", ", Co.", " Co.", ", Co", " Co",
    ", COMPANY", " COMPANY", ", Company", " Company",
    ", CORPORATION", " CORPORATION", ", Corporation", " Corporation",
    ", INCORPORATED", " INCORPORATED", ", Incorporated", " Incorporated",
    ", LIMITED", " LIMITED", ", Limited", " Limited",
    ", LP", " LP", ", L.P.", " L.P.",
    ", LLP", " LLP", ", L.L.P.", " L.L.P.",
    ", PC", " PC", ", P.C.", " P.C.",
    ", PA", " PA", ", P.A.", " P.A.",
    ", PLLC", " PLLC", ", P.L.L.C.", " P.L.L.C.",
    ", SERIES", " SERIES", ", Series", " Series",
    "股份有限公司", "有限责任公司", "有限公司", "集团", "公司",
];

/// Strip one legal-form suffix and any trailing `,`/`.`.
pub fn cleanup_company_name(name: &str) -> String {
    let mut clean = name.trim();

    if let Some(stripped) = COMPANY_SUFFIXES
        .iter()
        .find_map(|suffix| clean.strip_suffix(*suffix))
    {
        clean = stripped.trim();
    }

    clean
        .strip_suffix([',', '.'])
        .unwrap_or(clean)
        .trim()
        .to_string()
}

/// Contact-import CSV: one row per email, companies without emails omitted.
///
/// Shared mailboxes without a first name get `"<Company> Team"` so the
/// import tool has something to greet. Fields are quoted only when needed.
pub fn contacts_csv(results: &[LookupResult]) -> Result<Vec<u8>> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(BOM.as_bytes().to_vec());
    wtr.write_record(CONTACT_CSV_HEADERS)?;

    for result in results.iter().filter(|r| r.is_success()) {
        for email in result.emails() {
            let first_name = match email.first_name.as_deref().filter(|f| !f.is_empty()) {
                Some(first) => first.to_string(),
                None if email.email_type.is_shared_mailbox() => {
                    let company = cleanup_company_name(&result.company_name);
                    if company.is_empty() {
                        String::new()
                    } else {
                        format!("{company} Team")
                    }
                }
                None => String::new(),
            };

            wtr.write_record([
                email.email.as_str(),
                first_name.as_str(),
                email.last_name.as_deref().unwrap_or_default(),
                result.company_name.as_str(),
                "",
                email.position.as_deref().unwrap_or_default(),
                "",
                email.email_type.as_str(),
            ])?;
        }
    }

    finish(wtr)
}

/// Full CSV: every field quoted, one row per email plus one placeholder
/// row for each result (failed or empty) that has no emails.
pub fn full_csv(results: &[LookupResult]) -> Result<Vec<u8>> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(BOM.as_bytes().to_vec());
    wtr.write_record(FULL_CSV_HEADERS)?;

    for result in results {
        if result.emails().is_empty() {
            wtr.write_record([
                result.company_name.as_str(),
                result.domain.as_str(),
                "",
                "",
                "",
                "",
                "",
                "",
                "",
            ])?;
            continue;
        }

        for email in result.emails() {
            let confidence = email.confidence.map(|c| c.to_string()).unwrap_or_default();
            wtr.write_record([
                result.company_name.as_str(),
                result.domain.as_str(),
                email.email.as_str(),
                email.email_type.as_str(),
                email.first_name.as_deref().unwrap_or_default(),
                email.last_name.as_deref().unwrap_or_default(),
                email.position.as_deref().unwrap_or_default(),
                email.department.as_deref().unwrap_or_default(),
                confidence.as_str(),
            ])?;
        }
    }

    finish(wtr)
}

/// Pretty-printed dump of the full result list.
pub fn results_json(results: &[LookupResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Read a dump written by [`results_json`] back in.
pub async fn read_results_json(path: &Path) -> Result<Vec<LookupResult>> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&text)?)
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    wtr.into_inner()
        .map_err(|e| FinderError::Io(e.into_error()))
}

/// Where [`write_exports`] put each file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub json: PathBuf,
    pub contacts_csv: PathBuf,
    pub full_csv: PathBuf,
    pub summary: PathBuf,
}

/// Write all exports into `dir` under timestamped names.
pub async fn write_exports(results: &[LookupResult], dir: &Path) -> Result<ExportPaths> {
    tokio::fs::create_dir_all(dir).await?;

    let now = Local::now();
    let stamp = now.format("%Y%m%d_%H%M%S");
    let paths = ExportPaths {
        json: dir.join(format!("hunter_results_{stamp}.json")),
        contacts_csv: dir.join(format!("contacts_{stamp}.csv")),
        full_csv: dir.join(format!("hunter_full_results_{stamp}.csv")),
        summary: dir.join(format!("hunter_summary_{stamp}.txt")),
    };

    debug!(dir = %dir.display(), results = results.len(), "Writing exports");
    tokio::fs::write(&paths.json, results_json(results)?).await?;
    tokio::fs::write(&paths.contacts_csv, contacts_csv(results)?).await?;
    tokio::fs::write(&paths.full_csv, full_csv(results)?).await?;
    tokio::fs::write(
        &paths.summary,
        BatchSummary::from_results(results).render_report(now),
    )
    .await?;

    info!(
        json = %paths.json.display(),
        contacts = %paths.contacts_csv.display(),
        full = %paths.full_csv.display(),
        "Exports written"
    );
    Ok(paths)
}
