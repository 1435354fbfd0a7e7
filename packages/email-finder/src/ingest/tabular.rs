//! Two-column `company,domain` seed files.
//!
//! Fields are split on every comma. Quoting and escaping are not
//! supported, so a company name containing a comma shifts the columns.

use crate::types::SeedRecord;

/// Parse a header line followed by `company,domain` rows.
///
/// A row with a single field is a bare domain. Rows that end up with an
/// empty domain are skipped.
pub fn parse_tabular(text: &str) -> Vec<SeedRecord> {
    text.lines()
        .skip(1)
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let seed = match fields.as_slice() {
                [domain] => SeedRecord::domain_only(*domain),
                [company, domain, ..] => SeedRecord::new(*company, *domain),
                [] => return None,
            };

            (!seed.domain.is_empty()).then_some(seed)
        })
        .collect()
}
