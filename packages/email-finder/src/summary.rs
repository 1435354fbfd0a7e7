//! Batch statistics for the interactive summary and the text report.

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::types::LookupResult;

const TOP_COMPANIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub total_emails: usize,
    /// Rounded percentage of successful lookups.
    pub success_rate: u32,
    /// `(company, emails found)`, most emails first, zero-email companies omitted.
    pub top_companies: Vec<(String, usize)>,
}

impl BatchSummary {
    pub fn from_results(results: &[LookupResult]) -> Self {
        let total = results.len();
        let successful = results.iter().filter(|r| r.is_success()).count();
        let total_emails: usize = results.iter().filter_map(LookupResult::emails_found).sum();

        let success_rate = if successful > 0 {
            (successful as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };

        let mut top_companies: Vec<(String, usize)> = results
            .iter()
            .filter_map(|r| {
                r.emails_found()
                    .filter(|n| *n > 0)
                    .map(|n| (r.company_name.clone(), n))
            })
            .collect();
        // Stable sort keeps input order among ties.
        top_companies.sort_by(|a, b| b.1.cmp(&a.1));
        top_companies.truncate(TOP_COMPANIES);

        Self {
            total,
            successful,
            failed: total - successful,
            total_emails,
            success_rate,
            top_companies,
        }
    }

    /// Plain-text report written next to the exports.
    pub fn render_report(&self, generated_at: DateTime<Local>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Email lookup summary");
        let _ = writeln!(out, "====================");
        let _ = writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(out, "Domains processed: {}", self.total);
        let _ = writeln!(out, "Successful: {}", self.successful);
        let _ = writeln!(out, "Failed: {}", self.failed);
        let _ = writeln!(out, "Emails found: {}", self.total_emails);
        let _ = writeln!(out, "Success rate: {}%", self.success_rate);

        if !self.top_companies.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Companies with the most emails:");
            for (company, count) in &self.top_companies {
                let _ = writeln!(out, "- {company}: {count}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EmailRecord, EmailType};
    use chrono::TimeZone;

    fn with_emails(company: &str, n: usize) -> LookupResult {
        let emails = (0..n)
            .map(|i| EmailRecord::new(format!("p{i}@x.com"), EmailType::Personal))
            .collect();
        LookupResult::found(company, "x.com", emails, None, None)
    }

    #[test]
    fn test_counts() {
        let results = vec![
            with_emails("A", 2),
            with_emails("B", 0),
            LookupResult::failed("C", "c.com", "invalid credential"),
        ];

        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total_emails, 2);
        assert_eq!(summary.success_rate, 67);
        assert_eq!(summary.top_companies, vec![("A".to_string(), 2)]);
    }

    #[test]
    fn test_empty_and_all_failed() {
        let summary = BatchSummary::from_results(&[]);
        assert_eq!(summary.success_rate, 0);
        assert_eq!(summary.total, 0);

        let failed = vec![LookupResult::failed("", "a.com", "rate limited, retry later")];
        assert_eq!(BatchSummary::from_results(&failed).success_rate, 0);
    }

    #[test]
    fn test_top_companies_ordering() {
        let results: Vec<_> = (1..=12)
            .map(|n| with_emails(&format!("Co{n}"), n % 4))
            .collect();

        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.top_companies.len(), 9);
        assert_eq!(summary.top_companies[0], ("Co3".to_string(), 3));
        assert_eq!(summary.top_companies[1], ("Co7".to_string(), 3));
        assert!(summary.top_companies.iter().all(|(_, n)| *n > 0));
    }

    #[test]
    fn test_report_text() {
        let summary = BatchSummary::from_results(&[with_emails("Acme", 3)]);
        let at = Local.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();

        let report = summary.render_report(at);
        assert!(report.contains("Generated: 2026-10-18 09:30:00"));
        assert!(report.contains("Success rate: 100%"));
        assert!(report.contains("- Acme: 3"));
    }
}
