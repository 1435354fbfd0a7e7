//! Seed input: pasted domain lists and uploaded seed files.
//!
//! - `.csv` files go through [`tabular::parse_tabular`]
//! - `.txt` files hold (possibly broken) JSON and go through
//!   [`recovery::parse_multi_array`]
//! - anything else is rejected before a batch can start

pub mod recovery;
pub mod tabular;

use std::path::Path;

use tracing::info;

use crate::error::{FinderError, Result};
use crate::types::SeedRecord;

pub use recovery::{parse_multi_array, repair_trailing_commas, scan_array_spans, RecoveryReport};
pub use tabular::parse_tabular;

/// Seed file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    Csv,
    Txt,
}

impl SeedFormat {
    /// Case-insensitive extension match.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("csv") => Ok(SeedFormat::Csv),
            Some("txt") => Ok(SeedFormat::Txt),
            _ => Err(FinderError::UnsupportedInput {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Seeds read from one input plus any non-fatal parse diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedSeeds {
    pub seeds: Vec<SeedRecord>,
    pub diagnostics: Vec<String>,
}

impl LoadedSeeds {
    /// Append another input's seeds after this one's, keeping order.
    pub fn extend(&mut self, other: LoadedSeeds) {
        self.seeds.extend(other.seeds);
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Free-text batch input: one domain per non-blank line.
pub fn seeds_from_lines(text: &str) -> Vec<SeedRecord> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(SeedRecord::domain_only)
        .collect()
}

/// Parse already-read seed file contents.
pub fn parse_seed_text(format: SeedFormat, text: &str) -> LoadedSeeds {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    match format {
        SeedFormat::Csv => LoadedSeeds {
            seeds: parse_tabular(text),
            diagnostics: Vec::new(),
        },
        SeedFormat::Txt => {
            let report = parse_multi_array(text);
            LoadedSeeds {
                seeds: report.results,
                diagnostics: report.errors,
            }
        }
    }
}

/// Read and parse a seed file. The extension is checked before the file is
/// opened.
pub async fn load_seed_file(path: &Path) -> Result<LoadedSeeds> {
    let format = SeedFormat::from_path(path)?;
    let text = tokio::fs::read_to_string(path).await?;
    let loaded = parse_seed_text(format, &text);

    info!(
        path = %path.display(),
        format = ?format,
        seeds = loaded.seeds.len(),
        diagnostics = loaded.diagnostics.len(),
        "Loaded seed file"
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SeedFormat::from_path(Path::new("seeds.CSV")).unwrap(),
            SeedFormat::Csv
        );
        assert_eq!(
            SeedFormat::from_path(Path::new("dir/texas.txt")).unwrap(),
            SeedFormat::Txt
        );
    }

    #[test]
    fn test_unsupported_extension() {
        for name in ["seeds.xlsx", "seeds.json", "seeds"] {
            let err = SeedFormat::from_path(Path::new(name)).unwrap_err();
            match err {
                FinderError::UnsupportedInput { path } => assert_eq!(path, PathBuf::from(name)),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_seeds_from_lines() {
        let seeds = seeds_from_lines("acme.com\n\n  https://beta.io/x  \n");
        assert_eq!(
            seeds,
            vec![
                SeedRecord::domain_only("acme.com"),
                SeedRecord::domain_only("https://beta.io/x"),
            ]
        );
    }

    #[test]
    fn test_bom_is_stripped() {
        let loaded = parse_seed_text(SeedFormat::Csv, "\u{feff}company,domain\nAcme,acme.com\n");
        assert_eq!(loaded.seeds, vec![SeedRecord::new("Acme", "acme.com")]);

        let loaded = parse_seed_text(SeedFormat::Txt, "\u{feff}[{\"website\":\"a.com\"}]");
        assert_eq!(loaded.seeds, vec![SeedRecord::domain_only("a.com")]);
        assert!(loaded.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_file_not_opened() {
        // The file does not exist; the extension check must fire first.
        let err = load_seed_file(Path::new("/nonexistent/seeds.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, FinderError::UnsupportedInput { .. }));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = load_seed_file(Path::new("/nonexistent/seeds.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, FinderError::Io(_)));
    }
}
