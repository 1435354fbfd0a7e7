//! Seed, result and email records shared by every stage of the pipeline.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A company/domain pair awaiting lookup.
///
/// `domain` is kept exactly as it appeared in the input; normalization
/// happens right before dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub company_name: String,
    pub domain: String,
}

impl SeedRecord {
    pub fn new(company_name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            domain: domain.into(),
        }
    }

    /// Seed with no company name (free-text batch input).
    pub fn domain_only(domain: impl Into<String>) -> Self {
        Self::new(String::new(), domain)
    }
}

/// Classification the provider assigns to an address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailType {
    Personal,
    Generic,
    Role,
    #[default]
    Unknown,
}

impl EmailType {
    /// Missing or unrecognised provider values become `Unknown`.
    pub fn from_provider(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("personal") => EmailType::Personal,
            Some("generic") => EmailType::Generic,
            Some("role") => EmailType::Role,
            _ => EmailType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmailType::Personal => "personal",
            EmailType::Generic => "generic",
            EmailType::Role => "role",
            EmailType::Unknown => "unknown",
        }
    }

    /// Shared mailboxes (`info@`, `sales@`) rather than a named person.
    pub fn is_shared_mailbox(&self) -> bool {
        matches!(self, EmailType::Generic | EmailType::Role)
    }
}

impl std::fmt::Display for EmailType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered address with whatever the provider knew about its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub email: String,
    #[serde(rename = "type", default)]
    pub email_type: EmailType,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    /// 0-100
    pub confidence: Option<u8>,
    #[serde(default)]
    pub sources: u32,
}

impl EmailRecord {
    pub fn new(email: impl Into<String>, email_type: EmailType) -> Self {
        Self {
            email: email.into(),
            email_type,
            first_name: None,
            last_name: None,
            position: None,
            department: None,
            confidence: None,
            sources: 0,
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_confidence(mut self, confidence: u8) -> Self {
        self.confidence = Some(confidence.min(100));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found {
        emails: Vec<EmailRecord>,
        pattern: Option<String>,
        organization: Option<String>,
    },
    Failed {
        error: String,
    },
}

/// Terminal outcome of one domain's lookup.
///
/// Serializes to the flat `{ company_name, domain, success, ... }` shape
/// the exports and JSON dumps use; `emails_found` is always derived from
/// `emails` so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub company_name: String,
    pub domain: String,
    pub outcome: LookupOutcome,
}

impl LookupResult {
    pub fn found(
        company_name: impl Into<String>,
        domain: impl Into<String>,
        emails: Vec<EmailRecord>,
        pattern: Option<String>,
        organization: Option<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            domain: domain.into(),
            outcome: LookupOutcome::Found {
                emails,
                pattern,
                organization,
            },
        }
    }

    pub fn failed(
        company_name: impl Into<String>,
        domain: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            domain: domain.into(),
            outcome: LookupOutcome::Failed {
                error: error.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, LookupOutcome::Found { .. })
    }

    /// Always empty for failed lookups.
    pub fn emails(&self) -> &[EmailRecord] {
        match &self.outcome {
            LookupOutcome::Found { emails, .. } => emails,
            LookupOutcome::Failed { .. } => &[],
        }
    }

    /// `None` for failed lookups.
    pub fn emails_found(&self) -> Option<usize> {
        match &self.outcome {
            LookupOutcome::Found { emails, .. } => Some(emails.len()),
            LookupOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            LookupOutcome::Failed { error } => Some(error),
            LookupOutcome::Found { .. } => None,
        }
    }

    pub fn pattern(&self) -> Option<&str> {
        match &self.outcome {
            LookupOutcome::Found { pattern, .. } => pattern.as_deref(),
            LookupOutcome::Failed { .. } => None,
        }
    }

    pub fn organization(&self) -> Option<&str> {
        match &self.outcome {
            LookupOutcome::Found { organization, .. } => organization.as_deref(),
            LookupOutcome::Failed { .. } => None,
        }
    }
}

impl Serialize for LookupResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.outcome {
            LookupOutcome::Found {
                emails,
                pattern,
                organization,
            } => {
                let mut state = serializer.serialize_struct("LookupResult", 7)?;
                state.serialize_field("company_name", &self.company_name)?;
                state.serialize_field("domain", &self.domain)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("emails_found", &emails.len())?;
                state.serialize_field("emails", emails)?;
                state.serialize_field("pattern", pattern)?;
                state.serialize_field("organization", organization)?;
                state.end()
            }
            LookupOutcome::Failed { error } => {
                let mut state = serializer.serialize_struct("LookupResult", 5)?;
                state.serialize_field("company_name", &self.company_name)?;
                state.serialize_field("domain", &self.domain)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                state.serialize_field("emails", &[] as &[EmailRecord])?;
                state.end()
            }
        }
    }
}

/// Wire shape accepted when reading a saved result dump back in.
#[derive(Deserialize)]
struct LookupResultWire {
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    domain: String,
    success: bool,
    #[serde(default)]
    emails: Vec<EmailRecord>,
    pattern: Option<String>,
    organization: Option<String>,
    error: Option<String>,
}

impl<'de> Deserialize<'de> for LookupResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = LookupResultWire::deserialize(deserializer)?;
        Ok(if wire.success {
            LookupResult::found(
                wire.company_name,
                wire.domain,
                wire.emails,
                wire.pattern,
                wire.organization,
            )
        } else {
            LookupResult::failed(
                wire.company_name,
                wire.domain,
                wire.error.unwrap_or_else(|| "unknown error".to_string()),
            )
        })
    }
}
