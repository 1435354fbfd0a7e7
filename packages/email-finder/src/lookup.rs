//! Lookup dispatch: one provider call per domain, always a `LookupResult`.
//!
//! Provider and network errors never escape this module. They are mapped
//! into the failure variant with a stable, user-facing message.

use async_trait::async_trait;
use hunter_client::{DomainSearchData, HunterClient, HunterError, ProviderEmail};
use tracing::debug;

use crate::types::{EmailRecord, EmailType, LookupResult};

pub const DEFAULT_LIMIT: u32 = 10;

pub const MSG_INVALID_CREDENTIAL: &str = "invalid credential";
pub const MSG_RATE_LIMITED: &str = "rate limited, retry later";
pub const MSG_CONNECTION: &str = "connection error: unable to reach lookup provider";
pub const MSG_BAD_RESPONSE: &str = "unexpected response from lookup provider";
pub const MSG_INVALID_DOMAIN: &str = "invalid domain";

/// One lookup to perform. `domain` is expected to be canonical already.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub domain: String,
    pub company_name: Option<String>,
    pub limit: u32,
}

impl LookupRequest {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            company_name: None,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Blank names are treated as no hint.
    pub fn with_company(mut self, company_name: &str) -> Self {
        let trimmed = company_name.trim();
        self.company_name = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Name used on failed results: the hint, else the domain.
    pub fn display_name(&self) -> &str {
        self.company_name.as_deref().unwrap_or(&self.domain)
    }
}

/// Anything that can turn a request into a terminal result.
///
/// Implementations must not fail: every error becomes
/// [`LookupResult::failed`].
#[async_trait]
pub trait Lookup: Send + Sync {
    async fn lookup(&self, request: &LookupRequest) -> LookupResult;
}

#[async_trait]
impl<L: Lookup + ?Sized> Lookup for std::sync::Arc<L> {
    async fn lookup(&self, request: &LookupRequest) -> LookupResult {
        (**self).lookup(request).await
    }
}

/// Hunter.io-backed dispatcher.
#[derive(Debug, Clone)]
pub struct HunterLookup {
    client: HunterClient,
}

impl HunterLookup {
    pub fn new(client: HunterClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Lookup for HunterLookup {
    async fn lookup(&self, request: &LookupRequest) -> LookupResult {
        if request.domain.is_empty() {
            return LookupResult::failed(request.display_name(), "", MSG_INVALID_DOMAIN);
        }

        match self.client.domain_search(&request.domain, request.limit).await {
            Ok(data) => map_search(request, data),
            Err(err) => {
                debug!(domain = %request.domain, error = %err, "Domain search failed");
                LookupResult::failed(request.display_name(), &request.domain, error_message(&err))
            }
        }
    }
}

/// User-facing message for a provider error.
pub fn error_message(err: &HunterError) -> String {
    match err {
        HunterError::Unauthorized => MSG_INVALID_CREDENTIAL.to_string(),
        HunterError::RateLimited => MSG_RATE_LIMITED.to_string(),
        HunterError::Api { status, details } => details
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| format!("lookup request failed (HTTP {status})")),
        HunterError::Network(_) => MSG_CONNECTION.to_string(),
        HunterError::Parse(_) => MSG_BAD_RESPONSE.to_string(),
    }
}

/// Map a successful domain search into the success variant.
///
/// Company name precedence: the caller's hint, the provider organization,
/// then the domain.
pub fn map_search(request: &LookupRequest, data: DomainSearchData) -> LookupResult {
    let emails: Vec<EmailRecord> = data.emails.into_iter().filter_map(map_email).collect();

    let company_name = request
        .company_name
        .clone()
        .or_else(|| data.organization.clone().filter(|o| !o.is_empty()))
        .unwrap_or_else(|| request.domain.clone());

    LookupResult::found(
        company_name,
        request.domain.clone(),
        emails,
        data.pattern,
        data.organization,
    )
}

/// Optional fields stay `None`; `type` falls back to unknown and `sources`
/// to zero. Entries without an address are dropped.
fn map_email(email: ProviderEmail) -> Option<EmailRecord> {
    let Some(address) = email.value.filter(|v| !v.trim().is_empty()) else {
        debug!("Dropping provider email entry without an address");
        return None;
    };

    Some(EmailRecord {
        email: address,
        email_type: EmailType::from_provider(email.email_type.as_deref()),
        first_name: email.first_name,
        last_name: email.last_name,
        position: email.position,
        department: email.department,
        confidence: email.confidence.map(|c| c.clamp(0, 100) as u8),
        sources: email.sources.map_or(0, |s| s.len() as u32),
    })
}
