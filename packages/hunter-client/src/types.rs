use serde::{Deserialize, Serialize};

/// Wrapper for Hunter API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub id: Option<String>,
    pub code: Option<u16>,
    pub details: Option<String>,
}

/// Payload of `GET /domain-search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainSearchData {
    pub domain: Option<String>,
    pub organization: Option<String>,
    /// Address pattern used by the organization, e.g. `{first}.{last}`.
    pub pattern: Option<String>,
    #[serde(default)]
    pub emails: Vec<ProviderEmail>,
}

/// A single address returned by a domain search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderEmail {
    pub value: Option<String>,
    /// `personal`, `generic` or (rarely) `role`.
    #[serde(rename = "type")]
    pub email_type: Option<String>,
    pub confidence: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub sources: Option<Vec<EmailSource>>,
}

/// Where the provider saw an address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailSource {
    pub domain: Option<String>,
    pub uri: Option<String>,
    pub extracted_on: Option<String>,
    pub last_seen_on: Option<String>,
    pub still_on_page: Option<bool>,
}

/// Payload of `GET /account`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountData {
    pub email: Option<String>,
    pub plan_name: Option<String>,
    pub reset_date: Option<String>,
    pub requests: AccountRequests,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountRequests {
    pub searches: RequestQuota,
    pub verifications: Option<RequestQuota>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RequestQuota {
    pub used: u64,
    pub available: u64,
}
