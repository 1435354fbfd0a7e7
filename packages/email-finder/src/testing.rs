//! Scripted lookup for tests.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use std::time::Instant;

use async_trait::async_trait;

use crate::lookup::{Lookup, LookupRequest};
use crate::types::{EmailRecord, LookupResult};

#[derive(Debug, Clone)]
enum Scripted {
    Emails(Vec<EmailRecord>),
    Error(String),
    Panic(String),
}

/// Mock lookup keyed by canonical domain.
///
/// Unscripted domains succeed with no emails. Every call is recorded with
/// the time it started.
#[derive(Default)]
pub struct MockLookup {
    responses: RwLock<HashMap<String, Scripted>>,
    calls: Mutex<Vec<(LookupRequest, Instant)>>,
}

impl MockLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_emails(self, domain: &str, emails: Vec<EmailRecord>) -> Self {
        self.script(domain, Scripted::Emails(emails))
    }

    pub fn with_error(self, domain: &str, error: &str) -> Self {
        self.script(domain, Scripted::Error(error.to_string()))
    }

    /// Make the lookup for `domain` panic with `message`.
    pub fn with_panic(self, domain: &str, message: &str) -> Self {
        self.script(domain, Scripted::Panic(message.to_string()))
    }

    fn script(self, domain: &str, response: Scripted) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert(domain.to_string(), response);
        self
    }

    pub fn calls(&self) -> Vec<LookupRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(request, _)| request.clone())
            .collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }
}

#[async_trait]
impl Lookup for MockLookup {
    async fn lookup(&self, request: &LookupRequest) -> LookupResult {
        self.calls
            .lock()
            .unwrap()
            .push((request.clone(), Instant::now()));

        let scripted = self.responses.read().unwrap().get(&request.domain).cloned();
        match scripted {
            Some(Scripted::Emails(emails)) => LookupResult::found(
                request.company_name.clone().unwrap_or_else(|| request.domain.clone()),
                request.domain.clone(),
                emails,
                None,
                None,
            ),
            Some(Scripted::Error(error)) => {
                LookupResult::failed(request.display_name(), &request.domain, error)
            }
            Some(Scripted::Panic(message)) => panic!("{}", message),
            None => LookupResult::found(
                request.company_name.clone().unwrap_or_else(|| request.domain.clone()),
                request.domain.clone(),
                Vec::new(),
                None,
                None,
            ),
        }
    }
}
