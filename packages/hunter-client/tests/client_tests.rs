//! Hunter client tests against a local mock server.

use hunter_client::{HunterClient, HunterError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HunterClient {
    HunterClient::new("test-key").with_base_url(server.uri())
}

#[tokio::test]
async fn test_domain_search_decodes_emails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/domain-search"))
        .and(query_param("domain", "stripe.com"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "domain": "stripe.com",
                "organization": "Stripe",
                "pattern": "{first}",
                "emails": [
                    {
                        "value": "patrick@stripe.com",
                        "type": "personal",
                        "confidence": 97,
                        "first_name": "Patrick",
                        "last_name": "Collison",
                        "position": "CEO",
                        "department": "executive",
                        "sources": [
                            {"domain": "blog.stripe.com", "uri": "https://blog.stripe.com/a"},
                            {"domain": "stripe.com", "uri": "https://stripe.com/about"}
                        ]
                    },
                    {
                        "value": "support@stripe.com",
                        "type": "generic",
                        "confidence": 91
                    }
                ]
            },
            "meta": {"results": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let data = client_for(&server)
        .domain_search("stripe.com", 5)
        .await
        .unwrap();

    assert_eq!(data.organization.as_deref(), Some("Stripe"));
    assert_eq!(data.pattern.as_deref(), Some("{first}"));
    assert_eq!(data.emails.len(), 2);
    assert_eq!(data.emails[0].sources.as_ref().map(Vec::len), Some(2));
    assert_eq!(data.emails[1].email_type.as_deref(), Some("generic"));
    assert!(data.emails[1].first_name.is_none());
    assert!(data.emails[1].sources.is_none());
}

#[tokio::test]
async fn test_unauthorized_maps_to_variant() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/domain-search"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errors": [{"id": "authentication_failed", "code": 401, "details": "No user found for the API key supplied"}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .domain_search("example.com", 10)
        .await
        .unwrap_err();
    assert!(matches!(err, HunterError::Unauthorized));
}

#[tokio::test]
async fn test_rate_limited_maps_to_variant() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/domain-search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .domain_search("example.com", 10)
        .await
        .unwrap_err();
    assert!(matches!(err, HunterError::RateLimited));
}

#[tokio::test]
async fn test_other_status_keeps_provider_details() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/domain-search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "errors": [{"id": "invalid_domain", "code": 400, "details": "The domain is invalid"}]
        })))
        .mount(&server)
        .await;

    match client_for(&server).domain_search("nope", 10).await {
        Err(HunterError::Api { status, details }) => {
            assert_eq!(status, 400);
            assert_eq!(details.as_deref(), Some("The domain is invalid"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/domain-search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .domain_search("example.com", 10)
        .await
        .unwrap_err();
    assert!(matches!(err, HunterError::Parse(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind and immediately drop a listener so the port is closed.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let err = HunterClient::new("secret-key-value")
        .with_base_url(uri)
        .domain_search("example.com", 10)
        .await
        .unwrap_err();

    match err {
        HunterError::Network(message) => assert!(!message.contains("secret-key-value")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_account_quota() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "email": "ops@example.com",
                "plan_name": "Free",
                "reset_date": "2026-11-01",
                "requests": {
                    "searches": {"used": 12, "available": 25},
                    "verifications": {"used": 0, "available": 50}
                }
            }
        })))
        .mount(&server)
        .await;

    let account = client_for(&server).account().await.unwrap();
    assert_eq!(account.requests.searches.used, 12);
    assert_eq!(account.requests.searches.available, 25);
    assert_eq!(account.plan_name.as_deref(), Some("Free"));
}
