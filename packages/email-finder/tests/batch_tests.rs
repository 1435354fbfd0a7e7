//! End-to-end batch runs: seed file in, provider mocked, exports out.

use std::path::PathBuf;
use std::time::Duration;

use email_finder::export::read_results_json;
use email_finder::{
    load_seed_file, write_exports, BatchDriver, BatchOptions, BatchSummary, FinderError,
    HunterLookup,
};
use hunter_client::HunterClient;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("email-finder-{}-{}", name, std::process::id()))
}

async fn write_seed_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    tokio::fs::create_dir_all(dir).await.unwrap();
    let file = dir.join(name);
    tokio::fs::write(&file, contents).await.unwrap();
    file
}

#[tokio::test]
async fn test_seed_file_batch_and_exports() {
    let dir = temp_dir("batch");
    let seeds_path = write_seed_file(
        &dir,
        "seeds.txt",
        r#"[{"company_name": "Acme", "website": "https://www.acme.com/",}]
[{"company_name": "Nobody", "website": "nobody.io"}]"#,
    )
    .await;

    let loaded = load_seed_file(&seeds_path).await.unwrap();
    assert_eq!(loaded.seeds.len(), 2);
    assert_eq!(loaded.diagnostics.len(), 1, "{:?}", loaded.diagnostics);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domain-search"))
        .and(query_param("domain", "acme.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "organization": "Acme Inc",
                "emails": [
                    {"value": "ceo@acme.com", "type": "personal", "first_name": "Ada"},
                    {"value": "info@acme.com", "type": "generic"}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/domain-search"))
        .and(query_param("domain", "nobody.io"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = HunterLookup::new(HunterClient::new("test-key").with_base_url(server.uri()));
    let options = BatchOptions {
        delay: Duration::from_millis(20),
        limit: 10,
    };
    let outcome = BatchDriver::new(lookup, options)
        .run(&loaded.seeds, |_| {})
        .await;

    assert!(!outcome.cancelled);
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.results[0].company_name, "Acme");
    assert_eq!(outcome.results[0].emails_found(), Some(2));
    assert_eq!(outcome.results[1].error(), Some("invalid credential"));

    let summary = BatchSummary::from_results(&outcome.results);
    assert_eq!(summary.successful, 1);
    assert_eq!(summary.success_rate, 50);

    let out = dir.join("out");
    let paths = write_exports(&outcome.results, &out).await.unwrap();

    let contacts = tokio::fs::read_to_string(&paths.contacts_csv).await.unwrap();
    assert_eq!(contacts.lines().count(), 3);
    assert!(contacts.contains("info@acme.com,Acme Team,"));

    let full = tokio::fs::read_to_string(&paths.full_csv).await.unwrap();
    assert_eq!(full.lines().count(), 4);

    let round_trip = read_results_json(&paths.json).await.unwrap();
    assert_eq!(round_trip, outcome.results);

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn test_csv_seed_file() {
    let dir = temp_dir("csv");
    let seeds_path = write_seed_file(
        &dir,
        "Seeds.CSV",
        "\u{feff}company,domain\nAcme, acme.com\n,\nBeta,\n",
    )
    .await;

    let loaded = load_seed_file(&seeds_path).await.unwrap();
    assert_eq!(loaded.seeds.len(), 1);
    assert_eq!(loaded.seeds[0].company_name, "Acme");
    assert_eq!(loaded.seeds[0].domain, "acme.com");
    assert!(loaded.diagnostics.is_empty());

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn test_unsupported_file_is_rejected_before_reading() {
    let err = load_seed_file(&PathBuf::from("/definitely/missing/seeds.xlsx"))
        .await
        .unwrap_err();
    assert!(matches!(err, FinderError::UnsupportedInput { .. }));
}
