//! Tests for `Registry` health admission.

mod common;

use cascade_provider::{
    BackendConfig, ProviderConfig, ProviderError, Registry,
    config::{LocalConfig, RemoteConfig},
};
use common::{Script, calls, log, status};
use serde_json::json;
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const PROBE: Duration = Duration::from_secs(1);

#[tokio::test]
async fn admit_keeps_healthy_providers_in_order() {
    let log = log();
    let candidates = vec![
        Script::new("first", &log).provider(&["f1"]),
        Script::new("down", &log)
            .probe_fails(ProviderError::Network("connection refused".into()))
            .provider(&["d1"]),
        Script::new("second", &log).provider(&["s1", "s2"]),
        Script::new("unauthorized", &log)
            .probe_fails(status(401))
            .provider(&["u1"]),
        Script::new("third", &log).provider(&["t1"]),
    ];

    let registry = Registry::admit(candidates, PROBE).await;
    let names = registry.list().iter().map(|p| p.name()).collect::<Vec<_>>();
    assert_eq!(names, ["first", "second", "third"]);
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.list()[1].models(), ["s1", "s2"]);
}

#[tokio::test]
async fn admit_checks_only_the_first_model() {
    let log = log();
    let candidates = vec![
        Script::new("second", &log)
            .text("s1", "unused")
            .provider(&["s1", "s2"]),
    ];

    let registry = Registry::admit(candidates, PROBE).await;
    assert_eq!(registry.len(), 1);

    // health checks never go through `complete`
    assert_eq!(calls(&log), ["second/probe/s1"]);
}

#[tokio::test]
async fn admit_with_every_probe_failing_is_empty() {
    let log = log();
    let candidates = vec![
        Script::new("a", &log)
            .probe_fails(ProviderError::Timeout)
            .provider(&["a1"]),
    ];
    let registry = Registry::admit(candidates, PROBE).await;
    assert!(registry.is_empty());
    assert_eq!(format!("{registry:?}"), "Registry { providers: [] }");
}

#[tokio::test]
async fn describe_lists_admitted_providers() {
    let log = log();
    let registry = Registry::from_providers(vec![
        Script::new("local", &log).provider(&["m1", "m2"]),
        Script::new("gateway", &log).provider_with(&["g1"], true),
    ]);

    let info = registry.describe();
    assert_eq!(info.len(), 2);
    assert_eq!(info[0].name, "local");
    assert_eq!(info[0].models, ["m1", "m2"]);
    assert!(!info[0].external_paid);
    assert!(info[1].external_paid);
    assert_eq!(
        serde_json::to_value(&info[1]).unwrap(),
        json!({ "name": "gateway", "models": ["g1"], "external_paid": true })
    );
}

#[tokio::test]
async fn clones_share_the_provider_list() {
    let log = log();
    let registry = Registry::from_providers(vec![Script::new("a", &log).provider(&["a1"])]);
    let clone = registry.clone();
    assert!(std::ptr::eq(registry.list(), clone.list()));
}

fn ollama_at(name: &str, server: &MockServer) -> ProviderConfig {
    let mut config = ProviderConfig::new(
        name,
        BackendConfig::Ollama(LocalConfig {
            base_url: Some(server.uri()),
        }),
    );
    config.models = vec!["gpt-oss:120b-cloud".into()];
    config
}

#[tokio::test]
async fn initialize_probes_configured_providers() {
    let healthy = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "t" })))
        .expect(1)
        .mount(&healthy)
        .await;

    let broken = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .expect(1)
        .mount(&broken)
        .await;

    let keyless = ProviderConfig::new(
        "groq",
        BackendConfig::Groq(RemoteConfig {
            api_key: "   ".into(),
            base_url: Some(healthy.uri()),
        }),
    );

    let configs = vec![
        ollama_at("broken", &broken),
        keyless,
        ollama_at("ollama", &healthy),
    ];
    let registry = Registry::initialize(&configs, PROBE).await;

    let names = registry.describe().into_iter().map(|i| i.name).collect::<Vec<_>>();
    assert_eq!(names, ["ollama"]);
}

#[tokio::test]
async fn initialize_skips_invalid_configs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "t" })))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = ollama_at("bad", &server);
    config.timeout_secs = Some(0);

    let registry = Registry::initialize(&[config], PROBE).await;
    assert!(registry.is_empty());
}
