use canopy_client::transport::mock::MockTransport;
use canopy_client::{Client, ClientConfig};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

// ── Construction & configuration ─────────────────────────────────

#[test]
fn default_locale_is_en_us() {
    let client = Client::new(Arc::new(MockTransport::new()));
    assert_eq!(client.default_locale(), "en-US");
}

#[test]
fn explicit_config_is_kept() {
    let config = ClientConfig {
        default_locale: "de-DE".to_string(),
    };
    let client = Client::with_config(Arc::new(MockTransport::new()), config);
    assert_eq!(client.default_locale(), "de-DE");
    assert_eq!(client.config().default_locale, "de-DE");
}

#[test]
fn config_serde_roundtrip() {
    let config = ClientConfig {
        default_locale: "pl-PL".to_string(),
    };
    let text = serde_json::to_string(&config).unwrap();
    let parsed: ClientConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.default_locale, "pl-PL");
}

// ── Shared transport ─────────────────────────────────────────────

#[test]
fn request_goes_through_the_transport() {
    let transport = Arc::new(MockTransport::new());
    transport.stub("/locales", json!({"total": 0, "items": []}));

    let client = Client::new(transport.clone());
    let payload = client.request("/locales", &[]).unwrap();

    assert_eq!(payload["total"], 0);
    assert_eq!(transport.requests(), vec!["/locales"]);
}

#[test]
fn clones_share_the_transport() {
    let transport = Arc::new(MockTransport::new());
    transport.stub("/x", json!(true));

    let client = Client::new(transport.clone());
    let other = client.clone();
    let _ = other.request("/x", &[]);
    let _ = client.request("/x", &[]);

    assert_eq!(transport.requests().len(), 2);
}

#[test]
fn debug_does_not_require_transport_debug() {
    let client = Client::new(Arc::new(MockTransport::new()));
    let rendered = format!("{client:?}");
    assert!(rendered.contains("en-US"));
}
