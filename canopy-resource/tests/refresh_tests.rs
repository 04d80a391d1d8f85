use canopy_client::transport::mock::MockTransport;
use canopy_client::{Client, ClientError, ClientResult};
use canopy_resource::{
    Coercion, Descriptor, PropertyValue, Resource, ResourceError, ResourceIdentity, SchemaRegistry,
    TypeSchema,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::sync::Arc;

fn registry() -> Arc<SchemaRegistry> {
    let registry = SchemaRegistry::new();
    registry.declare(
        "Locale",
        TypeSchema::extending("Resource")
            .property("name", Descriptor::primitive(Coercion::String))
            .property("code", Descriptor::primitive(Coercion::String)),
    );
    Arc::new(registry)
}

fn locale_payload(name: &str, version: i64) -> Value {
    json!({
        "sys": {
            "id": "0ywTmGkjR0YhmbYaSmV1CS",
            "type": "Locale",
            "version": version,
            "space": {"sys": {"type": "Link", "linkType": "Space", "id": "bfsvtul0c41g"}}
        },
        "name": name,
        "code": "pl"
    })
}

fn bind_locale() -> Resource {
    Resource::from_payload(locale_payload("Polish", 1), "Locale", &registry(), None).unwrap()
}

// ── Successful reload ────────────────────────────────────────────

#[test]
fn reload_replaces_every_namespace_in_place() {
    let mut locale = bind_locale();
    let refetch =
        |_identity: &ResourceIdentity| -> ClientResult<Value> { Ok(locale_payload("Polish PL", 2)) };

    locale.reload(&refetch).unwrap();

    assert_eq!(locale.get_str("name"), Some("Polish PL"));
    assert_eq!(locale.sys_get("version").and_then(PropertyValue::as_i64), Some(2));
    assert_eq!(locale.raw()["name"], "Polish PL");
}

#[test]
fn reload_matches_a_fresh_bind_of_the_new_payload() {
    let mut locale = bind_locale();
    let refetch =
        |_identity: &ResourceIdentity| -> ClientResult<Value> { Ok(locale_payload("Polish PL", 2)) };
    locale.reload(&refetch).unwrap();

    let rebound =
        Resource::from_payload(locale_payload("Polish PL", 2), "Locale", &registry(), None).unwrap();
    assert_eq!(locale, rebound);
}

#[test]
fn reload_is_keyed_by_the_resource_identity() {
    let seen = RefCell::new(Vec::new());
    let refetch = |identity: &ResourceIdentity| -> ClientResult<Value> {
        seen.borrow_mut().push(identity.clone());
        Ok(locale_payload("Polish", 1))
    };

    let mut locale = bind_locale();
    locale.reload(&refetch).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].id, "0ywTmGkjR0YhmbYaSmV1CS");
    assert_eq!(seen[0].space_id.as_deref(), Some("bfsvtul0c41g"));
}

#[test]
fn reload_returns_self_for_chaining() {
    let mut locale = bind_locale();
    let refetch =
        |_identity: &ResourceIdentity| -> ClientResult<Value> { Ok(locale_payload("Polish PL", 2)) };

    let name = locale
        .reload(&refetch)
        .unwrap()
        .get_str("name")
        .map(str::to_string);
    assert_eq!(name.as_deref(), Some("Polish PL"));
}

#[test]
fn reload_through_the_shared_transport() {
    let transport = Arc::new(MockTransport::new());
    transport.stub(
        "/spaces/bfsvtul0c41g/locales/0ywTmGkjR0YhmbYaSmV1CS",
        locale_payload("Polish PL", 2),
    );
    let client = Client::new(transport.clone());

    let mut locale = Resource::from_payload(
        locale_payload("Polish", 1),
        "Locale",
        &registry(),
        Some(client.clone()),
    )
    .unwrap();

    let refetch = move |identity: &ResourceIdentity| -> ClientResult<Value> {
        let space = identity.space_id.clone().unwrap_or_default();
        client.request(&format!("/spaces/{space}/locales/{}", identity.id), &[])
    };
    locale.reload(&refetch).unwrap();

    assert_eq!(locale.get_str("name"), Some("Polish PL"));
    assert_eq!(
        transport.requests(),
        vec!["/spaces/bfsvtul0c41g/locales/0ywTmGkjR0YhmbYaSmV1CS"]
    );
}

// ── Failed reload leaves state untouched ─────────────────────────

#[test]
fn transport_failure_keeps_prior_state() {
    let mut locale = bind_locale();
    let snapshot = locale.clone();
    let refetch = |_identity: &ResourceIdentity| -> ClientResult<Value> {
        Err(ClientError::NotFound("gone".to_string()))
    };

    let err = locale.reload(&refetch).unwrap_err();
    assert!(matches!(err, ResourceError::Client(ClientError::NotFound(_))));
    assert_eq!(locale, snapshot);
}

#[test]
fn rebind_failure_keeps_prior_state() {
    let mut locale = bind_locale();
    let snapshot = locale.clone();
    // fresh payload carries a malformed sys date, so the rebind errors
    let refetch = |_identity: &ResourceIdentity| -> ClientResult<Value> {
        Ok(json!({"sys": {"id": "0ywTmGkjR0YhmbYaSmV1CS", "createdAt": "not-a-date"}}))
    };

    let err = locale.reload(&refetch).unwrap_err();
    assert!(matches!(err, ResourceError::Coercion(_)));
    assert_eq!(locale, snapshot);
}

#[test]
fn reload_without_identity_is_a_typed_error() {
    let registry = SchemaRegistry::empty();
    registry.declare("Pair", TypeSchema::new().property("name", Descriptor::None));
    let mut pair =
        Resource::from_payload(json!({"name": "x"}), "Pair", &Arc::new(registry), None).unwrap();

    let refetch = |_identity: &ResourceIdentity| -> ClientResult<Value> { Ok(json!({})) };
    assert!(matches!(
        pair.reload(&refetch),
        Err(ResourceError::MissingIdentity)
    ));
}
