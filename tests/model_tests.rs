//! Tests for entity parsing, result-set cursors and the model factory.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use ringplus::rest::{ApiRef, DefaultParser, Model, ModelFactory, ModelKind};
use ringplus::{Account, Call, User, Voicemail};
use serde_json::json;

#[test]
fn test_wrapped_and_bare_objects_parse_identically() {
    let api = ApiRef::detached();
    let wrapped = Account::parse(&api, &json!({"account": {"id": 5, "name": "Home"}})).unwrap();
    let bare = Account::parse(&api, &json!({"id": 5, "name": "Home"})).unwrap();

    assert_eq!(wrapped, bare);
    assert_eq!(wrapped.raw(), &json!({"id": 5, "name": "Home"}));
}

#[test]
fn test_parse_list_keeps_server_order_and_derives_cursors() {
    let accounts = Account::parse_list(
        &ApiRef::detached(),
        &json!({"accounts": [{"id": 3}, {"id": 1}, {"id": 2}]}),
    )
    .unwrap();

    assert_eq!(accounts.ids(), vec![3, 1, 2]);
    assert_eq!(accounts.max_id(), Some(0));
    assert_eq!(accounts.since_id(), Some(3));
}

#[test]
fn test_parse_list_accepts_bare_array() {
    let calls = Call::parse_list(&ApiRef::detached(), &json!([{"id": 9}, {"id": 10}])).unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls.since_id(), Some(10));
}

#[test]
fn test_empty_list_has_no_cursors() {
    let calls = Call::parse_list(&ApiRef::detached(), &json!({"phone_calls": []})).unwrap();
    assert!(calls.is_empty());
    assert_eq!(calls.max_id(), None);
    assert_eq!(calls.since_id(), None);
}

#[test]
fn test_timestamps_parse_to_utc() {
    let account = Account::parse(
        &ApiRef::detached(),
        &json!({"id": 1, "registered_on": "2016-01-01T00:00:00Z"}),
    )
    .unwrap();

    assert_eq!(
        account.registered_on,
        Some(Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_unknown_keys_are_kept() {
    let account = Account::parse(
        &ApiRef::detached(),
        &json!({"id": 1, "billing_plan": {"name": "Unlimited"}, "autopay": true}),
    )
    .unwrap();

    assert_eq!(account.extra.get("autopay"), Some(&json!(true)));
    assert_eq!(account.extra().get("billing_plan"), Some(&json!({"name": "Unlimited"})));
}

#[test]
fn test_nested_entities_are_materialized() {
    let user = User::parse(
        &ApiRef::detached(),
        &json!({"user": {"id": 3, "accounts": [{"id": 12, "voicemail_box": {"id": 88}}]}}),
    )
    .unwrap();

    let account = &user.accounts[0];
    assert_eq!(account.id, Some(12));
    assert_eq!(account.voicemail_box.as_ref().and_then(|b| b.id), Some(88));
}

#[test]
fn test_bad_shapes_are_parse_errors() {
    let api = ApiRef::detached();

    let error = Account::parse(&api, &json!("not an object")).unwrap_err();
    assert_eq!(error.payload, "account");

    let error = Account::parse_list(&api, &json!({"users": []})).unwrap_err();
    assert!(error.reason.contains("accounts"));

    let error = Account::parse(&api, &json!({"id": 1, "account_services": "none"})).unwrap_err();
    assert_eq!(error.payload, "account");
}

#[test]
fn test_detached_entities_refuse_follow_ups() {
    let account = Account::parse(&ApiRef::detached(), &json!({"id": 1})).unwrap();
    assert!(!account.api().is_attached());

    let error = tokio_test::block_on(account.refresh()).unwrap_err();
    assert!(matches!(error, ringplus::RingPlusError::Detached { model: "account" }));
}

#[test]
fn test_factory_parses_through_registered_parser() {
    let factory = ModelFactory::new().register(
        ModelKind::Voicemail,
        Arc::new(DefaultParser::<Voicemail>::new()),
    );

    let entity = factory
        .parser(ModelKind::Voicemail)
        .parse(&ApiRef::detached(), &json!({"voicemail": {"id": 4, "new": false}}))
        .unwrap();
    assert_eq!(entity.kind(), ModelKind::Voicemail);

    let message: Voicemail = entity.into_model().unwrap();
    assert_eq!(message.id, Some(4));
    assert_eq!(message.new, Some(json!(false)));
    assert!(!message.is_new());
}
