//! End-to-end ledger scenarios driven through `run_transaction`, the way a
//! host submits invocations.

use serde_json::{json, Value};
use track_contract::{
    run_transaction, DispatchError, Function, MemoryStore, StaticIdentity, TransferAssetRequest,
};
use track_core::{Asset, ErrorKind};

fn identity(label: &str) -> StaticIdentity {
    StaticIdentity::from_label(label).unwrap()
}

fn submit(world: &MemoryStore, function: &str, args: Value, who: &StaticIdentity) -> Value {
    let function: Function = function.parse().unwrap();
    run_transaction(world, function, args, who).unwrap().result
}

fn expect_kind(result: Result<track_contract::Invocation, DispatchError>) -> ErrorKind {
    match result {
        Err(DispatchError::Contract(err)) => err.kind(),
        Err(other) => panic!("expected contract error, got {other}"),
        Ok(invocation) => panic!("expected failure, got {:?}", invocation.result),
    }
}

fn read(world: &MemoryStore, id: &str) -> Asset {
    let value = submit(world, "ReadAsset", json!({ "id": id }), &identity("auditor"));
    serde_json::from_value(value).unwrap()
}

#[test]
fn manufacture_transfer_update_lifecycle() {
    let world = MemoryStore::new();
    let alice = identity("alice");
    let bob = identity("bob");

    submit(
        &world,
        "ManufactureAsset",
        json!({"id": "a1", "assetType": "pallet", "location": "1,2", "manufacturer": "acme"}),
        &alice,
    );
    assert_eq!(read(&world, "a1").owner.as_str(), "alice");

    let denied = run_transaction(
        &world,
        Function::TransferAsset,
        serde_json::to_value(TransferAssetRequest::new("a1", "bob")).unwrap(),
        &bob,
    );
    assert_eq!(expect_kind(denied), ErrorKind::Unauthorized);
    assert_eq!(read(&world, "a1").owner.as_str(), "alice");

    let previous = submit(
        &world,
        "TransferAsset",
        json!({"id": "a1", "newOwner": "bob", "location": "ignored"}),
        &alice,
    );
    assert_eq!(previous, json!("alice"));
    let moved = read(&world, "a1");
    assert_eq!(moved.owner.as_str(), "bob");
    assert_eq!(moved.location, "1,2");

    submit(
        &world,
        "UpdateAsset",
        json!({"id": "a1", "location": "3,4", "data": "{\"temp\":4}"}),
        &alice,
    );
    let updated = read(&world, "a1");
    assert_eq!(updated.location, "3,4");
    assert_eq!(updated.data.as_str(), "{\"temp\":4}");
    assert_eq!(updated.owner.as_str(), "bob");

    submit(&world, "DeleteAsset", json!({"id": "a1"}), &bob);
    let exists = submit(&world, "AssetExists", json!({"id": "a1"}), &bob);
    assert_eq!(exists, Value::Bool(false));
}

#[test]
fn alice_hands_asset_to_bob_who_updates_it() {
    let world = MemoryStore::new();
    let alice = identity("alice");
    let bob = identity("bob");

    submit(
        &world,
        "ManufactureAsset",
        json!({
            "id": "a1",
            "assetType": "container",
            "location": "1,2",
            "manufacturer": "acme",
            "publicDescription": "reefer",
        }),
        &alice,
    );
    let manufactured = read(&world, "a1");

    let previous = submit(
        &world,
        "TransferAsset",
        json!({"id": "a1", "newOwner": "bob"}),
        &alice,
    );
    assert_eq!(previous, json!("alice"));

    let retry = run_transaction(
        &world,
        Function::TransferAsset,
        json!({"id": "a1", "newOwner": "bob"}),
        &alice,
    );
    assert_eq!(expect_kind(retry), ErrorKind::Unauthorized);

    submit(
        &world,
        "UpdateAsset",
        json!({"id": "a1", "location": "10,20"}),
        &bob,
    );
    let updated = read(&world, "a1");
    assert_eq!(updated.owner.as_str(), "bob");
    assert_eq!(updated.location, "10,20");
    assert_eq!(updated.asset_type, manufactured.asset_type);
    assert_eq!(updated.manufacturer, manufactured.manufacturer);
    assert_eq!(updated.public_description, manufactured.public_description);
    assert_eq!(updated.current_state, manufactured.current_state);
    assert_eq!(updated.data, manufactured.data);
    assert_eq!(updated.doc_type, manufactured.doc_type);
}

#[test]
fn anonymous_caller_sees_existence_errors_first() {
    let world = MemoryStore::new();
    submit(&world, "InitLedger", Value::Null, &identity("admin"));
    let anonymous = StaticIdentity::anonymous();

    let duplicate = run_transaction(
        &world,
        Function::ManufactureAsset,
        json!({"id": "asset1", "assetType": "", "location": "", "manufacturer": ""}),
        &anonymous,
    );
    assert_eq!(expect_kind(duplicate), ErrorKind::AlreadyExists);

    let missing = run_transaction(
        &world,
        Function::TransferAsset,
        json!({"id": "ghost", "newOwner": "bob"}),
        &anonymous,
    );
    assert_eq!(expect_kind(missing), ErrorKind::NotFound);
}

#[test]
fn seeded_ledger_is_listed_in_key_order() {
    let world = MemoryStore::new();
    let admin = identity("admin");
    submit(&world, "InitLedger", Value::Null, &admin);
    for id in ["c", "b"] {
        submit(
            &world,
            "Manufacture",
            json!({"id": id, "assetType": "", "location": "", "manufacturer": ""}),
            &admin,
        );
    }

    let listed = submit(&world, "ListAllAssets", Value::Null, &admin);
    let keys: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["Key"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(keys, ["asset1", "asset2", "b", "c"]);
    assert_eq!(listed[0]["Record"]["manufacturer"], "user 2");

    let rerun = run_transaction(&world, Function::InitLedger, Value::Null, &admin);
    assert_eq!(expect_kind(rerun), ErrorKind::AlreadyExists);
    assert_eq!(world.len(), 4);
}

#[test]
fn rejected_update_leaves_state_untouched() {
    let world = MemoryStore::new();
    let alice = identity("alice");
    submit(&world, "InitLedger", Value::Null, &alice);
    let before = world.entries();

    let empty = run_transaction(&world, Function::UpdateAsset, json!({"id": "asset1"}), &alice);
    assert_eq!(expect_kind(empty), ErrorKind::InvalidRequest);

    let missing = run_transaction(
        &world,
        Function::UpdateAsset,
        json!({"id": "nope", "location": "x"}),
        &alice,
    );
    assert_eq!(expect_kind(missing), ErrorKind::NotFound);

    assert_eq!(world.entries(), before);
}

#[test]
fn evaluate_functions_never_commit() {
    let world = MemoryStore::new();
    let alice = identity("alice");
    submit(&world, "InitLedger", Value::Null, &alice);
    let version = world.version("asset1");

    for function in [Function::ReadAsset, Function::AssetExists] {
        let invocation =
            run_transaction(&world, function, json!({"id": "asset1"}), &alice).unwrap();
        assert!(invocation.committed.is_none());
    }
    assert_eq!(world.version("asset1"), version);
}

#[test]
fn conflicting_submits_only_one_commits() {
    let world = MemoryStore::new();
    let alice = identity("alice");
    submit(&world, "InitLedger", Value::Null, &alice);

    // Two transactions read the same version; the second commit must fail.
    let first = world.begin();
    let second = world.begin();
    let mut first = track_contract::AssetContract::new(first);
    let mut second = track_contract::AssetContract::new(second);
    let caller = track_core::CallerId::new("alice").unwrap();
    first
        .transfer_asset(&caller, TransferAssetRequest::new("asset1", "bob"))
        .unwrap();
    second
        .transfer_asset(&caller, TransferAssetRequest::new("asset1", "carol"))
        .unwrap();

    first.into_store().commit().unwrap();
    let err = second.into_store().commit().unwrap_err();
    assert!(matches!(err, track_core::StoreError::Conflict { .. }));
    assert_eq!(read(&world, "asset1").owner.as_str(), "bob");
}
