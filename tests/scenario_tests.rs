use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

mod common;

const ADMIN: i64 = 999;

#[test]
fn test_full_purchase_flow() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("events.jsonl");
    let ledger = dir.path().join("orders.json");

    common::write_script(&script, &common::purchase_flow(42, ADMIN)).unwrap();

    let mut cmd = Command::new(cargo_bin!("chatshop"));
    cmd.arg(&script).arg("--ledger").arg(&ledger).arg("--admin-id").arg(ADMIN.to_string());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Amount due: 120"))
        .stdout(predicate::str::contains("[-> 42] Receipt"))
        .stdout(predicate::str::contains("Payment confirmed!"))
        .stdout(predicate::str::contains("Main St 1"));

    let raw = std::fs::read_to_string(&ledger).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["status"], "paid");
    assert_eq!(entries[0]["total"], 120);
    assert_eq!(entries[0]["delivery_address"], "Main St 1");
    assert_eq!(entries[0]["user_id"], 42);
}

#[test]
fn test_ledger_persists_across_runs() {
    let dir = tempdir().unwrap();
    let ledger = dir.path().join("orders.json");

    for user in [1, 2] {
        let script = dir.path().join(format!("events-{user}.jsonl"));
        common::write_script(&script, &common::purchase_flow(user, ADMIN)).unwrap();

        let mut cmd = Command::new(cargo_bin!("chatshop"));
        cmd.arg(&script).arg("--ledger").arg(&ledger).arg("--admin-id").arg(ADMIN.to_string());
        cmd.assert().success();
    }

    let raw = std::fs::read_to_string(&ledger).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 2);
    assert_eq!(entries[0]["user_id"], 1);
    assert_eq!(entries[1]["user_id"], 2);
}

#[test]
fn test_empty_cart_checkout_is_rejected() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("events.jsonl");
    let ledger = dir.path().join("orders.json");

    common::write_script(&script, &[common::press(42, "checkout_order")]).unwrap();

    let mut cmd = Command::new(cargo_bin!("chatshop"));
    cmd.arg(&script).arg("--ledger").arg(&ledger).arg("--admin-id").arg(ADMIN.to_string());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cart is empty"));
    assert!(!ledger.exists());
}

#[test]
fn test_non_admin_approval_is_denied() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("events.jsonl");
    let ledger = dir.path().join("orders.json");

    let mut lines = vec![
        common::press(42, "add_apple"),
        common::press(42, "checkout_order"),
    ];
    // The customer tries to approve their own order.
    lines.push(common::press(42, "approve_42"));
    common::write_script(&script, &lines).unwrap();

    let mut cmd = Command::new(cargo_bin!("chatshop"));
    cmd.arg(&script).arg("--ledger").arg(&ledger).arg("--admin-id").arg(ADMIN.to_string());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Access denied."));
    assert!(!ledger.exists());
}

#[test]
fn test_admin_catalog_commands() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("events.jsonl");
    let ledger = dir.path().join("orders.json");

    common::write_script(
        &script,
        &[
            common::command(ADMIN, "add_product", &["milk", "Milk", "60"]),
            common::command(ADMIN, "remove_product", &["apple"]),
            common::press(42, "menu"),
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("chatshop"));
    cmd.arg(&script).arg("--ledger").arg(&ledger).arg("--admin-id").arg(ADMIN.to_string());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Product 'Milk' added."))
        .stdout(predicate::str::contains("Product 'apple' removed."))
        .stdout(predicate::str::contains("add_milk"))
        .stdout(predicate::str::contains("add_apple").not());
}
