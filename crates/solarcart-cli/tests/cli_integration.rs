//! CLI Integration Tests
//!
//! These tests verify the CLI commands work correctly end-to-end.
//! They test the "wiring" between the CLI and the core library.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Create a CLI command with a temporary data directory and no sync endpoint
fn cli_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("solarcart").expect("Failed to find solarcart binary");
    cmd.env_remove("SOLARCART_ENDPOINT");
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd
}

fn add_panel(data_dir: &TempDir) {
    cli_cmd(data_dir)
        .args(["add", "P1", "Panel X", "500", "p1.jpg"])
        .assert()
        .success();
}

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_show_empty_cart() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cart is empty"))
        .stdout(predicate::str::contains("Total: R$ 0,00"));
}

#[test]
fn test_show_lists_lines() {
    let data_dir = TempDir::new().unwrap();
    add_panel(&data_dir);

    cli_cmd(&data_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] Panel X x1 @ R$ 500,00"))
        .stdout(predicate::str::contains("ID: P1"));
}

// ============================================================================
// Add Command Tests
// ============================================================================

#[test]
fn test_add_prints_notice() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["add", "P1", "Panel X", "500", "p1.jpg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Produto adicionado ao carrinho!"))
        .stdout(predicate::str::contains("Items: 1"));
}

#[test]
fn test_add_same_product_twice_bumps_quantity() {
    let data_dir = TempDir::new().unwrap();
    add_panel(&data_dir);
    add_panel(&data_dir);

    cli_cmd(&data_dir)
        .arg("count")
        .assert()
        .success()
        .stdout(predicate::str::diff("2\n"));

    cli_cmd(&data_dir)
        .arg("total")
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 1.000,00"));
}

#[test]
fn test_add_rejects_invalid_price() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["add", "P1", "Panel X", "abc", "p1.jpg"])
        .assert()
        .failure();
}

#[test]
fn test_add_non_finite_price_keeps_stored_cart() {
    let data_dir = TempDir::new().unwrap();
    add_panel(&data_dir);

    for price in ["NaN", "inf"] {
        cli_cmd(&data_dir)
            .args(["add", "P2", "Inverter", price, "inv.jpg"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid price"));
    }

    cli_cmd(&data_dir)
        .arg("count")
        .assert()
        .success()
        .stdout(predicate::str::contains("1"));
}

#[test]
fn test_add_with_unreachable_endpoint_still_succeeds() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["--endpoint", "http://127.0.0.1:9", "--timeout-secs", "1"])
        .args(["add", "P1", "Panel X", "500", "p1.jpg"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not synced"));

    cli_cmd(&data_dir)
        .arg("count")
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
}

// ============================================================================
// Quantity Command Tests
// ============================================================================

#[test]
fn test_scenario_add_add_decrease_decrease() {
    let data_dir = TempDir::new().unwrap();
    add_panel(&data_dir);
    add_panel(&data_dir);

    cli_cmd(&data_dir)
        .args(["decrease", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Panel X x1"));

    cli_cmd(&data_dir)
        .args(["decrease", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cart is empty"))
        .stdout(predicate::str::contains("Total: R$ 0,00"));
}

#[test]
fn test_increase_and_remove() {
    let data_dir = TempDir::new().unwrap();
    add_panel(&data_dir);

    cli_cmd(&data_dir)
        .args(["increase", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Items: 2"));

    cli_cmd(&data_dir)
        .args(["remove", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cart is empty"));
}

#[test]
fn test_out_of_range_index_fails() {
    let data_dir = TempDir::new().unwrap();
    add_panel(&data_dir);

    cli_cmd(&data_dir)
        .args(["remove", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_clear() {
    let data_dir = TempDir::new().unwrap();
    add_panel(&data_dir);

    cli_cmd(&data_dir).arg("clear").assert().success();

    cli_cmd(&data_dir)
        .arg("count")
        .assert()
        .success()
        .stdout(predicate::str::diff("0\n"));
}

// ============================================================================
// Render & Checkout Tests
// ============================================================================

#[test]
fn test_render_escapes_names() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["add", "X1", "<b>Kit</b>", "10", "kit.jpg"])
        .assert()
        .success();

    cli_cmd(&data_dir)
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("&lt;b&gt;Kit&lt;/b&gt;"))
        .stdout(predicate::str::contains("<b>Kit</b>").not())
        .stdout(predicate::str::contains("R$ 10,00"));
}

#[test]
fn test_render_empty_cart() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("Carrinho vazio"));
}

#[test]
fn test_checkout_requires_items() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .arg("checkout")
        .assert()
        .failure()
        .stderr(predicate::str::contains("vazio"));

    add_panel(&data_dir);

    cli_cmd(&data_dir)
        .arg("checkout")
        .assert()
        .success()
        .stdout(predicate::str::contains("/checkout"));
}

#[test]
fn test_pull_without_endpoint_fails() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .arg("pull")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No endpoint configured"));
}
