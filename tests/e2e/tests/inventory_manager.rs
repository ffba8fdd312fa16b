//! E2E тесты для CLI инструмента `inventory-manager`.
//!
//! Проверяем разовые команды и интерактивное меню поверх копий фикстур.

use std::fs;

use assert_cmd::Command;
use e2e_tests::{copy_fixture, fixture};
use predicates::prelude::*;
use tempfile::tempdir;

/// Создать команду для запуска inventory-manager.
///
/// `cargo_bin` deprecated из-за edge case с custom build directories,
/// но это единственный способ для кросс-крейтовых бинарников.
#[expect(deprecated)]
fn manager() -> Command {
    Command::cargo_bin("inventory-manager").unwrap()
}

// ============================================================================
// Команды чтения
// ============================================================================

#[test]
fn test_list() {
    manager()
        .args(["--file", fixture("inventory.txt").to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converse Chuck 70"))
        .stdout(predicate::str::contains("3200.00"));
}

#[test]
fn test_list_skips_malformed_line() {
    manager()
        .args(["--file", fixture("inventory_malformed.txt").to_str().unwrap(), "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SC01"))
        .stdout(predicate::str::contains("SC03"))
        .stdout(predicate::str::contains("SC02").not());
}

#[test]
fn test_find_is_case_insensitive() {
    manager()
        .args(["--file", fixture("inventory.txt").to_str().unwrap(), "find", "sc03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product:    Adidas Ultraboost"));
}

#[test]
fn test_find_unknown_code_fails() {
    manager()
        .args(["--file", fixture("inventory.txt").to_str().unwrap(), "find", "XX99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product code 'XX99' not found"));
}

#[test]
fn test_low_picks_first_of_equal_quantities() {
    // SC02 и SC04 имеют по 4 единицы, выбирается первая
    manager()
        .args(["--file", fixture("inventory.txt").to_str().unwrap(), "low"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product:    Jordan 1"));
}

#[test]
fn test_value() {
    manager()
        .args(["--file", fixture("inventory.txt").to_str().unwrap(), "value"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Value (R)"))
        .stdout(predicate::str::contains("12800.00"));
}

#[test]
fn test_sale() {
    manager()
        .args(["--file", fixture("inventory.txt").to_str().unwrap(), "sale"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("On Sale: CONVERSE CHUCK 70"));
}

#[test]
fn test_missing_file_is_not_fatal() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    manager()
        .args(["--file", missing.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inventory is empty."))
        .stderr(predicate::str::contains("not found"));

    assert!(!missing.exists());
}

// ============================================================================
// Команды изменения
// ============================================================================

#[test]
fn test_add_appends_one_line() {
    let dir = tempdir().unwrap();
    let file = copy_fixture("inventory.txt", dir.path()).unwrap();
    let before = fs::read_to_string(&file).unwrap();

    manager()
        .args(["--file", file.to_str().unwrap(), "add", "Italy", "SC06", "Superga 2750", "65", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product captured successfully!"));

    let after = fs::read_to_string(&file).unwrap();
    assert!(after.starts_with(&before));
    assert_eq!(after.lines().count(), before.lines().count() + 1);
    assert!(after.ends_with("\nItaly,SC06,Superga 2750,65.0,12"));
}

#[test]
fn test_add_rejects_negative_quantity() {
    let dir = tempdir().unwrap();
    let file = copy_fixture("inventory.txt", dir.path()).unwrap();
    let before = fs::read_to_string(&file).unwrap();

    manager()
        .args(["--file", file.to_str().unwrap(), "add", "Italy", "SC06", "Superga", "65", "-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for quantity"));

    assert_eq!(fs::read_to_string(&file).unwrap(), before);
}

#[test]
fn test_low_add_rewrites_file() {
    let dir = tempdir().unwrap();
    let file = copy_fixture("inventory.txt", dir.path()).unwrap();

    manager()
        .args(["--file", file.to_str().unwrap(), "low", "--add", "10"])
        .assert()
        .success()
        .stdout("'Jordan 1' has been restocked. New quantity: 14\n");

    let content = fs::read_to_string(&file).unwrap();
    let expected = "Country,code,product,cost,quantity\n\
                    South Africa,SC01,Nike Air Max,109.99,20\n\
                    China,SC02,Jordan 1,3200.0,14\n\
                    Vietnam,SC03,Adidas Ultraboost,1800.0,10\n\
                    Mexico,SC04,Puma Suede,750.5,4\n\
                    Brazil,SC05,Converse Chuck 70,950.0,35\n";
    assert_eq!(content, expected);
}

#[test]
fn test_low_negative_add_fails_without_changes() {
    let dir = tempdir().unwrap();
    let file = copy_fixture("inventory.txt", dir.path()).unwrap();
    let before = fs::read_to_string(&file).unwrap();

    manager()
        .args(["--file", file.to_str().unwrap(), "low", "--add", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid restock quantity -5"));

    assert_eq!(fs::read_to_string(&file).unwrap(), before);
}

// ============================================================================
// Интерактивное меню
// ============================================================================

#[test]
fn test_menu_session() {
    let dir = tempdir().unwrap();
    let file = copy_fixture("inventory.txt", dir.path()).unwrap();

    manager()
        .args(["--file", file.to_str().unwrap()])
        .write_stdin("list\n3\ny\n6\nfind\nsc02\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inventory Overview"))
        .stdout(predicate::str::contains("'Jordan 1' has been restocked. New quantity: 10"))
        .stdout(predicate::str::contains("Code:       SC02\nCost:       R 3200.00\nQuantity:   10"))
        .stdout(predicate::str::contains("Goodbye!"));

    let content = fs::read_to_string(&file).unwrap();
    assert!(content.contains("China,SC02,Jordan 1,3200.0,10\n"));
}
