use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn script(home: &TempDir, input: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("finance_core_cli").unwrap();
    cmd.env("FINANCE_CORE_HOME", home.path())
        .env("FINANCE_CORE_CLI_SCRIPT", "1")
        .env("RUST_LOG", "off")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn script_mode_shows_seeded_budget() {
    let home = TempDir::new().unwrap();
    script(&home, "budget 2023-12\nexit\n")
        .success()
        .stdout(contains("Budget for December 2023"))
        .stdout(contains("Housing"))
        .stdout(contains("$1,200.00"))
        .stdout(contains("$2,750.00"));
}

#[test]
fn script_mode_adds_transaction_and_persists() {
    let home = TempDir::new().unwrap();
    script(
        &home,
        "transaction add expense 42.5 2024-03-09 food \"Farmers market\"\nexit\n",
    )
    .success()
    .stdout(contains("Added transaction"))
    .stdout(contains("-$42.50 on Mar 9, 2024"));

    let json = std::fs::read_to_string(home.path().join("store").join("finance-store.json"))
        .unwrap();
    assert!(json.contains("Farmers market"));

    script(&home, "transaction list 2024-03\n")
        .success()
        .stdout(contains("Farmers market"))
        .stdout(contains("Food & Dining"));
}

#[test]
fn invalid_category_input_is_reported() {
    let home = TempDir::new().unwrap();
    script(&home, "category add Pets blue 10\ncategory add Pets 3b82f6 -5\n")
        .success()
        .stdout(contains("Please enter a valid hex color code"))
        .stdout(contains("Budget must be a positive number"));
}

#[test]
fn deleting_last_category_is_refused() {
    let home = TempDir::new().unwrap();
    script(
        &home,
        "config set seed_sample_data false\n\
         category delete food\n\
         category delete housing\n\
         category delete transportation\n\
         category delete entertainment\n\
         category delete utilities\n\
         category delete other\n",
    )
    .success()
    .stdout(contains("Deleted category `Utilities`"))
    .stdout(contains("You must have at least one category."));
}

#[test]
fn unknown_command_suggests_closest() {
    let home = TempDir::new().unwrap();
    script(&home, "sumary\n")
        .success()
        .stdout(contains("Unknown command `sumary`"))
        .stdout(contains("Suggestion: `summary`?"));
}

#[test]
fn chart_breakdown_lists_categories() {
    let home = TempDir::new().unwrap();
    script(&home, "chart breakdown 2023-12\nchart monthly 2023-12\n")
        .success()
        .stdout(contains("Spending by category, December 2023"))
        .stdout(contains("94.6%"))
        .stdout(contains("Monthly expenses through December 2023"))
        .stdout(contains("Dec 2023"));
}
