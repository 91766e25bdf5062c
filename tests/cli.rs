use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "expense";

fn expense_command(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("EXPENSE_CLI_DATA_DIR", data_dir.path());
    cmd.env_remove("EXPENSE_LOG");
    cmd
}

#[test]
fn cli_init_creates_data_files() {
    let dir = TempDir::new().unwrap();

    expense_command(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialized expense data"));

    assert!(dir.path().join("data").join("categories.json").exists());
    assert!(dir.path().join("config.json").exists());

    expense_command(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Already initialized"));
}

#[test]
fn cli_add_then_list() {
    let dir = TempDir::new().unwrap();

    expense_command(&dir)
        .args(["add", "12.50", "-c", "Food", "-d", "2024-01-15"])
        .assert()
        .success()
        .stdout(contains("Added expense").and(contains("$12.50")));

    expense_command(&dir)
        .args(["add", "30", "-c", "Transport", "-d", "2024-01-16"])
        .assert()
        .success();

    expense_command(&dir)
        .args(["list", "-s", "foo"])
        .assert()
        .success()
        .stdout(contains("Food").and(contains("Transport").not()));

    expense_command(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("2 expense(s), total $42.50"));
}

#[test]
fn cli_rejects_negative_amount() {
    let dir = TempDir::new().unwrap();

    expense_command(&dir)
        .args(["add", "-5", "-c", "Food"])
        .assert()
        .failure()
        .stderr(contains("Please enter a valid amount greater than 0."));

    expense_command(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No expenses found."));
}

#[test]
fn cli_limits_default_and_set() {
    let dir = TempDir::new().unwrap();

    expense_command(&dir)
        .args(["limits", "show"])
        .assert()
        .success()
        .stdout(
            contains("$100.00")
                .and(contains("$500.00"))
                .and(contains("$2000.00")),
        );

    expense_command(&dir)
        .args(["limits", "set", "daily", "40"])
        .assert()
        .success();

    expense_command(&dir)
        .args(["limits", "show"])
        .assert()
        .success()
        .stdout(contains("$40.00"));
}

#[test]
fn cli_export_to_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");

    expense_command(&dir)
        .args(["add", "12.50", "-c", "Food", "-d", "2024-01-15"])
        .assert()
        .success();

    expense_command(&dir)
        .args(["export", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Exported 1 expense(s)"));

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.starts_with("Date,Category,Amount"));
    assert!(contents.contains("\"Jan 15, 2024\",Food,12.50"));
}

#[test]
fn cli_recurring_expense_rolls_over_on_start() {
    let dir = TempDir::new().unwrap();

    expense_command(&dir)
        .args(["add", "50", "-c", "Rent", "-d", "2020-01-01", "--every", "monthly"])
        .assert()
        .success()
        .stdout(contains("Added recurring expense").and(contains("2020-02-01")));

    // the next start delivers the reminder and materializes every overdue month
    expense_command(&dir)
        .args(["list", "-c", "Rent"])
        .assert()
        .success()
        .stdout(
            contains("Recurring Expense Due: Your monthly expense of $50.00 for Rent is due.")
                .and(contains("2020-02-01"))
                .and(contains("2020-03-01")),
        );

    expense_command(&dir)
        .args(["recurring", "list"])
        .assert()
        .success()
        .stdout(
            contains("Rent")
                .and(contains("Monthly"))
                .and(contains("Recurring Expense Due").not()),
        );

    expense_command(&dir)
        .args(["recurring", "run"])
        .assert()
        .success()
        .stdout(contains("No recurring expenses are due."));
}

#[test]
fn cli_rejects_unknown_frequency() {
    let dir = TempDir::new().unwrap();

    expense_command(&dir)
        .args(["add", "10", "--every", "fortnightly"])
        .assert()
        .failure()
        .stderr(contains("Unknown frequency"));
}
