use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::{NamedTempFile, tempdir};

fn ledger(data_dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("account-ledger"));
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

fn funded_config(starting_balance: &str) -> NamedTempFile {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, r#"{{ "starting_balance": "{starting_balance}" }}"#).unwrap();
    config
}

fn register(data_dir: &Path, config: &Path, username: &str, role: &str) {
    let email = format!("{username}@example.com");
    ledger(data_dir)
        .arg("--config")
        .arg(config)
        .args(["register", "--username", username, "--password", "secret123"])
        .args(["--email", email.as_str(), "--role", role])
        .assert()
        .success();
}

#[test]
fn test_register_login_pay_history() {
    let dir = tempdir().unwrap();
    let config = funded_config("1000");

    ledger(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("roles written"));
    register(dir.path(), config.path(), "alice01", "customer");

    ledger(dir.path())
        .args(["login", "--username", "alice01", "--password", "secret123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("account 1 is active"));

    ledger(dir.path())
        .args(["pay", "--payer", "1", "--payee", "2", "--amount", "500.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("processed successfully"));

    ledger(dir.path())
        .args(["pay", "--payer", "1", "--payee", "2", "--amount", "2000.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient balance"));

    ledger(dir.path())
        .args(["history", "--account", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_count\": 3"))
        .stdout(predicate::str::contains("\"balance\": \"500.0\""))
        .stdout(predicate::str::contains("secret123").not());

    ledger(dir.path())
        .arg("accounts")
        .assert()
        .success()
        .stdout(predicate::str::contains("1,alice01,alice01@example.com,500,true,customer"))
        .stdout(predicate::str::contains("secret123").not());
}

#[test]
fn test_login_with_wrong_password_is_audited() {
    let dir = tempdir().unwrap();
    let config = funded_config("0");
    ledger(dir.path()).arg("init").assert().success();
    register(dir.path(), config.path(), "alice01", "customer");

    ledger(dir.path())
        .args(["login", "--username", "alice01", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid credentials"));

    ledger(dir.path())
        .arg("ledger")
        .assert()
        .success()
        .stdout(predicate::str::contains("1,1,,FAILED_LOGIN,"));
}

#[test]
fn test_register_with_unknown_role_fails() {
    let dir = tempdir().unwrap();
    let config = funded_config("0");
    ledger(dir.path()).arg("init").assert().success();

    ledger(dir.path())
        .arg("--config")
        .arg(config.path())
        .args(["register", "--username", "alice01", "--password", "secret123"])
        .args(["--email", "alice@example.com", "--role", "admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("role not found"));
}

#[test]
fn test_pay_batch_skips_bad_rows() {
    let dir = tempdir().unwrap();
    let config = funded_config("10");
    ledger(dir.path()).arg("init").assert().success();
    register(dir.path(), config.path(), "alice01", "customer");
    register(dir.path(), config.path(), "shop0001", "merchant");
    for user in ["alice01", "shop0001"] {
        ledger(dir.path())
            .args(["login", "--username", user, "--password", "secret123"])
            .assert()
            .success();
    }

    let mut csv = NamedTempFile::new().unwrap();
    writeln!(csv, "payer, payee, amount").unwrap();
    writeln!(csv, "1, 2, 2.5").unwrap();
    writeln!(csv, "1, 2, lots").unwrap();
    writeln!(csv, "1, 2, -1").unwrap();
    writeln!(csv, "2, 1, 7").unwrap();
    writeln!(csv, "1, 2, 100").unwrap();

    ledger(dir.path())
        .arg("pay-batch")
        .arg(csv.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Error reading payment"))
        .stderr(predicate::str::contains("Error processing payment"))
        .stdout(predicate::str::contains("1,alice01,alice01@example.com,7.5,true,customer"))
        .stdout(predicate::str::contains("2,shop0001,shop0001@example.com,10,true,merchant"));
}
