mod support;

use caseflow_core::demand::{self, DemandKind};
use caseflow_core::selection::SelectionPatch;
use caseflow_core::steps::StepId;
use caseflow_core::storage::FileStorage;
use caseflow_core::store::SessionStore;
use predicates::prelude::*;

use support::{
    new_command_in, new_command_with_temp_home, write_config_with_currency, write_invalid_config,
    write_valid_config,
};

fn seed_saved_order(state_dir: &std::path::Path) {
    let mut store = SessionStore::open(Box::new(FileStorage::new(state_dir)));
    store.update(&SelectionPatch::phone(Some("Samsung"), Some("Galaxy S23")));
    store.set_step(StepId::ContactForm);
}

#[test]
fn root_help_runs_without_config() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: caseflow"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("demand"))
        .stdout(predicate::str::contains("reset"));
}

#[test]
fn status_help_describes_the_saved_order() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .args(["status", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Show the saved in-progress order and current step",
        ));
}

#[test]
fn status_shows_defaults_without_config_or_saved_state() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("onboarding"))
        .stdout(predicate::str::contains("Pendiente"))
        .stdout(predicate::str::contains("No saved order found"));
}

#[test]
fn invalid_config_is_rejected_with_a_pointer_to_the_file() {
    let (mut command, temp_home) = new_command_with_temp_home();
    write_invalid_config(temp_home.path());

    command
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config at"))
        .stderr(predicate::str::contains(".config/caseflow/config.toml"))
        .stderr(predicate::str::contains("README.md"));
}

#[test]
fn status_reports_a_saved_order_from_the_configured_state_dir() {
    let (mut command, temp_home) = new_command_with_temp_home();
    let state_dir = temp_home.path().join("state");
    write_valid_config(temp_home.path(), &state_dir);
    seed_saved_order(&state_dir);

    command
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("contact-form"))
        .stdout(predicate::str::contains("Samsung • Galaxy S23"))
        .stdout(predicate::str::contains("No saved order found").not());
}

#[test]
fn status_total_uses_the_configured_currency() {
    let (mut command, temp_home) = new_command_with_temp_home();
    let state_dir = temp_home.path().join("state");
    write_config_with_currency(temp_home.path(), &state_dir, "USD");
    seed_saved_order(&state_dir);

    command
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("USD"))
        .stdout(predicate::str::contains("MXN").not());
}

#[test]
fn status_total_defaults_to_mxn_without_config() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("MXN"));
}

#[test]
fn reset_clears_the_saved_order_on_disk() {
    let (mut command, temp_home) = new_command_with_temp_home();
    let state_dir = temp_home.path().join("state");
    write_valid_config(temp_home.path(), &state_dir);
    seed_saved_order(&state_dir);

    command
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved order cleared"));

    new_command_in(temp_home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("onboarding"))
        .stdout(predicate::str::contains("Samsung").not());
}

#[test]
fn demand_lists_logged_searches_without_results() {
    let (mut command, temp_home) = new_command_with_temp_home();
    let state_dir = temp_home.path().join("state");
    write_valid_config(temp_home.path(), &state_dir);

    let storage = FileStorage::new(&state_dir);
    demand::append_entry(&storage, DemandKind::Brand, "Nokia");
    demand::append_entry(&storage, DemandKind::Model, "Samsung: Galaxy Z Flip 9");

    command
        .arg("demand")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nokia"))
        .stdout(predicate::str::contains("Samsung: Galaxy Z Flip 9"))
        .stdout(predicate::str::contains("2 logged searches without results"));
}

#[test]
fn demand_with_no_entries_reports_zero() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .arg("demand")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 logged searches without results"));
}
