use std::fs;

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;
use predicates::str::contains;

const BUSINESS: &str = r#"
    "companyName": "Northwind Logistics",
    "industry": "logistics",
    "companySize": "51-200",
    "contactName": "Robin Vermeer",
    "email": "robin@northwind.io",
    "phone": "+31 20 123 4567"
"#;

const REST_OF_FORM: &str = r#"
    "projectDescription": "Automate order intake from email into our ERP system.",
    "primaryGoals": ["automate-processes", "reduce-costs"],
    "currentSystems": ["Exact Online"],
    "hostingPreference": "cloud",
    "securityRequirements": ["gdpr"],
    "timeline": "1-3-months",
    "budgetRange": "25k-50k",
    "needsConsultation": true,
    "consultationFormat": "video-call",
    "preferredTimeSlots": ["weekday-morning"]
"#;

fn quote_cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("quote_cli").unwrap();
    cmd.env("QUOTE_WIZARD_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn answers(home: &TempDir, body: &str) -> std::path::PathBuf {
    let file = home.child("answers.json");
    file.write_str(&format!("{{{body}}}")).unwrap();
    file.path().to_path_buf()
}

fn json_files(dir: &std::path::Path) -> Vec<String> {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".json"))
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn validate_accepts_complete_business_step() {
    let home = TempDir::new().unwrap();
    let file = answers(&home, BUSINESS);

    quote_cli(&home)
        .args(["validate", "--step", "1"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("Step 1 (Business information) is valid"));
}

#[test]
fn validate_reports_each_field_error() {
    let home = TempDir::new().unwrap();
    let file = answers(&home, r#""email": "lead@mailinator.com""#);

    quote_cli(&home)
        .args(["validate", "--context", "solutions", "--step", "1"])
        .arg(&file)
        .assert()
        .failure()
        .stdout(contains("companyName: Company name is required"))
        .stdout(contains("email: Please use your business email address"))
        .stderr(contains("step 1 (Business information) has"));
}

#[test]
fn validate_uses_the_extended_step_table() {
    let home = TempDir::new().unwrap();
    let file = answers(&home, r#""serviceConfig": null"#);

    quote_cli(&home)
        .args(["validate", "--context", "intelligent-applications", "--step", "3"])
        .arg(&file)
        .assert()
        .failure()
        .stdout(contains(
            "applicationConfig: Please complete the application requirements",
        ));
}

#[test]
fn scripted_start_submits_into_outbox() {
    let home = TempDir::new().unwrap();
    let file = answers(&home, &format!("{BUSINESS},{REST_OF_FORM}"));

    quote_cli(&home)
        .args(["start", "--context", "solutions", "--package", "enterprise"])
        .arg("--answers")
        .arg(&file)
        .args(["--landing-url", "https://example.com/solutions?utm_source=newsletter"])
        .assert()
        .success()
        .stdout(contains("Reference: Q-"));

    let outbox = json_files(&home.path().join("outbox"));
    assert_eq!(outbox.len(), 1);
    let request = fs::read_to_string(home.path().join("outbox").join(&outbox[0])).unwrap();
    assert!(request.contains("\"packageType\": \"enterprise\""));
    assert!(request.contains("\"utm_source\": \"newsletter\""));
    assert!(json_files(&home.path().join("drafts")).is_empty());
}

#[test]
fn scripted_start_runs_the_integration_flow() {
    let home = TempDir::new().unwrap();
    let service_config = r#"
        "serviceConfig": {
            "kind": "integration",
            "payload": {
                "integrations": [{
                    "id": "pair-1",
                    "sourceSystem": "Exact Online",
                    "targetSystem": "Salesforce",
                    "direction": "two-way",
                    "syncFrequency": "hourly",
                    "apiAvailable": true
                }],
                "dataVolume": "medium"
            }
        }
    "#;
    let file = answers(&home, &format!("{BUSINESS},{REST_OF_FORM},{service_config}"));

    quote_cli(&home)
        .args(["start", "--context", "system-integration"])
        .arg("--answers")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("6 steps"))
        .stdout(contains("Step 3 (Integration details) complete"))
        .stdout(contains("Reference: Q-"));
}

#[test]
fn incomplete_answers_leave_a_draft_behind() {
    let home = TempDir::new().unwrap();
    let file = answers(&home, BUSINESS);

    quote_cli(&home)
        .args(["start", "--context", "smart-assistant"])
        .arg("--answers")
        .arg(&file)
        .assert()
        .failure()
        .stdout(contains("projectDescription: Please describe your project"))
        .stderr(contains("step 2 (Project scope)"));

    quote_cli(&home)
        .args(["drafts", "show", "--context", "smart-assistant"])
        .assert()
        .success()
        .stdout(contains("quotation_form_data_smart-assistant"))
        .stdout(contains("Northwind Logistics"))
        .stdout(contains("\"kind\": \"ai-assistant\""));

    quote_cli(&home)
        .args(["drafts", "show", "--context", "solutions"])
        .assert()
        .success()
        .stdout(contains("No saved draft"));

    quote_cli(&home)
        .args(["drafts", "clear", "--context", "smart-assistant"])
        .assert()
        .success();

    quote_cli(&home)
        .args(["drafts", "show", "--context", "smart-assistant"])
        .assert()
        .success()
        .stdout(contains("No saved draft"));
}

#[test]
fn restored_draft_resumes_a_partial_answers_file() {
    let home = TempDir::new().unwrap();
    let first = answers(&home, BUSINESS);
    quote_cli(&home)
        .args(["start", "--context", "solutions", "--answers"])
        .arg(&first)
        .assert()
        .failure();

    let rest = answers(&home, REST_OF_FORM);
    quote_cli(&home)
        .args(["start", "--context", "solutions", "--answers"])
        .arg(&rest)
        .assert()
        .success()
        .stdout(contains("Restored your saved progress"))
        .stdout(contains("Reference: Q-"));
}

#[test]
fn unknown_context_falls_back_to_standard_flow() {
    let home = TempDir::new().unwrap();
    let file = answers(&home, &format!("{BUSINESS},{REST_OF_FORM}"));

    quote_cli(&home)
        .args(["start", "--context", "space-tourism", "--answers"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("Unknown service context `space-tourism`"))
        .stdout(contains("5 steps"));
}

#[test]
fn unwritable_outbox_reports_submission_failure() {
    let home = TempDir::new().unwrap();
    home.child("outbox").write_str("not a directory").unwrap();
    let file = answers(&home, &format!("{BUSINESS},{REST_OF_FORM}"));

    quote_cli(&home)
        .args(["start", "--answers"])
        .arg(&file)
        .assert()
        .failure()
        .stdout(contains("We could not submit your request"))
        .stderr(contains("could not be submitted"));

    assert!(!json_files(&home.path().join("drafts")).is_empty());
}

#[test]
fn unknown_package_is_rejected() {
    let home = TempDir::new().unwrap();
    quote_cli(&home)
        .args(["start", "--package", "platinum"])
        .assert()
        .failure()
        .stderr(contains("unknown package `platinum`"));
}

#[test]
fn config_ttl_round_trips() {
    let home = TempDir::new().unwrap();

    quote_cli(&home)
        .args(["config", "set-ttl", "3"])
        .assert()
        .success()
        .stdout(contains("kept for 3 day(s)"));

    quote_cli(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("\"draft_ttl_days\": 3"))
        .stdout(contains("drafts").and(contains("outbox")));

    quote_cli(&home)
        .args(["config", "set-ttl", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid setting `draft_ttl_days`"));
}
