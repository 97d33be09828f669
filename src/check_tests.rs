use super::*;
use crate::workspace::WEST_CONFIG;
use std::fs;
use tempfile::TempDir;

/// Lay out a Zephyr tree plus a fully consistent workspace, the way a
/// successful init leaves them.
fn create_valid_workspace() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let rtos_dir = temp.path().join("zephyr-src");
    let ws_root = temp.path().join("ws");

    fs::create_dir_all(&rtos_dir).unwrap();
    fs::write(rtos_dir.join("west.yml"), "manifest:\n  projects: []\n").unwrap();

    let workspace = Workspace::new(&ws_root);
    fs::create_dir_all(workspace.west_dir()).unwrap();
    fs::write(workspace.west_config(), WEST_CONFIG).unwrap();
    std::os::unix::fs::symlink(&rtos_dir, workspace.rtos_link()).unwrap();

    let digest = fingerprint_files(&workspace.manifest(), &workspace.west_config()).unwrap();
    fs::write(workspace.fingerprint_record(), digest).unwrap();

    (temp, ws_root, rtos_dir)
}

#[test]
fn test_valid_workspace_passes() {
    let (_temp, ws_root, rtos_dir) = create_valid_workspace();

    let report = WorkspaceValidator::new(&ws_root, &rtos_dir).check().unwrap();
    assert_eq!(report.outcome, CheckOutcome::Valid);
    assert!(report.is_valid());
    assert!(report.message.is_none());
}

#[test]
fn test_missing_link_config() {
    let (_temp, ws_root, rtos_dir) = create_valid_workspace();
    fs::remove_file(Workspace::new(&ws_root).west_config()).unwrap();

    let report = WorkspaceValidator::new(&ws_root, &rtos_dir).check().unwrap();
    assert_eq!(report.outcome, CheckOutcome::MissingLinkConfig);
    assert!(report.message.unwrap().contains("config"));
}

#[test]
fn test_link_pointing_elsewhere_is_a_mismatch() {
    let (temp, ws_root, rtos_dir) = create_valid_workspace();

    let other = temp.path().join("other-zephyr");
    fs::create_dir_all(&other).unwrap();
    let link = Workspace::new(&ws_root).rtos_link();
    fs::remove_file(&link).unwrap();
    std::os::unix::fs::symlink(&other, &link).unwrap();

    let report = WorkspaceValidator::new(&ws_root, &rtos_dir).check().unwrap();
    assert_eq!(report.outcome, CheckOutcome::LinkMismatch);
}

#[test]
fn test_missing_link_is_a_mismatch() {
    let (_temp, ws_root, rtos_dir) = create_valid_workspace();
    fs::remove_file(Workspace::new(&ws_root).rtos_link()).unwrap();

    let report = WorkspaceValidator::new(&ws_root, &rtos_dir).check().unwrap();
    assert_eq!(report.outcome, CheckOutcome::LinkMismatch);
}

#[test]
fn test_missing_manifest() {
    let (_temp, ws_root, rtos_dir) = create_valid_workspace();
    fs::remove_file(rtos_dir.join("west.yml")).unwrap();

    let report = WorkspaceValidator::new(&ws_root, &rtos_dir).check().unwrap();
    assert_eq!(report.outcome, CheckOutcome::MissingManifest);
}

#[test]
fn test_missing_fingerprint_record() {
    let (_temp, ws_root, rtos_dir) = create_valid_workspace();
    fs::remove_file(Workspace::new(&ws_root).fingerprint_record()).unwrap();

    let report = WorkspaceValidator::new(&ws_root, &rtos_dir).check().unwrap();
    assert_eq!(report.outcome, CheckOutcome::MissingFingerprint);
}

#[test]
fn test_manifest_drift_is_a_fingerprint_mismatch() {
    let (_temp, ws_root, rtos_dir) = create_valid_workspace();
    fs::write(
        rtos_dir.join("west.yml"),
        "manifest:\n  projects:\n    - name: drifted\n",
    )
    .unwrap();

    let report = WorkspaceValidator::new(&ws_root, &rtos_dir).check().unwrap();
    assert_eq!(report.outcome, CheckOutcome::FingerprintMismatch);
}

#[test]
fn test_first_violation_wins_on_empty_workspace() {
    let temp = TempDir::new().unwrap();
    let ws_root = temp.path().join("ws");
    let rtos_dir = temp.path().join("zephyr-src");
    fs::create_dir_all(&ws_root).unwrap();

    // Everything is missing; the link-config check comes first.
    let report = WorkspaceValidator::new(&ws_root, &rtos_dir).check().unwrap();
    assert_eq!(report.outcome, CheckOutcome::MissingLinkConfig);
}

#[test]
fn test_exit_codes_are_stable() {
    assert_eq!(CheckOutcome::Valid.exit_code(), 0);
    assert_eq!(CheckOutcome::MissingLinkConfig.exit_code(), 1);
    assert_eq!(CheckOutcome::LinkMismatch.exit_code(), 2);
    assert_eq!(CheckOutcome::MissingManifest.exit_code(), 3);
    assert_eq!(CheckOutcome::MissingFingerprint.exit_code(), 4);
    assert_eq!(CheckOutcome::FingerprintMismatch.exit_code(), 5);
}

#[test]
fn test_report_serializes_to_json() {
    let (_temp, ws_root, rtos_dir) = create_valid_workspace();
    let report = WorkspaceValidator::new(&ws_root, &rtos_dir).check().unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"valid\""));

    let parsed: CheckReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.outcome, CheckOutcome::Valid);
}
