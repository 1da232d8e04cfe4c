use assert_cmd::Command;

#[test]
fn help_lists_both_views() {
    let output = Command::cargo_bin("shelf")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("catalog"));
    assert!(stdout.contains("admin"));
}

#[test]
fn unreachable_server_is_reported_in_place_of_content() {
    let output = Command::cargo_bin("shelf")
        .unwrap()
        .args(["--url", "http://127.0.0.1:9", "catalog"])
        .env_remove("SHELF_URL")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Error: "), "unexpected output: {stdout}");
}

#[test]
fn edit_requires_an_id() {
    Command::cargo_bin("shelf")
        .unwrap()
        .args(["admin", "edit", "--title", "Untitled"])
        .env_remove("SHELF_ADMIN_PASSWORD")
        .assert()
        .failure();
}
