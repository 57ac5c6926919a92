//! CLI integration tests for robots-forge

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

fn forge_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("robots-forge").unwrap();
    cmd.arg("--no-color");
    cmd
}

// =============================================================================
// validate
// =============================================================================

#[test]
fn test_validate_valid_stdin() {
    forge_cmd()
        .arg("validate")
        .write_stdin("User-agent: *\nAllow: /\nSitemap: https://zivo.travel/sitemap.xml\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("<stdin>: valid (0 error(s), 0 warning(s))"));
}

#[test]
fn test_validate_invalid_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("robots.txt");
    fs::write(&path, "Disallow: /private\n").unwrap();

    forge_cmd()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("directive appears before any User-agent"))
        .stdout(predicate::str::contains("invalid (1 error(s), 2 warning(s))"));
}

#[test]
fn test_validate_non_utf8_file_still_reports() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("robots.txt");
    fs::write(
        &path,
        b"User-agent: *\nAllow: /caf\xe9\nDisallow: tmp\nSitemap: https://zivo.travel/sitemap.xml\n",
    )
    .unwrap();

    forge_cmd()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("path must start with /"))
        .stdout(predicate::str::contains("invalid (1 error(s), 0 warning(s))"))
        .stderr(predicate::str::contains("Error reading file").not());
}

#[test]
fn test_validate_non_utf8_stdin_is_valid() {
    forge_cmd()
        .arg("validate")
        .write_stdin(
            &b"User-agent: *\nAllow: /caf\xe9\nSitemap: https://zivo.travel/sitemap.xml\n"[..],
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("<stdin>: valid (0 error(s), 0 warning(s))"));
}

#[test]
fn test_validate_json_output() {
    let output = forge_cmd()
        .args(["validate", "--json"])
        .write_stdin("User-agent: *\nDisallow: admin\n")
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["isValid"], false);
    assert_eq!(json["errors"][0]["message"], "Line 2: path must start with /");
    assert_eq!(json["warnings"][0]["message"], "no Sitemap directive found");
}

#[test]
fn test_validate_missing_file() {
    forge_cmd()
        .args(["validate", "does/not/exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file"));
}

// =============================================================================
// generate
// =============================================================================

#[test]
fn test_generate_default() {
    forge_cmd()
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("User-agent: *"))
        .stdout(predicate::str::contains("Sitemap: https://zivo.travel/sitemap.xml"));
}

#[test]
fn test_generate_from_policy() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("policy.toml");
    fs::write(
        &path,
        r#"
base_url = "https://staging.zivo.travel"
comment = []
allow = []
disallow = ["/"]
"#,
    )
    .unwrap();

    forge_cmd()
        .args(["generate", "--policy"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::eq(
            "User-agent: *\nDisallow: /\n\nSitemap: https://staging.zivo.travel/sitemap.xml\n",
        ));
}

#[test]
fn test_generate_rejects_bad_policy() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("policy.toml");
    fs::write(&path, "disallow = [\"admin\"]\n").unwrap();

    forge_cmd()
        .args(["generate", "--policy"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with /"));
}

// =============================================================================
// templates
// =============================================================================

#[test]
fn test_templates_list() {
    forge_cmd()
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("allow-all"))
        .stdout(predicate::str::contains("Block staging"));
}

#[test]
fn test_templates_show_one() {
    forge_cmd()
        .args(["templates", "block-staging"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Disallow: /"));
}

#[test]
fn test_templates_unknown_name() {
    forge_cmd()
        .args(["templates", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("template not found: nope"));
}

#[test]
fn test_templates_json() {
    let output = forge_cmd()
        .args(["templates", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let templates = json.as_array().unwrap();
    assert!(templates.iter().any(|t| t["slug"] == "allow-all"));
    assert!(templates.iter().all(|t| t["content"].is_string()));
}

// =============================================================================
// sitemap
// =============================================================================

#[test]
fn test_sitemap_from_pages() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pages.toml");
    fs::write(
        &path,
        r#"
[[pages]]
url_path = "/hotels"
priority = 0.8

[[pages]]
url_path = "/retired"
active = false
"#,
    )
    .unwrap();

    forge_cmd()
        .arg("sitemap")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("<loc>https://zivo.travel/hotels</loc>"))
        .stdout(predicate::str::contains("<priority>0.8</priority>"))
        .stdout(predicate::str::contains("/retired").not());
}
