//! End-to-end tests that drive the `grid-inject` binary against a temporary site.
//!
//! Run with: cargo test --test cli

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const DOCUMENT: &str = "<!DOCTYPE html>
<html>
<body>
<main>
  <h1>Shop</h1>
  <!-- GRID:START -->
  <!-- GRID:END -->
</main>
</body>
</html>
";

fn site(photos: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("index.html"), DOCUMENT).unwrap();
    let dir = tmp.path().join("public/etsy_photos");
    fs::create_dir_all(&dir).unwrap();
    for name in photos {
        fs::write(dir.join(name), b"fake image").unwrap();
    }
    tmp
}

fn grid_inject(root: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_grid-inject");
    Command::new(bin)
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("CI")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

#[test]
fn build_injects_grid_and_prints_summary() {
    let tmp = site(&["blue-vase.jpg", "mug 2.png"]);
    fs::write(tmp.path().join("product-blue-vase.html"), "").unwrap();

    let out = grid_inject(tmp.path(), &[]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(stdout(&out).trim(), "Injected 2 image(s) into index.html");

    let doc = fs::read_to_string(tmp.path().join("index.html")).unwrap();
    assert!(doc.contains(r#"<a href="/product-blue-vase" aria-label="View Blue Vase">"#));
    assert!(doc.contains(r#"<img src="/public/etsy_photos/mug.png" alt="Mug""#));
    assert!(doc.contains("<h1>Shop</h1>"));
    assert!(tmp.path().join("public/etsy_photos/mug.png").exists());
}

#[test]
fn second_build_leaves_document_untouched() {
    let tmp = site(&["a.jpg", "b.webp"]);
    assert!(grid_inject(tmp.path(), &["build"]).status.success());
    let first = fs::read_to_string(tmp.path().join("index.html")).unwrap();

    assert!(grid_inject(tmp.path(), &["build"]).status.success());
    let second = fs::read_to_string(tmp.path().join("index.html")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn ci_flag_fails_on_empty_gallery() {
    let tmp = site(&[]);
    let out = grid_inject(tmp.path(), &["--ci"]);
    assert!(!out.status.success());
    assert_eq!(fs::read_to_string(tmp.path().join("index.html")).unwrap(), DOCUMENT);
}

#[test]
fn ci_environment_variable_fails_on_empty_gallery() {
    let tmp = site(&[]);
    let bin = env!("CARGO_BIN_EXE_grid-inject");
    let out = Command::new(bin)
        .arg("--root")
        .arg(tmp.path())
        .env("CI", "1")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("No images found"));
}

#[test]
fn empty_gallery_without_ci_injects_placeholder() {
    let tmp = site(&[]);
    let out = grid_inject(tmp.path(), &[]);
    assert!(out.status.success());
    let doc = fs::read_to_string(tmp.path().join("index.html")).unwrap();
    assert!(doc.contains(r#"<p class="grid-empty">"#));
}

#[test]
fn check_reports_stale_document_without_writing() {
    let tmp = site(&["cup 2.jpg"]);

    let out = grid_inject(tmp.path(), &["check"]);
    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.contains("cup 2.jpg → cup.jpg"));
    assert!(text.contains("index.html is out of date"));
    assert!(tmp.path().join("public/etsy_photos/cup 2.jpg").exists());
    assert_eq!(fs::read_to_string(tmp.path().join("index.html")).unwrap(), DOCUMENT);

    assert!(grid_inject(tmp.path(), &["build"]).status.success());
    let out = grid_inject(tmp.path(), &["check"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("index.html is up to date"));
}

#[test]
fn check_passes_after_build_with_unresolvable_collision() {
    let tmp = site(&["photo.jpg", "photo-2.jpg", "photo 2.jpg"]);
    assert!(grid_inject(tmp.path(), &["build"]).status.success());
    assert!(grid_inject(tmp.path(), &["build"]).status.success());

    let out = grid_inject(tmp.path(), &["check"]);
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.contains("photo 2.jpg (photo.jpg and photo-2.jpg taken)"));
    assert!(text.contains("index.html is up to date"));
}

#[test]
fn scan_prints_listing_as_json() {
    let tmp = site(&["b.png", "A.jpg", "notes.txt", "A-2.jpg"]);
    let out = grid_inject(tmp.path(), &["scan"]);
    assert!(out.status.success());

    let listing: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let names: Vec<&str> = listing
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["filename"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A.jpg", "b.png"]);
}

#[test]
fn gen_config_output_parses_as_toml() {
    let tmp = TempDir::new().unwrap();
    let out = grid_inject(tmp.path(), &["gen-config"]);
    assert!(out.status.success());

    let value: toml::Value = toml::from_str(&stdout(&out)).unwrap();
    assert_eq!(value["photos_dir"].as_str(), Some("etsy_photos"));
    assert_eq!(value["markers"]["start"].as_str(), Some("<!-- GRID:START -->"));
}

#[test]
fn config_file_overrides_photo_directory() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("index.html"), DOCUMENT).unwrap();
    fs::write(tmp.path().join("grid.toml"), "photos_dir = \"shots\"\n").unwrap();
    fs::create_dir_all(tmp.path().join("public/shots")).unwrap();
    fs::write(tmp.path().join("public/shots/dock.jpg"), b"x").unwrap();

    let out = grid_inject(tmp.path(), &[]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let doc = fs::read_to_string(tmp.path().join("index.html")).unwrap();
    assert!(doc.contains(r#"src="/public/shots/dock.jpg""#));
}

#[test]
fn unknown_config_key_is_an_error() {
    let tmp = site(&["a.jpg"]);
    fs::write(tmp.path().join("grid.toml"), "photo_dir = \"oops\"\n").unwrap();
    let out = grid_inject(tmp.path(), &[]);
    assert!(!out.status.success());
}
