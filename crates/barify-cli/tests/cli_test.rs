use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn barify() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("barify"));
    cmd.env_remove("BARIFY_CONFIG").env_remove("BARIFY_LOG");
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn render_is_the_default_command() {
    let output = barify()
        .arg(fixture("basic.csv"))
        .output()
        .expect("run barify");
    assert!(output.status.success());

    let svg = String::from_utf8(output.stdout).expect("utf-8");
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains(r#"width="210mm" height="297mm""#), "{svg}");
    assert_eq!(svg.matches("<rect").count(), 3);
}

#[test]
fn render_writes_to_out_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("book.svg");

    barify()
        .args(["render", "--out", out.to_string_lossy().as_ref()])
        .arg(fixture("basic.csv"))
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn render_reads_stdin_when_input_is_dash() {
    let output = barify()
        .args(["render", "-"])
        .write_stdin("1,Intro,1\n2,Middle,11\n")
        .output()
        .expect("run barify");
    assert!(output.status.success());
    let svg = String::from_utf8(output.stdout).expect("utf-8");
    assert_eq!(svg.matches("<rect").count(), 2);
}

#[test]
fn render_with_text_draws_side_labels() {
    let output = barify()
        .args(["render", "--text"])
        .arg(fixture("annotated.csv"))
        .output()
        .expect("run barify");
    assert!(output.status.success());

    let svg = String::from_utf8(output.stdout).expect("utf-8");
    assert!(svg.contains("<style>text { font-family: sans-serif; font-size: 10pt; }</style>"));
    assert_eq!(svg.matches("<text").count(), 3);
    assert!(svg.contains(">Part II</text>"), "{svg}");
}

#[test]
fn render_without_text_ignores_side_labels() {
    let output = barify()
        .arg(fixture("annotated.csv"))
        .output()
        .expect("run barify");
    assert!(output.status.success());
    let svg = String::from_utf8(output.stdout).expect("utf-8");
    assert!(!svg.contains("<text"));
    assert!(!svg.contains("<style"));
}

#[test]
fn parse_prints_normalized_chapters() {
    let output = barify()
        .args(["parse"])
        .arg(fixture("basic.csv"))
        .output()
        .expect("run barify");
    assert!(output.status.success());

    let json = stdout_json(&output);
    let chapters = json.as_array().expect("array");
    assert_eq!(chapters.len(), 3);
    let lengths: Vec<f64> = chapters
        .iter()
        .map(|c| c["length"].as_f64().expect("length"))
        .collect();
    assert_eq!(lengths, vec![0.0, 1.0, 1.0]);
    assert_eq!(chapters[1]["name"], "Middle");
    assert_eq!(chapters[1]["color"], "black");
}

#[test]
fn parse_sections_fills_gaps_and_inherits_colors() {
    let output = barify()
        .args(["parse", "--sections"])
        .arg(fixture("sections.csv"))
        .output()
        .expect("run barify");
    assert!(output.status.success());

    let json = stdout_json(&output);
    let chapters = json.as_array().expect("array");
    assert_eq!(chapters.len(), 9);

    let colors: Vec<&str> = chapters
        .iter()
        .map(|c| c["color"].as_str().expect("color"))
        .collect();
    assert_eq!(
        colors,
        vec![
            "#8c2d04", "#8c2d04", "#8c2d04", "#2b8cbe", "#2b8cbe", "#2b8cbe", "#2b8cbe",
            "#8c2d04", "#8c2d04",
        ]
    );

    let placeholder = &chapters[5];
    assert_eq!(placeholder["index"], 6);
    assert_eq!(placeholder["pages"], 0);
    assert_eq!(placeholder["length"].as_f64(), Some(0.0));
}

#[test]
fn layout_block_mode_reports_lines() {
    let output = barify()
        .args(["layout", "--block-mode"])
        .arg(fixture("basic.csv"))
        .output()
        .expect("run barify");
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["mode"], "block");
    let starting_lines = json["starting_lines"].as_array().expect("starting_lines");
    assert_eq!(starting_lines.len(), 3);
}

#[test]
fn layout_flip_swaps_page_dimensions() {
    let output = barify()
        .args(["layout", "--size", "a5", "--flip"])
        .arg(fixture("basic.csv"))
        .output()
        .expect("run barify");
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["width"].as_f64(), Some(210.0));
    assert_eq!(json["height"].as_f64(), Some(148.0));
}

#[test]
fn config_file_supplies_defaults_and_presets() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("barify.yaml");
    fs::write(
        &config,
        "size: poster\ncolor: teal\npage_formats:\n  poster: [500, 700]\n",
    )
    .expect("write config");

    let output = barify()
        .args(["layout", "--config", config.to_string_lossy().as_ref()])
        .arg(fixture("basic.csv"))
        .output()
        .expect("run barify");
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["width"].as_f64(), Some(500.0));
    assert_eq!(json["height"].as_f64(), Some(700.0));
    assert_eq!(json["rects"][0]["color"], "teal");
}

#[test]
fn command_line_overrides_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("barify.yaml");
    fs::write(&config, "size: a3\ncolor: teal\n").expect("write config");

    let output = barify()
        .env("BARIFY_CONFIG", &config)
        .args(["layout", "--size", "100x50", "--color", "red"])
        .arg(fixture("basic.csv"))
        .output()
        .expect("run barify");
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["width"].as_f64(), Some(100.0));
    assert_eq!(json["height"].as_f64(), Some(50.0));
    assert_eq!(json["rects"][0]["color"], "red");
}

#[test]
fn unknown_page_format_fails() {
    let output = barify()
        .args(["render", "--size", "b7"])
        .arg(fixture("basic.csv"))
        .output()
        .expect("run barify");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("barify:"), "{stderr}");
    assert!(stderr.contains("b7"), "{stderr}");
}

#[test]
fn malformed_row_reports_line_number() {
    let output = barify()
        .args(["parse", "-"])
        .write_stdin("1,Intro,1\n2,Middle\n")
        .output()
        .expect("run barify");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "{stderr}");
}

#[test]
fn empty_input_exits_with_dedicated_code() {
    let output = barify()
        .args(["render", "-"])
        .write_stdin("# nothing here\n\n")
        .output()
        .expect("run barify");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let output = barify()
        .args(["render", "--no-such-flag"])
        .output()
        .expect("run barify");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn sections_flag_conflicts_with_explicit_color_mode() {
    let output = barify()
        .args(["parse", "--sections", "--color-mode", "per-row"])
        .arg(fixture("sections.csv"))
        .output()
        .expect("run barify");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--color-mode"), "{stderr}");
}
