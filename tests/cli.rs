// Command-line behavior of generate-interface-docs: flags, exit codes and
// where the site lands.
mod support;

use anyhow::{Context, Result};
use std::process::{Command, Output};
use support::{FixturePrefix, read, sample_prefix};
use tempfile::TempDir;

fn generate_docs(args: &[&str], prefix_env: Option<&str>) -> Result<Output> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_generate-interface-docs"));
    cmd.args(args).env_remove("RUST_LOG");
    match prefix_env {
        Some(value) => cmd.env("AMENT_PREFIX_PATH", value),
        None => cmd.env_remove("AMENT_PREFIX_PATH"),
    };
    cmd.output()
        .context("failed to execute generate-interface-docs")
}

#[test]
fn writes_site_under_outputdir_html() -> Result<()> {
    let prefix = sample_prefix()?;
    let out = TempDir::new()?;
    let output = generate_docs(
        &[
            "--prefix",
            &prefix.path().display().to_string(),
            "--outputdir",
            &out.path().display().to_string(),
        ],
        None,
    )?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let root = out.path().join("html");
    assert!(root.join("index.html").is_file());
    assert!(root.join("styles.css").is_file());
    let html = read(&root.join("demo_msgs/srv/Swap.html"))?;
    assert!(html.contains("<h3>Request</h3>"));
    assert!(html.contains("<h3>Response</h3>"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("wrote 6 page(s)"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn prefixes_default_to_ament_prefix_path() -> Result<()> {
    let prefix = sample_prefix()?;
    let out = TempDir::new()?;
    let output = generate_docs(
        &["--output-dir", &out.path().display().to_string()],
        Some(&prefix.path().display().to_string()),
    )?;

    assert!(output.status.success());
    assert!(out.path().join("html/std_msgs/msg/Header.html").is_file());
    Ok(())
}

#[test]
fn packages_select_accepts_several_names() -> Result<()> {
    let prefix = sample_prefix()?;
    let out = TempDir::new()?;
    let output = generate_docs(
        &[
            "--prefix",
            &prefix.path().display().to_string(),
            "--outputdir",
            &out.path().display().to_string(),
            "--packages-select",
            "std_msgs",
            "action_msgs",
        ],
        None,
    )?;

    assert!(output.status.success());
    let root = out.path().join("html");
    assert!(root.join("std_msgs/msg/Header.html").is_file());
    assert!(root.join("action_msgs/msg/GoalStatus.html").is_file());
    assert!(!root.join("demo_msgs").exists());
    Ok(())
}

#[test]
fn empty_packages_select_documents_everything() -> Result<()> {
    let prefix = sample_prefix()?;
    let out = TempDir::new()?;
    let output = generate_docs(
        &[
            "--outputdir",
            &out.path().display().to_string(),
            "--packages-select",
            "--prefix",
            &prefix.path().display().to_string(),
        ],
        None,
    )?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let root = out.path().join("html");
    assert!(root.join("std_msgs/msg/Header.html").is_file());
    assert!(root.join("demo_msgs/action/Count.html").is_file());
    Ok(())
}

#[test]
fn failed_interfaces_exit_non_zero_and_are_named() -> Result<()> {
    let prefix = FixturePrefix::new()?;
    prefix.add("demo_msgs", "msg/Fine.msg", "int32 value\n")?;
    prefix.list("demo_msgs", "msg/Ghost.msg")?;
    let out = TempDir::new()?;
    let output = generate_docs(
        &[
            "--prefix",
            &prefix.path().display().to_string(),
            "--outputdir",
            &out.path().display().to_string(),
            "--quiet",
        ],
        None,
    )?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 interface(s) failed"), "stderr: {stderr}");
    assert!(stderr.contains("demo_msgs/msg/Ghost"), "stderr: {stderr}");
    assert!(!stderr.contains("wrote"), "--quiet must drop info logs: {stderr}");
    assert!(out.path().join("html/demo_msgs/msg/Fine.html").is_file());
    Ok(())
}

#[test]
fn no_prefixes_is_an_error() -> Result<()> {
    let out = TempDir::new()?;
    let output = generate_docs(&["--outputdir", &out.path().display().to_string()], None)?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("AMENT_PREFIX_PATH"), "stderr: {stderr}");
    assert!(!out.path().join("html").exists());
    Ok(())
}

#[test]
fn verbose_and_quiet_conflict() -> Result<()> {
    let output = generate_docs(&["--verbose", "--quiet"], None)?;
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
