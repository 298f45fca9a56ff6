use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert!(parsed["ignores"].is_array(), "Config should have 'ignores' field");
    assert!(parsed["includes"].is_array(), "Config should have 'includes' field");
    assert_eq!(parsed["ignoreTestFiles"], true);
    assert_eq!(parsed["ignoreDynamicContent"], false);
    assert!(
        parsed["extraModules"].as_array().is_some_and(|m| m.is_empty()),
        "Config should have an empty 'extraModules' list"
    );

    // 2-space indentation
    assert!(content.contains("\n  \"ignores\""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "✓ Created .lexidrc.json\n"
    );

    let content = test.read_file(".lexidrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lexidrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "error: .lexidrc.json already exists\n");
    assert_eq!(test.read_file(".lexidrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "src/app.tsx",
        r#"import { T } from "gt-next";
export function App() { return <T>Test</T>; }"#,
    )?;

    let output = test.extract_command().output()?;
    assert!(
        output.status.success(),
        "Extract should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
