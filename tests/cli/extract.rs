use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, stderr, stdout_updates};

const PAGE: &str = r#"import { T, Var, useGT } from "gt-next";

export default function Page({ user }) {
  const t = useGT();
  return (
    <main>
      <T id="welcome">
        Welcome back, <Var>{user.name}</Var>!
      </T>
      <p>{t("You have {count} messages")}</p>
    </main>
  );
}
"#;

#[test]
fn test_extract_prints_updates() -> Result<()> {
    let test = CliTest::with_file("app/page.tsx", PAGE)?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let updates = stdout_updates(&output)?;
    assert_eq!(updates.len(), 2);

    let jsx = &updates[0];
    assert_eq!(jsx["dataFormat"], "JSX");
    assert_eq!(jsx["metadata"]["id"], "welcome");
    assert_eq!(jsx["metadata"]["filePaths"], json!(["app/page.tsx"]));
    assert_eq!(jsx["metadata"]["hash"].as_str().map(str::len), Some(64));

    let icu = &updates[1];
    assert_eq!(icu["dataFormat"], "ICU");
    assert_eq!(icu["source"], "You have {count} messages");
    assert!(icu["metadata"].get("id").is_none());

    assert!(stderr(&output).contains("✓ Extracted 2 units from 1 file"));

    Ok(())
}

#[test]
fn test_extract_is_deterministic() -> Result<()> {
    let test = CliTest::with_file("app/page.tsx", PAGE)?;
    test.write_file("app/other.tsx", PAGE)?;

    let first = test.extract_command().output()?;
    let second = test.extract_command().output()?;
    assert_eq!(first.stdout, second.stdout);

    // Same content in two files collapses into one unit per message.
    let updates = stdout_updates(&first)?;
    assert_eq!(updates.len(), 2);
    assert_eq!(
        updates[0]["metadata"]["filePaths"],
        json!(["app/other.tsx", "app/page.tsx"])
    );

    Ok(())
}

#[test]
fn test_extract_reports_dynamic_content() -> Result<()> {
    let test = CliTest::with_file(
        "app/page.tsx",
        r#"import { T } from "gt-next";
export default function Page({ user }) {
  return <T>Hello {user.name}</T>;
}
"#,
    )?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_updates(&output)?, Vec::<serde_json::Value>::new());

    let stderr = stderr(&output);
    assert!(stderr.contains("error: dynamic content `user.name`"));
    assert!(stderr.contains("--> app/page.tsx:3:20"));
    assert!(stderr.contains("1 problems (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_ignore_dynamic_content_flag() -> Result<()> {
    let test = CliTest::with_file(
        "app/page.tsx",
        r#"import { T } from "gt-next";
export default function Page({ user }) {
  return <T>Hello {user.name}</T>;
}
"#,
    )?;

    let output = test
        .extract_command()
        .arg("--ignore-dynamic-content")
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let updates = stdout_updates(&output)?;
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0]["source"], json!({ "type": "fragment", "children": ["Hello "] }));

    Ok(())
}

#[test]
fn test_parse_error_does_not_stop_other_files() -> Result<()> {
    let test = CliTest::with_file("app/page.tsx", PAGE)?;
    test.write_file("app/broken.tsx", "export const x = <T>;")?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_updates(&output)?.len(), 2);

    let stderr = stderr(&output);
    assert!(stderr.contains("--> app/broken.tsx"));
    assert!(stderr.contains("parse-error"));
    assert!(stderr.contains("1 file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_output_file() -> Result<()> {
    let test = CliTest::with_file("app/page.tsx", PAGE)?;

    let output = test
        .extract_command()
        .args(["--output", "updates.json"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("Wrote updates to updates.json"));

    let written: Vec<serde_json::Value> = serde_json::from_str(&test.read_file("updates.json")?)?;
    assert_eq!(written.len(), 2);

    Ok(())
}

#[test]
fn test_config_ignores_and_extra_modules() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".lexidrc.json",
        r#"{
  "ignores": ["**/generated/**"],
  "extraModules": ["@/i18n"]
}"#,
    )?;
    test.write_file(
        "app/page.tsx",
        r#"import { T } from "@/i18n";
export const Page = () => <T>Hi</T>;
"#,
    )?;
    test.write_file(
        "generated/page.tsx",
        r#"import { T } from "gt-next";
export const Page = () => <T>Ignored</T>;
"#,
    )?;
    test.write_file(
        "app/page.test.tsx",
        r#"import { T } from "gt-next";
export const Page = () => <T>Test only</T>;
"#,
    )?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let updates = stdout_updates(&output)?;
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0]["source"], json!({ "type": "fragment", "children": ["Hi"] }));

    Ok(())
}

#[test]
fn test_source_root_argument() -> Result<()> {
    let test = CliTest::with_file("web/app/page.tsx", PAGE)?;

    let output = test
        .extract_command()
        .args(["--source-root", "web"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let updates = stdout_updates(&output)?;
    assert_eq!(updates[0]["metadata"]["filePaths"], json!(["app/page.tsx"]));

    Ok(())
}

#[test]
fn test_invalid_config_is_internal_error() -> Result<()> {
    let test = CliTest::with_file(".lexidrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}
