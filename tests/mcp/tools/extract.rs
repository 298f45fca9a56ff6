use lexid::mcp::{LexidMcpServer, types::ExtractUpdatesParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, assert_pagination, extract_tool_result_json};

fn params(
    fixture: &McpTestFixture,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Parameters<ExtractUpdatesParams> {
    Parameters(ExtractUpdatesParams {
        project_root_path: fixture.root(),
        limit,
        offset,
    })
}

fn numbered_page(count: usize) -> String {
    let scopes: String = (0..count)
        .map(|i| format!("      <T>Message number {}</T>\n", i))
        .collect();
    format!(
        "import {{ T }} from \"gt-next\";\nexport const Page = () => (\n    <>\n{}    </>\n);\n",
        scopes
    )
}

#[tokio::test]
async fn test_extract_updates_basic() {
    let fixture = McpTestFixture::with_sources(&[(
        "app/page.tsx",
        r#"import { T } from "gt-next";
export const Page = () => <T id="hello" context="greeting">Hello</T>;
"#,
    )])
    .unwrap();
    let server = LexidMcpServer::new();

    let result = server
        .extract_updates(params(&fixture, None, None))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["filesScanned"], 1);
    assert_eq!(json_result["totalCount"], 1);
    assert_eq!(json_result["errorCount"], 0);
    assert_pagination(&json_result, 0, 20, false);

    let unit = &json_result["items"][0];
    assert_eq!(unit["dataFormat"], "JSX");
    assert_eq!(unit["metadata"]["id"], "hello");
    assert_eq!(unit["metadata"]["context"], "greeting");
    assert_eq!(unit["metadata"]["filePaths"], json!(["app/page.tsx"]));
}

#[tokio::test]
async fn test_extract_updates_pagination() {
    let fixture = McpTestFixture::with_sources(&[("app/page.tsx", &numbered_page(5))]).unwrap();
    let server = LexidMcpServer::new();

    let result = server
        .extract_updates(params(&fixture, Some(2), Some(0)))
        .await
        .unwrap();
    let first = extract_tool_result_json(&result);
    assert_eq!(first["totalCount"], 5);
    assert_eq!(first["items"].as_array().unwrap().len(), 2);
    assert_pagination(&first, 0, 2, true);

    let result = server
        .extract_updates(params(&fixture, Some(2), Some(4)))
        .await
        .unwrap();
    let last = extract_tool_result_json(&result);
    assert_eq!(last["items"].as_array().unwrap().len(), 1);
    assert_eq!(
        last["items"][0]["source"]["children"],
        json!(["Message number 4"])
    );
    assert_pagination(&last, 4, 2, false);
}

#[tokio::test]
async fn test_extract_updates_limit_is_capped() {
    let fixture = McpTestFixture::with_sources(&[("app/page.tsx", &numbered_page(1))]).unwrap();
    let server = LexidMcpServer::new();

    let result = server
        .extract_updates(params(&fixture, Some(500), None))
        .await
        .unwrap();
    assert_pagination(&extract_tool_result_json(&result), 0, 100, false);
}

#[tokio::test]
async fn test_extract_updates_reports_diagnostics() {
    let fixture = McpTestFixture::with_sources(&[(
        "app/page.tsx",
        r#"import { useGT } from "gt-next";
export async function load() {
  const t = useGT();
  return t("Hello");
}
"#,
    )])
    .unwrap();
    let server = LexidMcpServer::new();

    let result = server
        .extract_updates(params(&fixture, None, None))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["errorCount"], 1);
    assert_eq!(
        json_result["errors"][0],
        "app/page.tsx:3:13: `useGT` must be called from a synchronous function [async-sync-rule]"
    );
    // The violation is reported but the string is still extracted.
    assert_eq!(json_result["totalCount"], 1);
    assert_eq!(json_result["items"][0]["source"], "Hello");
}
