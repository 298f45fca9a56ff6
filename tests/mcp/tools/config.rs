use lexid::mcp::{LexidMcpServer, types::GetConfigParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = LexidMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], false);
    assert_eq!(json_result["config"]["sourceRoot"], "./");
    assert_eq!(json_result["config"]["ignoreTestFiles"], true);
    assert_eq!(json_result["config"]["ignoreInvalidIcu"], false);
    assert!(json_result["config"]["ignores"].is_array());
}

#[tokio::test]
async fn test_get_config_from_lexidrc() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "includes": ["app"],
            "ignoreDynamicContent": true,
            "extraModules": ["@/i18n"]
        }))
        .unwrap();

    let server = LexidMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["includes"], json!(["app"]));
    assert_eq!(json_result["config"]["ignoreDynamicContent"], true);
    assert_eq!(json_result["config"]["extraModules"], json!(["@/i18n"]));
}

#[tokio::test]
async fn test_get_config_invalid_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture.write_config(&json!({ "ignores": ["[bad"] })).unwrap();

    let server = LexidMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    assert!(server.get_config(params).await.is_err());
}
