use super::test_mocks::*;
use super::*;

use mcp_adapters_core::{AdapterServer, ServerIdentity};
use rmcp::ServiceExt;
use rmcp::model::CallToolRequestParams;
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Spawn a Drive server over `drive` and connect a client via in-memory duplex transport.
async fn spawn_client_server(
    drive: Arc<FakeDrive>,
) -> (
    rmcp::service::RunningService<rmcp::RoleClient, ()>,
    tokio::task::JoinHandle<anyhow::Result<()>>,
) {
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let tools = drive_tools(drive, Arc::new(StaticCredentials::new()));
    let server = AdapterServer::new(
        Arc::new(tools),
        ServerIdentity {
            name: "gdrive-server".to_string(),
            version: "0.0.0-test".to_string(),
            instructions: "Drive tools under test.".to_string(),
        },
    );

    let server_handle = tokio::spawn(async move {
        server.serve(server_transport).await?.waiting().await?;
        anyhow::Ok(())
    });

    let client = ().serve(client_transport).await.unwrap();
    (client, server_handle)
}

fn call_params(name: &str, args: &Value) -> CallToolRequestParams {
    CallToolRequestParams {
        meta: None,
        name: name.to_string().into(),
        arguments: args.as_object().cloned(),
        task: None,
    }
}

fn extract_text(result: &rmcp::model::CallToolResult) -> &str {
    result
        .content
        .first()
        .and_then(|c| c.raw.as_text())
        .map(|t| t.text.as_str())
        .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lists_four_drive_tools() -> anyhow::Result<()> {
    let (client, server_handle) = spawn_client_server(Arc::new(FakeDrive::new())).await;

    assert_eq!(client.peer_info().unwrap().server_info.name, "gdrive-server");

    let tools = client.list_all_tools().await?;
    let names: Vec<&str> = tools.iter().map(|t| &*t.name).collect();
    assert_eq!(names, vec!["list_files", "upload_file", "download_file", "delete_file"]);

    let upload = tools.iter().find(|t| t.name == "upload_file").unwrap();
    assert_eq!(upload.description.as_deref(), Some("Upload a file to Google Drive"));
    assert_eq!(
        upload.input_schema.get("required"),
        Some(&json!(["file_path"]))
    );

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}

#[tokio::test]
async fn round_trip_through_client() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("data.csv");
    tokio::fs::write(&source, b"a,b\n1,2\n").await?;

    let (client, server_handle) = spawn_client_server(Arc::new(FakeDrive::new())).await;

    let result = client
        .call_tool(call_params(
            "upload_file",
            &json!({"file_path": source.to_str().unwrap()}),
        ))
        .await?;
    assert_ne!(result.is_error, Some(true));
    let receipt: Value = serde_json::from_str(extract_text(&result))?;
    let file_id = receipt["file_id"].as_str().unwrap().to_string();

    let result = client
        .call_tool(call_params("list_files", &json!({"max_results": 5})))
        .await?;
    let files: Vec<Value> = serde_json::from_str(extract_text(&result))?;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["id"], file_id.as_str());
    assert_eq!(files[0]["name"], "data.csv");

    let target = dir.path().join("copy.csv");
    let result = client
        .call_tool(call_params(
            "download_file",
            &json!({"file_id": file_id, "output_path": target.to_str().unwrap()}),
        ))
        .await?;
    assert_ne!(result.is_error, Some(true));
    assert_eq!(tokio::fs::read(&target).await?, b"a,b\n1,2\n");

    let result = client
        .call_tool(call_params("delete_file", &json!({"file_id": file_id})))
        .await?;
    assert_eq!(
        extract_text(&result),
        format!("File {file_id} deleted successfully")
    );

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}

#[tokio::test]
async fn failures_arrive_as_error_results() -> anyhow::Result<()> {
    let (client, server_handle) = spawn_client_server(Arc::new(FakeDrive::new())).await;

    let result = client
        .call_tool(call_params("frobnicate", &json!({})))
        .await?;
    assert_eq!(result.is_error, Some(true));
    assert_eq!(extract_text(&result), "Error: Unknown tool: frobnicate");

    let result = client
        .call_tool(call_params("upload_file", &json!({})))
        .await?;
    assert_eq!(result.is_error, Some(true));
    assert!(extract_text(&result).starts_with("Error: Invalid arguments for upload_file"));

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}
