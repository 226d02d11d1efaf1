use super::test_mocks::*;
use super::*;

use mcp_adapters_core::ToolResult;
use serde_json::json;

fn success_text(result: ToolResult) -> String {
    match result {
        ToolResult::Success(text) => text,
        ToolResult::Failure(message) => panic!("expected success, got failure: {message}"),
    }
}

fn failure_text(result: ToolResult) -> String {
    match result {
        ToolResult::Failure(message) => message,
        ToolResult::Success(text) => panic!("expected failure, got success: {text}"),
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[test]
fn registry_lists_tools_in_order() {
    assert_eq!(
        registry().names(),
        vec![LIST_FILES, UPLOAD_FILE, DOWNLOAD_FILE, DELETE_FILE]
    );
}

#[test]
fn schemas_declare_required_arguments() {
    let registry = registry();

    assert!(registry.get(LIST_FILES).unwrap().required().is_empty());
    assert_eq!(registry.get(UPLOAD_FILE).unwrap().required(), vec!["file_path"]);
    let mut download = registry.get(DOWNLOAD_FILE).unwrap().required();
    download.sort_unstable();
    assert_eq!(download, vec!["file_id", "output_path"]);
    assert_eq!(registry.get(DELETE_FILE).unwrap().required(), vec!["file_id"]);
}

#[test]
fn schemas_carry_descriptions() {
    let registry = registry();
    let list = registry.get(LIST_FILES).unwrap();
    assert_eq!(list.description, "List files in Google Drive");
    assert_eq!(
        list.property("max_results")
            .and_then(|p| p.get("description"))
            .and_then(Value::as_str),
        Some("Maximum number of files to return")
    );
    assert_eq!(
        registry
            .get(DELETE_FILE)
            .unwrap()
            .property("file_id")
            .and_then(|p| p.get("description"))
            .and_then(Value::as_str),
        Some("Google Drive file ID")
    );
}

#[test]
fn basename_takes_last_component() {
    assert_eq!(basename("/tmp/report.pdf"), "report.pdf");
    assert_eq!(basename("report.pdf"), "report.pdf");
}

// ---------------------------------------------------------------------------
// list_files
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_files_defaults_to_ten() {
    let drive = Arc::new(FakeDrive::new().with_files(15).await);
    let text = success_text(dispatcher(drive.clone()).dispatch(LIST_FILES, json!({})).await);

    let files: Vec<Value> = serde_json::from_str(&text).unwrap();
    assert_eq!(files.len(), 10);
    assert_eq!(drive.queries().await[0].page_size, 10);
}

#[tokio::test]
async fn list_files_never_exceeds_max_results() {
    let drive = Arc::new(FakeDrive::new().with_files(5).await);
    let dispatcher = dispatcher(drive);

    for max in [0_u32, 1, 3, 5, 20] {
        let text = success_text(
            dispatcher
                .dispatch(LIST_FILES, json!({"max_results": max}))
                .await,
        );
        let files: Vec<Value> = serde_json::from_str(&text).unwrap();
        assert!(files.len() <= max as usize, "max_results={max}");
    }
}

#[tokio::test]
async fn list_files_with_zero_max_results_is_empty() {
    let drive = Arc::new(FakeDrive::new().with_files(5).await);
    let text = success_text(
        dispatcher(drive.clone())
            .dispatch(LIST_FILES, json!({"max_results": 0}))
            .await,
    );

    let files: Vec<Value> = serde_json::from_str(&text).unwrap();
    assert!(files.is_empty());
    assert_eq!(drive.queries().await[0].page_size, 1);
}

#[tokio::test]
async fn list_files_is_pretty_json_with_camel_case_fields() {
    let drive = Arc::new(FakeDrive::new());
    drive
        .insert("notes.txt".to_string(), "text/plain", b"hello".to_vec())
        .await;
    let text = success_text(dispatcher(drive).dispatch(LIST_FILES, Value::Null).await);

    assert!(text.contains('\n'));
    let files: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(files[0]["name"], "notes.txt");
    assert_eq!(files[0]["mimeType"], "text/plain");
    assert_eq!(files[0]["size"], "5");
}

#[tokio::test]
async fn list_files_passes_query_and_drops_blank() {
    let drive = Arc::new(FakeDrive::new());
    let dispatcher = dispatcher(drive.clone());

    dispatcher
        .dispatch(LIST_FILES, json!({"query": "name contains 'x'"}))
        .await;
    dispatcher.dispatch(LIST_FILES, json!({"query": "  "})).await;

    let queries = drive.queries().await;
    assert_eq!(queries[0].query.as_deref(), Some("name contains 'x'"));
    assert_eq!(queries[1].query, None);
}

#[tokio::test]
async fn list_files_with_wrong_type_fails() {
    let drive = Arc::new(FakeDrive::new());
    let message = failure_text(
        dispatcher(drive)
            .dispatch(LIST_FILES, json!({"max_results": "ten"}))
            .await,
    );
    assert!(message.starts_with("Invalid arguments for list_files"));
}

// ---------------------------------------------------------------------------
// upload / download / delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_then_download_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("photo.png");
    let bytes: Vec<u8> = (0..=255).cycle().take(4096).collect();
    tokio::fs::write(&source, &bytes).await.unwrap();

    let drive = Arc::new(FakeDrive::new());
    let dispatcher = dispatcher(drive.clone());

    let text = success_text(
        dispatcher
            .dispatch(UPLOAD_FILE, json!({"file_path": source.to_str().unwrap()}))
            .await,
    );
    let receipt: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(receipt["message"], "File uploaded successfully");
    let file_id = receipt["file_id"].as_str().unwrap().to_string();
    assert_eq!(drive.name_of(&file_id).await.as_deref(), Some("photo.png"));
    assert_eq!(drive.mime_type_of(&file_id).await.as_deref(), Some("image/png"));

    let target = dir.path().join("nested/out/photo.png");
    let text = success_text(
        dispatcher
            .dispatch(
                DOWNLOAD_FILE,
                json!({"file_id": file_id, "output_path": target.to_str().unwrap()}),
            )
            .await,
    );
    assert_eq!(text, format!("File downloaded to {}", target.display()));
    assert_eq!(tokio::fs::read(&target).await.unwrap(), bytes);
}

#[tokio::test]
async fn upload_uses_explicit_name() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("draft.txt");
    tokio::fs::write(&source, b"draft").await.unwrap();

    let drive = Arc::new(FakeDrive::new());
    let text = success_text(
        dispatcher(drive.clone())
            .dispatch(
                UPLOAD_FILE,
                json!({"file_path": source.to_str().unwrap(), "name": "final.md"}),
            )
            .await,
    );
    let receipt: Value = serde_json::from_str(&text).unwrap();
    let file_id = receipt["file_id"].as_str().unwrap();
    assert_eq!(drive.name_of(file_id).await.as_deref(), Some("final.md"));
    assert_eq!(drive.mime_type_of(file_id).await.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn upload_mime_type_follows_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("data.csv");
    tokio::fs::write(&source, b"a,b\n1,2\n").await.unwrap();

    let drive = Arc::new(FakeDrive::new());
    let text = success_text(
        dispatcher(drive.clone())
            .dispatch(
                UPLOAD_FILE,
                json!({"file_path": source.to_str().unwrap(), "name": "report"}),
            )
            .await,
    );
    let receipt: Value = serde_json::from_str(&text).unwrap();
    let file_id = receipt["file_id"].as_str().unwrap();
    assert_eq!(drive.name_of(file_id).await.as_deref(), Some("report"));
    assert_eq!(drive.mime_type_of(file_id).await.as_deref(), Some("text/csv"));
}

#[tokio::test]
async fn upload_without_file_path_fails() {
    let drive = Arc::new(FakeDrive::new());
    let message = failure_text(
        dispatcher(drive)
            .dispatch(UPLOAD_FILE, json!({"name": "x.txt"}))
            .await,
    );
    assert!(message.starts_with("Invalid arguments for upload_file"));
    assert!(message.contains("file_path"));
}

#[tokio::test]
async fn upload_missing_local_file_fails() {
    let drive = Arc::new(FakeDrive::new());
    let message = failure_text(
        dispatcher(drive)
            .dispatch(UPLOAD_FILE, json!({"file_path": "/nonexistent/nope.bin"}))
            .await,
    );
    assert!(message.starts_with("Upload failed: /nonexistent/nope.bin"));
}

#[tokio::test]
async fn delete_then_download_fails() {
    let dir = tempfile::tempdir().unwrap();
    let drive = Arc::new(FakeDrive::new());
    let file_id = drive
        .insert("gone.txt".to_string(), "text/plain", b"bye".to_vec())
        .await;
    let dispatcher = dispatcher(drive);

    let text = success_text(
        dispatcher
            .dispatch(DELETE_FILE, json!({"file_id": file_id}))
            .await,
    );
    assert_eq!(text, format!("File {file_id} deleted successfully"));

    let target = dir.path().join("gone.txt");
    let message = failure_text(
        dispatcher
            .dispatch(
                DOWNLOAD_FILE,
                json!({"file_id": file_id, "output_path": target.to_str().unwrap()}),
            )
            .await,
    );
    assert!(message.starts_with("Download failed:"));
    assert!(message.contains("not found"));
    assert!(!target.exists());
}

#[tokio::test]
async fn delete_unknown_id_fails() {
    let drive = Arc::new(FakeDrive::new());
    let message = failure_text(
        dispatcher(drive)
            .dispatch(DELETE_FILE, json!({"file_id": "missing"}))
            .await,
    );
    assert!(message.starts_with("Delete failed:"));
}

// ---------------------------------------------------------------------------
// Credentials and unknown tools
// ---------------------------------------------------------------------------

#[tokio::test]
async fn credential_failure_becomes_tool_failure() {
    let credentials = Arc::new(StaticCredentials::failing());
    let tools = drive_tools(Arc::new(FakeDrive::new()), credentials.clone());
    let dispatcher = mcp_adapters_core::Dispatcher::new(Arc::new(tools));

    let message = failure_text(dispatcher.dispatch(LIST_FILES, json!({})).await);
    assert!(message.contains("Configuration error in /nonexistent/credentials.json"));
    assert_eq!(credentials.calls(), 1);
}

#[tokio::test]
async fn each_call_ensures_a_credential() {
    let credentials = Arc::new(StaticCredentials::new());
    let tools = drive_tools(Arc::new(FakeDrive::new()), credentials.clone());
    let dispatcher = mcp_adapters_core::Dispatcher::new(Arc::new(tools));

    dispatcher.dispatch(LIST_FILES, json!({})).await;
    dispatcher.dispatch(LIST_FILES, json!({})).await;
    assert_eq!(credentials.calls(), 2);
}

#[tokio::test]
async fn unknown_tool_fails() {
    let drive = Arc::new(FakeDrive::new());
    let message = failure_text(dispatcher(drive).dispatch("frobnicate", json!({})).await);
    assert_eq!(message, "Unknown tool: frobnicate");
}
