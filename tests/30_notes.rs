mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

// End-to-end tests for the /notes resource. Each test creates its own parent
// folder so runs stay independent on a shared database.

async fn create_folder(base_url: &str, client: &reqwest::Client, name: &str) -> Result<String> {
    let res = client
        .post(format!("{}/folders", base_url))
        .json(&json!({ "folder_name": name }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED, "create folder failed");
    let folder = res.json::<Value>().await?;
    Ok(folder["id"].as_str().expect("missing folder id").to_string())
}

async fn create_note(
    base_url: &str,
    client: &reqwest::Client,
    folder_id: &str,
    name: &str,
    content: &str,
) -> Result<Value> {
    let res = client
        .post(format!("{}/notes", base_url))
        .json(&json!({
            "note_name": name,
            "folder_id": folder_id,
            "note_content": content,
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED, "create note failed");
    Ok(res.json().await?)
}

#[tokio::test]
async fn create_then_get_round_trip() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let folder_id = create_folder(&server.base_url, &client, "notes parent").await?;

    let res = client
        .post(format!("{}/notes", server.base_url))
        .json(&json!({
            "note_name": "test new note",
            "folder_id": folder_id,
            "note_content": "test new note content",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let location = res
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("missing Location header");

    let created = res.json::<Value>().await?;
    assert_eq!(created["note_name"], "test new note");
    assert_eq!(created["note_content"], "test new note content");
    assert_eq!(created["folder_id"].as_str(), Some(folder_id.as_str()));
    assert!(created["date_modified"].is_string(), "store assigns date_modified");
    let id = created["id"].as_str().expect("missing id").to_string();
    assert_eq!(location, format!("/notes/{}", id));

    let res = client
        .get(format!("{}{}", server.base_url, location))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched = res.json::<Value>().await?;
    assert_eq!(fetched, created);

    Ok(())
}

#[tokio::test]
async fn create_names_first_missing_field() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let folder_id = create_folder(&server.base_url, &client, "missing fields parent").await?;

    let cases = [
        (json!({}), "note_name"),
        (json!({ "note_name": "n" }), "folder_id"),
        (
            json!({ "note_name": "n", "folder_id": folder_id }),
            "note_content",
        ),
        (
            json!({ "note_name": "n", "folder_id": null, "note_content": "c" }),
            "folder_id",
        ),
    ];

    for (body, field) in cases {
        let res = client
            .post(format!("{}/notes", server.base_url))
            .json(&body)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let payload = res.json::<Value>().await?;
        assert_eq!(
            payload,
            json!({ "error": { "message": format!("Missing '{}' in request body", field) } })
        );
    }

    Ok(())
}

#[tokio::test]
async fn create_rejects_malformed_folder_id() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/notes", server.base_url))
        .json(&json!({
            "note_name": "n",
            "folder_id": "not-a-uuid",
            "note_content": "c",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn create_sanitizes_name_and_content() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let folder_id = create_folder(&server.base_url, &client, "xss parent").await?;

    let malicious_name = "Naughty naughty very naughty <script>alert(\"xss\");</script>";
    let expected_name = "Naughty naughty very naughty &lt;script&gt;alert(\"xss\");&lt;/script&gt;";
    let malicious_content = "Bad image <img src=\"https://url.to.file.which/does-not.exist\" onerror=\"alert(document.cookie);\">. But not <strong>all</strong> bad.";
    let expected_content = "Bad image <img src=\"https://url.to.file.which/does-not.exist\">. But not <strong>all</strong> bad.";

    let created = create_note(
        &server.base_url,
        &client,
        &folder_id,
        malicious_name,
        malicious_content,
    )
    .await?;
    assert_eq!(created["note_name"], expected_name);
    assert_eq!(created["note_content"], expected_content);

    let id = created["id"].as_str().unwrap();
    let fetched = client
        .get(format!("{}/notes/{}", server.base_url, id))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(fetched["note_name"], expected_name);
    assert_eq!(fetched["note_content"], expected_content);

    Ok(())
}

#[tokio::test]
async fn list_contains_created_note() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let folder_id = create_folder(&server.base_url, &client, "list parent").await?;
    let created = create_note(&server.base_url, &client, &folder_id, "listed note", "body").await?;

    let res = client.get(format!("{}/notes", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let notes = res.json::<Vec<Value>>().await?;
    assert!(
        notes.iter().any(|n| n["id"] == created["id"]),
        "created note missing from list"
    );

    Ok(())
}

#[tokio::test]
async fn patch_with_no_recognized_field_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let folder_id = create_folder(&server.base_url, &client, "empty patch parent").await?;
    let created = create_note(&server.base_url, &client, &folder_id, "note", "body").await?;
    let id = created["id"].as_str().unwrap();

    for body in [json!({}), json!({ "unrelated": "field" })] {
        let res = client
            .patch(format!("{}/notes/{}", server.base_url, id))
            .json(&body)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let payload = res.json::<Value>().await?;
        assert_eq!(
            payload,
            json!({ "error": { "message": "Request body must contain one of 'note_name', 'folder_id' or 'note_content'" } })
        );
    }

    Ok(())
}

#[tokio::test]
async fn patch_applies_subset_and_refreshes_date_modified() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let folder_id = create_folder(&server.base_url, &client, "patch parent").await?;
    let created = create_note(&server.base_url, &client, &folder_id, "note", "old content").await?;
    let id = created["id"].as_str().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let res = client
        .patch(format!("{}/notes/{}", server.base_url, id))
        .json(&json!({ "note_content": "new content" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty(), "204 must carry no body");

    let fetched = client
        .get(format!("{}/notes/{}", server.base_url, id))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(fetched["note_content"], "new content");
    // Untouched fields stay as they were
    assert_eq!(fetched["note_name"], created["note_name"]);
    assert_eq!(fetched["folder_id"], created["folder_id"]);
    // Every successful update refreshes the modification stamp
    assert_ne!(fetched["date_modified"], created["date_modified"]);

    Ok(())
}

#[tokio::test]
async fn unknown_id_is_404_for_get_patch_delete() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let id = uuid::Uuid::new_v4();
    let not_found = json!({ "error": { "message": "Note not found" } });

    let res = client
        .get(format!("{}/notes/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, not_found);

    let res = client
        .patch(format!("{}/notes/{}", server.base_url, id))
        .json(&json!({ "note_name": "anything" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, not_found);

    let res = client
        .delete(format!("{}/notes/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, not_found);

    Ok(())
}

#[tokio::test]
async fn delete_then_get_is_404() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let folder_id = create_folder(&server.base_url, &client, "delete parent").await?;
    let created = create_note(&server.base_url, &client, &folder_id, "doomed note", "body").await?;
    let id = created["id"].as_str().unwrap();

    let res = client
        .delete(format!("{}/notes/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/notes/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
