use std::path::Path;

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;

fn write_event(dir: &Path, event: serde_json::Value) -> std::path::PathBuf {
    let path = dir.join("event.json");
    std::fs::write(&path, event.to_string()).expect("write event payload");
    path
}

fn pr_comment_event(comment: &str) -> serde_json::Value {
    json!({
        "action": "created",
        "issue": {
            "number": 7,
            "pull_request": {"url": "https://api.github.com/repos/owner/repo/pulls/7"}
        },
        "comment": {"body": comment},
        "repository": {"full_name": "owner/repo"}
    })
}

fn aiissue(server: &MockServer, event_path: &Path) -> Command {
    let mut command = Command::cargo_bin("aiissue").expect("binary should build");
    command
        .env_clear()
        .env("GITHUB_EVENT_PATH", event_path)
        .env("GITHUB_API_URL", server.base_url())
        .env("OPENAI_BASE_URL", format!("{}/v1", server.base_url()))
        .env("AIISSUE_REQUEST_TIMEOUT_MS", "5000");
    command
}

#[test]
fn integration_cli_skips_plain_issue_comment_without_http_traffic() {
    let server = MockServer::start();
    let pr_fetch = server.mock(|when, then| {
        when.method(GET).path("/repos/owner/repo/pulls/7");
        then.status(500);
    });
    let temp = tempfile::tempdir().expect("tempdir");
    let event = write_event(
        temp.path(),
        json!({
            "issue": {"number": 7},
            "comment": {"body": "@aiissue please"},
            "repository": {"full_name": "owner/repo"}
        }),
    );

    aiissue(&server, &event).assert().success();
    pr_fetch.assert_calls(0);
}

#[test]
fn integration_cli_skips_comment_without_trigger_phrase() {
    let server = MockServer::start();
    let pr_fetch = server.mock(|when, then| {
        when.method(GET).path("/repos/owner/repo/pulls/7");
        then.status(500);
    });
    let temp = tempfile::tempdir().expect("tempdir");
    let event = write_event(temp.path(), pr_comment_event("LGTM, ship it"));

    aiissue(&server, &event)
        .env("GITHUB_TOKEN", "gh-test")
        .env("OPENAI_API_KEY", "sk-test")
        .assert()
        .success();
    pr_fetch.assert_calls(0);
}

#[test]
fn regression_cli_fails_when_credentials_are_missing() {
    let server = MockServer::start();
    let pr_fetch = server.mock(|when, then| {
        when.method(GET).path("/repos/owner/repo/pulls/7");
        then.status(500);
    });
    let temp = tempfile::tempdir().expect("tempdir");
    let event = write_event(temp.path(), pr_comment_event("@aiissue track this"));

    aiissue(&server, &event)
        .env("GITHUB_TOKEN", "gh-test")
        .env("INPUT_OPENAI_API_KEY", "   ")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("model API key"));
    pr_fetch.assert_calls(0);
}

#[test]
fn regression_cli_fails_on_malformed_event_payload() {
    let server = MockServer::start();
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("event.json");
    std::fs::write(&path, "{not json").expect("write event payload");

    aiissue(&server, &path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("malformed event"));
}

#[test]
fn integration_cli_creates_issue_and_writes_outputs() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repos/owner/repo/pulls/7");
        then.status(200).json_body(json!({
            "number": 7,
            "title": "Add retry to uploader",
            "body": "Adds retries.",
            "user": {"login": "alice"},
            "assignees": [],
            "created_at": "2024-01-01T00:00:00Z",
            "changed_files": 3,
            "additions": 50,
            "deletions": 10
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/repos/owner/repo/labels");
        then.status(200).json_body(json!([{"name": "bug"}, {"name": "feature"}]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/orgs/owner/issue-types");
        then.status(404).json_body(json!({"message": "Not Found"}));
    });
    let chat = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer sk-test");
        then.status(200).json_body(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": json!({
                        "title": "Uploads fail on flaky networks",
                        "body": "Uploads abort on the first timeout.",
                        "labels": ["bug", "urgent"],
                        "issue_type": "bug"
                    }).to_string()
                },
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 100, "completion_tokens": 40, "total_tokens": 140}
        }));
    });
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/owner/repo/issues")
            .header("authorization", "Bearer gh-test")
            .json_body(json!({
                "title": "Uploads fail on flaky networks",
                "body": "Uploads abort on the first timeout.",
                "labels": ["bug"],
                "assignees": []
            }));
        then.status(201).json_body(json!({"number": 456}));
    });
    let patch = server.mock(|when, then| {
        when.method(PATCH)
            .path("/repos/owner/repo/pulls/7")
            .json_body(json!({"body": "Adds retries.\n\nCloses #456"}));
        then.status(200).json_body(json!({
            "number": 7,
            "title": "Add retry to uploader",
            "body": "Adds retries.\n\nCloses #456",
            "user": {"login": "alice"},
            "created_at": "2024-01-01T00:00:00Z"
        }));
    });

    let temp = tempfile::tempdir().expect("tempdir");
    let event = write_event(temp.path(), pr_comment_event("Please @AIISSUE this"));
    let output = temp.path().join("github_output");

    aiissue(&server, &event)
        .env("INPUT_GITHUB_TOKEN", "gh-test")
        .env("OPENAI_API_KEY", "sk-test")
        .env("GITHUB_SERVER_URL", "https://github.example")
        .env("GITHUB_OUTPUT", &output)
        .assert()
        .success()
        .stdout(predicate::str::contains("::set-output").not());

    chat.assert_calls(1);
    create.assert_calls(1);
    patch.assert_calls(1);
    let written = std::fs::read_to_string(&output).expect("read outputs");
    assert_eq!(
        written,
        "issue_number=456\nissue_url=https://github.example/owner/repo/issues/456\n"
    );
}

#[test]
fn functional_cli_prints_set_output_without_output_file() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repos/owner/repo/pulls/7");
        then.status(200).json_body(json!({
            "number": 7,
            "title": "Docs",
            "body": "Closes #12",
            "user": {"login": "alice"},
            "created_at": "2024-01-01T00:00:00Z"
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/repos/owner/repo/labels");
        then.status(200).json_body(json!([]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/orgs/owner/issue-types");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(json!({
            "choices": [{
                "message": {"content": "{\"title\":\"Document setup\",\"body\":\"\",\"labels\":[],\"issue_type\":null}"},
                "finish_reason": "stop"
            }]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/repos/owner/repo/issues");
        then.status(201).json_body(json!({
            "number": 12,
            "html_url": "https://github.com/owner/repo/issues/12"
        }));
    });

    let temp = tempfile::tempdir().expect("tempdir");
    let event = write_event(temp.path(), pr_comment_event("@aiissue"));

    aiissue(&server, &event)
        .env("GITHUB_TOKEN", "gh-test")
        .env("INPUT_OPENAI_API_KEY", "sk-test")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "::set-output name=issue_number::12\n::set-output name=issue_url::https://github.com/owner/repo/issues/12",
        ));
}

#[test]
fn regression_cli_exits_one_on_invalid_environment_configuration() {
    let server = MockServer::start();
    let pr_fetch = server.mock(|when, then| {
        when.method(GET).path("/repos/owner/repo/pulls/7");
        then.status(500);
    });
    let temp = tempfile::tempdir().expect("tempdir");
    let event = write_event(temp.path(), pr_comment_event("@aiissue track this"));

    for (name, value) in [
        ("AIISSUE_REQUEST_TIMEOUT_MS", "0"),
        ("AIISSUE_TEMPERATURE", "warm"),
    ] {
        aiissue(&server, &event)
            .env("GITHUB_TOKEN", "gh-test")
            .env("OPENAI_API_KEY", "sk-test")
            .env(name, value)
            .assert()
            .failure()
            .code(1);
    }
    pr_fetch.assert_calls(0);
}

#[test]
fn regression_cli_exits_one_on_unknown_flag() {
    let server = MockServer::start();
    let temp = tempfile::tempdir().expect("tempdir");
    let event = write_event(temp.path(), pr_comment_event("@aiissue"));

    aiissue(&server, &event)
        .arg("--no-such-flag")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn functional_cli_help_still_exits_zero() {
    let server = MockServer::start();
    let temp = tempfile::tempdir().expect("tempdir");
    let event = write_event(temp.path(), pr_comment_event("@aiissue"));

    aiissue(&server, &event)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--event-path"));
}

#[test]
fn regression_cli_skips_event_without_issue_object() {
    let server = MockServer::start();
    let pr_fetch = server.mock(|when, then| {
        when.method(GET).path("/repos/owner/repo/pulls/7");
        then.status(500);
    });
    let temp = tempfile::tempdir().expect("tempdir");
    let event = write_event(
        temp.path(),
        json!({
            "comment": {"body": "@aiissue"},
            "repository": {"full_name": "owner/repo"}
        }),
    );

    aiissue(&server, &event)
        .env("GITHUB_TOKEN", "gh-test")
        .env("OPENAI_API_KEY", "sk-test")
        .assert()
        .success();
    pr_fetch.assert_calls(0);
}
