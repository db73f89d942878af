use std::fs;

use loctree::mcp::{LoctreeMcpServer, types::ApplyPatchParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::{Value, json};

use crate::{McpTestFixture, extract_tool_result_json, fixture_with_gaps};

fn params(fixture: &McpTestFixture, locale: &str, entries: Value) -> ApplyPatchParams {
    ApplyPatchParams {
        project_root_path: fixture.root(),
        locale: locale.to_string(),
        entries,
        apply: None,
        allow_overrides: None,
    }
}

fn backups(fixture: &McpTestFixture) -> Vec<String> {
    fs::read_dir(fixture.root_path().join("src/locales"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .filter(|name| name.ends_with(".bak"))
        .collect()
}

// ============================================================================
// apply_patch tests
// ============================================================================

#[tokio::test]
async fn test_apply_patch_dry_run_by_default() {
    let fixture = fixture_with_gaps().unwrap();
    let before = fixture.read_locale_file("es").unwrap();
    let server = LoctreeMcpServer::new();

    let result = server
        .apply_patch(Parameters(params(
            &fixture,
            "es",
            json!({ "nav.about": "Acerca de", "nav.home": "Inicio" }),
        )))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["written"], false);
    assert_eq!(json_result["blocked"], false);
    assert_eq!(json_result["addedCount"], 1);
    assert_eq!(json_result["unchangedCount"], 1);
    assert_eq!(
        json_result["changes"],
        json!([
            { "key": "nav.about", "action": "added" },
            { "key": "nav.home", "action": "unchanged" }
        ])
    );
    assert_eq!(fixture.read_locale_file("es").unwrap(), before);
    assert!(backups(&fixture).is_empty());
}

#[tokio::test]
async fn test_apply_patch_writes_with_backup() {
    let fixture = fixture_with_gaps().unwrap();
    let before = fixture.read_locale_file("es").unwrap();
    let server = LoctreeMcpServer::new();

    let mut request = params(
        &fixture,
        "es",
        json!({ "nav.about": "Acerca de", "errors.notFound": "No encontrado" }),
    );
    request.apply = Some(true);

    let result = server.apply_patch(Parameters(request)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["written"], true);
    assert_eq!(json_result["filePath"], "src/locales/es.ts");
    assert_eq!(json_result["addedCount"], 1);
    assert_eq!(json_result["updatedCount"], 1);
    assert!(
        json_result["backupPath"]
            .as_str()
            .unwrap()
            .starts_with("src/locales/es.ts.")
    );

    let content = fixture.read_locale_file("es").unwrap();
    assert!(content.contains("    about: \"Acerca de\",\n"));
    assert!(content.contains("    notFound: \"No encontrado\",\n"));
    // untouched keys survive
    assert!(content.contains("    title: \"[TODO] Site\",\n"));
    assert!(content.contains("  tags: \"a\",\n"));

    let backups = backups(&fixture);
    assert_eq!(backups.len(), 1);
    let backup = fs::read_to_string(fixture.root_path().join("src/locales").join(&backups[0]));
    assert_eq!(backup.unwrap(), before);
}

#[tokio::test]
async fn test_apply_patch_accepts_pairs() {
    let fixture = fixture_with_gaps().unwrap();
    let server = LoctreeMcpServer::new();

    let mut request = params(
        &fixture,
        "es",
        json!([["nav.about", "Acerca de"], ["footer", { "copyright": "©" }]]),
    );
    request.apply = Some(true);

    let result = server.apply_patch(Parameters(request)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["written"], true);
    assert_eq!(json_result["addedCount"], 2);
    assert_eq!(json_result["changes"][1]["key"], "footer.copyright");
    assert!(
        fixture
            .read_locale_file("es")
            .unwrap()
            .contains("  footer: {\n    copyright: \"©\",\n  },\n")
    );
}

#[tokio::test]
async fn test_apply_patch_override_is_blocked() {
    let fixture = fixture_with_gaps().unwrap();
    let before = fixture.read_locale_file("es").unwrap();
    let server = LoctreeMcpServer::new();

    let mut request = params(&fixture, "es", json!({ "tags.first": "a" }));
    request.apply = Some(true);

    let result = server.apply_patch(Parameters(request)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["written"], false);
    assert_eq!(json_result["blocked"], true);
    let overrides = json_result["overrides"].as_array().unwrap();
    assert_eq!(overrides.len(), 1);
    assert_eq!(overrides[0]["key"], "tags");
    assert_eq!(overrides[0]["patchKey"], "tags.first");
    assert_eq!(overrides[0]["kind"], "scalarReplaced");
    assert_eq!(fixture.read_locale_file("es").unwrap(), before);
}

#[tokio::test]
async fn test_apply_patch_allow_overrides() {
    let fixture = fixture_with_gaps().unwrap();
    let server = LoctreeMcpServer::new();

    let mut request = params(&fixture, "es", json!({ "nav": "Menu" }));
    request.apply = Some(true);
    request.allow_overrides = Some(true);

    let result = server.apply_patch(Parameters(request)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["written"], true);
    assert_eq!(json_result["overrides"][0]["kind"], "branchReplaced");
    assert!(
        fixture
            .read_locale_file("es")
            .unwrap()
            .contains("  nav: \"Menu\",\n")
    );
}

#[tokio::test]
async fn test_apply_patch_rejects_invalid_input() {
    let fixture = fixture_with_gaps().unwrap();
    let server = LoctreeMcpServer::new();

    let cases = [
        ("es", json!({})),
        ("es", json!({ "nav.about": null })),
        ("es", json!("not a patch")),
        ("../es", json!({ "nav.about": "x" })),
        ("de", json!({ "nav.about": "x" })),
    ];

    for (locale, entries) in cases {
        let result = server
            .apply_patch(Parameters(params(&fixture, locale, entries.clone())))
            .await;
        assert!(
            result.is_err(),
            "{} {} should be rejected",
            locale,
            entries
        );
    }
}
