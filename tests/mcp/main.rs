use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::TempDir;

mod tools;

/// Test fixture for MCP integration tests
///
/// Manages a temporary project with a `src/locales/` directory
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;

        // Config lookup stops at the repository root
        fs::create_dir(project_root.join(".git"))?;
        fs::create_dir_all(project_root.join("src/locales"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Create a test project with locale modules
    ///
    /// # Example
    /// ```ignore
    /// let fixture = McpTestFixture::with_locales(&[
    ///     ("en", r#"export default { key: "value" };"#),
    ///     ("es", r#"export default { key: "valor" };"#),
    /// ])?;
    /// ```
    pub fn with_locales(locales: &[(&str, &str)]) -> Result<Self> {
        let fixture = Self::new()?;
        for (locale, content) in locales {
            fixture.write_locale_file(locale, content)?;
        }
        Ok(fixture)
    }

    /// Write src/locales/<locale>.ts
    pub fn write_locale_file(&self, locale: &str, content: &str) -> Result<()> {
        let path = self.locale_path(locale);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write locale file: {}", path.display()))
    }

    /// Read src/locales/<locale>.ts
    pub fn read_locale_file(&self, locale: &str) -> Result<String> {
        let path = self.locale_path(locale);
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read locale file: {}", path.display()))
    }

    fn locale_path(&self, locale: &str) -> PathBuf {
        self.project_root
            .join("src/locales")
            .join(format!("{}.ts", locale))
    }

    /// Write a .loctreerc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let path = self.project_root.join(".loctreerc.json");
        let json_str = serde_json::to_string_pretty(content)?;
        fs::write(&path, format!("{}\n", json_str))?;
        Ok(())
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    /// Get the project root path as a Path reference
    pub fn root_path(&self) -> &Path {
        &self.project_root
    }
}

// ============================================================================
// Fixture Generators
// ============================================================================

/// A reference locale and a Spanish locale with every kind of gap
pub fn fixture_with_gaps() -> Result<McpTestFixture> {
    McpTestFixture::with_locales(&[
        (
            "en",
            r#"export default {
  nav: { home: "Home", about: "About" },
  errors: { notFound: "Not found" },
  seo: { title: "Site" },
  tags: ["a", "b"],
};
"#,
        ),
        (
            "es",
            r#"export default {
  nav: { home: "Inicio" },
  errors: { notFound: "" },
  seo: { title: "[TODO] Site" },
  tags: "a",
};
"#,
        ),
    ])
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert pagination fields in a scan result
pub fn assert_pagination(
    result: &Value,
    expected_offset: usize,
    expected_limit: usize,
    expected_has_more: bool,
) {
    let pagination = &result["pagination"];
    assert_eq!(
        pagination["offset"].as_u64().unwrap(),
        expected_offset as u64,
        "Pagination offset mismatch"
    );
    assert_eq!(
        pagination["limit"].as_u64().unwrap(),
        expected_limit as u64,
        "Pagination limit mismatch"
    );
    assert_eq!(
        pagination["hasMore"].as_bool().unwrap(),
        expected_has_more,
        "Pagination hasMore mismatch"
    );
}

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
