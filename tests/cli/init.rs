use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "✓ Created .loctreerc.json\n");
    assert!(test.root().join(".loctreerc.json").exists());

    let content = test.read_file(".loctreerc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["localesRoot"], "./src/locales");
    assert_eq!(parsed["referenceLocale"], "en");
    assert_eq!(parsed["fillTemplate"], "[TODO] {source}");
    assert!(parsed.get("backupDir").is_none());
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".loctreerc.json", "{}")?;

    let output = test.run(&["init"])?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: .loctreerc.json already exists\n");
    assert_eq!(test.read_file(".loctreerc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.run(&["init"])?;
    test.write_file("src/locales/en.ts", r#"export default { title: "Title" };"#)?;
    test.write_file("src/locales/es.ts", r#"export default { title: "Título" };"#)?;

    let output = test.run(&["check"])?;
    assert!(
        output.status.success(),
        "Check command should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
