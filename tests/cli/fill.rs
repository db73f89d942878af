use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const EN: &str = r#"export default {
  nav: { home: "Home", about: "About" },
  tags: ["a", "b"],
  count: 3,
};
"#;

const ES: &str = r#"export default { nav: { home: "Inicio" } };"#;

#[test]
fn test_fill_dry_run_lists_missing_keys() -> Result<()> {
    let test = CliTest::with_locales(&[("en", EN), ("es", ES)])?;

    let output = test.run(&["fill", "es"])?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("  + nav.about: \"[TODO] About\"\n"));
    assert!(out.contains("  + tags: [\"[TODO] a\",\"[TODO] b\"]\n"));
    assert!(out.contains("  + count: 3\n"));
    assert!(out.contains("Dry run src/locales/es.ts: 3 added, 0 updated."));
    assert_eq!(test.read_file("src/locales/es.ts")?, ES);

    Ok(())
}

#[test]
fn test_fill_apply_then_check_reports_placeholders() -> Result<()> {
    let test = CliTest::with_locales(&[("en", EN), ("es", ES)])?;

    let output = test.run(&["fill", "es", "--apply"])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file("src/locales/es.ts")?,
        "export default {\n  nav: {\n    home: \"Inicio\",\n    about: \"[TODO] About\",\n  },\n  tags: [\"[TODO] a\", \"[TODO] b\"],\n  count: 3,\n};\n"
    );

    let output = test.run(&["check", "es"])?;
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("warning: \"nav.about\"  placeholder"));
    assert!(out.contains("placeholder 1"));
    assert!(!out.contains("missing"));

    Ok(())
}

#[test]
fn test_fill_complete_locale() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", r#"export default { title: "Title" };"#),
        ("es", r#"export default { title: "Título" };"#),
    ])?;

    let output = test.run(&["fill", "es", "--apply"])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("✓ es has no missing keys"));
    assert!(test.backups("src/locales")?.is_empty());

    Ok(())
}

#[test]
fn test_fill_uses_configured_template() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", r#"export default { title: "Title" };"#),
        ("es", r#"export default {};"#),
    ])?;
    test.write_file(
        ".loctreerc.json",
        r#"{ "fillTemplate": "[translate] {source}" }"#,
    )?;

    let output = test.run(&["fill", "es", "--apply"])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file("src/locales/es.ts")?,
        "export default {\n  title: \"[translate] Title\",\n};\n"
    );

    Ok(())
}

#[test]
fn test_fill_reference_locale_is_an_error() -> Result<()> {
    let test = CliTest::with_locales(&[("en", EN), ("es", ES)])?;

    let output = test.run(&["fill", "en"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Cannot fill the reference locale 'en'"));

    Ok(())
}
