use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const EN: &str = r#"export default {
  nav: { home: "Home", about: "About" },
};
"#;

#[test]
fn test_check_all_complete() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", EN),
        ("es", r#"export default { nav: { home: "Inicio", about: "Acerca de" } };"#),
    ])?;

    let output = test.run(&["check"])?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("es: 2/2 keys complete (100.0%)"));
    assert!(out.contains("  navigation  critical  2/2       100.0%"));
    assert!(out.contains("✓ Checked 1 locale against en - all keys complete"));

    Ok(())
}

#[test]
fn test_check_reports_missing_key() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", EN),
        ("es", r#"export default { nav: { home: "Inicio" } };"#),
    ])?;

    let output = test.run(&["check"])?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains(
        "error: \"nav.about\"  missing\n  --> src/locales/es.ts\n   = note: navigation (critical), reference: \"About\"\n"
    ));
    assert!(out.contains("es: 1/2 keys complete (50.0%)"));
    assert!(out.contains("  missing 1\n"));
    assert!(out.contains("✘ 1 incomplete key in 1 locale"));

    Ok(())
}

#[test]
fn test_check_placeholder_and_type_mismatch() -> Result<()> {
    let test = CliTest::with_locales(&[
        (
            "en",
            r#"export default { nav: { about: "About" }, tags: ["a", "b"] };"#,
        ),
        (
            "es",
            r#"export default { nav: { about: "[TODO] About" }, tags: "a" };"#,
        ),
    ])?;

    let output = test.run(&["check"])?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("warning: \"nav.about\"  placeholder"));
    assert!(out.contains("error: \"tags\"  type-mismatch"));
    assert!(out.contains("= hint: reference is a list but es has a scalar"));
    assert!(out.contains("✘ 2 incomplete keys in 1 locale"));

    Ok(())
}

#[test]
fn test_check_json_output() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", EN),
        ("es", r#"export default { nav: { home: "Inicio", about: "" } };"#),
    ])?;

    let output = test.run(&["check", "--format", "json"])?;

    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(json["reference"], "en");
    let report = &json["locales"][0]["report"];
    assert_eq!(json["locales"][0]["locale"], "es");
    assert_eq!(report["total"], 2);
    assert_eq!(report["statusCounts"]["complete"], 1);
    assert_eq!(report["statusCounts"]["empty"], 1);
    assert_eq!(report["completionRate"], 0.5);
    assert_eq!(report["categories"][0]["category"], "navigation");
    assert_eq!(report["results"][1]["path"], "nav.about");
    assert_eq!(report["results"][1]["status"], "empty");

    Ok(())
}

#[test]
fn test_check_writes_report_file() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", EN),
        ("es", r#"export default { nav: { home: "Inicio", about: "Acerca de" } };"#),
    ])?;

    let output = test.run(&["check", "--format", "json", "--output", "report.json"])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Wrote report to report.json"));
    let json: Value = serde_json::from_str(&test.read_file("report.json")?)?;
    assert_eq!(json["locales"][0]["report"]["completionRate"], 1.0);

    Ok(())
}

#[test]
fn test_check_parse_error_skips_locale() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", EN),
        ("es", r#"export default { nav: { home: "Inicio", about: "Acerca de" } };"#),
        ("fr", "export default {\n  nav: someVar,\n};\n"),
    ])?;

    let output = test.run(&["check"])?;

    assert_eq!(output.status.code(), Some(2));
    let out = stdout(&output);
    assert!(out.contains("parse-error"));
    assert!(out.contains("--> src/locales/fr.ts:2:"));
    assert!(out.contains("locale 'fr' was skipped"));
    assert!(out.contains("es: 2/2 keys complete (100.0%)"));
    assert!(out.contains("warning: 1 locale file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_check_selected_locales() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", EN),
        ("es", r#"export default { nav: { home: "Inicio", about: "Acerca de" } };"#),
        ("fr", "export default {};"),
    ])?;

    let output = test.run(&["check", "es"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout(&output).contains("fr:"));

    let output = test.run(&["check", "de"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Locale 'de' not found. Available locales: en, es, fr"));

    Ok(())
}

#[test]
fn test_check_without_targets() -> Result<()> {
    let test = CliTest::with_locales(&[("en", EN)])?;

    let output = test.run(&["check"])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("No target locales to check against en"));

    Ok(())
}

#[test]
fn test_check_uses_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".loctreerc.json",
        r#"{ "localesRoot": "i18n", "referenceLocale": "de", "extensions": ["js"] }"#,
    )?;
    test.write_file("i18n/de.js", r#"module.exports = { title: "Titel" };"#)?;
    test.write_file("i18n/fr.js", r#"module.exports = { title: "Titre" };"#)?;
    test.write_file("i18n/es.ts", r#"export default {};"#)?;

    let output = test.run(&["check"])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("✓ Checked 1 locale against de - all keys complete"));

    Ok(())
}

#[test]
fn test_check_cli_flags_override_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/fr.ts", r#"export default { title: "Titre" };"#)?;
    test.write_file("locales/es.ts", r#"export default {};"#)?;

    let output = test.run(&[
        "check",
        "--locales-root",
        "locales",
        "--reference-locale",
        "fr",
    ])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("error: \"title\"  missing"));

    Ok(())
}

#[test]
fn test_check_missing_locales_root() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["check"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("does not exist"));

    Ok(())
}
