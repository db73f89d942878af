use std::fs;

use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const ES: &str = r#"export default { nav: { home: "Inicio" } };"#;

fn project(es: &str) -> Result<CliTest> {
    CliTest::with_locales(&[
        ("en", r#"export default { nav: { home: "Home", contact: "Contact" } };"#),
        ("es", es),
    ])
}

#[test]
fn test_merge_dry_run_leaves_file_untouched() -> Result<()> {
    let test = project(ES)?;
    test.write_file(
        "patch.json",
        r#"{ "nav.contact": "Contacto", "nav.home": "Inicio" }"#,
    )?;

    let output = test.run(&["merge", "es", "--patch", "patch.json"])?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("  + nav.contact: \"Contacto\"\n"));
    assert!(!out.contains("nav.home:"));
    assert!(out.contains(
        "Dry run src/locales/es.ts: 1 added, 0 updated. Run with --apply to write."
    ));
    assert_eq!(test.read_file("src/locales/es.ts")?, ES);
    assert!(test.backups("src/locales")?.is_empty());

    Ok(())
}

#[test]
fn test_merge_apply_writes_with_backup() -> Result<()> {
    let test = project(ES)?;
    test.write_file(
        "patch.json",
        r#"{ "nav.contact": "Contacto", "nav.home": "Portada" }"#,
    )?;

    let output = test.run(&["merge", "es", "--patch", "patch.json", "--apply"])?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("✓ Wrote src/locales/es.ts (1 added, 1 updated)"));
    assert!(out.contains("backup: src/locales/es.ts."));

    assert_eq!(
        test.read_file("src/locales/es.ts")?,
        "export default {\n  nav: {\n    home: \"Portada\",\n    contact: \"Contacto\",\n  },\n};\n"
    );

    let backups = test.backups("src/locales")?;
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("es.ts."));
    assert_eq!(test.read_file(&format!("src/locales/{}", backups[0]))?, ES);

    Ok(())
}

#[test]
fn test_merge_is_idempotent() -> Result<()> {
    let test = project(ES)?;
    test.write_file("patch.json", r#"{ "nav.contact": "Contacto" }"#)?;

    test.run(&["merge", "es", "--patch", "patch.json", "--apply"])?;
    let first = test.read_file("src/locales/es.ts")?;

    let output = test.run(&["merge", "es", "--patch", "patch.json", "--apply"])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("src/locales/es.ts is already up to date"));
    assert_eq!(test.read_file("src/locales/es.ts")?, first);
    assert_eq!(test.backups("src/locales")?.len(), 1);

    Ok(())
}

#[test]
fn test_merge_override_blocks_write() -> Result<()> {
    let es = r#"export default { nav: "Menu" };"#;
    let test = project(es)?;
    test.write_file("patch.json", r#"{ "nav.home": "Inicio" }"#)?;

    let output = test.run(&["merge", "es", "--patch", "patch.json", "--apply"])?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("error: \"nav\"  scalar-replaced"));
    assert!(out.contains("= hint: pass --allow-overrides to replace it anyway"));
    assert!(out.contains("✘ Not written: 1 structural override(s) in src/locales/es.ts"));
    assert_eq!(test.read_file("src/locales/es.ts")?, es);
    assert!(test.backups("src/locales")?.is_empty());

    Ok(())
}

#[test]
fn test_merge_allow_overrides() -> Result<()> {
    let test = project(r#"export default { nav: "Menu" };"#)?;
    test.write_file("patch.json", r#"{ "nav.home": "Inicio" }"#)?;

    let output = test.run(&[
        "merge",
        "es",
        "--patch",
        "patch.json",
        "--apply",
        "--allow-overrides",
    ])?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("warning: \"nav\"  scalar-replaced"));
    assert!(!out.contains("hint:"));
    assert_eq!(
        test.read_file("src/locales/es.ts")?,
        "export default {\n  nav: {\n    home: \"Inicio\",\n  },\n};\n"
    );

    Ok(())
}

#[test]
fn test_merge_pair_patch_with_nested_value() -> Result<()> {
    let test = project(ES)?;
    test.write_file(
        "patch.json",
        r#"[["footer", { "links": { "privacy": "Privacidad" } }], ["tags", ["a", "b"]]]"#,
    )?;

    let output = test.run(&["merge", "es", "--patch", "patch.json", "--apply"])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file("src/locales/es.ts")?,
        "export default {\n  nav: {\n    home: \"Inicio\",\n  },\n  footer: {\n    links: {\n      privacy: \"Privacidad\",\n    },\n  },\n  tags: [\"a\", \"b\"],\n};\n"
    );

    Ok(())
}

#[test]
fn test_merge_rejects_null_value() -> Result<()> {
    let test = project(ES)?;
    test.write_file("patch.json", r#"{ "nav.home": null }"#)?;

    let output = test.run(&["merge", "es", "--patch", "patch.json", "--apply"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid patch file: patch.json"));
    assert_eq!(test.read_file("src/locales/es.ts")?, ES);

    Ok(())
}

#[test]
fn test_merge_backup_dir_from_config() -> Result<()> {
    let test = project(ES)?;
    test.write_file(".loctreerc.json", r#"{ "backupDir": ".backups" }"#)?;
    test.write_file("patch.json", r#"{ "nav.contact": "Contacto" }"#)?;

    let output = test.run(&["merge", "es", "--patch", "patch.json", "--apply"])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("backup: .backups/es.ts."));
    assert!(test.backups("src/locales")?.is_empty());
    let backups = test.backups(".backups")?;
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(test.root().join(".backups").join(&backups[0]))?, ES);

    Ok(())
}
