use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const EN: &str = r#"export default {
  nav: { home: "Home", about: "About" },
  tags: ["a", "b"],
  empty: {},
  "sign-in": "Sign in",
};
"#;

#[test]
fn test_keys_lists_reference_leaves() -> Result<()> {
    let test = CliTest::with_locales(&[("en", EN)])?;

    let output = test.run(&["keys"])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "nav.home\nnav.about\ntags\nsign-in\n");

    Ok(())
}

#[test]
fn test_keys_for_named_locale() -> Result<()> {
    let test = CliTest::with_locales(&[
        ("en", EN),
        ("es", r#"export const es = { footer: { copyright: "©" } };"#),
    ])?;

    let output = test.run(&["keys", "es"])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "footer.copyright\n");

    Ok(())
}

#[test]
fn test_keys_unknown_locale() -> Result<()> {
    let test = CliTest::with_locales(&[("en", EN)])?;

    let output = test.run(&["keys", "de"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Locale 'de' not found. Available locales: en"));

    Ok(())
}

#[test]
fn test_keys_rejects_executable_content() -> Result<()> {
    let test = CliTest::with_locales(&[(
        "en",
        "export default {\n  title: compute(),\n};\n",
    )])?;

    let output = test.run(&["keys"])?;

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Failed to load locale 'en'"));
    assert!(err.contains("line 2, column"));

    Ok(())
}
