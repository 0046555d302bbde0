use anyhow::Result;

use crate::{CliTest, run};

const EN_JSON: &str = r#"{
    "helloWorld": "Hello World",
    "templated": "Hello {{name}}",
    "pluralizedPluralSingular": { "singular": "item", "plural": "items" },
    "badPluralizedPluralSingular": { "plural": "items" }
}"#;

fn config_with_language() -> &'static str {
    r#"{ "languageFiles": [{ "name": "en", "path": "i18n/en.json" }] }"#
}

#[test]
fn test_no_sources_reports_success() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(&mut test.check_command());
    assert_eq!(code, 0);
    assert!(stdout.contains("no issues found"), "stdout: {stdout}");

    Ok(())
}

#[test]
fn test_known_key_passes() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlintrc.json", config_with_language())?;
    test.write_file("i18n/en.json", EN_JSON)?;
    test.write_file(
        "src/app.jsx",
        r#"export const App = () => <Text id="helloWorld"/>;"#,
    )?;

    let (code, stdout, _) = run(&mut test.check_command());
    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains("no issues found"));
    assert!(stdout.contains("1 language"));

    Ok(())
}

#[test]
fn test_missing_key_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlintrc.json", config_with_language())?;
    test.write_file("i18n/en.json", EN_JSON)?;
    test.write_file(
        "src/app.jsx",
        r#"export const App = () => <Text id="missing"/>;"#,
    )?;

    let (code, stdout, _) = run(&mut test.check_command());
    assert_eq!(code, 1, "stdout: {stdout}");
    assert!(stdout.contains("error: 'missing' is missing from 'en' language"));
    assert!(stdout.contains("--> ./src/app.jsx:1:"));
    assert!(stdout.contains("unknown-key"));
    assert!(stdout.contains("1 problems (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_missing_language_file_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".intlintrc.json",
        r#"{ "languageFiles": [{ "name": "es", "path": "i18n/es.json" }] }"#,
    )?;
    test.write_file(
        "src/app.jsx",
        r#"export const App = () => <Text id="helloWorld"/>;"#,
    )?;

    let (code, stdout, _) = run(&mut test.check_command());
    assert_eq!(code, 1, "stdout: {stdout}");
    assert!(stdout.contains("'es' language is missing"));

    Ok(())
}

#[test]
fn test_untranslated_text() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.jsx",
        r#"export const App = () => <span>Hello world !</span>;"#,
    )?;

    let (code, stdout, _) = run(&mut test.check_command());
    assert_eq!(code, 1, "stdout: {stdout}");
    assert!(stdout.contains("error: Untranslated text 'Hello world !'"));
    assert!(stdout.contains("text-as-children"));

    Ok(())
}

#[test]
fn test_untranslated_attribute() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.jsx",
        r#"export const App = () => <img alt="foo"/>;"#,
    )?;

    let (code, stdout, _) = run(&mut test.check_command());
    assert_eq!(code, 1, "stdout: {stdout}");
    assert!(stdout.contains("error: Untranslated attribute alt with \"foo\""));
    assert!(stdout.contains("text-as-attribute"));

    Ok(())
}

#[test]
fn test_markup_fallback_is_not_flagged() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.jsx",
        r#"export const App = () => <MarkupText id="k"><div><span>Fallback</span></div></MarkupText>;"#,
    )?;

    let (code, stdout, _) = run(&mut test.check_command());
    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains("no issues found"));

    Ok(())
}

#[test]
fn test_template_fields_finding() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlintrc.json", config_with_language())?;
    test.write_file("i18n/en.json", EN_JSON)?;
    test.write_file(
        "src/app.jsx",
        r#"export const App = () => <Text id="templated"/>;"#,
    )?;

    let (code, stdout, _) = run(&mut test.check_command());
    assert_eq!(code, 1, "stdout: {stdout}");
    assert!(stdout.contains("'templated' has template fields but no fields attribute."));
    assert!(stdout.contains("template-fields"));

    Ok(())
}

#[test]
fn test_plural_warning_exits_zero() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlintrc.json", config_with_language())?;
    test.write_file("i18n/en.json", EN_JSON)?;
    test.write_file(
        "src/app.jsx",
        r#"export const App = () => <Text id="badPluralizedPluralSingular" plural={1}/>;"#,
    )?;

    let (code, stdout, _) = run(&mut test.check_command());
    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains(
        "warning: [singular] pluralization keys are missing for key 'badPluralizedPluralSingular' in 'en' language"
    ));
    assert!(stdout.contains("1 problems (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_parse_error_is_reported() -> Result<()> {
    let test = CliTest::with_file("src/broken.jsx", "const = <")?;

    let (code, stdout, _) = run(&mut test.check_command());
    assert_eq!(code, 1, "stdout: {stdout}");
    assert!(stdout.contains("parse-error"));
    assert!(stdout.contains("./src/broken.jsx"));

    Ok(())
}

#[test]
fn test_rule_selection_filters_findings() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.jsx",
        r#"export const App = () => <span>Hello world !</span>;"#,
    )?;

    let mut cmd = test.check_command();
    cmd.arg("unknown-key");
    let (code, stdout, _) = run(&mut cmd);
    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains("no issues found"));

    Ok(())
}

#[test]
fn test_ignore_files_glob() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".intlintrc.json",
        r#"{ "ignoreFiles": ["**/*.spec.jsx"] }"#,
    )?;
    test.write_file(
        "src/app.spec.jsx",
        r#"export const App = () => <span>Spec text is fine</span>;"#,
    )?;
    test.write_file("src/app.jsx", r#"export const App = () => <div/>;"#)?;

    let (code, stdout, _) = run(&mut test.check_command());
    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains("Checked 1 source file "));

    Ok(())
}

#[test]
fn test_includes_limit_scanned_dirs() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlintrc.json", r#"{ "includes": ["src"] }"#)?;
    test.write_file("src/app.jsx", r#"export const App = () => <div/>;"#)?;
    test.write_file(
        "lib/other.jsx",
        r#"export const Other = () => <span>Not scanned</span>;"#,
    )?;

    let (code, stdout, _) = run(&mut test.check_command());
    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains("Checked 1 source file "));

    Ok(())
}

#[test]
fn test_ignore_text_regex_option() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".intlintrc.json",
        r#"{ "ignoreTextRegex": "^\\s*/\\s*$" }"#,
    )?;
    test.write_file("src/app.jsx", r#"export const App = () => <img alt=" / "/>;"#)?;

    let (code, stdout, _) = run(&mut test.check_command());
    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains("no issues found"));

    Ok(())
}

#[test]
fn test_invalid_config_exits_with_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlintrc.json", r#"{ "withTextRegex": "(" }"#)?;
    test.write_file("src/app.jsx", r#"export const App = () => <div/>;"#)?;

    let (code, _, stderr) = run(&mut test.check_command());
    assert_eq!(code, 2, "stderr: {stderr}");
    assert!(stderr.contains("withTextRegex"));

    Ok(())
}

#[test]
fn test_with_text_helper_keys() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlintrc.json", config_with_language())?;
    test.write_file("i18n/en.json", EN_JSON)?;
    test.write_file(
        "src/app.jsx",
        r#"export const App = withText("helloWorld,nope")(Inner);"#,
    )?;

    let (code, stdout, _) = run(&mut test.check_command());
    assert_eq!(code, 1, "stdout: {stdout}");
    assert!(stdout.contains("'nope' is missing from 'en' language"));
    assert!(!stdout.contains("'helloWorld' is missing"));

    Ok(())
}

#[test]
fn test_root_flag() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "project/src/app.jsx",
        r#"export const App = () => <span>Text in nested project</span>;"#,
    )?;

    let mut cmd = test.check_command();
    cmd.arg("--root").arg(test.root().join("project"));
    let (code, stdout, _) = run(&mut cmd);
    assert_eq!(code, 1, "stdout: {stdout}");
    assert!(stdout.contains("Untranslated text 'Text in nested project'"));

    Ok(())
}
