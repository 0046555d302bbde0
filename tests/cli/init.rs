use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let (code, stdout, _) = run(&mut cmd);

    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains("Created .intlintrc.json"));

    let content = test.read_file(".intlintrc.json")?;
    let config: serde_json::Value = serde_json::from_str(&content)?;
    assert!(config.get("languageFiles").is_some());
    assert!(config.get("textComponents").is_some());
    assert_eq!(config["withTextRegex"], "^withText$");

    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlintrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let (code, _, stderr) = run(&mut cmd);

    assert_eq!(code, 2, "stderr: {stderr}");
    assert!(stderr.contains("already exists"));
    assert_eq!(test.read_file(".intlintrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(&mut test.command());
    assert_eq!(code, 0);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("init"));

    Ok(())
}
