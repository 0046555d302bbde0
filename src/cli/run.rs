//! Command dispatch for the intlint CLI.

use std::{fs, path::PathBuf};

use anyhow::Result;
use colored::Colorize;

use super::args::{Arguments, CheckCommand, CheckRule, Command};
use super::exit_status::ExitStatus;
use super::report;
use crate::config::{CONFIG_FILE_NAME, default_config_json, load_config};
use crate::dictionary::DictionaryStore;
use crate::engine::Validator;
use crate::findings::{Finding, Rule, Severity};
use crate::scan::scan_project;

pub fn run(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init) => init(),
        None => Ok(ExitStatus::Success),
    }
}

fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let root: PathBuf = match &cmd.common.root {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };

    let loaded = load_config(&root)?;
    if cmd.common.verbose && !loaded.from_file {
        eprintln!(
            "{} No {} found, using defaults",
            "info:".bold().cyan(),
            CONFIG_FILE_NAME
        );
    }
    let settings = loaded.config.compile()?;

    let scanned = scan_project(&root, &settings, cmd.common.verbose);

    let mut findings: Vec<Finding> = scanned
        .parse_errors
        .into_iter()
        .map(Finding::ParseError)
        .collect();

    let mut store = DictionaryStore::new(&root);
    let mut validator = Validator::new(&settings, &mut store);
    for document in &scanned.documents {
        findings.extend(validator.validate(document));
    }

    let selected = if cmd.rules.is_empty() {
        CheckRule::all()
    } else {
        cmd.rules.clone()
    };
    findings.retain(|finding| {
        finding.rule() == Rule::ParseError
            || selected.iter().any(|rule| rule.covers(finding.rule()))
    });

    if findings.is_empty() {
        report::print_success(scanned.files_checked, settings.language_files.len());
        return Ok(ExitStatus::Success);
    }

    report::report(&findings);

    let has_errors = findings
        .iter()
        .any(|finding| finding.severity() == Severity::Error);
    Ok(if has_errors {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}

fn init() -> Result<ExitStatus> {
    let config_path = std::path::Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    println!(
        "{} Created {}",
        report::SUCCESS_MARK.green(),
        CONFIG_FILE_NAME
    );
    Ok(ExitStatus::Success)
}
