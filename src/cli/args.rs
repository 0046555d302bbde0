//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: validate i18n usage (unknown keys, template fields,
//!   untranslated text)
//! - `init`: write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::findings::Rule;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Selectable check rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    UnknownKey,
    TemplateFields,
    TextAsChildren,
    TextAsAttribute,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![
            CheckRule::UnknownKey,
            CheckRule::TemplateFields,
            CheckRule::TextAsChildren,
            CheckRule::TextAsAttribute,
        ]
    }

    /// Whether a finding's rule falls under this selection.
    pub fn covers(&self, rule: Rule) -> bool {
        matches!(
            (self, rule),
            (CheckRule::UnknownKey, Rule::UnknownKey)
                | (CheckRule::TemplateFields, Rule::TemplateFields)
                | (CheckRule::TextAsChildren, Rule::TextAsChildren)
                | (CheckRule::TextAsAttribute, Rule::TextAsAttribute)
        )
    }
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Rules to check (default: all)
    #[arg(value_enum)]
    pub rules: Vec<CheckRule>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check i18n usage against the configured translation dictionaries
    Check(CheckCommand),
    /// Initialize a new .intlintrc.json configuration file
    Init,
}
