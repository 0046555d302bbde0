//! Command-line interface layer.

use anyhow::Result;

mod args;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, CheckCommand, CheckRule, Command, CommonArgs};
pub use exit_status::ExitStatus;
pub use report::{report, report_to};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    run::run(args)
}
