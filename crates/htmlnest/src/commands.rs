mod check;

use anyhow::Result;
use clap::Subcommand;

use crate::args::Args;
use crate::exit::Exit;

pub trait Command {
    fn execute(&self, args: &Args) -> Result<Exit>;
}

#[derive(Debug, Subcommand)]
pub enum HtmlnestCommand {
    /// Check HTML files for unclosed, mismatched and unexpected closing tags
    Check(self::check::Check),
}

impl Command for HtmlnestCommand {
    fn execute(&self, args: &Args) -> Result<Exit> {
        match self {
            HtmlnestCommand::Check(check) => check.execute(args),
        }
    }
}
