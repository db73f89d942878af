use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult,
        check::check,
        init::init,
        keys::keys,
        merge::{fill, merge},
    },
};
use anyhow::Result;

/// Dispatch to the command handler for the parsed arguments.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Keys(cmd)) => keys(cmd),
        Some(Command::Merge(cmd)) => merge(cmd),
        Some(Command::Fill(cmd)) => fill(cmd),
        Some(Command::Init) => init(),
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run()
            anyhow::bail!("Serve command should be handled before run()")
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
