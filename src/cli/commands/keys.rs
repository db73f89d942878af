use anyhow::Result;

use super::super::args::KeysCommand;
use super::{CommandResult, CommandSummary, KeysSummary, finish, load_project};

pub fn keys(cmd: KeysCommand) -> Result<CommandResult> {
    let project = load_project(&cmd.common)?;
    let locale = match &cmd.locale {
        Some(name) => project.locale(name)?,
        None => project.reference()?,
    };
    let document = project.load_locale_strict(&locale)?;
    let paths = document.tree.leaf_paths().collect();

    Ok(finish(
        CommandSummary::Keys(KeysSummary {
            locale: locale.name,
            paths,
        }),
        Vec::new(),
        false,
    ))
}
