//! `kin completions`: shell completion scripts built from the CLI definition.

use std::io::{self, Write};

use clap::Args;
use clap_complete::{Shell, generate};

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `command`, registered under the
/// command's own name.
pub fn write_completions(shell: Shell, mut command: clap::Command, out: &mut dyn Write) {
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, out);
}

pub fn run_completions(args: &CompletionsArgs, command: clap::Command) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    write_completions(args.shell, command, &mut out);
    out.flush()?;
    Ok(())
}
