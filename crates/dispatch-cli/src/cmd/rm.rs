//! `dsp rm` — delete a ticket by id.

use crate::output::{CliError, OutputMode, render, render_error};
use clap::Args;
use dispatch_core::Store;
use std::io::Write;

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Id of the record to delete.
    pub id: u64,
}

pub fn run_rm(args: &RmArgs, store: &mut Store, output: OutputMode) -> anyhow::Result<()> {
    match store.delete(args.id) {
        Ok(record) => render(output, &record, |r, w| {
            writeln!(w, "✓ deleted #{} {} ({})", r.id, r.incident, r.agent)
        }),
        Err(err) => {
            render_error(output, &CliError::from_store(&err))?;
            anyhow::bail!("{err}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RmArgs;

    #[test]
    fn rm_args_parse_positional_id() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: RmArgs,
        }
        let w = Wrapper::parse_from(["test", "17"]);
        assert_eq!(w.args.id, 17);
    }
}
