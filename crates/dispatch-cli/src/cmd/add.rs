//! `dsp add` — log a new incident ticket.

use crate::config::CliConfig;
use crate::output::{CliError, OutputMode, render, render_error};
use chrono::NaiveDateTime;
use clap::Args;
use dispatch_core::Store;
use std::io::Write;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Incident label; must contain 'INC'.
    #[arg(short, long)]
    pub incident: String,

    /// Handling agent from the configured roster.
    #[arg(short, long)]
    pub agent: String,
}

pub fn run_add(
    args: &AddArgs,
    store: &mut Store,
    config: &CliConfig,
    output: OutputMode,
    now: NaiveDateTime,
) -> anyhow::Result<()> {
    if !config.is_known_agent(&args.agent) {
        let error = CliError::with_details(
            format!("unknown agent '{}'", args.agent),
            format!("Choose one of: {}", config.agents.join(", ")),
            "unknown_agent",
        );
        render_error(output, &error)?;
        anyhow::bail!("{}", error.message);
    }

    match store.insert(&args.incident, &args.agent, now) {
        Ok(record) => render(output, &record, |r, w| {
            writeln!(
                w,
                "✓ logged #{} {} -> {} at {}",
                r.id,
                r.incident,
                r.agent,
                r.logged_at_text()
            )
        }),
        Err(err) => {
            render_error(output, &CliError::from_store(&err))?;
            anyhow::bail!("{err}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AddArgs;

    #[test]
    fn add_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: AddArgs,
        }
        let w = Wrapper::parse_from(["test", "--incident", "INC042", "--agent", "Agent 1"]);
        assert_eq!(w.args.incident, "INC042");
        assert_eq!(w.args.agent, "Agent 1");
    }
}
