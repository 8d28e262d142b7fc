//! `dsp list` — list tickets, today's by default.

use crate::output::{OutputMode, render};
use chrono::NaiveDateTime;
use clap::Args;
use dispatch_core::{Record, Store};
use std::io::Write;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show the whole month document, not just today.
    #[arg(long)]
    pub all: bool,
}

pub fn run_list(
    args: &ListArgs,
    store: &Store,
    output: OutputMode,
    now: NaiveDateTime,
) -> anyhow::Result<()> {
    let day = now.date();
    let rows: Vec<&Record> = store
        .records()
        .filter(|record| args.all || record.logged_at.date() == day)
        .collect();

    render(output, &rows, |rows, w| {
        if rows.is_empty() {
            return writeln!(w, "no tickets logged {}", if args.all { "this month" } else { "today" });
        }
        writeln!(w, "{:>4}  {:<16} {:<12} {}", "ID", "INCIDENT", "AGENT", "LOGGED AT")?;
        for record in rows {
            writeln!(
                w,
                "{:>4}  {:<16} {:<12} {}",
                record.id,
                record.incident,
                record.agent,
                record.logged_at_text()
            )?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::ListArgs;

    #[test]
    fn list_args_default_to_today() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ListArgs,
        }
        assert!(!Wrapper::parse_from(["test"]).args.all);
        assert!(Wrapper::parse_from(["test", "--all"]).args.all);
    }
}
