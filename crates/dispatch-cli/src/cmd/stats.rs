//! `dsp stats` — per-agent tallies for today and this month.

use crate::output::{OutputMode, render};
use chrono::NaiveDateTime;
use clap::Args;
use dispatch_core::{Store, tally};
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Args, Debug)]
pub struct StatsArgs {}

pub fn run_stats(
    _args: &StatsArgs,
    store: &Store,
    output: OutputMode,
    now: NaiveDateTime,
) -> anyhow::Result<()> {
    let tallies = tally(store.records(), now);

    render(output, &tallies, |tallies, w| {
        write_window(w, "Today", &tallies.today)?;
        writeln!(w)?;
        write_window(w, "This month", &tallies.month)
    })
}

fn write_window(
    w: &mut dyn Write,
    heading: &str,
    counts: &BTreeMap<String, u64>,
) -> std::io::Result<()> {
    writeln!(w, "{heading}")?;
    if counts.is_empty() {
        return writeln!(w, "  (no tickets)");
    }
    for (agent, count) in counts {
        writeln!(w, "  {agent}: {count}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_window;
    use std::collections::BTreeMap;

    #[test]
    fn window_lists_agents_in_order() {
        let mut counts = BTreeMap::new();
        counts.insert("Agent 2".to_string(), 1_u64);
        counts.insert("Agent 1".to_string(), 2_u64);

        let mut buffer = Vec::new();
        write_window(&mut buffer, "Today", &counts).expect("write");
        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(text, "Today\n  Agent 1: 2\n  Agent 2: 1\n");
    }

    #[test]
    fn empty_window_renders_placeholder() {
        let mut buffer = Vec::new();
        write_window(&mut buffer, "This month", &BTreeMap::new()).expect("write");
        assert!(String::from_utf8(buffer).expect("utf8").contains("(no tickets)"));
    }
}
