use crate::model::{AuthorsOutput, LogEntry, LogOutput};
use console::style;

const MAX_ROWS: usize = 50;
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn log_json(output: &LogOutput) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

pub fn log_ndjson(entries: &[LogEntry]) -> anyhow::Result<()> {
    for e in entries {
        println!("{}", serde_json::to_string(e)?);
    }
    Ok(())
}

pub fn log_table(entries: &[LogEntry]) -> anyhow::Result<()> {
    if entries.is_empty() {
        println!("No change log entries in range.");
        return Ok(());
    }
    println!(
        "{:<30} {:<10} {:>7} {:>7} {:>8} {:>7}",
        style("Author").bold(),
        style("Date").bold(),
        style("Commits").bold(),
        style("Added").bold(),
        style("Modified").bold(),
        style("Deleted").bold()
    );
    println!("{}", "─".repeat(74));
    for e in entries.iter().take(MAX_ROWS) {
        println!(
            "{:<30} {:<10} {:>7} {:>7} {:>8} {:>7}",
            e.author,
            e.date.format("%Y-%m-%d"),
            e.commits,
            style(e.added).green(),
            style(e.modified).yellow(),
            style(e.deleted).red()
        );
    }
    if entries.len() > MAX_ROWS {
        println!("\n... and {} more entries", entries.len() - MAX_ROWS);
    }
    Ok(())
}

pub fn authors_json(output: &AuthorsOutput) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

pub fn authors_table(output: &AuthorsOutput) -> anyhow::Result<()> {
    println!("{}", style("Authors").bold());
    println!("{}", "─".repeat(70));
    if output.authors.is_empty() {
        println!("No activity between {} and {}.", output.since, output.until);
        return Ok(());
    }
    for a in output.authors.iter().take(MAX_ROWS) {
        println!(
            "{:<30} {:>5} commits {:>4} days  +{} ~{} -{}",
            a.author,
            style(a.commits).cyan(),
            a.active_days,
            style(a.added).green(),
            style(a.modified).yellow(),
            style(a.deleted).red()
        );
    }

    println!("\n{}", style("Commits per weekday").bold());
    for (name, n) in WEEKDAYS.iter().zip(output.commits_per_weekday) {
        println!("{name:<4} {n:>5} {}", bar(n));
    }

    println!("\n{}", style("Commits per month").bold());
    for (name, n) in MONTHS.iter().zip(output.commits_per_month) {
        println!("{name:<4} {n:>5} {}", bar(n));
    }
    Ok(())
}

fn bar(n: u32) -> String {
    "■".repeat(n.min(40) as usize)
}
