//! Human-readable output formatting

use bytesize::ByteSize;

use crate::container::ContainerRoster;
use crate::output::formatter::View;
use crate::session::TerminalLine;
use crate::skips::Skip;
use crate::suite::TestRoster;

pub fn format_human(view: &View<'_>) -> String {
    match view {
        View::Containers(roster) => format_containers(roster),
        View::Tests(roster) => format_tests(roster),
        View::Status(summary) => summary.to_string(),
        View::Code(code) => format_code_info(code),
        View::Snapshot(snapshot) => {
            let mut output = String::new();

            output.push_str("Transcript\n----------\n");
            output.push_str(&format_lines(snapshot.transcript.lines()));

            output.push_str("\nContainers\n----------\n");
            output.push_str(&format_containers(snapshot.containers));

            output.push_str("\nTests\n-----\n");
            output.push_str(&format_tests(snapshot.tests));

            if !snapshot.history.is_empty() {
                output.push_str("\nHistory\n-------\n");
                for (i, entry) in snapshot.history.iter().enumerate() {
                    output.push_str(&format!("  {:>3}  {}\n", i + 1, entry));
                }
            }

            output.push_str(&format!("\nCode buffer: {}\n", format_code_info(snapshot.code)));
            output.push_str(&format!("Status: {}", snapshot.status));
            output
        }
        View::Skips(skips) => format_skips(skips),
    }
}

fn format_lines(lines: &[TerminalLine]) -> String {
    let mut output = String::new();
    for line in lines {
        output.push_str(&line.text);
        output.push('\n');
    }
    output
}

fn format_containers(roster: &ContainerRoster) -> String {
    if roster.is_empty() {
        return "No containers\n".to_string();
    }
    let mut output = format!(
        "{:<6} {:<16} {:<14} {:<10} {:>6}\n",
        "ID", "NAME", "IMAGE", "STATUS", "PORT"
    );
    output.push_str(&"-".repeat(56));
    output.push('\n');
    for container in roster.list() {
        output.push_str(&format!(
            "{:<6} {:<16} {:<14} {:<10} {:>6}\n",
            truncate(&container.id, 6),
            truncate(&container.name, 16),
            truncate(&container.image, 14),
            container.status.to_string(),
            container
                .port
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string())
        ));
    }
    output
}

fn format_tests(roster: &TestRoster) -> String {
    if roster.is_empty() {
        return "No tests\n".to_string();
    }
    let mut output = String::new();
    for test in roster.list() {
        let duration = test
            .duration_ms
            .map(|ms| format!("{}ms", ms))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "  {:<28} {:<8} {:>8}\n",
            test.name,
            test.status.to_string(),
            duration
        ));
        if let Some(ref error) = test.error {
            output.push_str(&format!("      {}\n", error));
        }
    }
    output
}

fn format_code_info(code: &str) -> String {
    format!(
        "{} lines, {}",
        code.lines().count(),
        ByteSize(code.len() as u64)
    )
}

fn format_skips(skips: &[&Skip]) -> String {
    if skips.is_empty() {
        return "No skips match".to_string();
    }
    let mut output = format!(
        "{:<6} {:<12} {:>5} {:>10}  {:<12}\n",
        "ID", "SIZE", "DAYS", "PRICE", "CLASS"
    );
    output.push_str(&"-".repeat(50));
    output.push('\n');
    for skip in skips {
        output.push_str(&format!(
            "{:<6} {:<12} {:>5} {:>10}  {:<12}\n",
            truncate(&skip.id, 6),
            truncate(&skip.size, 12),
            skip.hire_period_days,
            skip.formatted_total(),
            skip.size_class().to_string()
        ));
    }
    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
