use std::fmt::Write;

use crate::algorithm::Algorithm;
use crate::config::BAR_WIDTH;
use crate::step::{Role, Step};

const RESET: &str = "\x1b[0m";
const DEFAULT_BAR: &str = "\x1b[94m";
const HIGHLIGHT_LINE: &str = "\x1b[30;43m";

fn role_color(role: Role) -> &'static str {
    match role {
        Role::Pivot => "\x1b[33m",
        Role::Left | Role::I | Role::Low => "\x1b[31m",
        Role::Right | Role::J | Role::High => "\x1b[32m",
        Role::Mid => "\x1b[36m",
        Role::Swap => "\x1b[38;5;208m",
        Role::Merged => "\x1b[35m",
        Role::Found => "\x1b[1;36m",
    }
}

/// Text rendering of a single step: one bar per element, colored by role,
/// followed by the pseudocode listing with the step's line marked.
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    pub color: bool,
    pub pseudocode: bool,
    pub width: usize,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        TerminalRenderer {
            color: true,
            pseudocode: true,
            width: BAR_WIDTH,
        }
    }
}

impl TerminalRenderer {
    pub fn render(
        &self,
        algorithm: Algorithm,
        step: &Step,
        position: usize,
        total: usize,
    ) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{algorithm} | step {}/{total} | Operations: {}",
            position + 1,
            step.operations
        );

        // bars are measured from min(0, smallest value) so negatives still draw
        // widened so values at opposite ends of i64 cannot overflow
        let floor = i128::from(step.snapshot.iter().copied().min().unwrap_or(0).min(0));
        let ceiling = i128::from(step.snapshot.iter().copied().max().unwrap_or(0));
        let span = (ceiling - floor).max(1) as f64;
        let digits = step.snapshot.len().saturating_sub(1).to_string().len();

        for (index, &value) in step.snapshot.iter().enumerate() {
            let roles = step.roles_at(index);
            let length =
                (((i128::from(value) - floor) as f64 / span) * self.width as f64).round() as usize;
            let bar = "#".repeat(length.max(1));
            let tags = roles
                .iter()
                .map(|role| role.as_str())
                .collect::<Vec<_>>()
                .join(",");
            if self.color {
                let color = roles.last().map_or(DEFAULT_BAR, |&role| role_color(role));
                let _ = write!(out, "{index:>digits$} {value:>6} {color}{bar}{RESET}");
            } else {
                let _ = write!(out, "{index:>digits$} {value:>6} {bar}");
            }
            if tags.is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, " <{tags}>");
            }
        }

        if self.pseudocode {
            out.push('\n');
            for (n, line) in algorithm.pseudocode().iter().enumerate() {
                let current = n + 1 == step.marker.line();
                match (current, self.color) {
                    (true, true) => {
                        let _ = writeln!(out, "> {HIGHLIGHT_LINE}{line}{RESET}");
                    }
                    (true, false) => {
                        let _ = writeln!(out, "> {line}");
                    }
                    _ => {
                        let _ = writeln!(out, "  {line}");
                    }
                }
            }
        }
        out
    }
}
