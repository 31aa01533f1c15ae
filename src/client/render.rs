// src/client/render.rs
use super::view::{ChatTurn, Role};

pub const BUSY_INDICATOR: &str = "...";

/// User turns hug the right edge; assistant text is printed as-is.
pub fn render_turn(turn: &ChatTurn, width: usize) -> String {
    let mut out = String::new();
    for line in turn.text.lines() {
        match turn.role {
            Role::User => {
                let pad = width.saturating_sub(line.chars().count());
                out.push_str(&" ".repeat(pad));
                out.push_str(line);
            }
            Role::Assistant => out.push_str(line),
        }
        out.push('\n');
    }
    if turn.text.is_empty() {
        out.push('\n');
    }
    out
}

pub fn render_transcript(turns: &[ChatTurn], busy: bool, width: usize) -> String {
    let mut out: String = turns.iter().map(|t| render_turn(t, width)).collect();
    if busy {
        out.push_str(BUSY_INDICATOR);
        out.push('\n');
    }
    out
}
