use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

const OP_MAX_WIDTH: usize = 48;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "import" => Colour::Cyan,
        "del" => Colour::Red,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// Operation plus target, cut to `max` visible characters.
fn op_target(entry: &LogEntry, max: usize) -> String {
    let full = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    if full.chars().count() > max {
        let mut s: String = full.chars().take(max.saturating_sub(3)).collect();
        s.push_str("...");
        s
    } else {
        full
    }
}

/// One line per audit entry; only the operation word is coloured.
pub fn render_log(entries: &[LogEntry], colored: bool) -> String {
    let op_w = entries
        .iter()
        .map(|e| op_target(e, OP_MAX_WIDTH).chars().count())
        .max()
        .unwrap_or(10);
    let id_w = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for e in entries {
        let date = chrono::DateTime::parse_from_rfc3339(&e.date)
            .map(|dt| dt.format("%FT%T%:z").to_string())
            .unwrap_or_else(|_| e.date.clone());

        let plain = op_target(e, OP_MAX_WIDTH);
        let padding = " ".repeat(op_w.saturating_sub(plain.chars().count()));

        let shown = if colored {
            let color = color_for_operation(&e.operation);
            match plain.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(plain.as_str()).to_string(),
            }
        } else {
            plain
        };

        out.push_str(&format!(
            "{:>id_w$}: {} | {}{} => {}\n",
            e.id,
            date,
            shown,
            padding,
            e.message,
            id_w = id_w
        ));
    }
    out
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        println!("📜 Internal log:\n");
        print!("{}", render_log(&entries, true));

        Ok(())
    }
}
