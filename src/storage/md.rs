//! Markdown export functionality

use fairway_core::Page;
use fairway_engine::engine::{AnnotatedCell, AnnotatedRow, AnnotatedTable, Tier, is_blank};
use std::io::Write;
use std::path::Path;

const CROWN: &str = "\u{1F451}";

/// Write a page to a markdown file
pub fn write_markdown(path: &Path, page: &Page) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    render_markdown(&mut file, page)
}

/// Render a page as markdown: one heading per table, then a pipe table.
pub fn render_markdown<W: Write>(w: &mut W, page: &Page) -> std::io::Result<()> {
    writeln!(w, "# {}", page.title)?;
    writeln!(w)?;
    if let Some(subtitle) = &page.subtitle {
        writeln!(w, "{}", subtitle)?;
        writeln!(w)?;
    }

    if page.tables.is_empty() {
        writeln!(w, "*No tables to show*")?;
        return Ok(());
    }

    for table in &page.tables {
        write_table(w, table)?;
    }
    Ok(())
}

fn write_table<W: Write>(w: &mut W, table: &AnnotatedTable) -> std::io::Result<()> {
    writeln!(w, "## {}", table.title)?;
    writeln!(w)?;

    let header_row = table.header.header_row;
    let Some(header) = table.rows.get(header_row) else {
        writeln!(w, "*No data*")?;
        writeln!(w)?;
        return Ok(());
    };

    // Title rows above a detected header cannot live inside a pipe table.
    for row in &table.rows[..header_row] {
        let text: Vec<&str> = row
            .cells
            .iter()
            .map(|c| c.text.as_str())
            .filter(|t| !is_blank(t))
            .collect();
        if !text.is_empty() {
            writeln!(w, "**{}**", escape_markdown(&text.join(" ")))?;
            writeln!(w)?;
        }
    }

    let width = table.width();
    write_row(w, header, width)?;
    write!(w, "|")?;
    for _ in 0..width {
        write!(w, "---|")?;
    }
    writeln!(w)?;
    for row in &table.rows[header_row + 1..] {
        write_row(w, row, width)?;
    }
    writeln!(w)?;
    Ok(())
}

fn write_row<W: Write>(w: &mut W, row: &AnnotatedRow, width: usize) -> std::io::Result<()> {
    write!(w, "|")?;
    for col in 0..width {
        let text = row
            .cells
            .get(col)
            .map(|cell| cell_markdown(row, col, cell))
            .unwrap_or_default();
        if text.is_empty() {
            write!(w, " |")?;
        } else {
            write!(w, " {} |", text)?;
        }
    }
    writeln!(w)
}

fn medal_glyph(tier: Tier) -> &'static str {
    match tier {
        Tier::Gold => "\u{1F947}",
        Tier::Silver => "\u{1F948}",
        Tier::Bronze => "\u{1F949}",
    }
}

fn cell_markdown(row: &AnnotatedRow, col: usize, cell: &AnnotatedCell) -> String {
    let mut text = escape_markdown(&cell.text);
    if text.is_empty() {
        return text;
    }
    if cell.style.total && !cell.style.header {
        text = format!("**{}**", text);
    }
    if cell.style.champion {
        text = format!("{} {}", text, CROWN);
    }
    if let Some(tier) = cell.style.matchplay {
        text = format!("{} ({})", text, tier.name());
    }
    if col == 0 {
        if let Some(medal) = row.medal {
            text = format!("{} {}", medal_glyph(medal), text);
        }
    }
    text
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}
