//! GFM table rendering.
//!
//! Rows are read structurally (`table > tr` and `table > thead|tbody|tfoot > tr`)
//! so nested tables inside cells never leak rows into the outer table.

use dom_query::NodeRef;

use crate::dom;

const SECTION_TAGS: &[&str] = &["thead", "tbody", "tfoot"];
const CELL_TAGS: &[&str] = &["td", "th"];

/// Column alignment taken from the header cell's `align` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    fn from_attr(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Self::Left,
            "center" => Self::Center,
            "right" => Self::Right,
            _ => Self::None,
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Self::None => "---",
            Self::Left => ":---",
            Self::Center => ":---:",
            Self::Right => "---:",
        }
    }
}

/// Render a `<table>` as a GFM table.
///
/// `render_cell` converts one cell's children to inline Markdown. The first
/// row (from `thead` when present) is the header; without any header markup
/// the first row is promoted. Returns an empty string for a table with no rows.
pub fn render_table<F>(table: &NodeRef, mut render_cell: F) -> String
where
    F: FnMut(&NodeRef) -> String,
{
    let rows = collect_rows(table);
    if rows.is_empty() {
        return String::new();
    }

    let mut alignments: Vec<Alignment> = Vec::new();
    let mut grid: Vec<Vec<String>> = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let mut cells = Vec::new();
        for cell in dom::element_children(row).into_iter().filter(|c| dom::is_tag(c, CELL_TAGS)) {
            let text = escape_cell(&render_cell(&cell));
            if index == 0 {
                let align = dom::node_attr(&cell, "align").map_or(Alignment::None, |a| Alignment::from_attr(&a));
                alignments.push(align);
            }
            cells.push(text);
            for _ in 1..colspan(&cell) {
                if index == 0 {
                    alignments.push(Alignment::None);
                }
                cells.push(String::new());
            }
        }
        grid.push(cells);
    }

    let columns = grid.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }
    alignments.resize(columns, Alignment::None);

    let mut output = String::new();
    for (index, row) in grid.iter_mut().enumerate() {
        row.resize(columns, String::new());
        output.push_str(&format_row(row));
        output.push('\n');
        if index == 0 {
            let separators: Vec<String> = alignments.iter().map(|a| a.separator().to_string()).collect();
            output.push_str(&format_row(&separators));
            output.push('\n');
        }
    }

    output.trim_end().to_string()
}

/// Header rows first, then body and footer rows in document order.
fn collect_rows<'a>(table: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut head = Vec::new();
    let mut rest = Vec::new();
    for child in dom::element_children(table) {
        if dom::is_tag(&child, &["tr"]) {
            rest.push(child);
        } else if dom::is_tag(&child, SECTION_TAGS) {
            let rows = dom::element_children(&child).into_iter().filter(|r| dom::is_tag(r, &["tr"]));
            if dom::is_tag(&child, &["thead"]) {
                head.extend(rows);
            } else {
                rest.extend(rows);
            }
        }
    }
    head.extend(rest);
    head
}

fn colspan(cell: &NodeRef) -> usize {
    dom::node_attr(cell, "colspan")
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&n| n > 1)
        .unwrap_or(1)
}

/// Cell text on one line with pipes escaped.
fn escape_cell(text: &str) -> String {
    dom::collapse_whitespace(text).replace('|', "\\|")
}

fn format_row(cells: &[String]) -> String {
    let mut line = String::from("|");
    for cell in cells {
        line.push(' ');
        line.push_str(cell);
        line.push_str(" |");
    }
    line
}
