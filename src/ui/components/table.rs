//! Generic table over any [`TableRow`]

use crate::state::{Column, TableRow, EMPTY_TABLE_TEXT};
use crate::ui::theme::Palette;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Custom cell content; receives the row and the column being drawn
pub type CellRenderer<'a, R> = &'a dyn Fn(&R, &Column) -> Span<'static>;

/// A drawn body cell, for click handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCell {
    pub area: Rect,
    pub row: usize,
    pub column: &'static str,
}

/// Rows needed for `row_count` rows: borders, header and at least one body row
pub fn table_height(row_count: usize) -> u16 {
    2 + 1 + row_count.max(1) as u16
}

/// Draw the table; returns the body cells that were drawn
#[allow(clippy::too_many_arguments)]
pub fn render_table<R: TableRow>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    columns: &[Column],
    rows: &[R],
    render_cell: Option<CellRenderer<'_, R>>,
    palette: &Palette,
    focused: bool,
) -> Vec<TableCell> {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(palette.border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || columns.is_empty() {
        return Vec::new();
    }

    let widths = Layout::horizontal(vec![Constraint::Fill(1); columns.len()]).split(inner);

    for (column, col_area) in columns.iter().zip(widths.iter()) {
        let header = Rect { height: 1, ..*col_area };
        frame.render_widget(
            Paragraph::new(Span::styled(
                column.label,
                palette.dim().add_modifier(Modifier::BOLD),
            )),
            header,
        );
    }

    if rows.is_empty() {
        let row_area = Rect {
            y: inner.y + 1,
            height: 1,
            ..inner
        };
        if inner.height > 1 {
            frame.render_widget(
                Paragraph::new(Span::styled(EMPTY_TABLE_TEXT, palette.dim()))
                    .alignment(Alignment::Center),
                row_area,
            );
        }
        return Vec::new();
    }

    let mut cells = Vec::new();
    for (row_idx, row) in rows.iter().enumerate() {
        let y = inner.y + 1 + row_idx as u16;
        if y >= inner.bottom() {
            break;
        }
        for (column, col_area) in columns.iter().zip(widths.iter()) {
            let cell_area = Rect {
                y,
                height: 1,
                ..*col_area
            };
            let content = match render_cell {
                Some(render) => render(row, column),
                None => Span::styled(
                    row.cell(column.key).unwrap_or("").to_string(),
                    palette.text(),
                ),
            };
            frame.render_widget(Paragraph::new(content), cell_area);
            cells.push(TableCell {
                area: cell_area,
                row: row_idx,
                column: column.key,
            });
        }
    }
    cells
}
