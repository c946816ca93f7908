use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::app::App;
use crate::mode::{AppMode, Pane};

/// Render the slot table
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focused_pane == Pane::Slots;
    let border_color = if focused {
        app.mode.color()
    } else {
        Color::DarkGray
    };

    let columns = app.table().columns();

    // Slot columns are marked with '*'
    let header = Row::new(columns.iter().map(|c| {
        let label = if c.slot {
            format!("{}*", c.name)
        } else {
            c.name.clone()
        };
        Cell::from(Span::styled(
            label,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    }));

    let next_slot = app.table().first_empty();
    let mut slot_index = 0;

    let rows: Vec<Row> = app
        .table()
        .rows()
        .enumerate()
        .map(|(row_idx, cells)| {
            let row_cells: Vec<Cell> = cells
                .iter()
                .enumerate()
                .map(|(col_idx, value)| {
                    let is_slot = columns.get(col_idx).is_some_and(|c| c.slot);
                    let is_next = is_slot && next_slot == Some(slot_index);
                    if is_slot {
                        slot_index += 1;
                    }

                    let mut style = if is_next {
                        Style::default().fg(Color::Green)
                    } else if is_slot {
                        Style::default()
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    if focused && app.selected == (row_idx, col_idx) {
                        style = style.add_modifier(Modifier::REVERSED);
                    }

                    let text = if app.mode == AppMode::SlotEdit && app.selected == (row_idx, col_idx) {
                        format!("{}_", app.edit_input)
                    } else if is_next && value.is_empty() {
                        "·".to_string()
                    } else {
                        value.clone()
                    };
                    Cell::from(text).style(style)
                })
                .collect();
            Row::new(row_cells)
        })
        .collect();

    let widths = vec![Constraint::Fill(1); columns.len().max(1)];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(
                " Slots {}/{} ",
                app.table().filled_count(),
                app.table().slot_count()
            ))
            .border_style(Style::default().fg(border_color)),
    );

    f.render_widget(table, area);
}
