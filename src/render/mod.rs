//! Node tree renderer
//!
//! Pure painting: walks the compiled layout tree and maps every node onto
//! ratatui widgets inside a centered modal rect, with the owner surface
//! dimmed behind it. No state mutation happens here; interaction lives in
//! the lifecycle controller.

use crate::dialog::{FocusTarget, Session};
use crate::grid::GridView;
use crate::layout::Node;
use crate::platform::{icon_glyph, DecodedImage};
use crate::spec::{Alignment, WindowStyle};
use crate::theme::Theme;
use ratatui::layout::{Alignment as RatAlignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs};

pub type Frame<'a> = ratatui::Frame<'a>;

/// Widest content column a dialog will take
const MAX_CONTENT_WIDTH: u16 = 72;
/// Tallest image banner, in cells (two pixel rows each)
const MAX_IMAGE_ROWS: u16 = 6;
/// Most grid body rows shown at once
const MAX_GRID_ROWS: u16 = 8;

/// Paint one frame of the dialog
pub fn draw(frame: &mut Frame<'_>, session: &Session) {
    let area = frame.size();
    let theme = &session.theme;

    // The owner surface stays painted but dimmed while the modal is up.
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.overlay)),
        area,
    );

    let rect = dialog_rect(session, area);
    frame.render_widget(Clear, rect);

    let mut block = Block::default().style(Style::default().bg(theme.surface));
    if bordered(session) {
        block = block
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        if let Some(title) = title_line(session) {
            block = block.title(title);
        }
    }
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let mut cursor = inner.y;
    let mut collapse_seq = 0usize;
    render_node(
        frame,
        session,
        &session.tree,
        inner,
        &mut cursor,
        &mut collapse_seq,
    );
}

fn bordered(session: &Session) -> bool {
    session.window.style != WindowStyle::Borderless
}

fn title_line(session: &Session) -> Option<String> {
    let title = session.title.as_deref()?;
    Some(match icon_glyph(session.icon) {
        Some(glyph) => format!(" {} {} ", glyph, title),
        None => format!(" {} ", title),
    })
}

/// Centered rect sized to the tree, clamped by the terminal and any
/// min/max from the window options
fn dialog_rect(session: &Session, area: Rect) -> Rect {
    let chrome = if bordered(session) { 2 } else { 0 };
    let mut width = MAX_CONTENT_WIDTH.min(area.width.saturating_sub(4)).max(20) + chrome;
    let content_width = width.saturating_sub(chrome);
    let mut collapse_seq = 0usize;
    let mut height = node_height(session, &session.tree, content_width, &mut collapse_seq)
        .saturating_add(chrome);

    if let Some((min_w, min_h)) = session.window.min_size {
        width = width.max(min_w);
        height = height.max(min_h);
    }
    if let Some((max_w, max_h)) = session.window.max_size {
        width = width.min(max_w);
        height = height.min(max_h);
    }
    width = width.min(area.width);
    height = height.min(area.height);

    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Rows a node occupies at the given width
///
/// Walks collapsible groups in the same DFS order as the renderer so the
/// sequence numbers line up with the session's collapse state.
fn node_height(session: &Session, node: &Node, width: u16, collapse_seq: &mut usize) -> u16 {
    match node {
        Node::Stack(children) => children
            .iter()
            .map(|child| node_height(session, child, width, collapse_seq))
            .sum(),
        Node::Text { lines, .. } => wrapped_lines(lines, width),
        Node::Image => session
            .image
            .as_ref()
            .map(|image| image_rows(image, width))
            .unwrap_or(0),
        Node::Group {
            collapsible, body, ..
        } => {
            if *collapsible {
                let seq = *collapse_seq;
                *collapse_seq += 1;
                if session.is_collapsed(seq) {
                    // Collapsed expanders keep only their header row; the
                    // body still has to advance the sequence counter.
                    let mut skipped = *collapse_seq;
                    let _ = node_height(session, body, width, &mut skipped);
                    *collapse_seq = skipped;
                    return 1;
                }
                node_height(session, body, width.saturating_sub(2), collapse_seq) + 2
            } else {
                node_height(session, body, width.saturating_sub(2), collapse_seq) + 2
            }
        }
        Node::Tabs(pages) => {
            let mut tallest = 0;
            for (index, (_, page)) in pages.iter().enumerate() {
                let height = node_height(session, page, width, collapse_seq);
                if index == session.active_tab.min(pages.len() - 1) {
                    tallest = height;
                }
            }
            tallest + 1
        }
        Node::PromptRef(index) => session.widgets[*index].desired_height(width),
        Node::GridRef(index) => grid_height(&session.grids[*index]),
        Node::Separator => 1,
        Node::Countdown => 1,
        Node::ButtonRow(_) => 1,
    }
}

fn wrapped_lines(lines: &[String], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut total = 0u16;
    for line in lines {
        total += u16::try_from(textwrap::wrap(line, width).len().max(1)).unwrap_or(1);
    }
    total
}

fn grid_height(grid: &GridView) -> u16 {
    let body = u16::try_from(grid.displayed_count()).unwrap_or(u16::MAX).min(MAX_GRID_ROWS);
    let filter_bar = if grid.search_hidden() { 0 } else { 1 };
    // filter bar + header + body + counter
    filter_bar + 1 + body + 1
}

fn image_rows(image: &DecodedImage, width: u16) -> u16 {
    if image.width == 0 || image.height == 0 {
        return 0;
    }
    let cols = u32::from(width.max(1)).min(image.width);
    // Two pixel rows per cell with half blocks.
    let rows = (image.height * cols / image.width).div_ceil(2);
    u16::try_from(rows).unwrap_or(MAX_IMAGE_ROWS).min(MAX_IMAGE_ROWS).max(1)
}

fn render_node(
    frame: &mut Frame<'_>,
    session: &Session,
    node: &Node,
    bounds: Rect,
    cursor: &mut u16,
    collapse_seq: &mut usize,
) {
    let remaining = (bounds.y + bounds.height).saturating_sub(*cursor);
    if remaining == 0 {
        return;
    }

    match node {
        Node::Stack(children) => {
            for child in children {
                render_node(frame, session, child, bounds, cursor, collapse_seq);
            }
        }
        Node::Text { lines, muted } => {
            let height = wrapped_lines(lines, bounds.width).min(remaining);
            let style = if *muted {
                Style::default().fg(session.theme.text_muted)
            } else {
                Style::default().fg(session.theme.text)
            };
            let text = lines.join("\n");
            frame.render_widget(
                Paragraph::new(text)
                    .style(style)
                    .alignment(content_alignment(session.alignment))
                    .wrap(ratatui::widgets::Wrap { trim: false }),
                Rect {
                    y: *cursor,
                    height,
                    ..bounds
                },
            );
            *cursor += height;
        }
        Node::Image => {
            if let Some(image) = &session.image {
                let height = image_rows(image, bounds.width).min(remaining);
                render_image(
                    frame,
                    image,
                    Rect {
                        y: *cursor,
                        height,
                        ..bounds
                    },
                );
                *cursor += height;
            }
        }
        Node::Group {
            title,
            collapsible,
            body,
        } => {
            render_group(
                frame, session, title, *collapsible, body, bounds, cursor, collapse_seq,
            );
        }
        Node::Tabs(pages) => {
            let active = session.active_tab.min(pages.len().saturating_sub(1));
            let titles: Vec<Line> = pages
                .iter()
                .map(|(name, _)| Line::from(name.clone()))
                .collect();
            frame.render_widget(
                Tabs::new(titles)
                    .select(active)
                    .style(Style::default().fg(session.theme.text_muted))
                    .highlight_style(
                        Style::default()
                            .fg(session.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                Rect {
                    y: *cursor,
                    height: 1,
                    ..bounds
                },
            );
            *cursor += 1;

            for (index, (_, page)) in pages.iter().enumerate() {
                if index == active {
                    render_node(frame, session, page, bounds, cursor, collapse_seq);
                } else {
                    // Advance the collapse sequence past hidden pages.
                    let mut seq = *collapse_seq;
                    let _ = node_height(session, page, bounds.width, &mut seq);
                    *collapse_seq = seq;
                }
            }
        }
        Node::PromptRef(index) => {
            let widget = &session.widgets[*index];
            let height = widget.desired_height(bounds.width).min(remaining);
            widget.render(
                frame,
                Rect {
                    y: *cursor,
                    height,
                    ..bounds
                },
                &session.theme,
            );
            *cursor += height;
        }
        Node::GridRef(index) => {
            let grid = &session.grids[*index];
            let height = grid_height(grid).min(remaining);
            render_grid(
                frame,
                grid,
                &session.theme,
                Rect {
                    y: *cursor,
                    height,
                    ..bounds
                },
            );
            *cursor += height;
        }
        Node::Separator => {
            let line = "\u{2500}".repeat(usize::from(bounds.width));
            frame.render_widget(
                Paragraph::new(line).style(Style::default().fg(session.theme.border)),
                Rect {
                    y: *cursor,
                    height: 1,
                    ..bounds
                },
            );
            *cursor += 1;
        }
        Node::Countdown => {
            if let Some(remaining_secs) = session.countdown_remaining {
                frame.render_widget(
                    Paragraph::new(format!("Closes in {}s", remaining_secs))
                        .style(Style::default().fg(session.theme.error))
                        .alignment(RatAlignment::Center),
                    Rect {
                        y: *cursor,
                        height: 1,
                        ..bounds
                    },
                );
            }
            *cursor += 1;
        }
        Node::ButtonRow(indices) => {
            render_button_row(frame, session, indices, bounds, *cursor);
            *cursor += 1;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_group(
    frame: &mut Frame<'_>,
    session: &Session,
    title: &Option<String>,
    collapsible: bool,
    body: &Node,
    bounds: Rect,
    cursor: &mut u16,
    collapse_seq: &mut usize,
) {
    let theme = &session.theme;

    if collapsible {
        let seq = *collapse_seq;
        *collapse_seq += 1;
        let header = title.clone().unwrap_or_default();
        if session.is_collapsed(seq) {
            frame.render_widget(
                Paragraph::new(format!("\u{25b8} {}", header))
                    .style(Style::default().fg(theme.accent)),
                Rect {
                    y: *cursor,
                    height: 1,
                    ..bounds
                },
            );
            *cursor += 1;
            let mut skipped = *collapse_seq;
            let _ = node_height(session, body, bounds.width, &mut skipped);
            *collapse_seq = skipped;
            return;
        }

        let mut seq_for_height = *collapse_seq;
        let body_height =
            node_height(session, body, bounds.width.saturating_sub(2), &mut seq_for_height);
        let rect = Rect {
            y: *cursor,
            height: (body_height + 2).min((bounds.y + bounds.height).saturating_sub(*cursor)),
            ..bounds
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!("\u{25be} {}", header));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let mut inner_cursor = inner.y;
        render_node(frame, session, body, inner, &mut inner_cursor, collapse_seq);
        *cursor += rect.height;
        return;
    }

    let mut seq_for_height = *collapse_seq;
    let body_height =
        node_height(session, body, bounds.width.saturating_sub(2), &mut seq_for_height);
    let rect = Rect {
        y: *cursor,
        height: (body_height + 2).min((bounds.y + bounds.height).saturating_sub(*cursor)),
        ..bounds
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    if let Some(text) = title {
        block = block.title(text.clone());
    }
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let mut inner_cursor = inner.y;
    render_node(frame, session, body, inner, &mut inner_cursor, collapse_seq);
    *cursor += rect.height;
}

fn render_button_row(
    frame: &mut Frame<'_>,
    session: &Session,
    indices: &[usize],
    bounds: Rect,
    y: u16,
) {
    let theme = &session.theme;
    let mut spans = Vec::new();
    for (position, &index) in indices.iter().enumerate() {
        if position > 0 {
            spans.push(Span::raw("  "));
        }
        let button = &session.buttons[index];
        let focused = session.focus_target() == Some(FocusTarget::Button(index));

        let mut style = Style::default().fg(theme.text);
        if button.is_default {
            style = style.fg(theme.accent).add_modifier(Modifier::BOLD);
        }
        if button.is_cancel {
            style = style.fg(theme.text_muted);
        }
        if focused {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!("[ {} ]", button.text), style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(RatAlignment::Center),
        Rect {
            y,
            height: 1,
            ..bounds
        },
    );
}

fn render_grid(frame: &mut Frame<'_>, grid: &GridView, theme: &Theme, area: Rect) {
    let mut y = area.y;
    let bottom = area.y + area.height;

    if !grid.search_hidden() && y < bottom {
        let column = grid
            .columns()
            .get(grid.filter.column)
            .cloned()
            .unwrap_or_default();
        let line = Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(theme.text_muted)),
            Span::styled(column, Style::default().fg(theme.accent)),
            Span::raw(" "),
            Span::styled(grid.filter.op.label(), Style::default().fg(theme.text_muted)),
            Span::raw(" "),
            Span::styled(
                format!("\u{201c}{}\u{201d}", grid.filter.text),
                Style::default().fg(theme.text),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(line),
            Rect { y, height: 1, ..area },
        );
        y += 1;
    }

    if y < bottom {
        let header = grid.columns().join(" \u{2502} ");
        frame.render_widget(
            Paragraph::new(header).style(
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            Rect { y, height: 1, ..area },
        );
        y += 1;
    }

    let displayed = grid.displayed();
    let body_rows = usize::from(MAX_GRID_ROWS).min(displayed.len());
    // Keep the cursor in view.
    let first = grid.cursor().saturating_sub(body_rows.saturating_sub(1));
    for (visible_index, row) in displayed
        .iter()
        .enumerate()
        .skip(first)
        .take(body_rows)
    {
        if y >= bottom {
            break;
        }
        let cells: Vec<String> = (0..grid.columns().len())
            .map(|column| grid.cell_text(row, column))
            .collect();
        let mut style = Style::default().fg(theme.text);
        if grid.is_row_selected(visible_index) {
            style = style.fg(theme.accent);
        }
        if grid.has_focus() && visible_index == grid.cursor() {
            style = style.bg(theme.selection).add_modifier(Modifier::BOLD);
        }
        frame.render_widget(
            Paragraph::new(cells.join(" \u{2502} ")).style(style),
            Rect { y, height: 1, ..area },
        );
        y += 1;
    }

    if y < bottom {
        frame.render_widget(
            Paragraph::new(grid.counter_text())
                .style(Style::default().fg(theme.text_muted))
                .alignment(RatAlignment::Right),
            Rect { y, height: 1, ..area },
        );
    }
}

/// Half-block rendering: each cell carries two vertically stacked pixels
fn render_image(frame: &mut Frame<'_>, image: &DecodedImage, area: Rect) {
    if image.width == 0 || image.height == 0 || area.width == 0 {
        return;
    }
    let cols = u32::from(area.width).min(image.width);
    let pixel_rows = u32::from(area.height) * 2;

    let mut lines = Vec::new();
    for cell_row in 0..area.height {
        let mut spans = Vec::new();
        for col in 0..cols {
            let sample = |row: u32| -> (u8, u8, u8) {
                let x = col * image.width / cols;
                let y = (row * image.height / pixel_rows).min(image.height - 1);
                image.pixel(x, y)
            };
            let top = sample(u32::from(cell_row) * 2);
            let bottom = sample(u32::from(cell_row) * 2 + 1);
            spans.push(Span::styled(
                "\u{2580}",
                Style::default()
                    .fg(Color::Rgb(top.0, top.1, top.2))
                    .bg(Color::Rgb(bottom.0, bottom.1, bottom.2)),
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(
        Paragraph::new(lines).alignment(RatAlignment::Center),
        area,
    );
}

fn content_alignment(alignment: Alignment) -> RatAlignment {
    match alignment {
        Alignment::Left => RatAlignment::Left,
        Alignment::Center => RatAlignment::Center,
        Alignment::Right => RatAlignment::Right,
    }
}
