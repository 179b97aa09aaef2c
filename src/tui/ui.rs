use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::app::TuiApp;
use super::colors::{css_color, label_color};
use crate::cards::{Card, Visibility};
use crate::nav::GridNavigator;

const HIDDEN_BG: Color = Color::DarkGray;

pub fn draw_ui(frame: &mut Frame, app: &mut TuiApp) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1), Length(1)]);
    let [title_area, grid_area, status_area, help_area] = layout.areas(frame.area());

    frame.render_widget(Span::raw(title_text(app)), title_area);

    match app.machine.deck() {
        Some(deck) => {
            let rects = card_rects(grid_area, &app.navigator());
            for (card, rect) in deck.iter().zip(rects.iter()) {
                let focused = card.id == app.focus;
                frame.render_widget(card_widget(card, focused), *rect);
            }
            app.card_rects = rects;
        }
        None => {
            draw_idle(frame, grid_area, app);
            app.card_rects.clear();
        }
    }

    frame.render_widget(
        Span::styled(app.panel.line.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        status_area,
    );
    frame.render_widget(
        Span::styled(app.help(), Style::default().add_modifier(Modifier::DIM)),
        help_area,
    );

    if let Some(alert) = &app.panel.alert {
        let area = frame.area();
        draw_alert(frame, area, &alert.message());
    }
}

fn title_text(app: &TuiApp) -> String {
    match app.machine.session() {
        Some(session) => format!(
            "Memory Match | {} | Time: {} | Pairs: {}/{}",
            app.palette,
            session.time_remaining.max(0),
            session.pairs_found,
            app.machine.deck().map_or(0, |d| d.pair_count()),
        ),
        None => format!("Memory Match | {}", app.palette),
    }
}

/// Split `area` into one cell per card, row-major.
pub fn card_rects(area: Rect, nav: &GridNavigator) -> Vec<Rect> {
    let rows = nav.rows() as u32;
    let width = nav.width() as u32;
    if rows == 0 {
        return Vec::new();
    }
    let row_areas = Layout::vertical((0..rows).map(|_| Constraint::Ratio(1, rows))).split(area);
    let mut rects = Vec::with_capacity(nav.len());
    for row in row_areas.iter() {
        let cells = Layout::horizontal((0..width).map(|_| Constraint::Ratio(1, width))).split(*row);
        rects.extend(cells.iter().copied());
    }
    rects.truncate(nav.len());
    rects
}

fn card_widget(card: &Card, focused: bool) -> Paragraph<'static> {
    let (bg, label) = match card.visibility {
        Visibility::Hidden => (HIDDEN_BG, "?".to_string()),
        Visibility::Revealed => (
            css_color(card.face.as_str()).unwrap_or(Color::Reset),
            card.face.to_string(),
        ),
        Visibility::Matched => (
            css_color(card.face.as_str()).unwrap_or(Color::Reset),
            format!("{} ✓", card.face),
        ),
    };
    let fg = label_color(bg);

    let mut block = Block::bordered().style(Style::default().bg(bg).fg(fg));
    if focused {
        block = block
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    }
    if card.is_matched() {
        block = block.title_bottom(Line::from("matched").centered());
    }

    Paragraph::new(label)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

fn draw_idle(frame: &mut Frame, area: Rect, app: &TuiApp) {
    let mut lines = vec![
        Line::from("Press l to load cards"),
        Line::from(""),
        Line::from(format!("Palette: {}", app.palette)),
    ];
    if let Some(palette) = app.palettes.get(&app.palette) {
        let swatches: Vec<Span> = palette
            .faces
            .iter()
            .map(|face| {
                let bg = css_color(face.as_str()).unwrap_or(Color::Reset);
                Span::styled("  ", Style::default().bg(bg))
            })
            .collect();
        lines.push(Line::from(swatches));
    }
    let [center] = Layout::vertical([Constraint::Length(lines.len() as u16)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), center);
}

fn draw_alert(frame: &mut Frame, area: Rect, message: &str) {
    let overlay = centered_rect(50, 30, area);
    frame.render_widget(Clear, overlay);
    let text = vec![
        Line::from(""),
        Line::from(message).bold(),
        Line::from(""),
        Line::from("press any key").dim(),
    ];
    let popup = Paragraph::new(text)
        .block(Block::bordered().border_type(BorderType::Double).title("Game over"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(popup, overlay);
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
