use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use lightspeed::game::Status;
use lightspeed::score::ScoreResult;

use crate::{App, Banner};

const HORIZONTAL_MARGIN: u16 = 5;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        match self.session.status() {
            Status::Idle => render_idle(self, area, buf),
            Status::CountingDown => render_countdown(self, area, buf, bold_style),
            Status::Active => render_round(self, area, buf, bold_style, dim_style),
            Status::Ended => render_ended(self, area, buf, bold_style),
        }
    }
}

fn centered_rows(area: Rect, middle: u16) -> std::rc::Rc<[Rect]> {
    let pad = area.height.saturating_sub(middle) / 2;
    Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(pad),
            Constraint::Length(middle),
            Constraint::Min(0),
        ])
        .split(area)
}

fn render_idle(app: &App, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![
        Line::styled(
            "LIGHTSPEED",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled("(enter) start round", Style::default().add_modifier(Modifier::ITALIC)),
        Line::styled(
            "(tab) scoreboard  (esc) quit",
            Style::default().add_modifier(Modifier::ITALIC),
        ),
    ];

    if app.show_scoreboard {
        lines.push(Line::raw(""));
        lines.extend(scoreboard_lines(app));
    }

    let middle = lines.len() as u16;
    let rows = centered_rows(area, middle);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rows[1], buf);
}

fn render_countdown(app: &App, area: Rect, buf: &mut Buffer, bold_style: Style) {
    let n = app.session.countdown_remaining();

    let rows = centered_rows(area, 1);
    Paragraph::new(Span::styled(n.to_string(), bold_style.fg(Color::Yellow)))
        .alignment(Alignment::Center)
        .render(rows[1], buf);
}

fn render_round(app: &App, area: Rect, buf: &mut Buffer, bold_style: Style, dim_style: Style) {
    let rows = centered_rows(area, 5);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(rows[1]);

    let status_line = Line::from(vec![
        Span::styled(format!("{} s", app.session.seconds_remaining()), dim_style),
        Span::raw("   "),
        Span::styled(format!("hits: {}", app.session.hits()), dim_style),
    ]);
    Paragraph::new(status_line)
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    // Target word, colored per letter against what has been typed so far.
    let target: Vec<char> = app.session.current_word().chars().collect();
    let typed: Vec<char> = app.input.chars().collect();
    let match_case = app.session.config().match_case;

    let spans: Vec<Span> = target
        .iter()
        .enumerate()
        .map(|(i, &expected)| {
            let style = match typed.get(i) {
                Some(&c) if chars_match(c, expected, match_case) => {
                    bold_style.fg(Color::Green)
                }
                Some(_) => bold_style.fg(Color::Red),
                None => bold_style.add_modifier(Modifier::DIM),
            };
            Span::styled(expected.to_string(), style)
        })
        .collect();

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(app.input.clone(), dim_style))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
}

fn render_ended(app: &App, area: Rect, buf: &mut Buffer, bold_style: Style) {
    let mut lines: Vec<Line> = Vec::new();

    match app.banner {
        Some(Banner::Flawless) => {
            lines.push(Line::styled("Flawless Victory", bold_style.fg(Color::Green)))
        }
        Some(Banner::GameOver) | None => {
            lines.push(Line::styled("Game Over!", bold_style.fg(Color::Red)))
        }
    }

    if let Some(result) = &app.last_result {
        lines.push(Line::raw(""));
        lines.push(Line::raw(format!(
            "{} hits - {:.2}% of the pool",
            result.hits, result.accuracy_percent
        )));
    }

    lines.push(Line::raw(""));
    if app.show_scoreboard {
        lines.extend(scoreboard_lines(app));
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled(
        "(enter) play again  (tab) scoreboard  (esc) quit",
        Style::default().add_modifier(Modifier::ITALIC),
    ));

    let middle = lines.len() as u16;
    let rows = centered_rows(area, middle);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rows[1], buf);
}

fn chars_match(typed: char, expected: char, match_case: bool) -> bool {
    if match_case {
        typed == expected
    } else {
        typed.eq_ignore_ascii_case(&expected)
    }
}

fn scoreboard_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    match app.store.high_score() {
        None => {
            lines.push(Line::styled(
                "No games have been played yet!",
                Style::default().add_modifier(Modifier::ITALIC),
            ));
            return lines;
        }
        Some(best) => lines.push(Line::styled(
            format!("High Score: {best}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
    }

    for (rank, score) in app.store.top_scores().iter().enumerate() {
        lines.push(Line::raw(format_score_row(rank + 1, score)));
    }

    lines
}

pub fn format_score_row(rank: usize, score: &ScoreResult) -> String {
    format!(
        "{:>2}. {}  {:>3} hits  {:>6.2}%",
        rank, score.timestamp, score.hits, score.accuracy_percent
    )
}
