use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::QuestionRecord;
use crate::session::Mode;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (Some(session), Some(question)) = (app.session(), app.current_question()) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], question, session.mode());
    render_progress(frame, chunks[1], session.current_index() + 1, session.total());
    render_question_text(frame, chunks[2], question);
    render_options(frame, chunks[3], app);
    render_controls(frame, chunks[4], question.marked, session.is_last());
}

fn render_header(frame: &mut Frame, area: Rect, question: &QuestionRecord, mode: Mode) {
    let mode_label = match mode {
        Mode::Practice => "practice",
        Mode::Exam => "exam",
        Mode::Review => "marked questions",
    };
    let mut spans = vec![
        Span::styled(
            format!("{} - {}", question.category, question.subcategory),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("  [{}]", mode_label), Style::default().fg(Color::DarkGray)),
    ];
    if question.marked {
        spans.push(Span::styled("  * marked", Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_progress(frame: &mut Frame, area: Rect, number: usize, total: usize) {
    let progress = format!("{}/{}", number, total);
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, question: &QuestionRecord) {
    let mut lines = vec![Line::from(Span::styled(
        question.question.as_str(),
        Style::default().fg(Color::White).bold(),
    ))];
    if let Some(image) = &question.image {
        lines.push(Line::from(Span::styled(
            format!("[image: {}]", image),
            Style::default().fg(Color::Yellow),
        )));
    }
    let widget = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &App) {
    let options = app.displayed_options();
    let chosen = app.chosen_option();
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 3);

    for (index, option) in options.iter().enumerate() {
        let is_highlighted = index == app.selected_option();
        let is_chosen = chosen == Some(index);
        let style = match (is_highlighted, is_chosen) {
            (true, _) => Style::default().fg(Color::Cyan).bold(),
            (false, true) => Style::default().fg(Color::Green),
            (false, false) => Style::default().fg(Color::Gray),
        };
        let marker = if is_highlighted { ">" } else { " " };
        let radio = if is_chosen { "(*)" } else { "( )" };

        for (line_number, text) in option.lines().enumerate() {
            let prefix = if line_number == 0 {
                format!(" {} {} ", marker, radio)
            } else {
                " ".repeat(7)
            };
            lines.push(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(text.to_string(), style),
            ]));
        }
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_controls(frame: &mut Frame, area: Rect, marked: bool, is_last: bool) {
    let mark = if marked { "m unmark" } else { "m mark" };
    let next = if is_last { "n finish" } else { "n next" };
    let widget = Paragraph::new(format!(
        "j/k navigate  ·  enter select  ·  {}  ·  p back  ·  {}  ·  esc menu",
        next, mark
    ))
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
