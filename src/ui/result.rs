use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::session::{Mode, Outcome, QuizReport, QuizSession};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (Some(report), Some(session)) = (app.report(), app.session()) else {
        return;
    };

    let summary_height = 6 + report.categories.len() as u16;
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(summary_height),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], report);
    render_question_breakdown(frame, chunks[2], session, report, app.result_scroll());
    render_controls(frame, chunks[3], report.can_repeat_wrong());
}

fn grade_color(outcome: &Outcome) -> Color {
    match outcome.percentage as u32 {
        90..=100 => Color::Green,
        75..=89 => Color::Cyan,
        50..=74 => Color::Yellow,
        _ => Color::Red,
    }
}

fn outcome_line(label: &str, outcome: &Outcome) -> Line<'static> {
    let verdict = if outcome.passed { "passed" } else { "not passed" };
    Line::from(Span::styled(
        format!(
            "{}{} / {}  ({:.1}%)  {}",
            label, outcome.score, outcome.total, outcome.percentage, verdict
        ),
        Style::default().fg(grade_color(outcome)).bold(),
    ))
}

fn render_score_summary(frame: &mut Frame, area: Rect, report: &QuizReport) {
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    if report.mode == Mode::Exam && report.categories.is_empty() {
        content.push(Line::from("no category had an answered question".fg(Color::DarkGray)));
    } else if report.categories.is_empty() {
        match &report.overall {
            Some(outcome) => content.push(outcome_line("", outcome)),
            None => content.push(Line::from("no questions were scored".fg(Color::DarkGray))),
        }
    } else {
        for category in &report.categories {
            content.push(outcome_line(&format!("{}: ", category.category), &category.outcome));
        }
    }
    content.push(Line::from(""));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(
    frame: &mut Frame,
    area: Rect,
    session: &QuizSession,
    report: &QuizReport,
    scroll: usize,
) {
    let lines: Vec<Line> = session
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let (symbol, color) = if report.wrong.contains(&index) {
                ("-", Color::Red)
            } else {
                ("+", Color::Green)
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_question(&question.question),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() > QUESTION_PREVIEW_LENGTH {
        let truncated: String = single_line.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        single_line
    }
}

fn render_controls(frame: &mut Frame, area: Rect, can_repeat: bool) {
    let text = if can_repeat {
        "j/k scroll  ·  r repeat wrong answers  ·  enter menu  ·  q quit"
    } else {
        "j/k scroll  ·  enter menu  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
