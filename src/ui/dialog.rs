use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::app::Notice;

const DIALOG_WIDTH: u16 = 60;
const DIALOG_HEIGHT: u16 = 9;

pub fn render(frame: &mut Frame, area: Rect, notice: &Notice) {
    let (title, body, color) = match notice {
        Notice::StoreUnavailable(reason) => (
            "Question bank unavailable",
            format!("The questions could not be loaded.\n\n{}", reason),
            Color::Red,
        ),
        Notice::NoMarkedQuestions => (
            "No marked questions",
            "Mark questions during a run to repeat them here.".to_string(),
            Color::Yellow,
        ),
        Notice::Error(reason) => ("Something went wrong", reason.clone(), Color::Red),
    };

    let dialog_area = centered(area, DIALOG_WIDTH, DIALOG_HEIGHT);
    frame.render_widget(Clear, dialog_area);

    let mut lines: Vec<Line> = body.lines().map(|line| Line::from(line.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from("press any key".fg(Color::DarkGray)));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(Span::styled(format!(" {} ", title), Style::default().fg(color).bold()))
                .borders(Borders::ALL)
                .border_style(color)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, dialog_area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}
