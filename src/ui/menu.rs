use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;

const SUBCATEGORY_ROW: &str = "Choose subcategories...";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0]);
    if app.menu().is_picking_subcategories() {
        render_subcategories(frame, chunks[1], app);
    } else {
        render_categories(frame, chunks[1], app);
    }
    render_controls(frame, chunks[2], app.menu().is_picking_subcategories());
}

fn render_title(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "QUIZ TRAINER",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Pick a topic to practise, or choose single subcategories.".fg(Color::DarkGray)),
    ];
    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn row(label: &str, highlighted: bool, prefix: &str) -> Line<'static> {
    let style = if highlighted {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if highlighted { ">" } else { " " };
    Line::from(vec![
        Span::styled(format!(" {} ", marker), style),
        Span::styled(prefix.to_string(), style),
        Span::styled(label.to_string(), style),
    ])
}

fn render_categories(frame: &mut Frame, area: Rect, app: &App) {
    let menu = app.menu();
    let mut lines: Vec<Line> = menu
        .categories()
        .iter()
        .enumerate()
        .map(|(index, category)| row(category, index == menu.cursor(), ""))
        .collect();
    lines.push(Line::from(""));
    lines.push(row(
        SUBCATEGORY_ROW,
        menu.cursor() == menu.categories().len(),
        "",
    ));

    frame.render_widget(Paragraph::new(lines).block(panel("Categories")), area);
}

fn render_subcategories(frame: &mut Frame, area: Rect, app: &App) {
    let menu = app.menu();
    let lines: Vec<Line> = menu
        .subcategories()
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let checkbox = if menu.chosen().contains(name) { "[x] " } else { "[ ] " };
            row(name, index == menu.sub_cursor(), checkbox)
        })
        .collect();

    let title = format!("Subcategories ({} chosen)", menu.chosen().len());
    let scroll = menu.sub_cursor().saturating_sub(area.height.saturating_sub(3) as usize);
    let widget = Paragraph::new(lines)
        .block(panel(&title))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), Style::default().fg(Color::DarkGray)))
        .borders(Borders::ALL)
        .border_style(Color::DarkGray)
        .padding(Padding::horizontal(1))
}

fn render_controls(frame: &mut Frame, area: Rect, picking: bool) {
    let text = if picking {
        "j/k navigate  ·  space choose  ·  enter start  ·  esc back  ·  q quit"
    } else {
        "j/k navigate  ·  enter start  ·  e exam  ·  m marked questions  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
