use crate::gate::LOW_CONFIDENCE_THRESHOLD;
use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key_line(key: &'static str, pad: usize, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(format!("{}{}", " ".repeat(pad), what)),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Upload box (idle or after a failure):"),
        key_line("type", 8, "Path to the MT5 XAUUSD .csv export"),
        key_line("Enter", 7, "Send the file for analysis"),
        key_line("Esc", 9, "Quit"),
        Line::from(""),
        Line::from("Dashboard:"),
        key_line("n", 11, "Start new analysis"),
        key_line("s", 11, "Save JSON report"),
        key_line("y", 11, "Copy summary to clipboard"),
        key_line("q", 11, "Quit"),
        Line::from(""),
        Line::from("Anywhere:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("tab", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("?", Style::default().fg(Color::Magenta)),
            Span::raw("     Switch to/from this help"),
        ]),
        key_line("Ctrl-C", 6, "Quit"),
        Line::from(""),
        Line::from("Safety gate:"),
        Line::from(format!(
            "  NO TRADE is forced when the market is DANGEROUS or confidence is below {}%.",
            LOW_CONFIDENCE_THRESHOLD
        )),
        Line::from("  The overlay cannot be dismissed; start a new analysis instead."),
        Line::from("  A request in flight cannot be cancelled; wait for it to finish."),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
