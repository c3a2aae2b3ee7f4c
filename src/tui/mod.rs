mod export;
mod help;
mod state;

use crate::cli::{build_config, Cli};
use crate::engine::{AnalysisService, HttpAnalysisService};
use crate::gate::{SafetyVerdict, LOW_CONFIDENCE_THRESHOLD};
use crate::model::{
    AnalysisResult, Bias, ClientConfig, LifecycleEvent, MarketState, Risk, WeeklyBias,
    PLACEHOLDER,
};
use crate::orchestrator::{self, LifecycleState, UiCommand};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Tabs, Wrap},
    Terminal,
};
use state::UiState;
use std::path::PathBuf;
use std::sync::Arc;
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: Cli) -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<LifecycleEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    let cfg = build_config(&args);
    let service: Arc<dyn AnalysisService> = Arc::new(HttpAnalysisService::new(&cfg)?);

    if args.submit_on_launch {
        if let Some(path) = args.file.clone() {
            let _ = cmd_tx.send(UiCommand::Submit(Some(path)));
        }
    }

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_args = args.clone();
    let ui_handle =
        std::thread::spawn(move || run_threaded(ui_args, cfg, event_rx, cmd_tx));

    let res = orchestrator::run_controller(service, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
pub fn run_threaded(
    args: Cli,
    cfg: ClientConfig,
    mut event_rx: UnboundedReceiver<LifecycleEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; the controller reaches it through events.
    let mut state = UiState::new(cfg);
    if let Some(path) = args.file.as_ref() {
        state.input = path.display().to_string();
    }

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        while let Ok(ev) = event_rx.try_recv() {
            let became_ready = matches!(
                ev,
                LifecycleEvent::StateChanged(LifecycleState::Ready(_))
            );
            state.apply_event(ev);
            if became_ready {
                handle_ready(&args, &mut state);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                let cmds = if k.modifiers == KeyModifiers::CONTROL && k.code == KeyCode::Char('c')
                {
                    vec![UiCommand::Quit]
                } else {
                    handle_key(&mut state, k.code)
                };
                let quit = cmds.iter().any(|c| matches!(c, UiCommand::Quit));
                for cmd in cmds {
                    let _ = cmd_tx.send(cmd);
                }
                if quit {
                    break Ok(());
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

/// Translate a key press into controller commands, applying local UI edits along the way.
fn handle_key(state: &mut UiState, code: KeyCode) -> Vec<UiCommand> {
    match code {
        KeyCode::Tab => {
            state.tab = (state.tab + 1) % 2;
            return Vec::new();
        }
        KeyCode::Esc => return vec![UiCommand::Quit],
        _ => {}
    }

    if state.tab == 1 {
        return match code {
            KeyCode::Char('q') => vec![UiCommand::Quit],
            KeyCode::Char('?') => {
                state.tab = 0;
                Vec::new()
            }
            _ => Vec::new(),
        };
    }

    if state.accepts_input() {
        match code {
            KeyCode::Char(c) => state.input.push(c),
            KeyCode::Backspace => {
                state.input.pop();
            }
            KeyCode::Enter => {
                let typed = state.input.trim();
                let selection = (!typed.is_empty()).then(|| PathBuf::from(typed));
                let mut cmds = Vec::new();
                // Failed must go back to Idle before a new file is accepted.
                if matches!(state.lifecycle, LifecycleState::Failed(_)) {
                    cmds.push(UiCommand::Reset);
                }
                if selection.is_none() {
                    state.info = "Type a file path first".into();
                }
                cmds.push(UiCommand::Submit(selection));
                return cmds;
            }
            _ => {}
        }
        return Vec::new();
    }

    match code {
        KeyCode::Char('q') => vec![UiCommand::Quit],
        KeyCode::Char('?') => {
            state.tab = 1;
            Vec::new()
        }
        KeyCode::Char('n') if state.result().is_some() => vec![UiCommand::Reset],
        KeyCode::Char('s') if state.result().is_some() => {
            match export::save_report(state, None) {
                Ok(p) => state.info = format!("Saved: {}", p.display()),
                Err(e) => state.info = format!("Save failed: {e:#}"),
            }
            Vec::new()
        }
        KeyCode::Char('y') => {
            let summary = match (state.result(), state.file_name.as_deref()) {
                (Some(r), Some(name)) => Some(crate::text_summary::build_text_summary(
                    name,
                    state.service_status.as_ref(),
                    r,
                )),
                _ => None,
            };
            if let Some(summary) = summary {
                state.info = match export::copy_to_clipboard(&summary.lines.join("\n")) {
                    Ok(()) => "✓ Copied summary to clipboard".into(),
                    Err(e) => format!("Clipboard copy failed: {e:#}"),
                };
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Post-Ready work: the `--export-json` target is written once per analysis.
fn handle_ready(args: &Cli, state: &mut UiState) {
    if let Some(path) = args.export_json.as_deref() {
        match export::save_report(state, Some(path)) {
            Ok(p) => state.info = format!("Exported JSON: {}", p.display()),
            Err(e) => state.info = format!("Export JSON failed: {e:#}"),
        }
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(area);

    let tabs = Tabs::new(vec![Line::from("Dashboard"), Line::from("Help")])
        .select(state.tab)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("GOLD SAFETY ENGINE · XAU/USD decision support"),
        )
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => draw_dashboard(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }
    draw_status(chunks[2], f, state);

    // The veto sits above every analysis card and has no dismiss key.
    if state.tab == 0 {
        if let Some(verdict) = state.verdict().filter(|v| v.no_trade) {
            draw_no_trade(chunks[1], f, &verdict);
        }
    }
}

fn draw_dashboard(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    match &state.lifecycle {
        LifecycleState::Idle | LifecycleState::Failed(_) => draw_upload(area, f, state),
        LifecycleState::Submitting(_) | LifecycleState::Awaiting => {
            draw_analyzing(area, f, state)
        }
        LifecycleState::Ready(r) => {
            let dim = state.verdict().map(|v| v.no_trade).unwrap_or(false);
            draw_analysis(area, f, state, r, dim)
        }
    }
}

fn draw_upload(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let gray = Style::default().fg(Color::Gray);
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Upload MT5 Export",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Type the path to your XAUUSD .csv file and press Enter",
            gray,
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Blue)),
            Span::raw(state.input.clone()),
            Span::styled(
                "_",
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
        ]),
    ];
    if let LifecycleState::Failed(msg) = &state.lifecycle {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("ERROR: {msg}"),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(Span::styled(
            "Enter starts a new analysis with the path above",
            gray,
        )));
    }

    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Upload"));
    f.render_widget(p, area);
}

fn draw_analyzing(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ANALYZING...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            state.file_name.clone().unwrap_or_default(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Checking market structure · Calculating volatility · Verifying bias",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Analysis"));
    f.render_widget(p, area);
}

/// Grey out colours under the veto overlay; content stays readable.
fn tone(color: Color, dim: bool) -> Color {
    if dim {
        Color::DarkGray
    } else {
        color
    }
}

fn draw_analysis(
    area: Rect,
    f: &mut ratatui::Frame,
    state: &UiState,
    r: &AnalysisResult,
    dim: bool,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(8),
            Constraint::Min(0),
        ])
        .split(area);

    let controls = Line::from(vec![
        Span::styled("FILE: ", Style::default().fg(Color::DarkGray)),
        Span::raw(state.file_name.clone().unwrap_or_else(|| PLACEHOLDER.into())),
        Span::raw("   "),
        Span::styled("n", Style::default().fg(Color::Magenta)),
        Span::styled(" Start New Analysis", Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(controls), rows[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    draw_market_card(cards[0], f, r, dim);
    draw_bias_card(cards[1], f, r, dim);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    let guidance = match r.guidance() {
        Some(g) => format!("\"{g}\""),
        None => PLACEHOLDER.to_string(),
    };
    f.render_widget(
        Paragraph::new(guidance)
            .style(Style::default().fg(tone(Color::White, dim)))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Strategy Guidance"),
            ),
        bottom[0],
    );
    draw_breakdown(bottom[1], f, r, dim);
}

fn draw_market_card(area: Rect, f: &mut ratatui::Frame, r: &AnalysisResult, dim: bool) {
    let color = match r.market_state {
        MarketState::Dangerous => Color::Red,
        MarketState::Ranging => Color::Yellow,
        MarketState::Trending => Color::Green,
        MarketState::Unknown => Color::Gray,
    };
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            r.market_state.label(),
            Style::default()
                .fg(tone(color, dim))
                .add_modifier(Modifier::BOLD),
        )),
    ];
    if r.risk == Some(Risk::High) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "HIGH RISK / VOLATILITY",
            Style::default().fg(tone(Color::LightRed, dim)),
        )));
    }
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Market State")),
        area,
    );
}

fn draw_bias_card(area: Rect, f: &mut ratatui::Frame, r: &AnalysisResult, dim: bool) {
    let bias_color = match r.bias {
        Some(Bias::Buy) => Color::Green,
        Some(Bias::Sell) => Color::Red,
        _ => Color::Gray,
    };
    let weak = r.confidence < LOW_CONFIDENCE_THRESHOLD;
    let score_color = if weak { Color::LightRed } else { Color::White };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(tone(bias_color, dim)))
        .title("Directional Bias");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let mut lines = vec![Line::from(vec![
        Span::styled(
            r.bias.map(|b| b.label()).unwrap_or(PLACEHOLDER),
            Style::default()
                .fg(tone(bias_color, dim))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Confidence ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}%", r.confidence),
            Style::default()
                .fg(tone(score_color, dim))
                .add_modifier(Modifier::BOLD),
        ),
    ])];
    if r.bias != Some(Bias::Wait) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Setup: ", Style::default().fg(Color::Gray)),
            Span::raw(
                r.details
                    .setup_1h
                    .map(|s| s.label())
                    .unwrap_or(PLACEHOLDER),
            ),
        ]));
    }
    f.render_widget(Paragraph::new(lines), parts[0]);

    let bar = if weak { Color::Red } else { Color::Blue };
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(tone(bar, dim)).bg(Color::Black))
            .percent(u16::from(r.confidence.min(AnalysisResult::MAX_CONFIDENCE)))
            .label(""),
        parts[1],
    );
}

fn draw_breakdown(area: Rect, f: &mut ratatui::Frame, r: &AnalysisResult, dim: bool) {
    let d = &r.details;
    let weekly_color = match d.weekly {
        Some(WeeklyBias::Bullish) => Color::Green,
        Some(WeeklyBias::Bearish) => Color::Red,
        _ => Color::Yellow,
    };
    let daily_color = match d.daily {
        Some(Bias::Buy) => Color::Green,
        Some(Bias::Sell) => Color::Red,
        _ => Color::Yellow,
    };
    let row = |label: &'static str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!("{label:<12}"), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(tone(color, dim))),
        ])
    };
    let lines = vec![
        row(
            "Weekly Bias",
            d.weekly.map(|w| w.label()).unwrap_or(PLACEHOLDER).into(),
            weekly_color,
        ),
        row(
            "Daily Bias",
            d.daily.map(|b| b.label()).unwrap_or(PLACEHOLDER).into(),
            daily_color,
        ),
        row(
            "1H Setup",
            d.setup_1h.map(|s| s.label()).unwrap_or(PLACEHOLDER).into(),
            Color::Gray,
        ),
        row(
            "15M Entry",
            d.entry_15m
                .clone()
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| PLACEHOLDER.into()),
            Color::Gray,
        ),
    ];
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Logic Breakdown"),
        ),
        area,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

fn draw_no_trade(area: Rect, f: &mut ratatui::Frame, verdict: &SafetyVerdict) {
    let height = 9 + verdict.reasons.len() as u16;
    let popup = centered_rect(64, height, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "NO TRADE",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            verdict.headline().unwrap_or_default(),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Strategy Violation Detected"),
    ];
    for reason in &verdict.reasons {
        lines.push(Line::from(format!("x {reason}")));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Protect your capital. Close the chart.",
        Style::default().fg(Color::Gray),
    )));

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(Color::Rgb(60, 0, 0)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Thick)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" SAFETY GATE "),
            ),
        popup,
    );
}

fn draw_status(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let state_color = match &state.lifecycle {
        LifecycleState::Ready(_) => Color::Green,
        LifecycleState::Failed(_) => Color::Red,
        LifecycleState::Submitting(_) | LifecycleState::Awaiting => Color::Yellow,
        LifecycleState::Idle => Color::Gray,
    };
    let hints = match &state.lifecycle {
        LifecycleState::Idle | LifecycleState::Failed(_) => "Enter analyze · Esc quit · Tab help",
        LifecycleState::Submitting(_) | LifecycleState::Awaiting => "q quit · Tab help",
        LifecycleState::Ready(_) => "n new · s save · y copy · q quit · Tab help",
    };
    let lines = vec![
        Line::from(vec![
            Span::styled("State: ", Style::default().fg(Color::Gray)),
            Span::styled(state.lifecycle.name(), Style::default().fg(state_color)),
            Span::raw("   "),
            Span::styled("Service: ", Style::default().fg(Color::Gray)),
            Span::raw(state.service_label()),
            Span::raw("   "),
            Span::raw(state.info.clone()),
        ]),
        Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Status")),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn ui_state() -> UiState {
        UiState::new(ClientConfig {
            base_url: "http://localhost:8000".into(),
            analyze_path: "/api/analyze".into(),
            request_timeout: None,
            user_agent: "test".into(),
        })
    }

    fn ready(body: &str) -> LifecycleState {
        LifecycleState::Ready(Box::new(serde_json::from_str(body).unwrap()))
    }

    fn render(state: &UiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 36)).unwrap();
        terminal.draw(|f| draw(f.area(), f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn typing_in_idle_edits_path_instead_of_quitting() {
        let mut s = ui_state();
        for c in "q.csv".chars() {
            assert!(handle_key(&mut s, KeyCode::Char(c)).is_empty());
        }
        assert_eq!(s.input, "q.csv");
        let cmds = handle_key(&mut s, KeyCode::Enter);
        assert!(matches!(
            cmds.as_slice(),
            [UiCommand::Submit(Some(p))] if p == &PathBuf::from("q.csv")
        ));
    }

    #[test]
    fn enter_with_blank_path_is_an_empty_selection() {
        let mut s = ui_state();
        s.input = "   ".into();
        let cmds = handle_key(&mut s, KeyCode::Enter);
        assert!(matches!(cmds.as_slice(), [UiCommand::Submit(None)]));
    }

    #[test]
    fn retry_after_failure_resets_first() {
        let mut s = ui_state();
        s.lifecycle = LifecycleState::Failed("bad csv".into());
        s.input = "XAUUSD.csv".into();
        let cmds = handle_key(&mut s, KeyCode::Enter);
        assert!(matches!(
            cmds.as_slice(),
            [UiCommand::Reset, UiCommand::Submit(Some(_))]
        ));
    }

    #[test]
    fn awaiting_ignores_everything_but_quit() {
        let mut s = ui_state();
        s.lifecycle = LifecycleState::Awaiting;
        assert!(handle_key(&mut s, KeyCode::Enter).is_empty());
        assert!(handle_key(&mut s, KeyCode::Char('n')).is_empty());
        assert!(matches!(
            handle_key(&mut s, KeyCode::Char('q')).as_slice(),
            [UiCommand::Quit]
        ));
    }

    #[test]
    fn ready_offers_reset() {
        let mut s = ui_state();
        s.lifecycle = ready(r#"{"market_state":"TRENDING","confidence":82,"bias":"BUY"}"#);
        assert!(matches!(
            handle_key(&mut s, KeyCode::Char('n')).as_slice(),
            [UiCommand::Reset]
        ));
    }

    #[test]
    fn clear_verdict_renders_without_overlay() {
        let mut s = ui_state();
        s.lifecycle = ready(r#"{"market_state":"TRENDING","confidence":82,"bias":"BUY"}"#);
        let screen = render(&s);
        assert!(screen.contains("TRENDING"));
        assert!(screen.contains("82%"));
        assert!(!screen.contains("NO TRADE"));
    }

    #[test]
    fn dangerous_verdict_renders_overlay_with_reasons() {
        let mut s = ui_state();
        s.lifecycle = ready(r#"{"market_state":"DANGEROUS","confidence":90}"#);
        let screen = render(&s);
        assert!(screen.contains("NO TRADE"));
        assert!(screen.contains("MARKET IS DANGEROUS"));
        assert!(screen.contains("Volatility exceeds safety limits"));
    }

    #[test]
    fn failed_state_shows_error_in_upload_box() {
        let mut s = ui_state();
        s.lifecycle = LifecycleState::Failed("bad csv".into());
        let screen = render(&s);
        assert!(screen.contains("ERROR: bad csv"));
    }

    #[test]
    fn popup_is_clamped_to_area() {
        let area = Rect::new(0, 0, 40, 6);
        let popup = centered_rect(64, 10, area);
        assert_eq!(popup, Rect::new(0, 0, 40, 6));
        let roomy = centered_rect(20, 4, Rect::new(10, 10, 40, 10));
        assert_eq!(roomy, Rect::new(20, 13, 20, 4));
    }
}
