//! Standalone calculator TUI. Shares nothing with the player beyond the
//! logging setup.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame, Terminal,
};

use mymusic::calc::{CalcKey, Calculator};
use mymusic::logging;

fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Calculator Starting ===");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("Calculator shutting down");
    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let mut calc = Calculator::new();

    loop {
        calc.tick(Instant::now());

        terminal.draw(|f| render(f, &calc))?;

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let KeyCode::Char('q') | KeyCode::Char('Q') = key.code {
                break;
            }
            if let Some(calc_key) = CalcKey::from_key_event(&key) {
                calc.handle_key(calc_key, Instant::now());
            }
        }
    }

    Ok(())
}

fn render(frame: &mut Frame, calc: &Calculator) {
    let area = frame.area();
    let width = 44.min(area.width.saturating_sub(2));
    let height = 8.min(area.height.saturating_sub(2));
    let popup = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let inner_width = width.saturating_sub(4) as usize;

    let history = calc.history().unwrap_or_default();
    let display_style = if calc.has_error() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("{:>inner_width$}", history),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("{:>inner_width$}", calc.display()),
            display_style,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "0-9 . + - * / %   = Enter   Backspace   c clear",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "q quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Calculator ")
            .padding(Padding::horizontal(1))
            .border_style(Style::default().fg(Color::Green)),
    );

    frame.render_widget(widget, popup);
}
