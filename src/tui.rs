//! Terminal User Interface

use std::collections::BTreeMap;
use std::io;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::attack::{self, AttackRequest};
use crate::cli::Cli;
use crate::error::SolverError;
use crate::oracle::FactorOracle;
use crate::present;
use crate::types::{AttackVariant, Field, RsaParameters};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Attacks,
    Input(usize),
    Run,
}

pub struct TuiApp {
    attack_state: ListState,
    inputs: BTreeMap<Field, String>,
    result: Vec<String>,
    status_message: String,
    focused: Focus,
    should_quit: bool,
    oracle: Box<dyn FactorOracle>,
}

impl TuiApp {
    fn new(oracle: Box<dyn FactorOracle>) -> Self {
        let mut attack_state = ListState::default();
        attack_state.select(Some(0));

        Self {
            attack_state,
            inputs: BTreeMap::new(),
            result: Vec::new(),
            status_message: String::new(),
            focused: Focus::Attacks,
            should_quit: false,
            oracle,
        }
    }

    fn variant(&self) -> AttackVariant {
        let selected = self.attack_state.selected().unwrap_or(0);
        AttackVariant::ALL[selected % AttackVariant::ALL.len()]
    }

    fn fields(&self) -> &'static [Field] {
        self.variant().fields()
    }

    fn focused_field(&self) -> Option<Field> {
        match self.focused {
            Focus::Input(i) => self.fields().get(i).copied(),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('q') if self.focused_field().is_none() => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.next_field();
            }
            KeyCode::BackTab => {
                self.prev_field();
            }
            KeyCode::Enter => {
                self.handle_enter();
            }
            KeyCode::Char(c) => {
                self.handle_char(c);
            }
            KeyCode::Backspace => {
                self.handle_backspace();
            }
            KeyCode::Up if self.focused == Focus::Attacks => {
                self.select_attack(-1);
            }
            KeyCode::Down if self.focused == Focus::Attacks => {
                self.select_attack(1);
            }
            _ => {}
        }
    }

    fn next_field(&mut self) {
        let count = self.fields().len();
        self.focused = match self.focused {
            Focus::Attacks => Focus::Input(0),
            Focus::Input(i) if i + 1 < count => Focus::Input(i + 1),
            Focus::Input(_) => Focus::Run,
            Focus::Run => Focus::Attacks,
        };
    }

    fn prev_field(&mut self) {
        let count = self.fields().len();
        self.focused = match self.focused {
            Focus::Attacks => Focus::Run,
            Focus::Input(0) => Focus::Attacks,
            Focus::Input(i) => Focus::Input(i - 1),
            Focus::Run => Focus::Input(count - 1),
        };
    }

    fn select_attack(&mut self, step: isize) {
        let len = AttackVariant::ALL.len() as isize;
        let current = self.attack_state.selected().unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.attack_state.select(Some(next));
        self.result.clear();
        self.status_message.clear();
    }

    fn handle_char(&mut self, c: char) {
        if let Some(field) = self.focused_field() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                self.inputs.entry(field).or_default().push(c);
            }
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(field) = self.focused_field() {
            if let Some(value) = self.inputs.get_mut(&field) {
                value.pop();
            }
        }
    }

    fn handle_enter(&mut self) {
        match self.focused {
            Focus::Run => self.run_attack(),
            Focus::Attacks | Focus::Input(_) => self.next_field(),
        }
    }

    fn collect(&self) -> Result<RsaParameters, SolverError> {
        let mut params = RsaParameters::new();
        for &field in self.fields() {
            let raw = self.inputs.get(&field).map(String::as_str).unwrap_or("");
            params.set(field, field.parse(raw)?)?;
        }
        Ok(params)
    }

    fn run_attack(&mut self) {
        let variant = self.variant();
        let outcome = self.collect().and_then(|params| {
            let request = AttackRequest::from_parameters(variant, &params)?;
            Ok(attack::run(&request, self.oracle.as_ref())?)
        });

        match outcome {
            Ok(recovery) => {
                self.result = present::render(&recovery);
                self.status_message = format!("{} succeeded", variant.name());
            }
            Err(e) => {
                log::info!("{}: {}", variant.name(), e);
                self.result.clear();
                self.status_message = format!("Error: {}", e);
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status
            Constraint::Length(2), // Help
        ])
        .split(f.area());

    // Title
    let title = Paragraph::new("rsa_solver - RSA weak-key plaintext recovery")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    // Main content
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    // Left panel - attack list, inputs, run button
    let fields = app.fields();
    let mut constraints = vec![Constraint::Length(AttackVariant::ALL.len() as u16 + 2)];
    constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Min(0));
    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(main_chunks[0]);

    let focus_style = |focused: bool| {
        if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    // Attack list
    let attacks: Vec<ListItem> = AttackVariant::ALL
        .iter()
        .map(|v| ListItem::new(format!("{}/ {}", v.index(), v.name())))
        .collect();
    let attack_list = List::new(attacks)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Attack (↑↓ to select)")
                .border_style(focus_style(app.focused == Focus::Attacks)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");
    f.render_stateful_widget(attack_list, left_chunks[0], &mut app.attack_state);

    // Field inputs
    for (i, field) in fields.iter().enumerate() {
        let value = app.inputs.get(field).map(String::as_str).unwrap_or("");
        let input = Paragraph::new(value).block(
            Block::default()
                .borders(Borders::ALL)
                .title(field.label())
                .border_style(focus_style(app.focused == Focus::Input(i))),
        );
        f.render_widget(input, left_chunks[i + 1]);
    }

    // Run button
    let run_style = if app.focused == Focus::Run {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::Green)
    };
    let run_btn = Paragraph::new("Run attack")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(run_style));
    f.render_widget(run_btn, left_chunks[fields.len() + 1]);

    // Right panel - result
    let output = Paragraph::new(app.result.join("\n"))
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).title("Recovered plaintext"))
        .wrap(Wrap { trim: false });
    f.render_widget(output, main_chunks[1]);

    // Status bar
    let status_color = if app.status_message.starts_with("Error") {
        Color::Red
    } else {
        Color::Green
    };
    let status = Paragraph::new(app.status_message.as_str())
        .style(Style::default().fg(status_color))
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[2]);

    // Help bar
    let help_text = "Tab: Next field | Shift+Tab: Prev | Enter: Next / Run | ↑↓: Select attack | Esc: Quit";
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);
}

pub fn run_tui(cli: &Cli) -> anyhow::Result<()> {
    let oracle = cli.oracle().map_err(SolverError::from)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = TuiApp::new(oracle);

    // Main loop
    loop {
        terminal.draw(|f| ui(f, &mut app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
