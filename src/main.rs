use std::io;
use std::sync::mpsc;
use std::time::Instant;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use playoff_scenarios::config::AppConfig;
use playoff_scenarios::geometry::{
    CALLOUT_DEBOUNCE, Debounce, TOOLTIP_PAD, place_callout, place_tooltip,
};
use playoff_scenarios::i18n::{self, Key, Lang, t};
use playoff_scenarios::layout::{AppLayout, Control, Nav, PanelKind, option_label, wrapped_height};
use playoff_scenarios::loader::{self, DataSource};
use playoff_scenarios::model::Bucket;
use playoff_scenarios::prefs;
use playoff_scenarios::state::{AppState, Delta, LoadState, TooltipLine, apply_delta};
use playoff_scenarios::theme::{bucket_color, cell_appearance};

const CALLOUT_WIDTH: u16 = 32;

struct PlacedCallout {
    area: Rect,
    text: Key,
}

struct App {
    state: AppState,
    config: AppConfig,
    layout: AppLayout,
    callouts: Vec<PlacedCallout>,
    callouts_dirty: bool,
    resize: Debounce,
    should_quit: bool,
}

impl App {
    fn new(config: AppConfig, state: AppState) -> Self {
        Self {
            state,
            config,
            layout: AppLayout::default(),
            callouts: Vec::new(),
            callouts_dirty: false,
            resize: Debounce::new(CALLOUT_DEBOUNCE),
            should_quit: false,
        }
    }

    fn relayout(&mut self, area: Rect) {
        self.layout = AppLayout::compute(area, &self.state);
    }

    fn place_callouts(&mut self) {
        self.callouts.clear();
        let Some(session) = self.state.session.as_ref() else {
            return;
        };
        let root = self.layout.views.root;
        for callout in &session.callouts {
            let Some(rect) = session
                .views
                .callout_cell(&callout.id)
                .and_then(|cell| self.layout.views.cell_rect(cell.id))
            else {
                continue;
            };
            let text = t(self.state.lang, callout.text);
            let height = wrapped_height(text, CALLOUT_WIDTH - 2) + 2;
            let placed =
                place_callout(root, rect, callout.dx, callout.dy, CALLOUT_WIDTH, height);
            if let Some(area) = placed {
                self.callouts.push(PlacedCallout {
                    area,
                    text: callout.text,
                });
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('i') | KeyCode::Char('I') => {
                self.state.howto_overlay = !self.state.howto_overlay
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                self.state.show_callouts = !self.state.show_callouts
            }
            KeyCode::Char('g') | KeyCode::Char('G') => self.switch_lang(self.state.lang.next()),
            KeyCode::Char('c') | KeyCode::Char('C') => self.state.clear_filters(),
            KeyCode::Char(c @ '1'..='9') => {
                let slot = (c as u8 - b'1') as usize;
                self.state.cycle_filter(slot);
            }
            KeyCode::Char('h') | KeyCode::Left => self.move_cursor(Nav::Left),
            KeyCode::Char('l') | KeyCode::Right => self.move_cursor(Nav::Right),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(Nav::Up),
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(Nav::Down),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(cell) = self.state.cursor {
                    self.state.click_cell(cell);
                }
            }
            KeyCode::Esc => {
                if self.state.help_overlay || self.state.howto_overlay {
                    self.state.help_overlay = false;
                    self.state.howto_overlay = false;
                } else {
                    self.state.leave();
                }
            }
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if let Some(cell) = self.layout.cell_at(x, y) {
                    self.state.hover_cell(cell, Some((x, y)));
                } else if self.state.pointer.is_some() {
                    self.state.leave();
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(control) = self.layout.control_at(x, y) {
                    self.apply_control(control);
                } else if let Some(cell) = self.layout.cell_at(x, y) {
                    self.state.click_cell(cell);
                }
            }
            _ => {}
        }
    }

    fn apply_control(&mut self, control: Control) {
        match control {
            Control::Filter { slot, value } => {
                self.state.set_filter(slot, value);
            }
            Control::Clear => self.state.clear_filters(),
            Control::Lang(lang) => self.switch_lang(lang),
        }
    }

    fn move_cursor(&mut self, nav: Nav) {
        if let Some(next) = self.layout.views.neighbor(self.state.cursor, nav) {
            self.state.hover_cell(next, None);
        }
    }

    fn switch_lang(&mut self, lang: Lang) {
        if !self.state.set_lang(lang) {
            return;
        }
        if let Some(path) = self.config.prefs_path.as_deref()
            && let Err(err) = prefs::save_lang(path, lang)
        {
            self.state
                .push_log(format!("[WARN] Language preference not saved: {err:#}"));
        }
        self.state.push_log(format!("[INFO] Language: {}", lang.code()));
        self.callouts_dirty = true;
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env();
    let saved = config.prefs_path.as_deref().and_then(prefs::load_lang);
    let locale = i18n::system_locale();
    let lang = config.initial_lang(saved, locale.as_deref());
    let source = DataSource::parse(&config.source);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    loader::spawn_loader(source.clone(), config.http_timeout, tx);

    let mut app = App::new(config, AppState::new(source.describe(), lang));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    if let LoadState::Failed(err) = &app.state.load {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    loop {
        while let Ok(delta) = rx.try_recv() {
            if matches!(delta, Delta::DataLoaded(_)) {
                app.callouts_dirty = true;
            }
            apply_delta(&mut app.state, delta);
        }

        let area = terminal.size()?;
        app.relayout(area);
        if app.resize.fire(Instant::now()) || app.callouts_dirty {
            app.place_callouts();
            app.callouts_dirty = false;
        }

        terminal.draw(|f| ui(f, app))?;

        if event::poll(app.config.tick)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::Mouse(mouse) => app.on_mouse(mouse),
                Event::Resize(_, _) => app.resize.trigger(Instant::now()),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let state = &app.state;
    let layout = &app.layout;

    render_header(frame, layout, state);

    match &state.load {
        LoadState::Loading { source } => {
            frame.render_widget(Block::default().borders(Borders::ALL), layout.screen.filters);
            let text = format!("{} ({source})", state.t(Key::Loading));
            let loading = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
            frame.render_widget(loading, layout.screen.views);
        }
        LoadState::Failed(err) => {
            frame.render_widget(Block::default().borders(Borders::ALL), layout.screen.filters);
            let text = format!("{}: {err}", state.t(Key::LoadError));
            let failed = Paragraph::new(text)
                .style(Style::default().fg(Color::LightRed))
                .wrap(Wrap { trim: true });
            frame.render_widget(failed, layout.screen.views);
        }
        LoadState::Ready => {
            render_filter_bar(frame, layout, state);
            render_views(frame, layout, state);
            render_legend(frame, layout.screen.legend, state);
            if state.show_callouts {
                render_callouts(frame, app);
            }
            render_tooltip(frame, layout, state);
        }
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, layout.screen.console);

    let footer =
        Paragraph::new(state.t(Key::FooterKeys)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, layout.screen.footer);

    if state.howto_overlay {
        render_howto_overlay(frame, frame.size(), state);
    }
    if state.help_overlay {
        render_help_overlay(frame, frame.size(), state);
    }
}

fn draw_text<'a>(frame: &mut Frame, area: Rect, text: impl Into<Line<'a>>, style: Style) {
    let area = area.intersection(frame.size());
    if area.width == 0 || area.height == 0 {
        return;
    }
    frame.render_widget(Paragraph::new(text.into()).style(style), area);
}

fn render_header(frame: &mut Frame, layout: &AppLayout, state: &AppState) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            state.t(Key::Title),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(state.t(Key::Subtitle)),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, layout.screen.header);

    for (rect, lang) in &layout.lang_buttons {
        let style = if *lang == state.lang {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(Clear, rect.intersection(frame.size()));
        draw_text(frame, *rect, format!(" {} ", lang.button_label()), style);
    }
}

fn render_filter_bar(frame: &mut Frame, layout: &AppLayout, state: &AppState) {
    let Some(session) = state.session.as_ref() else {
        return;
    };
    let matched = session.engine.matched_scenarios(&session.store);
    let title = format!(" {matched}/{} {} ", session.store.len(), state.t(Key::Matching));
    frame.render_widget(
        Block::default().title(title).borders(Borders::ALL),
        layout.screen.filters,
    );

    let Some(bar) = layout.filter_bar.as_ref() else {
        return;
    };
    draw_text(
        frame,
        bar.heading,
        state.t(Key::WhatIf),
        Style::default().add_modifier(Modifier::BOLD),
    );

    let filter = session.engine.filter();
    for slot in &bar.slots {
        let Some(match_id) = filter.slot_id(slot.slot) else {
            continue;
        };
        let current = filter.get(match_id);
        draw_text(frame, slot.label, session.store.match_label(match_id), Style::default());
        for (rect, value) in &slot.buttons {
            let style = if *value == current {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            draw_text(frame, *rect, format!("[{}]", option_label(*value)), style);
        }
    }

    if let Some(rect) = bar.clear {
        let style = if filter.is_unconstrained() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
        draw_text(frame, rect, format!("[{}]", state.t(Key::Clear)), style);
    }
}

fn render_views(frame: &mut Frame, layout: &AppLayout, state: &AppState) {
    let Some(session) = state.session.as_ref() else {
        return;
    };
    let views = &session.views;

    for panel in &layout.views.panels {
        let title = match panel.kind {
            PanelKind::Bars(idx) => views.bars.get(idx).map(|v| v.team.clone()),
            PanelKind::Grid => views.grid.as_ref().map(|g| g.team.clone()),
        }
        .unwrap_or_default();
        frame.render_widget(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL),
            panel.area.intersection(frame.size()),
        );

        let label_style = Style::default().add_modifier(Modifier::BOLD);
        for (rect, outcome) in &panel.row_labels {
            draw_text(frame, *rect, outcome.label(), label_style);
        }
        if let Some(grid) = views.grid.as_ref() {
            for (rect, idx) in &panel.block_titles {
                let title = grid.blocks.get(*idx).map(|b| b.title.as_str()).unwrap_or("");
                draw_text(frame, *rect, title, Style::default().fg(Color::DarkGray));
            }
        }
    }

    for cell in views.cells() {
        let Some(rect) = layout.views.cell_rect(cell.id) else {
            continue;
        };
        let (glyph, style) = cell_appearance(cell, session.engine.flags(cell.id));
        draw_text(frame, rect, glyph, style);
    }

    if layout.views.truncated {
        let root = layout.views.root;
        if root.height > 0 {
            let line = Rect::new(root.x, root.bottom() - 1, root.width, 1);
            draw_text(frame, line, state.t(Key::Device), Style::default().fg(Color::DarkGray));
        }
    }
}

fn render_legend(frame: &mut Frame, area: Rect, state: &AppState) {
    let swatch = |color: Color, text: &'static str| {
        Span::styled(text, Style::default().fg(Color::Black).bg(color))
    };
    let line = Line::from(vec![
        swatch(bucket_color(Bucket::Green), "  "),
        Span::raw(format!(" {}   ", state.t(Key::LegendQualified))),
        swatch(bucket_color(Bucket::Yellow), " 3"),
        Span::raw(format!(
            " {} ({})   ",
            state.t(Key::LegendTiebreak),
            state.t(Key::LegendTieNote)
        )),
        swatch(bucket_color(Bucket::Red), "  "),
        Span::raw(format!(" {}", state.t(Key::LegendEliminated))),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_callouts(frame: &mut Frame, app: &App) {
    for callout in &app.callouts {
        let area = callout.area.intersection(frame.size());
        if area.width == 0 || area.height == 0 {
            continue;
        }
        frame.render_widget(Clear, area);
        let bubble = Paragraph::new(t(app.state.lang, callout.text))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(bubble, area);
    }
}

fn tooltip_text(lines: &[TooltipLine], rule_width: u16) -> Vec<Line<'static>> {
    lines
        .iter()
        .map(|line| match line {
            TooltipLine::Result { label, outcome } => Line::from(format!(
                "{label}: {}",
                outcome.map(|o| o.label()).unwrap_or("-")
            )),
            TooltipLine::Rule => Line::from("─".repeat(usize::from(rule_width))),
            TooltipLine::Group { heading, teams } => Line::from(vec![
                Span::styled(
                    format!("{heading}: "),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(teams.clone()),
            ]),
        })
        .collect()
}

fn render_tooltip(frame: &mut Frame, layout: &AppLayout, state: &AppState) {
    let Some(lines) = state.tooltip_lines() else {
        return;
    };
    let anchor = state.pointer.or_else(|| {
        state
            .cursor
            .and_then(|cell| layout.views.cell_rect(cell))
            .map(|r| (r.x + r.width, r.y))
    });
    let Some(anchor) = anchor else {
        return;
    };

    let measured = tooltip_text(&lines, 0);
    let content_w = measured
        .iter()
        .map(|line| line.width().min(usize::from(u16::MAX)) as u16)
        .max()
        .unwrap_or(0);
    let text = tooltip_text(&lines, content_w);
    let width = content_w + 2;
    let height = text.len() as u16 + 2;

    let area = place_tooltip(anchor, width, height, frame.size(), TOOLTIP_PAD);
    if area.width == 0 || area.height == 0 {
        return;
    }
    frame.render_widget(Clear, area);
    let tooltip = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(tooltip, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return String::new();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_howto_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(70, 60, area);
    frame.render_widget(Clear, popup_area);

    let lang = state.lang;
    let text = [
        t(lang, Key::Howto1),
        "",
        t(lang, Key::Howto2),
        "",
        t(lang, Key::Howto3),
        "",
        t(lang, Key::NoteGigo),
        "",
        t(lang, Key::LegendTieNote),
    ]
    .join("\n");

    let howto = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(t(lang, Key::Howto)).borders(Borders::ALL));
    frame.render_widget(howto, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Filters:",
        "  1-4          Cycle match filter (? / W / D / L)",
        "  c            Clear all filters",
        "  Click        Filter buttons, Clear, language",
        "",
        "Cells:",
        "  ←↑↓→ / hjkl  Move cursor (highlights scenario)",
        "  Enter/Space  Apply cursor scenario as filter",
        "  Mouse        Hover highlights, click applies",
        "  Esc          Leave cell / close overlay",
        "",
        "Global:",
        "  g            Cycle language",
        "  o            Toggle callouts",
        "  i            How to read",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title(state.t(Key::Help)).borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
