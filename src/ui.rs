use crate::config::Config;
use crate::dnd::{Grab, HitMap, PointerDrag};
use crate::form::FormField;
use crate::input::FieldValue;
use crate::layout::{centered_rect, section_grid};
use crate::model::{Board, Note};
use crate::session::Session;
use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::block::{Position, Title};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::time::Duration;
use tracing::debug;

/// Rows taken by one note card, borders included.
const CARD_HEIGHT: u16 = 5;

pub fn run(session: Session, config: &Config) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(session, config.narrow_width);
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App {
    session: Session,
    narrow_width: u16,
    form_focus: FormField,
    form_input: FieldValue,
    selected_section: usize,
    selected_note: usize,
    scroll_offsets: Vec<usize>,
    status: String,
    mode: Mode,
    hits: HitMap,
    pointer: PointerDrag,
}

enum Mode {
    Normal,
    Adding { section_id: String, field: FieldValue },
    Editing { note_id: String, field: FieldValue },
    ConfirmDelete { note_id: String },
    Grabbing(Grab),
}

enum EditorAction {
    Add(String),
    Edit(String),
}

impl App {
    fn new(session: Session, narrow_width: u16) -> Self {
        let mut app = App {
            session,
            narrow_width,
            form_focus: FormField::Name,
            form_input: FieldValue::default(),
            selected_section: 0,
            selected_note: 0,
            scroll_offsets: Vec::new(),
            status: "Describe the board (Tab/Shift-Tab move, Enter create, Esc quit)".into(),
            mode: Mode::Normal,
            hits: HitMap::default(),
            pointer: PointerDrag::default(),
        };
        app.load_form_input();
        app
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(Duration::from_millis(200))? {
                let quit = match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        false
                    }
                    _ => false,
                };
                if quit {
                    break;
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        if self.session.board().is_some() {
            self.handle_board_key(key)
        } else {
            self.handle_form_key(key)
        }
    }

    // Board creation step

    fn handle_form_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::Down => self.focus_form_field(1),
            KeyCode::BackTab | KeyCode::Up => self.focus_form_field(-1),
            KeyCode::Left => self.form_input.move_left(),
            KeyCode::Right => self.form_input.move_right(),
            KeyCode::Backspace => {
                self.form_input.backspace();
                self.sync_form_field();
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    self.form_input.insert_char(c);
                    self.sync_form_field();
                }
            }
            _ => {}
        }
        false
    }

    fn form_fields(&self) -> Vec<FormField> {
        let titles = self
            .session
            .form()
            .map(|f| f.section_titles().len())
            .unwrap_or(0);
        let mut fields = vec![
            FormField::Name,
            FormField::Description,
            FormField::SectionCount,
        ];
        fields.extend((0..titles).map(FormField::SectionTitle));
        fields
    }

    fn focus_form_field(&mut self, delta: isize) {
        let fields = self.form_fields();
        let current = fields
            .iter()
            .position(|f| *f == self.form_focus)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(fields.len() as isize) as usize;
        self.form_focus = fields[next];
        self.load_form_input();
    }

    fn load_form_input(&mut self) {
        let value = match self.session.form() {
            Some(form) => match self.form_focus {
                FormField::Name => form.name().to_string(),
                FormField::Description => form.description().to_string(),
                FormField::SectionCount => form.section_count().to_string(),
                FormField::SectionTitle(idx) => form
                    .section_titles()
                    .get(idx)
                    .cloned()
                    .unwrap_or_default(),
            },
            None => String::new(),
        };
        self.form_input = FieldValue::new(&value);
    }

    fn sync_form_field(&mut self) {
        let value = self.form_input.value.clone();
        let focus = self.form_focus;
        if let Some(form) = self.session.form_mut() {
            match focus {
                FormField::Name => form.set_name(value),
                FormField::Description => form.set_description(value),
                FormField::SectionCount => form.set_section_count(value),
                FormField::SectionTitle(idx) => form.set_section_title(idx, value),
            }
        }
    }

    fn submit_form(&mut self) {
        match self.session.submit_form() {
            Ok(()) => {
                let name = self
                    .session
                    .board()
                    .map(|b| b.name.clone())
                    .unwrap_or_default();
                self.selected_section = 0;
                self.selected_note = 0;
                self.scroll_offsets.clear();
                self.mode = Mode::Normal;
                self.status = format!("Created board {}", name);
            }
            Err(errors) => {
                self.status = format!("{} field(s) need attention", errors.len());
                if let Some(first) = errors.keys().next() {
                    self.form_focus = *first;
                    self.load_form_input();
                }
            }
        }
    }

    // Board view

    fn handle_board_key(&mut self, key: KeyEvent) -> bool {
        match self.mode {
            Mode::Normal => {
                let quit = self.handle_normal_key(key);
                if !matches!(self.mode, Mode::Normal) {
                    self.pointer.cancel();
                }
                return quit;
            }
            Mode::Adding { .. } | Mode::Editing { .. } => self.handle_editor_key(key),
            Mode::ConfirmDelete { .. } => self.handle_confirm_key(key),
            Mode::Grabbing(_) => self.handle_grab_key(key),
        }
        false
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Left | KeyCode::Char('h') => self.prev_section(),
            KeyCode::Right | KeyCode::Char('l') => self.next_section(),
            KeyCode::Up | KeyCode::Char('k') => self.prev_note(),
            KeyCode::Down | KeyCode::Char('j') => self.next_note(),
            KeyCode::Char('a') | KeyCode::Char('n') => {
                if let Some(section_id) = self.current_section_id() {
                    self.mode = Mode::Adding {
                        section_id,
                        field: FieldValue::new(""),
                    };
                    self.status = "New note (Enter add, Alt-Enter newline, Esc cancel)".into();
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => match self.current_note() {
                Some(note) => {
                    let note_id = note.id.clone();
                    let field = FieldValue::new(&note.content);
                    self.mode = Mode::Editing { note_id, field };
                    self.status = "Editing note (Enter save, Alt-Enter newline, Esc cancel)".into();
                }
                None => self.status = "No note selected to edit".into(),
            },
            KeyCode::Char('v') | KeyCode::Char('+') => match self.current_note_id() {
                Some(id) => {
                    self.session.vote_note(&id);
                    self.select_note(&id);
                    let votes = self.session.notes().get(&id).map(|n| n.votes).unwrap_or(0);
                    self.status = format!("Voted ({} total)", votes);
                }
                None => self.status = "No note selected to vote on".into(),
            },
            KeyCode::Char('d') | KeyCode::Delete => match self.current_note_id() {
                Some(note_id) => {
                    self.mode = Mode::ConfirmDelete { note_id };
                    self.status = "Delete note? (y to confirm, n/Esc to cancel)".into();
                }
                None => self.status = "No note selected to delete".into(),
            },
            KeyCode::Char('g') | KeyCode::Char(' ') => match self.current_note_id() {
                Some(id) => {
                    self.mode = Mode::Grabbing(Grab::new(id, self.selected_section));
                    self.status =
                        "Grabbed note (Left/Right choose section, Enter drop, Esc cancel)".into();
                }
                None => self.status = "No note selected to move".into(),
            },
            KeyCode::Char('r') => {
                self.session.reset();
                self.mode = Mode::Normal;
                self.pointer.cancel();
                self.form_focus = FormField::Name;
                self.load_form_input();
                self.status = "Board cleared. Describe a new board".into();
            }
            _ => {}
        }
        false
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let mut mode = std::mem::replace(&mut self.mode, Mode::Normal);
        let close = match &mut mode {
            Mode::Adding { section_id, field } => {
                let action = EditorAction::Add(section_id.clone());
                self.process_editor_key(action, field, key)
            }
            Mode::Editing { note_id, field } => {
                let action = EditorAction::Edit(note_id.clone());
                self.process_editor_key(action, field, key)
            }
            _ => true,
        };
        self.mode = if close { Mode::Normal } else { mode };
    }

    fn process_editor_key(
        &mut self,
        action: EditorAction,
        field: &mut FieldValue,
        key: KeyEvent,
    ) -> bool {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => {
                self.status = "Canceled".into();
                return true;
            }
            KeyCode::Enter if alt => field.insert_char('\n'),
            KeyCode::Char('j') if control => field.insert_char('\n'),
            KeyCode::Enter => return self.commit_editor(action, field),
            KeyCode::Left => field.move_left(),
            KeyCode::Right => field.move_right(),
            KeyCode::Up => field.move_up(),
            KeyCode::Down => field.move_down(),
            KeyCode::Backspace => field.backspace(),
            KeyCode::Char(c) if !control && !alt => field.insert_char(c),
            _ => {}
        }
        false
    }

    fn commit_editor(&mut self, action: EditorAction, field: &FieldValue) -> bool {
        match action {
            EditorAction::Add(section_id) => {
                match self.session.add_note(&section_id, &field.value) {
                    Some(id) => {
                        self.select_note(&id);
                        self.status = format!("Added note to {}", self.section_title(&section_id));
                        true
                    }
                    None => {
                        self.status = "Note content is required".into();
                        false
                    }
                }
            }
            EditorAction::Edit(note_id) => {
                if field.value.trim().is_empty() {
                    self.status = "Empty edit discarded".into();
                } else if self.session.edit_note(&note_id, &field.value) {
                    self.status = "Updated note".into();
                } else {
                    self.status = "Note no longer exists".into();
                }
                true
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let note_id = match &self.mode {
            Mode::ConfirmDelete { note_id } => note_id.clone(),
            _ => return,
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if self.session.delete_note(&note_id) {
                    self.status = "Deleted note".into();
                } else {
                    self.status = "Note no longer exists".into();
                }
                self.ensure_selection_bounds();
                self.mode = Mode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.status = "Delete canceled".into();
                self.mode = Mode::Normal;
            }
            _ => {}
        }
    }

    fn handle_grab_key(&mut self, key: KeyEvent) {
        let mut grab = match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Grabbing(grab) => grab,
            other => {
                self.mode = other;
                return;
            }
        };
        let section_ids = self.section_ids();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => grab.shift(-1, section_ids.len()),
            KeyCode::Right | KeyCode::Char('l') => grab.shift(1, section_ids.len()),
            KeyCode::Enter | KeyCode::Char('g') | KeyCode::Char(' ') => {
                if grab.drop_on(&section_ids, &mut self.session) {
                    self.select_note(&grab.item_id);
                    let title = section_ids
                        .get(grab.target)
                        .map(|id| self.section_title(id))
                        .unwrap_or_default();
                    self.status = format!("Moved to {}", title);
                } else {
                    self.status = "Nothing moved".into();
                }
                return;
            }
            KeyCode::Esc => {
                self.status = "Move canceled".into();
                return;
            }
            _ => {}
        }
        self.mode = Mode::Grabbing(grab);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.session.board().is_none() || !matches!(self.mode, Mode::Normal) {
            self.pointer.cancel();
            return;
        }
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(id) = self.pointer.press(&self.hits, column, row) {
                    self.select_note(&id);
                } else if let Some(section_id) = self.hits.container_at(column, row) {
                    let section_id = section_id.to_string();
                    if let Some(idx) = self.section_index(&section_id) {
                        self.selected_section = idx;
                        self.selected_note = 0;
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => self.pointer.motion(&self.hits, column, row),
            MouseEventKind::Up(MouseButton::Left) => {
                let item = self.pointer.active().map(|d| d.item_id.clone());
                if let Some(target) =
                    self.pointer
                        .release(&self.hits, column, row, &mut self.session)
                {
                    if let Some(id) = item {
                        self.select_note(&id);
                    }
                    self.status = format!("Moved to {}", self.section_title(&target));
                }
            }
            _ => {}
        }
    }

    // Selection

    fn section_ids(&self) -> Vec<String> {
        self.session
            .board()
            .map(|b| b.sections.iter().map(|s| s.id.clone()).collect())
            .unwrap_or_default()
    }

    fn section_index(&self, section_id: &str) -> Option<usize> {
        self.session.board()?.find_section_index(section_id)
    }

    fn section_title(&self, section_id: &str) -> String {
        self.session
            .board()
            .and_then(|b| b.section(section_id))
            .map(|s| s.title.clone())
            .unwrap_or_else(|| section_id.to_string())
    }

    fn current_section_id(&self) -> Option<String> {
        self.session
            .board()?
            .sections
            .get(self.selected_section)
            .map(|s| s.id.clone())
    }

    fn current_note(&self) -> Option<&Note> {
        let board = self.session.board()?;
        let section = board.sections.get(self.selected_section)?;
        self.session
            .notes()
            .in_section(&section.id)
            .get(self.selected_note)
            .copied()
    }

    fn current_note_id(&self) -> Option<String> {
        self.current_note().map(|n| n.id.clone())
    }

    /// Points the selection at `note_id`, wherever it now sorts.
    fn select_note(&mut self, note_id: &str) {
        let section_id = match self.session.notes().get(note_id) {
            Some(note) => note.section_id.clone(),
            None => return,
        };
        if let Some(section_idx) = self.section_index(&section_id) {
            self.selected_section = section_idx;
            self.selected_note = self
                .session
                .notes()
                .in_section(&section_id)
                .iter()
                .position(|n| n.id == note_id)
                .unwrap_or(0);
        }
    }

    fn section_note_count(&self) -> usize {
        self.current_section_id()
            .map(|id| self.session.notes().count_in_section(&id))
            .unwrap_or(0)
    }

    fn ensure_selection_bounds(&mut self) {
        let sections = self.section_ids().len();
        self.selected_section = self.selected_section.min(sections.saturating_sub(1));
        self.selected_note = self
            .selected_note
            .min(self.section_note_count().saturating_sub(1));
    }

    fn prev_section(&mut self) {
        if self.selected_section > 0 {
            self.selected_section -= 1;
            self.selected_note = 0;
        }
    }

    fn next_section(&mut self) {
        if self.selected_section + 1 < self.section_ids().len() {
            self.selected_section += 1;
            self.selected_note = 0;
        }
    }

    fn prev_note(&mut self) {
        if self.selected_note > 0 {
            self.selected_note -= 1;
        }
    }

    fn next_note(&mut self) {
        if self.selected_note + 1 < self.section_note_count() {
            self.selected_note += 1;
        }
    }

    // Drawing

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        self.hits.clear();
        if self.session.board().is_some() {
            self.draw_board_screen(f);
        } else {
            self.draw_form(f);
        }
    }

    fn draw_form(&self, f: &mut ratatui::Frame<'_>) {
        let form = match self.session.form() {
            Some(form) => form,
            None => return,
        };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(3)])
            .split(f.size());

        let mut lines = Vec::new();
        let mut push_field = |label: String, field: FormField, value: &str| {
            let active = field == self.form_focus;
            let shown = if active {
                FieldValue::clone(&self.form_input)
            } else {
                FieldValue::new(value)
            };
            lines.extend(field_lines(&label, &shown, active));
            if let Some(err) = form.error(field) {
                lines.push(Line::from(Span::styled(
                    format!("  {}", err),
                    Style::default().fg(Color::LightRed),
                )));
            }
            lines.push(Line::from(""));
        };
        push_field("Board Name".into(), FormField::Name, form.name());
        push_field(
            "Description".into(),
            FormField::Description,
            form.description(),
        );
        push_field(
            "Number of Sections (1-4)".into(),
            FormField::SectionCount,
            form.section_count(),
        );
        for (idx, title) in form.section_titles().iter().enumerate() {
            push_field(
                format!("Section {}", idx + 1),
                FormField::SectionTitle(idx),
                title,
            );
        }

        let area = centered_rect(70, 90, layout[0]);
        let dialog = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(Span::styled(
                        "Create a New Board",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(dialog, area);
        self.draw_footer(f, layout[1]);
    }

    fn draw_board_screen(&mut self, f: &mut ratatui::Frame<'_>) {
        let board = match self.session.board() {
            Some(board) => board.clone(),
            None => return,
        };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(CARD_HEIGHT + 2),
                Constraint::Length(3),
            ])
            .split(f.size());

        draw_header(f, layout[0], &board);
        self.draw_sections(f, layout[1], &board);
        self.draw_footer(f, layout[2]);

        match &self.mode {
            Mode::Adding { section_id, field } => {
                let title = format!("Add Note to {}", self.section_title(section_id));
                draw_editor(f, &title, field);
            }
            Mode::Editing { field, .. } => draw_editor(f, "Edit Note", field),
            Mode::ConfirmDelete { note_id } => self.draw_confirm(f, note_id),
            Mode::Normal | Mode::Grabbing(_) => {}
        }
    }

    fn draw_sections(&mut self, f: &mut ratatui::Frame<'_>, area: Rect, board: &Board) {
        let cells = section_grid(board.sections.len(), area, self.narrow_width);
        if self.scroll_offsets.len() < board.sections.len() {
            self.scroll_offsets.resize(board.sections.len(), 0);
        }
        let (dragged, drop_target) = match (&self.mode, self.pointer.active()) {
            (Mode::Grabbing(grab), _) => (
                Some(grab.item_id.clone()),
                board.sections.get(grab.target).map(|s| s.id.clone()),
            ),
            (_, Some(drag)) => (Some(drag.item_id.clone()), drag.over.clone()),
            _ => (None, None),
        };

        for (idx, (section, cell)) in board.sections.iter().zip(cells).enumerate() {
            let accent = color_for_index(idx);
            let focused = idx == self.selected_section;
            let targeted = drop_target.as_deref() == Some(section.id.as_str());
            let notes = self.session.notes().in_section(&section.id);

            let border_style = if targeted {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(accent)
            };
            let block = Block::default()
                .title(Span::styled(
                    format!("{} ({} notes)", section.title, notes.len()),
                    Style::default().fg(accent).add_modifier(if focused {
                        Modifier::BOLD | Modifier::UNDERLINED
                    } else {
                        Modifier::BOLD
                    }),
                ))
                .borders(Borders::ALL)
                .border_style(border_style)
                .style(Style::default().bg(Color::Rgb(16, 18, 24)));
            let inner = block.inner(cell);
            f.render_widget(block, cell);
            self.hits.add_container(cell, section.id.clone());

            let viewport = (inner.height / CARD_HEIGHT) as usize;
            let mut offset = self.scroll_offsets[idx];
            if focused {
                offset = adjust_offset(self.selected_note, offset, viewport, notes.len());
            } else {
                offset = offset.min(notes.len().saturating_sub(viewport));
            }
            self.scroll_offsets[idx] = offset;

            for (slot, note) in notes.iter().skip(offset).take(viewport).enumerate() {
                let card = Rect::new(
                    inner.x,
                    inner.y + slot as u16 * CARD_HEIGHT,
                    inner.width,
                    CARD_HEIGHT,
                );
                let selected = focused && offset + slot == self.selected_note;
                let lifted = dragged.as_deref() == Some(note.id.as_str());
                f.render_widget(note_card(note, selected, lifted), card);
                self.hits.add_item(card, note.id.clone());
            }
        }
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let help = if self.session.board().is_some() {
            "←→ section  ↑↓ note  a add  e edit  v vote  d delete  g/drag move  r reset  q quit"
        } else {
            "Tab/↑↓ field  Enter create  Esc quit"
        };
        let lines = vec![
            Line::from(Span::styled(
                self.status.clone(),
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
        ];
        let footer = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(footer, area);
    }

    fn draw_confirm(&self, f: &mut ratatui::Frame<'_>, note_id: &str) {
        let area = centered_rect(50, 30, f.size());
        let content = self
            .session
            .notes()
            .get(note_id)
            .map(|n| truncate_text(&n.content, 40))
            .unwrap_or_else(|| note_id.to_string());
        let body = vec![
            Line::from(Span::styled(
                format!("Delete \"{}\"?", content),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press y to confirm, n or Esc to cancel"),
        ];
        let dialog = Paragraph::new(body).alignment(Alignment::Center).block(
            Block::default()
                .title(Span::styled(
                    "Confirm Delete",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightRed)),
        );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }
}

fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, board: &Board) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                "Retro ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                board.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            board.description.clone(),
            Style::default().fg(Color::Gray),
        )),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(paragraph, area);
}

fn draw_editor(f: &mut ratatui::Frame<'_>, title: &str, field: &FieldValue) {
    let area = centered_rect(60, 40, f.size());
    let mut lines = field_lines("Content", field, true);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter to save, Alt-Enter for newline, Esc to cancel",
        Style::default().fg(Color::Gray),
    )));
    let dialog = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(
                    title.to_string(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

fn note_card(note: &Note, selected: bool, lifted: bool) -> Paragraph<'static> {
    let border = if lifted {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else if selected {
        Style::default()
            .fg(Color::Rgb(252, 214, 112))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let votes = Title::from(Line::from(Span::styled(
        format!(" ▲ {} ", note.votes),
        Style::default().fg(Color::LightGreen),
    )))
    .position(Position::Bottom)
    .alignment(Alignment::Right);
    let lines = note
        .content
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect::<Vec<_>>();
    Paragraph::new(lines)
        .style(Style::default().bg(Color::Rgb(22, 24, 30)).fg(Color::White))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(votes),
        )
}

fn field_lines(label: &str, field: &FieldValue, active: bool) -> Vec<Line<'static>> {
    let label_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD | Modifier::DIM);
    let value_style = Style::default().fg(if active { Color::Cyan } else { Color::White });
    let prefix = format!("{}: ", label);
    let spacer = " ".repeat(prefix.chars().count());
    let text = if active {
        field.with_caret()
    } else {
        field.value.clone()
    };
    text.split('\n')
        .enumerate()
        .map(|(idx, line)| {
            Line::from(vec![
                Span::styled(
                    if idx == 0 {
                        prefix.clone()
                    } else {
                        spacer.clone()
                    },
                    label_style,
                ),
                Span::styled(line.to_string(), value_style),
            ])
        })
        .collect()
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    debug!("terminal ready");
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn color_for_index(idx: usize) -> Color {
    let palette = [
        Color::Cyan,
        Color::LightGreen,
        Color::LightMagenta,
        Color::LightBlue,
    ];
    palette[idx % palette.len()]
}

/// Keeps `selected` inside a window of `viewport` rows starting at the
/// returned offset.
fn adjust_offset(selected: usize, current_offset: usize, viewport: usize, len: usize) -> usize {
    if viewport == 0 || len == 0 {
        return 0;
    }
    let max_offset = len.saturating_sub(viewport);
    let mut offset = current_offset.min(max_offset);
    if selected < offset {
        offset = selected;
    } else if selected >= offset + viewport {
        offset = selected + 1 - viewport;
    }
    offset.min(max_offset)
}

fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out = text
        .chars()
        .take(max.saturating_sub(3))
        .collect::<String>();
    out.push_str("...");
    out
}
