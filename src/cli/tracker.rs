use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::error::Result;
use crate::fmt::{money, today};
use crate::form::{ExpenseForm, SubmitOutcome};
use crate::settings::{get_data_dir, load_settings};
use crate::storage::{FileStore, KeyValueStore};
use crate::store::ExpenseStore;
use crate::tui::{
    money_span, run_view, truncate, View, ViewAction, COLUMN_HEADER_STYLE, FOCUSED_STYLE,
    FOOTER_STYLE, HEADER_STYLE, STATUS_STYLE,
};

// Field order in the form; keep in sync with `field_mut`.
const NAME_IDX: usize = 0;
const DESC_IDX: usize = 1;
const AMOUNT_IDX: usize = 2;
const FIELD_COUNT: usize = AMOUNT_IDX + 1;
const FIELD_LABELS: [&str; FIELD_COUNT] = ["Name", "Description", "Amount"];

// Title, blank, three fields, blank, button.
const FORM_HEIGHT: u16 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Form(usize),
    Table,
}

enum Screen {
    Main,
    ConfirmDelete,
}

/// Interactive form + table over the expense store.
pub struct ExpenseTracker<S: KeyValueStore> {
    store: ExpenseStore<S>,
    form: ExpenseForm,
    date_format: String,
    focus: Focus,
    screen: Screen,
    selection: usize,
    scroll_offset: usize,
    last_visible_rows: usize,
    status_message: Option<String>,
    /// Remaining keypresses before the status message is cleared.
    status_ttl: u8,
}

pub fn run() -> Result<()> {
    let settings = load_settings();
    let store = ExpenseStore::load(FileStore::new(get_data_dir()))?;
    let mut tracker = ExpenseTracker::new(store, &settings.date_format);
    run_view(&mut tracker)
}

impl<S: KeyValueStore> ExpenseTracker<S> {
    pub fn new(store: ExpenseStore<S>, date_format: &str) -> Self {
        Self {
            store,
            form: ExpenseForm::default(),
            date_format: date_format.to_string(),
            focus: Focus::Form(NAME_IDX),
            screen: Screen::Main,
            selection: 0,
            scroll_offset: 0,
            last_visible_rows: 10,
            status_message: None,
            status_ttl: 0,
        }
    }

    fn field_mut(&mut self, idx: usize) -> &mut String {
        match idx {
            NAME_IDX => &mut self.form.name,
            DESC_IDX => &mut self.form.description,
            _ => &mut self.form.amount,
        }
    }

    fn field(&self, idx: usize) -> &str {
        match idx {
            NAME_IDX => &self.form.name,
            DESC_IDX => &self.form.description,
            _ => &self.form.amount,
        }
    }

    fn set_status(&mut self, msg: String) {
        self.status_message = Some(msg);
        self.status_ttl = 3;
    }

    fn clamp_selection(&mut self) {
        let len = self.store.len();
        self.selection = if len == 0 { 0 } else { self.selection.min(len - 1) };
        self.ensure_visible(self.last_visible_rows);
    }

    fn ensure_visible(&mut self, visible_rows: usize) {
        if self.selection < self.scroll_offset {
            self.scroll_offset = self.selection;
        } else if visible_rows > 0 && self.selection >= self.scroll_offset + visible_rows {
            self.scroll_offset = self.selection - visible_rows + 1;
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                format!(" {}", self.form.title()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (i, label) in FIELD_LABELS.iter().enumerate() {
            let is_focused = self.focus == Focus::Form(i);
            let label_style = if is_focused {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let cursor = if is_focused { "_" } else { "" };
            lines.push(Line::from(vec![
                Span::styled(format!("   {label:<14} "), label_style),
                Span::styled(
                    format!("{}{cursor}", self.field(i)),
                    if is_focused {
                        FOCUSED_STYLE
                    } else {
                        Style::default()
                    },
                ),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("   [ {} ]", self.form.submit_label()),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )));

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_table(&mut self, frame: &mut Frame, area: ratatui::layout::Rect) {
        // Column header, blank before total, total row.
        let data_rows = (area.height as usize).saturating_sub(3);
        self.last_visible_rows = data_rows;
        self.ensure_visible(data_rows);

        let mut lines = vec![Line::from(Span::styled(
            format!(
                "   {:<20} {:<28} {:>12}  {:<12} {}",
                "Name", "Description", "Amount", "Date", "Action"
            ),
            COLUMN_HEADER_STYLE,
        ))];

        let expenses = self.store.expenses();
        if expenses.is_empty() {
            lines.push(Line::from("   No expenses yet."));
        } else {
            let end = (self.scroll_offset + data_rows).min(expenses.len());
            for (i, expense) in expenses.iter().enumerate().take(end).skip(self.scroll_offset) {
                let selected = self.focus == Focus::Table && i == self.selection;
                let marker = if selected { " > " } else { "   " };
                let style = if selected {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let action = if self.form.editing_id() == Some(expense.id) {
                    "editing"
                } else {
                    "e=edit d=delete"
                };
                let amount = money_span(expense.amount);
                lines.push(Line::from(vec![
                    Span::styled(
                        format!(
                            "{marker}{:<20} {:<28} ",
                            truncate(&expense.name, 20),
                            truncate(&expense.description, 28)
                        ),
                        style,
                    ),
                    Span::styled(format!("{:>12}", amount.content), amount.style),
                    Span::styled(format!("  {:<12} ", truncate(&expense.date, 12)), style),
                    Span::styled(action, FOOTER_STYLE),
                ]));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("   {:<20} {:<28} {:>12}", "Total", "", money(self.store.total())),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        if let Screen::ConfirmDelete = &self.screen {
            if let Some(expense) = self.store.expenses().get(self.selection) {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!(
                        "   Delete '{}' ({})? (y/n)",
                        expense.name,
                        money(expense.amount)
                    ),
                    STATUS_STYLE,
                )));
            }
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn hints(&self) -> &'static str {
        match (&self.screen, self.focus) {
            (Screen::ConfirmDelete, _) => " y=confirm  n=cancel",
            (Screen::Main, Focus::Table) => {
                " Up/Down=navigate  e=edit  d=delete  a/Tab=form  q=quit"
            }
            (Screen::Main, Focus::Form(_)) if self.form.is_editing() => {
                " Tab=next field  Enter=update  Esc=cancel edit"
            }
            (Screen::Main, Focus::Form(_)) => " Tab=next field  Enter=add  Esc=table",
        }
    }

    fn handle_form_key(&mut self, code: KeyCode, field: usize) -> ViewAction {
        match code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = Focus::Form((field + 1) % FIELD_COUNT);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = Focus::Form((field + FIELD_COUNT - 1) % FIELD_COUNT);
            }
            KeyCode::Char(c) => self.field_mut(field).push(c),
            KeyCode::Backspace => {
                self.field_mut(field).pop();
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => {
                if self.form.is_editing() {
                    self.form.cancel_edit();
                    self.focus = Focus::Form(NAME_IDX);
                    self.set_status("Edit cancelled".into());
                } else {
                    self.focus = Focus::Table;
                }
            }
            _ => {}
        }
        ViewAction::Continue
    }

    fn submit(&mut self) {
        let today = match today(&self.date_format) {
            Ok(t) => t,
            Err(e) => {
                self.set_status(e.to_string());
                return;
            }
        };
        match self.form.submit(&mut self.store, &today) {
            Ok(SubmitOutcome::Added(_)) => {
                self.selection = self.store.len().saturating_sub(1);
                self.clamp_selection();
                self.focus = Focus::Form(NAME_IDX);
                self.set_status("Expense added".into());
            }
            Ok(SubmitOutcome::Updated(_)) => {
                self.focus = Focus::Form(NAME_IDX);
                self.set_status("Expense updated".into());
            }
            Ok(SubmitOutcome::Incomplete) => {}
            Err(e) => self.set_status(e.to_string()),
        }
    }

    fn handle_table_key(&mut self, code: KeyCode) -> ViewAction {
        match code {
            KeyCode::Up => {
                self.selection = self.selection.saturating_sub(1);
                self.ensure_visible(self.last_visible_rows);
            }
            KeyCode::Down => {
                if !self.store.is_empty() {
                    self.selection = (self.selection + 1).min(self.store.len() - 1);
                    self.ensure_visible(self.last_visible_rows);
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(expense) = self.store.expenses().get(self.selection).cloned() {
                    self.form.begin_edit(&expense);
                    self.focus = Focus::Form(NAME_IDX);
                }
            }
            KeyCode::Char('d') => {
                if !self.store.is_empty() {
                    self.screen = Screen::ConfirmDelete;
                }
            }
            KeyCode::Char('a') | KeyCode::Tab => self.focus = Focus::Form(NAME_IDX),
            KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Close,
            _ => {}
        }
        ViewAction::Continue
    }

    fn handle_delete_key(&mut self, code: KeyCode) -> ViewAction {
        match code {
            KeyCode::Char('y') => {
                if let Some(expense) = self.store.expenses().get(self.selection) {
                    let id = expense.id;
                    let name = expense.name.clone();
                    match self.store.remove(id) {
                        Ok(_) => {
                            if self.form.editing_id() == Some(id) {
                                self.form.cancel_edit();
                            }
                            self.clamp_selection();
                            self.set_status(format!("Deleted expense: {name}"));
                        }
                        Err(e) => self.set_status(format!("Error: {e}")),
                    }
                }
                self.screen = Screen::Main;
            }
            KeyCode::Char('n') | KeyCode::Esc => self.screen = Screen::Main,
            _ => {}
        }
        ViewAction::Continue
    }
}

impl<S: KeyValueStore> View for ExpenseTracker<S> {
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let border_style = Style::default().fg(Color::DarkGray);

        let [header_area, sep, form_area, sep2, table_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(FORM_HEIGHT),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(format!(" Penny: {} expenses", self.store.len())).style(HEADER_STYLE),
            header_area,
        );

        let sep_line = "\u{2501}".repeat(area.width as usize);
        frame.render_widget(Paragraph::new(sep_line.as_str()).style(border_style), sep);

        self.draw_form(frame, form_area);

        let thin_line = "\u{2500}".repeat(area.width as usize);
        frame.render_widget(Paragraph::new(thin_line.as_str()).style(border_style), sep2);

        self.draw_table(frame, table_area);

        if let Some(msg) = &self.status_message {
            frame.render_widget(
                Paragraph::new(format!(" {msg}")).style(STATUS_STYLE),
                hints_area,
            );
        } else {
            frame.render_widget(Paragraph::new(self.hints()).style(FOOTER_STYLE), hints_area);
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        if self.status_ttl > 0 {
            self.status_ttl -= 1;
            if self.status_ttl == 0 {
                self.status_message = None;
            }
        }

        if let Screen::ConfirmDelete = self.screen {
            return self.handle_delete_key(code);
        }
        match self.focus {
            Focus::Form(field) => self.handle_form_key(code, field),
            Focus::Table => self.handle_table_key(code),
        }
    }
}
