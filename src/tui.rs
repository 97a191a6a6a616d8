use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use std::io::stdout;

use crate::ai::Gateway;
use crate::app::{App, Tab};
use crate::board::JobField;
use crate::models::{JobApplication, JobStatus, Speaker};
use crate::render;
use crate::resume::{EducationField, ExperienceField, PersonalField};

const EXPORT_PATH: &str = "resume.md";

/// Where a committed input buffer goes.
enum InputTarget {
    ResumeRow(RowKind),
    JobCompany,
    JobPosition {
        company: String,
    },
    JobDescription {
        company: String,
        position: String,
    },
    JobEdit(String, JobEditKind),
    InterviewAnswer,
}

#[derive(Clone, Copy)]
enum JobEditKind {
    Company,
    Position,
    AppliedDate,
    Description,
    Salary,
    Notes,
}

struct InputState {
    target: InputTarget,
    label: String,
    buffer: String,
}

/// One editable line in the resume tab.
#[derive(Clone)]
enum RowKind {
    FullName,
    Email,
    Phone,
    Location,
    Website,
    Summary,
    Skills,
    ExpCompany(String),
    ExpRole(String),
    ExpStart(String),
    ExpEnd(String),
    ExpCurrent(String),
    ExpDescription(String),
    EduSchool(String),
    EduDegree(String),
    EduDate(String),
}

struct ResumeRow {
    label: String,
    value: String,
    kind: RowKind,
}

struct Ui {
    resume_row: usize,
    board_col: usize,
    board_row: usize,
    interview_row: usize,
    preview_scroll: u16,
    input: Option<InputState>,
}

impl Ui {
    fn new() -> Self {
        Self {
            resume_row: 0,
            board_col: 0,
            board_row: 0,
            interview_row: 0,
            preview_scroll: 0,
            input: None,
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

type Term = Terminal<CrosstermBackend<std::io::Stdout>>;

pub fn run(gateway: Gateway) -> Result<()> {
    let mut app = App::new();
    let mut ui = Ui::new();

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut app, &gateway, &mut ui);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(terminal: &mut Term, app: &mut App, gateway: &Gateway, ui: &mut Ui) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app, gateway, ui))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if ui.input.is_some() {
                handle_input_key(terminal, app, gateway, ui, key.code)?;
                continue;
            }

            match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Tab => {
                    let idx = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);
                    app.tab = Tab::ALL[(idx + 1) % Tab::ALL.len()];
                    app.status = None;
                }
                KeyCode::BackTab => {
                    let idx = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);
                    app.tab = Tab::ALL[(idx + Tab::ALL.len() - 1) % Tab::ALL.len()];
                    app.status = None;
                }
                _ => {
                    let flow = match app.tab {
                        Tab::Resume => handle_resume_key(terminal, app, gateway, ui, key.code)?,
                        Tab::Board => handle_board_key(terminal, app, gateway, ui, key.code)?,
                        Tab::Interview => {
                            handle_interview_key(terminal, app, gateway, ui, key.code)?
                        }
                    };
                    if let Flow::Quit = flow {
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}

// --- Input mode ---

fn handle_input_key(
    terminal: &mut Term,
    app: &mut App,
    gateway: &Gateway,
    ui: &mut Ui,
    code: KeyCode,
) -> Result<()> {
    match code {
        KeyCode::Esc => {
            let is_answer = matches!(
                ui.input.as_ref().map(|i| &i.target),
                Some(InputTarget::InterviewAnswer)
            );
            ui.input = None;
            if is_answer {
                app.end_interview();
            }
        }
        KeyCode::Enter => commit_input(terminal, app, gateway, ui)?,
        KeyCode::Backspace => {
            if let Some(input) = ui.input.as_mut() {
                input.buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = ui.input.as_mut() {
                input.buffer.push(c);
            }
        }
        _ => {}
    }
    Ok(())
}

fn commit_input(terminal: &mut Term, app: &mut App, gateway: &Gateway, ui: &mut Ui) -> Result<()> {
    let Some(input) = ui.input.take() else {
        return Ok(());
    };
    let value = input.buffer;

    match input.target {
        InputTarget::ResumeRow(kind) => apply_resume_edit(app, &kind, value),
        InputTarget::JobCompany => {
            ui.input = Some(InputState {
                target: InputTarget::JobPosition { company: value },
                label: "Position title".into(),
                buffer: String::new(),
            });
        }
        InputTarget::JobPosition { company } => {
            ui.input = Some(InputState {
                target: InputTarget::JobDescription {
                    company,
                    position: value,
                },
                label: "Job description (optional, enables AI analysis)".into(),
                buffer: String::new(),
            });
        }
        InputTarget::JobDescription { company, position } => {
            match app
                .board
                .add(&company, &position, JobStatus::Wishlist, &value)
            {
                Ok(_) => app.set_status("application added to Wishlist"),
                Err(e) => app.set_status(e.to_string()),
            }
        }
        InputTarget::JobEdit(id, kind) => {
            let required = matches!(kind, JobEditKind::Company | JobEditKind::Position);
            if required && value.trim().is_empty() {
                app.set_status("this field cannot be blank");
            } else {
                let field = match kind {
                    JobEditKind::Company => JobField::Company(value),
                    JobEditKind::Position => JobField::Position(value),
                    JobEditKind::AppliedDate => JobField::AppliedDate(value),
                    JobEditKind::Description => JobField::Description(value),
                    JobEditKind::Salary => JobField::Salary(value),
                    JobEditKind::Notes => JobField::Notes(value),
                };
                app.board.update(&id, field);
            }
        }
        InputTarget::InterviewAnswer => {
            if !value.trim().is_empty() {
                if let Err(e) = app.interview.begin_turn(&value) {
                    app.set_status(e.to_string());
                } else {
                    // Show the optimistic turn before the blocking call.
                    terminal.draw(|frame| draw(frame, app, gateway, ui))?;
                    if let Err(e) = app.interview.resolve_turn(gateway) {
                        app.set_status(e.to_string());
                    }
                }
            }
            // Stay in answer mode while the session lives.
            if app.interview.is_active() {
                ui.input = Some(answer_input());
            }
        }
    }
    Ok(())
}

fn answer_input() -> InputState {
    InputState {
        target: InputTarget::InterviewAnswer,
        label: "Your answer (Enter to send, Esc to end session)".into(),
        buffer: String::new(),
    }
}

fn apply_resume_edit(app: &mut App, kind: &RowKind, value: String) {
    let editor = &mut app.editor;
    match kind {
        RowKind::FullName => editor.set_personal(PersonalField::FullName(value)),
        RowKind::Email => editor.set_personal(PersonalField::Email(value)),
        RowKind::Phone => editor.set_personal(PersonalField::Phone(value)),
        RowKind::Location => editor.set_personal(PersonalField::Location(value)),
        RowKind::Website => editor.set_personal(PersonalField::Website(value)),
        RowKind::Summary => editor.set_summary(value),
        RowKind::Skills => editor.set_skills_from_input(&value),
        RowKind::ExpCompany(id) => {
            editor.update_experience(id, ExperienceField::Company(value));
        }
        RowKind::ExpRole(id) => {
            editor.update_experience(id, ExperienceField::Role(value));
        }
        RowKind::ExpStart(id) => {
            editor.update_experience(id, ExperienceField::StartDate(value));
        }
        RowKind::ExpEnd(id) => {
            editor.update_experience(id, ExperienceField::EndDate(value));
        }
        RowKind::ExpCurrent(_) => {}
        RowKind::ExpDescription(id) => {
            editor.update_experience(id, ExperienceField::Description(value));
        }
        RowKind::EduSchool(id) => {
            editor.update_education(id, EducationField::School(value));
        }
        RowKind::EduDegree(id) => {
            editor.update_education(id, EducationField::Degree(value));
        }
        RowKind::EduDate(id) => {
            editor.update_education(id, EducationField::GraduationDate(value));
        }
    }
}

// --- Resume tab ---

fn build_resume_rows(app: &App) -> Vec<ResumeRow> {
    let document = app.editor.document();
    let mut rows = vec![
        ResumeRow {
            label: "Name".into(),
            value: document.full_name.clone(),
            kind: RowKind::FullName,
        },
        ResumeRow {
            label: "Email".into(),
            value: document.email.clone(),
            kind: RowKind::Email,
        },
        ResumeRow {
            label: "Phone".into(),
            value: document.phone.clone(),
            kind: RowKind::Phone,
        },
        ResumeRow {
            label: "Location".into(),
            value: document.location.clone(),
            kind: RowKind::Location,
        },
        ResumeRow {
            label: "Website".into(),
            value: document.website.clone(),
            kind: RowKind::Website,
        },
        ResumeRow {
            label: "Summary".into(),
            value: document.summary.clone(),
            kind: RowKind::Summary,
        },
        ResumeRow {
            label: "Skills".into(),
            value: app.editor.skills_input(),
            kind: RowKind::Skills,
        },
    ];

    for entry in &document.experience {
        let id = &entry.id;
        rows.push(ResumeRow {
            label: "Exp/Company".into(),
            value: entry.company.clone(),
            kind: RowKind::ExpCompany(id.clone()),
        });
        rows.push(ResumeRow {
            label: "Exp/Role".into(),
            value: entry.role.clone(),
            kind: RowKind::ExpRole(id.clone()),
        });
        rows.push(ResumeRow {
            label: "Exp/Start".into(),
            value: entry.start_date.clone(),
            kind: RowKind::ExpStart(id.clone()),
        });
        rows.push(ResumeRow {
            label: "Exp/End".into(),
            value: if entry.current {
                "(current role)".into()
            } else {
                entry.end_date.clone()
            },
            kind: RowKind::ExpEnd(id.clone()),
        });
        rows.push(ResumeRow {
            label: "Exp/Current".into(),
            value: if entry.current { "yes" } else { "no" }.into(),
            kind: RowKind::ExpCurrent(id.clone()),
        });
        rows.push(ResumeRow {
            label: "Exp/Details".into(),
            value: entry.description.clone(),
            kind: RowKind::ExpDescription(id.clone()),
        });
    }

    for entry in &document.education {
        let id = &entry.id;
        rows.push(ResumeRow {
            label: "Edu/School".into(),
            value: entry.school.clone(),
            kind: RowKind::EduSchool(id.clone()),
        });
        rows.push(ResumeRow {
            label: "Edu/Degree".into(),
            value: entry.degree.clone(),
            kind: RowKind::EduDegree(id.clone()),
        });
        rows.push(ResumeRow {
            label: "Edu/Date".into(),
            value: entry.graduation_date.clone(),
            kind: RowKind::EduDate(id.clone()),
        });
    }

    rows
}

fn handle_resume_key(
    terminal: &mut Term,
    app: &mut App,
    gateway: &Gateway,
    ui: &mut Ui,
    code: KeyCode,
) -> Result<Flow> {
    let rows = build_resume_rows(app);
    if ui.resume_row >= rows.len() && !rows.is_empty() {
        ui.resume_row = rows.len() - 1;
    }

    match code {
        KeyCode::Down | KeyCode::Char('j') => {
            if ui.resume_row + 1 < rows.len() {
                ui.resume_row += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            ui.resume_row = ui.resume_row.saturating_sub(1);
        }
        KeyCode::PageDown | KeyCode::Char('J') => {
            ui.preview_scroll = ui.preview_scroll.saturating_add(3);
        }
        KeyCode::PageUp | KeyCode::Char('K') => {
            ui.preview_scroll = ui.preview_scroll.saturating_sub(3);
        }
        KeyCode::Enter | KeyCode::Char('e') => {
            if let Some(row) = rows.get(ui.resume_row) {
                if let RowKind::ExpCurrent(id) = &row.kind {
                    let current = row.value == "yes";
                    app.editor
                        .update_experience(id, ExperienceField::Current(!current));
                } else {
                    ui.input = Some(InputState {
                        label: row.label.clone(),
                        buffer: row.value.clone(),
                        target: InputTarget::ResumeRow(row.kind.clone()),
                    });
                }
            }
        }
        KeyCode::Char('a') => {
            app.editor.add_experience();
            app.set_status("experience entry added");
        }
        KeyCode::Char('A') => {
            app.editor.add_education();
            app.set_status("education entry added");
        }
        KeyCode::Char('d') => {
            if let Some(row) = rows.get(ui.resume_row) {
                match &row.kind {
                    RowKind::ExpCompany(id)
                    | RowKind::ExpRole(id)
                    | RowKind::ExpStart(id)
                    | RowKind::ExpEnd(id)
                    | RowKind::ExpCurrent(id)
                    | RowKind::ExpDescription(id) => {
                        app.editor.remove_experience(id);
                        app.set_status("experience entry removed");
                    }
                    RowKind::EduSchool(id) | RowKind::EduDegree(id) | RowKind::EduDate(id) => {
                        app.editor.remove_education(id);
                        app.set_status("education entry removed");
                    }
                    _ => {}
                }
            }
        }
        KeyCode::Char('g') => {
            app.set_status("generating summary…");
            terminal.draw(|frame| draw(frame, app, gateway, ui))?;
            app.generate_summary(gateway);
            app.set_status("summary updated");
        }
        KeyCode::Char('i') => {
            if let Some(ResumeRow {
                kind: RowKind::ExpDescription(id),
                value,
                ..
            }) = rows.get(ui.resume_row)
            {
                app.set_status("enhancing description…");
                terminal.draw(|frame| draw(frame, app, gateway, ui))?;
                let enhanced = gateway.enhance_bullet(value);
                let id = id.clone();
                app.editor
                    .update_experience(&id, ExperienceField::Description(enhanced));
                app.set_status("description updated");
            } else {
                app.set_status("select an Exp/Details row to enhance");
            }
        }
        KeyCode::Char('x') => {
            let markdown = render::render_markdown(app.editor.document());
            match std::fs::write(EXPORT_PATH, markdown) {
                Ok(()) => app.set_status(format!("exported to {EXPORT_PATH}")),
                Err(e) => app.set_status(format!("export failed: {e}")),
            }
        }
        KeyCode::Char('R') => {
            app.editor.reset();
            ui.resume_row = 0;
            app.set_status("resume reset");
        }
        KeyCode::Esc => return Ok(Flow::Quit),
        _ => {}
    }
    Ok(Flow::Continue)
}

// --- Board tab ---

fn column_jobs(app: &App, col: usize) -> Vec<&JobApplication> {
    app.board.with_status(JobStatus::ALL[col]).collect()
}

fn focused_job_id(app: &App, ui: &Ui) -> Option<String> {
    column_jobs(app, ui.board_col)
        .get(ui.board_row)
        .map(|j| j.id.clone())
}

fn handle_board_key(
    terminal: &mut Term,
    app: &mut App,
    gateway: &Gateway,
    ui: &mut Ui,
    code: KeyCode,
) -> Result<Flow> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => {
            ui.board_col = ui.board_col.saturating_sub(1);
            ui.board_row = 0;
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if ui.board_col + 1 < JobStatus::ALL.len() {
                ui.board_col += 1;
                ui.board_row = 0;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let len = column_jobs(app, ui.board_col).len();
            if ui.board_row + 1 < len {
                ui.board_row += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            ui.board_row = ui.board_row.saturating_sub(1);
        }
        KeyCode::Char('a') => {
            ui.input = Some(InputState {
                target: InputTarget::JobCompany,
                label: "Company name".into(),
                buffer: String::new(),
            });
        }
        KeyCode::Enter => {
            if let Some(id) = focused_job_id(app, ui) {
                app.select_job(&id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = focused_job_id(app, ui) {
                app.delete_job(&id);
                let len = column_jobs(app, ui.board_col).len();
                if ui.board_row >= len && len > 0 {
                    ui.board_row = len - 1;
                }
                app.set_status("application deleted");
            }
        }
        KeyCode::Char('[') | KeyCode::Char(']') => {
            if let Some(id) = focused_job_id(app, ui) {
                if let Some(job) = app.board.get(&id) {
                    let pos = JobStatus::ALL
                        .iter()
                        .position(|s| *s == job.status)
                        .unwrap_or(0);
                    let next = if code == KeyCode::Char(']') {
                        (pos + 1).min(JobStatus::ALL.len() - 1)
                    } else {
                        pos.saturating_sub(1)
                    };
                    app.board.update_status(&id, JobStatus::ALL[next]);
                }
            }
        }
        KeyCode::Char('o')
        | KeyCode::Char('s')
        | KeyCode::Char('n')
        | KeyCode::Char('c')
        | KeyCode::Char('p')
        | KeyCode::Char('t') => {
            if let Some(id) = focused_job_id(app, ui) {
                let (kind, label) = match code {
                    KeyCode::Char('c') => (JobEditKind::Company, "Company"),
                    KeyCode::Char('p') => (JobEditKind::Position, "Position title"),
                    KeyCode::Char('t') => (JobEditKind::AppliedDate, "Applied date (YYYY-MM-DD)"),
                    KeyCode::Char('s') => (JobEditKind::Salary, "Salary"),
                    KeyCode::Char('n') => (JobEditKind::Notes, "Notes"),
                    _ => (JobEditKind::Description, "Job description"),
                };
                let current = app.board.get(&id).map(|job| match kind {
                    JobEditKind::Company => job.company.clone(),
                    JobEditKind::Position => job.position.clone(),
                    JobEditKind::AppliedDate => job.applied_date.clone(),
                    JobEditKind::Description => job.description_text().to_string(),
                    JobEditKind::Salary => job.salary.clone().unwrap_or_default(),
                    JobEditKind::Notes => job.notes.clone().unwrap_or_default(),
                });
                ui.input = Some(InputState {
                    target: InputTarget::JobEdit(id, kind),
                    label: label.into(),
                    buffer: current.unwrap_or_default(),
                });
            }
        }
        KeyCode::Char('m') => {
            if let Some(id) = focused_job_id(app, ui) {
                app.select_job(&id);
                app.set_status("analyzing match…");
                terminal.draw(|frame| draw(frame, app, gateway, ui))?;
                app.run_analysis(gateway);
            }
        }
        KeyCode::Esc => {
            if app.selected_job.is_some() {
                app.clear_selection();
            } else {
                return Ok(Flow::Quit);
            }
        }
        _ => {}
    }
    Ok(Flow::Continue)
}

// --- Interview tab ---

fn interview_candidates(app: &App) -> Vec<&JobApplication> {
    app.board.iter().collect()
}

fn handle_interview_key(
    terminal: &mut Term,
    app: &mut App,
    gateway: &Gateway,
    ui: &mut Ui,
    code: KeyCode,
) -> Result<Flow> {
    if app.interview.is_active() {
        // Active sessions route keys through the answer input; the only way
        // here is a stale state, so re-arm the input.
        ui.input = Some(answer_input());
        return Ok(Flow::Continue);
    }

    let candidates = interview_candidates(app);
    match code {
        KeyCode::Down | KeyCode::Char('j') => {
            if ui.interview_row + 1 < candidates.len() {
                ui.interview_row += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            ui.interview_row = ui.interview_row.saturating_sub(1);
        }
        KeyCode::Enter => {
            if let Some(job) = candidates.get(ui.interview_row) {
                let id = job.id.clone();
                app.set_status("starting interview…");
                terminal.draw(|frame| draw(frame, app, gateway, ui))?;
                app.start_interview(gateway, &id);
                if app.interview.is_active() {
                    ui.input = Some(answer_input());
                }
            }
        }
        KeyCode::Esc => return Ok(Flow::Quit),
        _ => {}
    }
    Ok(Flow::Continue)
}

// --- Drawing ---

fn draw(frame: &mut Frame, app: &App, gateway: &Gateway, ui: &Ui) {
    let input_height = if ui.input.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_tab_bar(frame, app, gateway, chunks[0]);

    match app.tab {
        Tab::Resume => draw_resume(frame, app, ui, chunks[1]),
        Tab::Board => draw_board(frame, app, ui, chunks[1]),
        Tab::Interview => draw_interview(frame, app, ui, chunks[1]),
    }

    if let Some(input) = &ui.input {
        let widget = Paragraph::new(format!("{}▏", input.buffer))
            .block(Block::default().borders(Borders::ALL).title(format!(
                " {} ",
                input.label
            )));
        frame.render_widget(widget, chunks[2]);
    }

    draw_footer(frame, app, ui, chunks[3]);
}

fn draw_tab_bar(frame: &mut Frame, app: &App, gateway: &Gateway, area: Rect) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let selected = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);
    let ai_note = if gateway.has_credentials() {
        ""
    } else {
        " AI offline — set GEMINI_API_KEY "
    };
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" careerdesk ")
                .title_bottom(Line::from(ai_note).right_aligned().fg(Color::Yellow)),
        );
    frame.render_widget(tabs, area);
}

fn draw_footer(frame: &mut Frame, app: &App, ui: &Ui, area: Rect) {
    let text = if let Some(status) = &app.status {
        Line::from(format!(" {}", status)).fg(Color::Yellow)
    } else if ui.input.is_some() {
        Line::from(" Enter:confirm  Esc:cancel").fg(Color::DarkGray)
    } else {
        let help = match app.tab {
            Tab::Resume => {
                " j/k:rows  e:edit  a/A:add exp/edu  d:delete  g:AI summary  i:AI enhance  x:export  R:reset  Tab:switch  q:quit"
            }
            Tab::Board => {
                " h/l:column  j/k:row  a:add  Enter:select  [/]:status  c/p/t/o/s/n:edit  m:analyze  d:delete  Tab:switch  q:quit"
            }
            Tab::Interview => " j/k:choose  Enter:start session  Tab:switch  q:quit",
        };
        Line::from(help).fg(Color::DarkGray)
    };
    frame.render_widget(Paragraph::new(text), area);
}

fn draw_resume(frame: &mut Frame, app: &App, ui: &Ui, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let rows = build_resume_rows(app);
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let value = if row.value.is_empty() {
                Span::styled("—", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(truncate(&row.value, 60))
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<12} ", row.label),
                    Style::default().fg(Color::Cyan),
                ),
                value,
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    if !rows.is_empty() {
        list_state.select(Some(ui.resume_row.min(rows.len() - 1)));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Editor "))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    let preview = Paragraph::new(render::render_markdown(app.editor.document()))
        .block(Block::default().borders(Borders::ALL).title(" Preview "))
        .wrap(Wrap { trim: false })
        .scroll((ui.preview_scroll, 0));
    frame.render_widget(preview, chunks[1]);
}

fn status_color(status: JobStatus) -> Color {
    match status {
        JobStatus::Wishlist => Color::DarkGray,
        JobStatus::Applied => Color::Cyan,
        JobStatus::Interviewing => Color::Yellow,
        JobStatus::Offer => Color::Green,
        JobStatus::Rejected => Color::Red,
    }
}

fn draw_board(frame: &mut Frame, app: &App, ui: &Ui, area: Rect) {
    let selected = app
        .selected_job
        .as_deref()
        .and_then(|id| app.board.get(id));
    let detail_height = if selected.is_some() { 14 } else { 0 };

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(detail_height)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(20); 5])
        .split(vertical[0]);

    for (col, status) in JobStatus::ALL.iter().enumerate() {
        let jobs = column_jobs(app, col);
        let items: Vec<ListItem> = jobs
            .iter()
            .map(|job| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        truncate(&job.position, 24),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        truncate(&job.company, 24),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let focused = col == ui.board_col;
        let border_style = if focused {
            Style::default().fg(status_color(*status))
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(format!(" {} ({}) ", status, app.board.count(*status))),
            )
            .highlight_style(Style::default().bg(Color::DarkGray));

        let mut list_state = ListState::default();
        if focused && !jobs.is_empty() {
            list_state.select(Some(ui.board_row.min(jobs.len() - 1)));
        }
        frame.render_stateful_widget(list, columns[col], &mut list_state);
    }

    if let Some(job) = selected {
        draw_job_detail(frame, app, job, vertical[1]);
    }
}

fn draw_job_detail(frame: &mut Frame, app: &App, job: &JobApplication, area: Rect) {
    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled(
                format!("{} at {}", job.position, job.company),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                job.status.label(),
                Style::default().fg(status_color(job.status)),
            ),
            Span::styled(
                format!("  added {}", job.applied_date),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];
    if let Some(salary) = &job.salary {
        lines.push(Line::from(format!("Salary: {}", salary)));
    }
    if let Some(notes) = &job.notes {
        lines.push(Line::from(format!("Notes: {}", notes)));
    }
    let description = job.description_text();
    if description.is_empty() {
        lines.push(Line::from(Span::styled(
            "No description provided.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(truncate(description, 200)));
    }
    lines.push(Line::from(""));

    match &app.analysis {
        Some(analysis) => {
            let score_color = if analysis.score >= 70.0 {
                Color::Green
            } else if analysis.score >= 50.0 {
                Color::Yellow
            } else {
                Color::Red
            };
            lines.push(Line::from(vec![
                Span::styled("Match score: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("{:.0}%", analysis.score),
                    Style::default().fg(score_color).add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(analysis.summary.clone()));
            if !analysis.missing_keywords.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled("Missing: ", Style::default().fg(Color::Red)),
                    Span::raw(analysis.missing_keywords.join(", ")),
                ]));
            }
            for suggestion in &analysis.suggestions {
                lines.push(Line::from(format!("  • {}", suggestion)));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "Press m to analyze your resume against this job.",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let widget = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Detail "))
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn draw_interview(frame: &mut Frame, app: &App, ui: &Ui, area: Rect) {
    if app.interview.is_active() {
        draw_transcript(frame, app, area);
        return;
    }

    let candidates = interview_candidates(app);
    if candidates.is_empty() {
        let widget = Paragraph::new(
            "No applications yet.\n\nAdd a job with a description in the Tracker tab, \
             then come back here to practice.",
        )
        .block(Block::default().borders(Borders::ALL).title(" Mock Interview "))
        .wrap(Wrap { trim: false });
        frame.render_widget(widget, area);
        return;
    }

    let items: Vec<ListItem> = candidates
        .iter()
        .map(|job| {
            let mut spans = vec![Span::raw(format!("{} at {}", job.position, job.company))];
            if job.description_text().trim().is_empty() {
                spans.push(Span::styled(
                    "  (no description — cannot interview)",
                    Style::default().fg(Color::Red),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(ui.interview_row.min(candidates.len() - 1)));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Choose a job to interview for "),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let job = app
        .interview
        .job_id()
        .and_then(|id| app.board.get(id));
    let title = match job {
        Some(job) => format!(" Interviewing for {} at {} ", job.position, job.company),
        None => " Interview ".to_string(),
    };

    let width = area.width.saturating_sub(6).max(20) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for turn in app.interview.transcript() {
        let (prefix, color) = match turn.speaker {
            Speaker::Assistant => ("Interviewer", Color::Magenta),
            Speaker::User => ("You", Color::Cyan),
        };
        lines.push(Line::from(Span::styled(
            format!("{}:", prefix),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        for wrapped in textwrap::fill(&turn.text, width).lines() {
            lines.push(Line::from(format!("  {}", wrapped)));
        }
        lines.push(Line::from(""));
    }
    if app.interview.turn_pending() {
        lines.push(Line::from(Span::styled(
            "Interviewer is thinking…",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Keep the newest turns visible.
    let inner_height = area.height.saturating_sub(2);
    let scroll = (lines.len() as u16).saturating_sub(inner_height);

    let widget = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(widget, area);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
