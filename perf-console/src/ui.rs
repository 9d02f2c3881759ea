//! Rendering
//!
//! Pure drawing over the app state; no state mutation happens here.

use crate::app::{App, NAV, Screen};
use crate::views::cycles::CyclesView;
use crate::views::employees::EmployeesView;
use crate::views::goals::GoalsView;
use crate::views::login::{LoginView, REGISTER_FIELDS, RegisterView};
use crate::views::profile::ProfileView;
use crate::views::reviews::ReviewsView;
use ratatui::prelude::*;
use ratatui::widgets::*;
use shared::models::Employee;
use tui_input::Input;
use tui_logger::TuiLoggerWidget;

/// One renderable form field
enum Field<'a> {
    Text(&'a Input),
    Secret(&'a Input),
    Choice(String),
}

pub fn draw(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::Login => draw_login(f, &app.login),
        Screen::Register => draw_register(f, &app.register),
        _ => draw_main(f, app),
    }

    if app.show_logs {
        draw_logs(f);
    }
}

// ---- auth screens ----

fn draw_login(f: &mut Frame, view: &LoginView) {
    let area = centered_rect(50, 40, f.area());
    let block = Block::default()
        .title(" Employee Performance Management ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Clear, area);
    f.render_widget(&block, area);
    let inner = block.inner(area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // notice / error
            Constraint::Length(2), // email
            Constraint::Length(2), // password
            Constraint::Length(1),
            Constraint::Length(1), // hints
        ])
        .split(inner);

    if let Some(error) = &view.error {
        f.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            chunks[0],
        );
    } else if let Some(notice) = &view.notice {
        f.render_widget(
            Paragraph::new(notice.as_str()).style(Style::default().fg(Color::Green)),
            chunks[0],
        );
    }

    draw_labeled_input(f, chunks[1], "Email", &view.email, view.focus == 0, false);
    draw_labeled_input(f, chunks[2], "Password", &view.password, view.focus == 1, true);

    let hint = if view.loading {
        "Logging in..."
    } else {
        "Enter: login | Tab: switch field | Ctrl-R: register | Esc: quit"
    };
    f.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );
}

fn draw_register(f: &mut Frame, view: &RegisterView) {
    let area = centered_rect(50, 60, f.area());
    let block = Block::default()
        .title(" Create New Account ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Clear, area);
    f.render_widget(&block, area);
    let inner = block.inner(area);

    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(std::iter::repeat_n(Constraint::Length(2), REGISTER_FIELDS.len()));
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    if let Some(error) = &view.error {
        f.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            chunks[0],
        );
    }

    draw_labeled_input(f, chunks[1], REGISTER_FIELDS[0], &view.first_name, view.focus == 0, false);
    draw_labeled_input(f, chunks[2], REGISTER_FIELDS[1], &view.last_name, view.focus == 1, false);
    draw_labeled_input(f, chunks[3], REGISTER_FIELDS[2], &view.email, view.focus == 2, false);
    draw_labeled_input(f, chunks[4], REGISTER_FIELDS[3], &view.password, view.focus == 3, true);

    let role = if view.is_admin { "Admin (Manager)" } else { "Employee" };
    let style = if view.focus == 4 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(format!("{}: < {role} >", REGISTER_FIELDS[4])).style(style),
        chunks[5],
    );

    let hint = if view.loading {
        "Registering..."
    } else {
        "Enter: register | Tab: next field | Esc: back to login"
    };
    f.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        chunks[6],
    );
}

fn draw_labeled_input(f: &mut Frame, area: Rect, label: &str, input: &Input, focused: bool, secret: bool) {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let shown = if secret {
        "*".repeat(input.value().chars().count())
    } else {
        input.value().to_string()
    };
    let text = format!("{label}: {shown}");
    f.render_widget(Paragraph::new(text.clone()).style(style), area);
    if focused {
        f.set_cursor_position((area.x + text.chars().count() as u16, area.y));
    }
}

// ---- main layout ----

fn draw_main(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // tabs
            Constraint::Min(1),    // body
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    draw_tabs(f, chunks[0], app);
    match app.screen {
        Screen::Employees => draw_employees(f, chunks[1], &app.employees, app.session.is_admin()),
        Screen::Goals => draw_goals(f, chunks[1], &app.goals, app.session.is_admin()),
        Screen::Cycles => draw_cycles(f, chunks[1], &app.cycles, app.session.is_admin()),
        Screen::Reviews => draw_reviews(f, chunks[1], &app.reviews, app.session.user()),
        Screen::Profile => draw_profile(f, chunks[1], &app.profile),
        Screen::Login | Screen::Register => {}
    }
    draw_footer(f, chunks[2], app);
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
    let titles = ["1 Employees", "2 Goals", "3 Review Cycles", "4 Reviews", "5 My Profile"];
    let selected = NAV.iter().position(|screen| *screen == app.screen).unwrap_or(0);

    let user_line = app
        .session
        .user()
        .map(|user| {
            let role = if user.is_admin { "admin" } else { "employee" };
            format!(" {} ({role}) ", user.display_name())
        })
        .unwrap_or_default();

    let tabs = Tabs::new(titles.to_vec())
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Performance Management ")
                .title_top(Line::from(user_line).right_aligned()),
        );
    f.render_widget(tabs, area);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let hints = match app.screen {
        Screen::Reviews => {
            "a:add e:edit d:delete r:reload c/m/w:filters 0:clear | Tab:next q:quit x:logout g:logs"
        }
        Screen::Profile => "e:edit profile r:reload | Tab:next q:quit x:logout g:logs",
        _ => "a:add e:edit d:delete r:reload | Tab:next view q:quit x:logout g:logs",
    };
    f.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Status strip above a table: loading indicator, inline error, or
/// transient success banner.
fn status_line<'a>(
    loading: bool,
    loading_text: &'a str,
    error: &'a Option<String>,
    success: &'a Option<crate::views::Banner>,
) -> Option<Line<'a>> {
    if let Some(error) = error {
        return Some(Line::styled(error.as_str(), Style::default().fg(Color::Red)));
    }
    if let Some(banner) = success {
        return Some(Line::styled(
            banner.text.as_str(),
            Style::default().fg(Color::Green),
        ));
    }
    if loading {
        return Some(Line::styled(loading_text, Style::default().fg(Color::Yellow)));
    }
    None
}

fn split_status(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    (chunks[0], chunks[1])
}

// ---- employees ----

fn draw_employees(f: &mut Frame, area: Rect, view: &EmployeesView, is_admin: bool) {
    let (status, body) = split_status(area);
    if let Some(line) = status_line(
        view.core.loading,
        "Loading employees...",
        &view.core.error,
        &view.core.success,
    ) {
        f.render_widget(Paragraph::new(line), status);
    }

    let mut header = vec![
        "ID", "Code", "Name", "Gender", "Email", "Phone", "Department", "Job Title", "Active",
        "Hired",
    ];
    if is_admin {
        header.push("Actions");
    }

    let rows: Vec<Row> = view
        .visible_rows()
        .iter()
        .map(|employee| {
            let mut cells = vec![
                employee.id.map(|id| id.to_string()).unwrap_or_default(),
                employee.emp_code.clone(),
                employee.display_name(),
                employee.gender.map(|gender| gender.label().to_string()).unwrap_or_default(),
                employee.email.clone(),
                employee.phone_no.clone(),
                employee.department.clone(),
                employee.job_title.clone(),
                employee.active.label().to_string(),
                employee.hire_date.clone().unwrap_or_default(),
            ];
            if is_admin {
                cells.push("Edit/Delete".to_string());
            }
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(4),
        Constraint::Length(9),
        Constraint::Min(14),
        Constraint::Length(7),
        Constraint::Min(18),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Min(12),
        Constraint::Length(6),
        Constraint::Length(10),
    ];
    if is_admin {
        widths.push(Constraint::Length(11));
    }

    draw_table(f, body, " Employees ", header, rows, widths, view.core.selected, "No employees found");

    if let Some(form) = &view.form {
        draw_employee_form(f, form, form.editing_id.is_some());
    }
    if view.core.delete_target().is_some() {
        draw_delete_confirm(f, "Delete Employee", "Are you sure you want to delete this employee? This action cannot be undone.");
    }
    if let Some(alert) = &view.core.alert {
        draw_alert(f, alert);
    }
}

fn draw_employee_form(f: &mut Frame, form: &crate::views::employees::EmployeeForm, editing: bool) {
    let title = if editing { " Edit Employee " } else { " Add New Employee " };
    let fields = [
        ("Employee Code *", Field::Text(&form.emp_code)),
        ("First Name *", Field::Text(&form.first_name)),
        ("Last Name *", Field::Text(&form.last_name)),
        (
            "Gender",
            Field::Choice(form.gender.map(|gender| gender.label().to_string()).unwrap_or_default()),
        ),
        ("Phone Number *", Field::Text(&form.phone_no)),
        ("Email *", Field::Text(&form.email)),
        ("Password", Field::Secret(&form.password)),
        ("Manager ID", Field::Text(&form.manager_id)),
        ("Department *", Field::Text(&form.department)),
        ("Job Title *", Field::Text(&form.job_title)),
        ("Active Status", Field::Choice(form.active.label().to_string())),
    ];
    draw_form(f, title, &fields, form.focus, &form.error);
}

// ---- goals ----

fn draw_goals(f: &mut Frame, area: Rect, view: &GoalsView, is_admin: bool) {
    let (status, body) = split_status(area);
    if let Some(line) = status_line(
        view.core.loading,
        "Loading goals...",
        &view.core.error,
        &view.core.success,
    ) {
        f.render_widget(Paragraph::new(line), status);
    }

    let mut header = vec!["ID", "Title", "Assigned To", "Created By", "Status", "Start", "End"];
    if is_admin {
        header.push("Actions");
    }

    let rows: Vec<Row> = view
        .core
        .items
        .iter()
        .map(|goal| {
            let mut cells = vec![
                goal.id.map(|id| id.to_string()).unwrap_or_default(),
                goal.title.clone(),
                goal.emp_name.clone(),
                goal.created_by.clone(),
                goal.status.label().to_string(),
                goal.start_date.to_string(),
                goal.end_date.to_string(),
            ];
            if is_admin {
                cells.push("Edit/Delete".to_string());
            }
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(4),
        Constraint::Min(18),
        Constraint::Min(14),
        Constraint::Min(12),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(10),
    ];
    if is_admin {
        widths.push(Constraint::Length(11));
    }

    draw_table(f, body, " Goals Management ", header, rows, widths, view.core.selected, "No goals found");

    if let Some(form) = &view.form {
        let title = if form.editing_id.is_some() { " Edit Goal " } else { " Add New Goal " };
        let employee = if form.emp_name.is_empty() {
            "(select with Left/Right)".to_string()
        } else {
            form.emp_name.clone()
        };
        let fields = [
            ("Goal Title *", Field::Text(&form.title)),
            ("Description *", Field::Text(&form.description)),
            ("Employee *", Field::Choice(employee)),
            ("Created By", Field::Text(&form.created_by)),
            ("Status *", Field::Choice(form.status.label().to_string())),
            ("Start Date *", Field::Text(&form.start_date)),
            ("End Date *", Field::Text(&form.end_date)),
        ];
        draw_form(f, title, &fields, form.focus, &form.error);
    }
    if view.core.delete_target().is_some() {
        draw_delete_confirm(f, "Delete Goal", "Are you sure you want to delete this goal? This action cannot be undone.");
    }
    if let Some(alert) = &view.core.alert {
        draw_alert(f, alert);
    }
}

// ---- review cycles ----

fn draw_cycles(f: &mut Frame, area: Rect, view: &CyclesView, is_admin: bool) {
    let (status, body) = split_status(area);
    if let Some(line) = status_line(
        view.core.loading,
        "Loading review cycles...",
        &view.core.error,
        &view.core.success,
    ) {
        f.render_widget(Paragraph::new(line), status);
    }

    let mut header = vec!["ID", "Cycle", "Start", "End", "Status", "Reviews", "Avg", "Description"];
    if is_admin {
        header.push("Actions");
    }

    let rows: Vec<Row> = view
        .core
        .items
        .iter()
        .map(|cycle| {
            let id = cycle.id.unwrap_or_default();
            let count = view.cycle_review_count(id);
            let average = if count == 0 {
                "-".to_string()
            } else {
                format!("{:.1}", view.cycle_average_rating(id))
            };
            let mut cells = vec![
                id.to_string(),
                cycle.cycle_name.clone(),
                cycle.start_date.to_string(),
                cycle.end_date.to_string(),
                cycle.status.label().to_string(),
                count.to_string(),
                average,
                cycle.description.clone(),
            ];
            if is_admin {
                cells.push("Edit/Delete".to_string());
            }
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(4),
        Constraint::Min(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(11),
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Min(14),
    ];
    if is_admin {
        widths.push(Constraint::Length(11));
    }

    draw_table(f, body, " Review Cycles ", header, rows, widths, view.core.selected, "No review cycles found");

    if let Some(form) = &view.form {
        let title = if form.editing_id.is_some() { " Edit Review Cycle " } else { " Add New Review Cycle " };
        let fields = [
            ("Cycle Name *", Field::Text(&form.cycle_name)),
            ("Start Date *", Field::Text(&form.start_date)),
            ("End Date *", Field::Text(&form.end_date)),
            ("Status *", Field::Choice(form.status.label().to_string())),
            ("Description", Field::Text(&form.description)),
        ];
        draw_form(f, title, &fields, form.focus, &form.error);
    }
    if view.core.delete_target().is_some() {
        draw_delete_confirm(f, "Delete Review Cycle", "Are you sure you want to delete this review cycle? This action cannot be undone.");
    }
    if let Some(alert) = &view.core.alert {
        draw_alert(f, alert);
    }
}

// ---- reviews ----

fn draw_reviews(f: &mut Frame, area: Rect, view: &ReviewsView, user: Option<&Employee>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status
            Constraint::Length(1), // filter summary
            Constraint::Min(1),    // table
        ])
        .split(area);

    if let Some(line) = status_line(
        view.core.loading,
        "Loading reviews...",
        &view.core.error,
        &view.core.success,
    ) {
        f.render_widget(Paragraph::new(line), chunks[0]);
    }

    let filtered = view.filtered();
    let mut summary = format!("Filtered Results: {} review(s)", filtered.len());
    if let Some(cycle_id) = view.filter_cycle {
        summary.push_str(&format!(" in \"{}\" cycle", view.cycle_name(cycle_id)));
    }
    if let Some(average) = view.filtered_average() {
        summary.push_str(&format!(" | Average Rating: {average:.1}/5"));
    }
    f.render_widget(
        Paragraph::new(summary).style(Style::default().fg(Color::Cyan)),
        chunks[1],
    );

    let header = vec!["ID", "Employee", "Reviewer", "Cycle", "Rating", "Comments", "Status", "Date", "Actions"];
    let rows: Vec<Row> = filtered
        .iter()
        .map(|review| {
            let actions = match user {
                Some(user) => {
                    let mut allowed = Vec::new();
                    if ReviewsView::can_edit(review, user) {
                        allowed.push("Edit");
                    }
                    if ReviewsView::can_delete(review, user) {
                        allowed.push("Delete");
                    }
                    allowed.join("/")
                }
                None => String::new(),
            };
            Row::new(vec![
                review.id.map(|id| id.to_string()).unwrap_or_default(),
                review.emp_name.clone(),
                review.reviewer_name.clone(),
                view.cycle_name(review.review_cycle_id),
                format!("{:.1}/5", review.rating),
                review.comments.clone(),
                review.status.label().to_string(),
                review
                    .created_date
                    .map(|date| date.to_string())
                    .unwrap_or_default(),
                actions,
            ])
        })
        .collect();

    let widths = vec![
        Constraint::Length(4),
        Constraint::Min(14),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Length(7),
        Constraint::Min(18),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(11),
    ];

    let empty = if view.core.items.is_empty() {
        "No reviews found"
    } else {
        "No reviews match the selected filters"
    };
    draw_table(f, chunks[2], " Performance Reviews ", header, rows, widths, view.core.selected, empty);

    if let Some(form) = &view.form {
        let title = if form.editing_id.is_some() { " Edit Review " } else { " Add New Review " };
        let employee = if form.emp_name.is_empty() {
            "(select with Left/Right)".to_string()
        } else {
            form.emp_name.clone()
        };
        let cycle = if form.cycle_name.is_empty() {
            "(select with Left/Right)".to_string()
        } else {
            form.cycle_name.clone()
        };
        let fields = [
            ("Employee *", Field::Choice(employee)),
            ("Review Cycle *", Field::Choice(cycle)),
            ("Rating", Field::Choice(format!("{:.1} / 5", form.rating))),
            ("Comments *", Field::Text(&form.comments)),
            ("Status *", Field::Choice(form.status.label().to_string())),
        ];
        draw_form(f, title, &fields, form.focus, &form.error);
    }
    if view.core.delete_target().is_some() {
        draw_delete_confirm(f, "Delete Review", "Are you sure you want to delete this review? This action cannot be undone.");
    }
    if let Some(alert) = &view.core.alert {
        draw_alert(f, alert);
    }
}

// ---- profile ----

fn draw_profile(f: &mut Frame, area: Rect, view: &ProfileView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status
            Constraint::Length(7), // card
            Constraint::Length(3), // stats
            Constraint::Min(1),    // goals + reviews
        ])
        .split(area);

    if let Some(error) = &view.error {
        f.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            chunks[0],
        );
    } else if let Some(banner) = &view.success {
        f.render_widget(
            Paragraph::new(banner.text.as_str()).style(Style::default().fg(Color::Green)),
            chunks[0],
        );
    } else if view.loading {
        f.render_widget(
            Paragraph::new("Loading profile...").style(Style::default().fg(Color::Yellow)),
            chunks[0],
        );
    }

    let card = match &view.user {
        Some(user) => vec![
            Line::from(Span::styled(
                user.display_name(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(user.job_title.clone()),
            Line::from(format!("Department: {}", user.department)),
            Line::from(format!("Email: {}", user.email)),
            Line::from(format!("Phone: {}", user.phone_no)),
        ],
        None => vec![Line::from("No profile data")],
    };
    f.render_widget(
        Paragraph::new(card).block(Block::default().borders(Borders::ALL).title(" My Profile ")),
        chunks[1],
    );

    let stats = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(chunks[2]);
    stat_cell(f, stats[0], "Total Goals", view.total_goals().to_string());
    stat_cell(f, stats[1], "Completed Goals", view.completed_goals().to_string());
    stat_cell(f, stats[2], "In Progress", view.in_progress_goals().to_string());
    stat_cell(f, stats[3], "Avg Rating", format!("{:.2}/5", view.average_rating()));

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);

    let goal_items: Vec<ListItem> = if view.goals.is_empty() {
        vec![ListItem::new("No goals assigned yet")]
    } else {
        view.goals
            .iter()
            .map(|goal| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(goal.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                        Span::raw("  "),
                        Span::styled(goal.status.label(), Style::default().fg(Color::Cyan)),
                    ]),
                    Line::from(format!(
                        "  {} -> {}  by {}",
                        goal.start_date, goal.end_date, goal.created_by
                    )),
                ])
            })
            .collect()
    };
    f.render_widget(
        List::new(goal_items).block(Block::default().borders(Borders::ALL).title(" My Goals ")),
        lists[0],
    );

    let review_items: Vec<ListItem> = if view.reviews.is_empty() {
        vec![ListItem::new("No reviews yet")]
    } else {
        view.reviews
            .iter()
            .map(|review| {
                ListItem::new(vec![
                    Line::from(format!(
                        "Cycle #{}  {:.1}/5  {}",
                        review.review_cycle_id,
                        review.rating,
                        review.status.label()
                    )),
                    Line::from(format!("  Reviewer: {}", review.reviewer_name)),
                ])
            })
            .collect()
    };
    f.render_widget(
        List::new(review_items)
            .block(Block::default().borders(Borders::ALL).title(" Performance Reviews ")),
        lists[1],
    );

    if let Some(form) = &view.form {
        draw_employee_form_profile(f, form);
    }
}

fn draw_employee_form_profile(f: &mut Frame, form: &crate::views::employees::EmployeeForm) {
    let fields = [
        ("Employee Code *", Field::Text(&form.emp_code)),
        ("First Name *", Field::Text(&form.first_name)),
        ("Last Name *", Field::Text(&form.last_name)),
        (
            "Gender",
            Field::Choice(form.gender.map(|gender| gender.label().to_string()).unwrap_or_default()),
        ),
        ("Phone Number *", Field::Text(&form.phone_no)),
        ("Email *", Field::Text(&form.email)),
        ("Password", Field::Secret(&form.password)),
        ("Manager ID", Field::Text(&form.manager_id)),
        ("Department *", Field::Text(&form.department)),
        ("Job Title *", Field::Text(&form.job_title)),
        ("Active Status", Field::Choice(form.active.label().to_string())),
    ];
    draw_form(f, " Edit Profile ", &fields, form.focus, &form.error);
}

fn stat_cell(f: &mut Frame, area: Rect, label: &str, value: String) {
    f.render_widget(
        Paragraph::new(vec![Line::from(vec![
            Span::styled(value, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(label.to_string(), Style::default().fg(Color::Gray)),
        ])])
        .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

// ---- shared widgets ----

#[allow(clippy::too_many_arguments)]
fn draw_table(
    f: &mut Frame,
    area: Rect,
    title: &str,
    header: Vec<&str>,
    rows: Vec<Row>,
    widths: Vec<Constraint>,
    selected: usize,
    empty_text: &str,
) {
    if rows.is_empty() {
        f.render_widget(
            Paragraph::new(empty_text)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(title.to_string())),
            area,
        );
        return;
    }

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    let mut state = TableState::default();
    state.select(Some(selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_form(f: &mut Frame, title: &str, fields: &[(&str, Field)], focus: usize, error: &Option<String>) {
    let height = (fields.len() as u16 + 4).min(f.area().height);
    let area = centered_fixed(60, height, f.area());
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Clear, area);
    f.render_widget(&block, area);
    let inner = block.inner(area);

    let mut constraints = vec![Constraint::Length(1); fields.len()];
    constraints.push(Constraint::Length(1)); // error line
    constraints.push(Constraint::Length(1)); // hints
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, (label, field)) in fields.iter().enumerate() {
        let focused = index == focus;
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        match field {
            Field::Text(input) => {
                let text = format!("{label}: {}", input.value());
                f.render_widget(Paragraph::new(text.clone()).style(style), chunks[index]);
                if focused {
                    f.set_cursor_position((
                        chunks[index].x + text.chars().count() as u16,
                        chunks[index].y,
                    ));
                }
            }
            Field::Secret(input) => {
                let masked = "*".repeat(input.value().chars().count());
                let text = format!("{label}: {masked}");
                f.render_widget(Paragraph::new(text.clone()).style(style), chunks[index]);
                if focused {
                    f.set_cursor_position((
                        chunks[index].x + text.chars().count() as u16,
                        chunks[index].y,
                    ));
                }
            }
            Field::Choice(value) => {
                let text = format!("{label}: < {value} >");
                f.render_widget(Paragraph::new(text).style(style), chunks[index]);
            }
        }
    }

    if let Some(error) = error {
        f.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            chunks[fields.len()],
        );
    }
    f.render_widget(
        Paragraph::new("Enter: save | Tab: next field | Left/Right: choices | Esc: cancel")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[fields.len() + 1],
    );
}

fn draw_delete_confirm(f: &mut Frame, title: &str, message: &str) {
    let area = centered_fixed(56, 7, f.area());
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    f.render_widget(Clear, area);
    f.render_widget(&block, area);
    let inner = block.inner(area);

    f.render_widget(
        Paragraph::new(vec![
            Line::from(message.to_string()),
            Line::from(""),
            Line::styled("y: Yes, delete    n/Esc: Cancel", Style::default().fg(Color::DarkGray)),
        ])
        .wrap(Wrap { trim: true }),
        inner,
    );
}

fn draw_alert(f: &mut Frame, message: &str) {
    let area = centered_fixed(56, 6, f.area());
    let block = Block::default()
        .title(" Alert ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(Clear, area);
    f.render_widget(&block, area);
    let inner = block.inner(area);

    f.render_widget(
        Paragraph::new(vec![
            Line::from(message.to_string()),
            Line::from(""),
            Line::styled("Enter: dismiss", Style::default().fg(Color::DarkGray)),
        ])
        .wrap(Wrap { trim: true }),
        inner,
    );
}

fn draw_logs(f: &mut Frame) {
    let area = centered_rect(80, 80, f.area());
    f.render_widget(Clear, area);
    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs (Esc to close) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White));
    f.render_widget(logs, area);
}

// ---- geometry helpers ----

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
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

fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width.saturating_sub(width)) / 2,
        y: r.y + (r.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
