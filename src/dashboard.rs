//! The interactive console: event loop, key handling and all section
//! panels.
//!
//! Layout follows the web dashboard it replaces: a nav sidebar, a title
//! header, one content panel per section, toasts and a modal overlay,
//! rendered with ratatui. The loop never blocks on the network: fetches
//! run on the worker thread and completions are drained once per tick.

use crate::{
    actions::{self, ActionCtx},
    client::ApiClient,
    config::Config,
    fetch::{self, FetchDone, FetchJob, Resource, ResourceKind},
    input::InputEvent,
    logger::SessionLogger,
    model::{NewTicket, TicketStatus},
    notify::{ModalSlot, ToastKind, ToastQueue},
    router::Section,
    sched::AutoRefresh,
    storage::LocalStore,
    store::{filter_kb, AppState, LoadState},
};
use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

/// Which single-line input box is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditTarget {
    SoftwareFilter,
    ServiceFilter,
    KbSearch,
    AdSearch,
    PingTarget,
    DnsDomain,
    PortHost,
    PortNumber,
    TracerouteTarget,
    RdpTarget,
    EmployeeName,
}

/// Minimal multi-field form for creating a ticket.
struct TicketForm {
    fields: [String; 5],
    active: usize,
}

impl TicketForm {
    const LABELS: [&'static str; 5] = ["Title", "User", "Category", "Priority", "Description"];

    fn new() -> Self {
        Self {
            fields: [
                String::new(),
                String::new(),
                "General".to_string(),
                "medium".to_string(),
                String::new(),
            ],
            active: 0,
        }
    }

    fn into_ticket(self) -> NewTicket {
        let [title, user, category, priority, description] = self.fields;
        NewTicket {
            title,
            user,
            category,
            priority,
            description,
        }
    }
}

enum InputMode {
    Normal,
    Editing { target: EditTarget, buffer: String },
    TicketForm(TicketForm),
}

/// Color palette. Dark mode is the default; light mode swaps the text
/// colors, matching the web client's two themes.
#[derive(Clone, Copy)]
struct Theme {
    fg: Color,
    muted: Color,
    accent: Color,
    good: Color,
    warn: Color,
    bad: Color,
}

impl Theme {
    fn new(dark: bool) -> Self {
        if dark {
            Self {
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                good: Color::Green,
                warn: Color::Yellow,
                bad: Color::Red,
            }
        } else {
            Self {
                fg: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                good: Color::Green,
                warn: Color::Magenta,
                bad: Color::Red,
            }
        }
    }
}

pub fn run_dashboard(
    client: ApiClient,
    config: Config,
    mut store: LocalStore,
    mut log: SessionLogger,
    initial_section: Section,
) -> Result<()> {
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut state = AppState::new();
    state.dark_mode = store.state.dark_mode;
    state.auto_refresh = store.state.auto_refresh;
    state.sidebar_collapsed = store.state.sidebar_collapsed;
    if let Some(progress) = &store.state.onboarding_progress {
        state.onboarding_tasks = progress.tasks.clone();
        state.onboarding_employee = progress.employee.clone();
    }

    let action_client = ApiClient::new(client.base_url())?;
    let (jobs, done): (Sender<FetchJob>, Receiver<FetchDone>) = fetch::spawn_worker(client);

    let mut refresh = AutoRefresh::new(Duration::from_secs(config.refresh_interval));
    if state.auto_refresh {
        refresh.start();
    }

    let mut toasts = ToastQueue::new();
    let mut modal = ModalSlot::new();
    let mut mode = InputMode::Normal;

    // Initial navigation kicks off the first loader set
    state.navigate(initial_section);
    enqueue_section_loaders(&mut state, &jobs);

    loop {
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != event::KeyEventKind::Press {
                    continue;
                }

                let quit = if matches!(mode, InputMode::Normal) {
                    let input_event = InputEvent::from_key_event(key);
                    handle_normal_key(
                        input_event,
                        &mut state,
                        &mut mode,
                        &mut toasts,
                        &mut modal,
                        &mut store,
                        &mut log,
                        &mut refresh,
                        &action_client,
                        &jobs,
                    )
                } else if matches!(mode, InputMode::Editing { .. }) {
                    handle_edit_key(
                        key,
                        &mut mode,
                        &mut state,
                        &mut toasts,
                        &mut modal,
                        &mut store,
                        &mut log,
                        &action_client,
                        &jobs,
                    );
                    false
                } else {
                    handle_form_key(
                        key,
                        &mut mode,
                        &mut state,
                        &mut toasts,
                        &mut modal,
                        &mut store,
                        &mut log,
                        &action_client,
                        &jobs,
                    );
                    false
                };
                if quit {
                    break;
                }
            }
        }

        // Apply completed fetches; stale sequences are dropped inside
        while let Ok(completed) = done.try_recv() {
            let kind = completed.kind;
            if let Some(message) = state.apply(completed, config.failure_policy) {
                toasts.error("Error", &format!("Failed to load {}", kind.label()));
                log.warn(&format!("fetch {} failed: {message}", kind.label()));
            }
        }

        toasts.prune();

        if refresh.tick() {
            // The timer follows the live section pointer, not the section
            // that was current when it was enabled
            enqueue_section_loaders(&mut state, &jobs);
        }

        terminal.draw(|f| draw(f, &state, &toasts, &modal, &mode, &store, &config))?;
    }

    Ok(())
}

fn enqueue_section_loaders(state: &mut AppState, jobs: &Sender<FetchJob>) {
    for resource in state.current_section.loaders(state) {
        let job = state.issue(resource);
        let _ = jobs.send(job);
    }
}

fn enqueue(state: &mut AppState, jobs: &Sender<FetchJob>, resources: Vec<Resource>) {
    for resource in resources {
        let job = state.issue(resource);
        let _ = jobs.send(job);
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_normal_key(
    input_event: InputEvent,
    state: &mut AppState,
    mode: &mut InputMode,
    toasts: &mut ToastQueue,
    modal: &mut ModalSlot,
    store: &mut LocalStore,
    log: &mut SessionLogger,
    refresh: &mut AutoRefresh,
    client: &ApiClient,
    jobs: &Sender<FetchJob>,
) -> bool {
    // A visible modal swallows everything except closing keys
    if modal.is_open() {
        if matches!(input_event, InputEvent::Back | InputEvent::Select | InputEvent::Quit) {
            modal.close();
        }
        return false;
    }

    match input_event {
        InputEvent::Quit => return true,
        InputEvent::NextSection => {
            state.next_section();
            enqueue_section_loaders(state, jobs);
        }
        InputEvent::PrevSection => {
            state.prev_section();
            enqueue_section_loaders(state, jobs);
        }
        InputEvent::NextItem => {
            let len = section_item_count(state);
            state.next_item(len);
        }
        InputEvent::PrevItem => {
            let len = section_item_count(state);
            state.prev_item(len);
        }
        InputEvent::Refresh => {
            toasts.info("Refreshing", "Updating dashboard data...");
            enqueue_section_loaders(state, jobs);
        }
        InputEvent::ToggleAutoRefresh => {
            state.auto_refresh = !state.auto_refresh;
            let _ = store.set_auto_refresh(state.auto_refresh);
            if state.auto_refresh {
                refresh.start();
                toasts.info("Auto-refresh", "Enabled (30s)");
            } else {
                refresh.stop();
                toasts.info("Auto-refresh", "Disabled");
            }
        }
        InputEvent::ToggleDarkMode => {
            state.dark_mode = !state.dark_mode;
            let _ = store.set_dark_mode(state.dark_mode);
        }
        InputEvent::ToggleSidebar => {
            state.sidebar_collapsed = !state.sidebar_collapsed;
            let _ = store.set_sidebar_collapsed(state.sidebar_collapsed);
        }
        InputEvent::ShowHelp => state.show_help = !state.show_help,
        InputEvent::DismissToast => toasts.dismiss(),
        InputEvent::StartFilter => {
            if let Some(target) = filter_target(state.current_section) {
                *mode = InputMode::Editing {
                    buffer: current_filter_value(state, target),
                    target,
                };
            }
        }
        InputEvent::Select => {
            let resources = handle_select(state, modal, toasts);
            enqueue(state, jobs, resources);
        }
        InputEvent::Back => {
            if state.show_help {
                state.show_help = false;
            } else if state.kb_detail.is_some() {
                state.kb_detail = None;
            }
        }
        InputEvent::Char(c) => {
            let resources = handle_section_key(
                c, state, mode, toasts, modal, store, log, client,
            );
            enqueue(state, jobs, resources);
        }
        InputEvent::Unknown => {}
    }
    false
}

/// Section-local keys. Returns loaders to enqueue.
#[allow(clippy::too_many_arguments)]
fn handle_section_key(
    c: char,
    state: &mut AppState,
    mode: &mut InputMode,
    toasts: &mut ToastQueue,
    modal: &mut ModalSlot,
    store: &mut LocalStore,
    log: &mut SessionLogger,
    client: &ApiClient,
) -> Vec<Resource> {
    let mut ctx = ActionCtx {
        client,
        state,
        toasts,
        modal,
        store,
        log,
    };

    match (ctx.state.current_section, c) {
        (Section::Tickets, 'n') => {
            *mode = InputMode::TicketForm(TicketForm::new());
            Vec::new()
        }
        (Section::Tickets, 's') => {
            let selected = ctx
                .state
                .filtered_tickets()
                .get(ctx.state.selected_item)
                .map(|t| (t.id.clone(), t.status));
            match selected {
                Some((id, status)) => actions::update_ticket_status(&mut ctx, &id, status.next()),
                None => Vec::new(),
            }
        }
        (Section::Tickets, 'f') => {
            ctx.state.ticket_filter = match ctx.state.ticket_filter {
                None => Some(TicketStatus::Open),
                Some(TicketStatus::Open) => Some(TicketStatus::InProgress),
                Some(TicketStatus::InProgress) => Some(TicketStatus::Resolved),
                Some(TicketStatus::Resolved) => None,
            };
            ctx.state.selected_item = 0;
            Vec::new()
        }

        (Section::AdUsers, 'p') => actions::reset_user_password(&mut ctx),
        (Section::AdUsers, 'u') => {
            let query = ctx.state.ad_query.clone();
            actions::unlock_user_account(&mut ctx, &query)
        }
        (Section::AdUsers, 'v') => {
            if let Some(username) = ctx.state.selected_ad_user.clone() {
                let details = ctx
                    .state
                    .ad_users
                    .iter()
                    .find(|u| u.username == username)
                    .map(|u| {
                        vec![
                            format!("Username:   {}", u.username),
                            format!("Full name:  {}", u.full_name),
                            format!("Email:      {}", u.email),
                            format!("Department: {}", u.department),
                            format!("Status:     {}", u.status),
                            format!("Last login: {}", u.last_login),
                        ]
                    })
                    .unwrap_or_else(|| vec![format!("Username: {username}")]);
                ctx.modal.open("User Details", details, "Esc to close");
            }
            Vec::new()
        }

        (Section::Onboarding, ' ') => {
            let id = ctx
                .state
                .onboarding_tasks
                .get(ctx.state.selected_item)
                .map(|t| t.id);
            if let Some(id) = id {
                ctx.state.toggle_onboarding_task(id);
            }
            Vec::new()
        }
        (Section::Onboarding, 'w') => {
            actions::save_onboarding_progress(&mut ctx);
            Vec::new()
        }
        (Section::Onboarding, 'g') => {
            actions::onboarding_report(&mut ctx);
            Vec::new()
        }
        (Section::Onboarding, 'z') => {
            actions::reset_onboarding(&mut ctx);
            Vec::new()
        }
        (Section::Onboarding, 'e') => {
            *mode = InputMode::Editing {
                buffer: ctx.state.onboarding_employee.clone(),
                target: EditTarget::EmployeeName,
            };
            Vec::new()
        }

        (Section::Network, 'p') => {
            *mode = InputMode::Editing {
                buffer: String::new(),
                target: EditTarget::PingTarget,
            };
            Vec::new()
        }
        (Section::Network, 'l') => {
            *mode = InputMode::Editing {
                buffer: String::new(),
                target: EditTarget::DnsDomain,
            };
            Vec::new()
        }
        (Section::Network, 'o') => {
            *mode = InputMode::Editing {
                buffer: String::new(),
                target: EditTarget::PortHost,
            };
            Vec::new()
        }
        (Section::Network, 't') => {
            *mode = InputMode::Editing {
                buffer: String::new(),
                target: EditTarget::TracerouteTarget,
            };
            Vec::new()
        }
        (Section::Network, 'i') => vec![Resource::Ipconfig],

        (Section::Compliance, 'c') => {
            ctx.toasts.info("Checking", "Running compliance checks...");
            vec![Resource::Compliance]
        }

        (Section::RemoteTools, 'c') => {
            *mode = InputMode::Editing {
                buffer: String::new(),
                target: EditTarget::RdpTarget,
            };
            Vec::new()
        }
        (Section::RemoteTools, '1') => actions::clear_browser_cache(&mut ctx),
        (Section::RemoteTools, '2') => actions::network_reset(&mut ctx),
        (Section::RemoteTools, '3') => actions::flush_dns(&mut ctx),
        (Section::RemoteTools, '4') => vec![Resource::ErrorLogs],

        (Section::Experimental, 's') => {
            ctx.toasts.info("Speed Test", "Running speed test...");
            vec![Resource::SpeedTest]
        }
        (Section::Experimental, 'n') => {
            ctx.toasts.info("Network Scan", "Scanning network...");
            vec![Resource::NetworkScan]
        }

        (Section::Reports, '1') => report_job(&mut ctx, "full"),
        (Section::Reports, '2') => report_job(&mut ctx, "system"),
        (Section::Reports, '3') => report_job(&mut ctx, "network"),
        (Section::Reports, 'e') => {
            actions::export_report(&mut ctx);
            Vec::new()
        }

        _ => Vec::new(),
    }
}

fn report_job(ctx: &mut ActionCtx, kind: &str) -> Vec<Resource> {
    ctx.toasts.info("Generating Report", "Please wait...");
    vec![Resource::Report {
        kind: kind.to_string(),
    }]
}

/// Enter on a highlighted row: open ticket details, a KB article, or
/// select an AD user depending on the section. Returns loaders to enqueue.
fn handle_select(
    state: &mut AppState,
    modal: &mut ModalSlot,
    toasts: &mut ToastQueue,
) -> Vec<Resource> {
    match state.current_section {
        Section::Tickets => {
            if let Some(ticket) = state.filtered_tickets().get(state.selected_item) {
                modal.open(
                    &format!("Ticket #{}", ticket.id),
                    vec![
                        format!("Title:    {}", ticket.title),
                        format!("User:     {}", ticket.user),
                        format!("Status:   {}", ticket.status.as_str()),
                        format!("Priority: {}", ticket.priority),
                        format!("Category: {}", ticket.category),
                        format!("Created:  {}", ticket.created),
                        String::new(),
                        ticket.description.clone(),
                    ],
                    "Esc to close",
                );
            }
        }
        Section::Knowledge => {
            // Show the cached copy immediately, then refresh it with the
            // full article from the server
            let article = visible_kb(state)
                .get(state.selected_item)
                .map(|a| (*a).clone());
            if let Some(article) = article {
                let id = article.id;
                state.kb_detail = Some(article);
                return vec![Resource::KbArticle { id }];
            }
        }
        Section::AdUsers => {
            let username = state
                .ad_users
                .get(state.selected_item)
                .map(|u| u.username.clone());
            if let Some(username) = username {
                toasts.info("User Selected", &format!("Selected user: {username}"));
                state.selected_ad_user = Some(username);
            }
        }
        _ => {}
    }
    Vec::new()
}

fn visible_kb(state: &AppState) -> Vec<&crate::model::KbArticle> {
    if state.kb_filter.is_empty() {
        state.kb_results.iter().collect()
    } else if state.kb_filter.len() < crate::validation::MIN_SEARCH_LEN {
        filter_kb(&state.all_kb_articles, &state.kb_filter)
    } else {
        state.kb_results.iter().collect()
    }
}

fn section_item_count(state: &AppState) -> usize {
    match state.current_section {
        Section::Tickets => state.filtered_tickets().len(),
        Section::Knowledge => visible_kb(state).len(),
        Section::AdUsers => state.ad_users.len(),
        Section::Onboarding => state.onboarding_tasks.len(),
        Section::Services => state.filtered_services().len(),
        Section::Inventory => state.filtered_software().len(),
        Section::System => state.processes.len().min(15),
        _ => 0,
    }
}

fn filter_target(section: Section) -> Option<EditTarget> {
    match section {
        Section::Inventory => Some(EditTarget::SoftwareFilter),
        Section::Services => Some(EditTarget::ServiceFilter),
        Section::Knowledge => Some(EditTarget::KbSearch),
        Section::AdUsers => Some(EditTarget::AdSearch),
        _ => None,
    }
}

fn current_filter_value(state: &AppState, target: EditTarget) -> String {
    match target {
        EditTarget::SoftwareFilter => state.software_filter.clone(),
        EditTarget::ServiceFilter => state.service_filter.clone(),
        EditTarget::KbSearch => state.kb_filter.clone(),
        EditTarget::AdSearch => state.ad_query.clone(),
        _ => String::new(),
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_edit_key(
    key: event::KeyEvent,
    mode: &mut InputMode,
    state: &mut AppState,
    toasts: &mut ToastQueue,
    modal: &mut ModalSlot,
    store: &mut LocalStore,
    log: &mut SessionLogger,
    client: &ApiClient,
    jobs: &Sender<FetchJob>,
) {
    use crossterm::event::KeyCode;

    let InputMode::Editing { target, buffer } = mode else {
        return;
    };
    let target = *target;

    match key.code {
        KeyCode::Esc => *mode = InputMode::Normal,
        KeyCode::Backspace => {
            buffer.pop();
        }
        KeyCode::Char(c) => buffer.push(c),
        KeyCode::Enter => {
            let value = buffer.clone();

            // The port check prompts host first, then chains to the port
            if target == EditTarget::PortHost {
                let host = value.trim().to_string();
                if crate::validation::validate_host(&host).is_err() {
                    toasts.error("Error", "Invalid host");
                    *mode = InputMode::Normal;
                    return;
                }
                state.port_host_pending = Some(host);
                *mode = InputMode::Editing {
                    target: EditTarget::PortNumber,
                    buffer: String::new(),
                };
                return;
            }

            *mode = InputMode::Normal;
            let resources = commit_edit(target, value, state, toasts, modal, store, log, client);
            enqueue(state, jobs, resources);
        }
        _ => {}
    }
}

/// Applies a committed input box. Filters update in place; diagnostic and
/// search targets turn into fetch jobs; the port check chains host then
/// port before it fires.
#[allow(clippy::too_many_arguments)]
fn commit_edit(
    target: EditTarget,
    value: String,
    state: &mut AppState,
    toasts: &mut ToastQueue,
    modal: &mut ModalSlot,
    store: &mut LocalStore,
    log: &mut SessionLogger,
    client: &ApiClient,
) -> Vec<Resource> {
    let mut ctx = ActionCtx {
        client,
        state,
        toasts,
        modal,
        store,
        log,
    };

    match target {
        EditTarget::SoftwareFilter => {
            ctx.state.software_filter = value;
            ctx.state.selected_item = 0;
            Vec::new()
        }
        EditTarget::ServiceFilter => {
            ctx.state.service_filter = value;
            ctx.state.selected_item = 0;
            Vec::new()
        }
        EditTarget::KbSearch => {
            ctx.state.kb_filter = value.trim().to_string();
            ctx.state.selected_item = 0;
            if ctx.state.kb_filter.is_empty() {
                // Empty query restores the unfiltered cache
                ctx.state.kb_results = ctx.state.all_kb_articles.clone();
                Vec::new()
            } else if ctx.state.kb_filter.len() < crate::validation::MIN_SEARCH_LEN {
                Vec::new()
            } else {
                vec![Resource::KbSearch {
                    query: ctx.state.kb_filter.clone(),
                }]
            }
        }
        EditTarget::AdSearch => {
            ctx.state.ad_query = value.trim().to_string();
            ctx.state.selected_item = 0;
            let query = ctx.state.ad_query.clone();
            actions::search_ad_users(&mut ctx, &query)
        }
        EditTarget::PingTarget => actions::run_ping(&mut ctx, value.trim()),
        EditTarget::DnsDomain => actions::run_dns_lookup(&mut ctx, value.trim()),
        // Host capture happens in the edit handler so the prompt can chain
        EditTarget::PortHost => Vec::new(),
        EditTarget::PortNumber => {
            let host = ctx.state.port_host_pending.take().unwrap_or_default();
            actions::run_port_check(&mut ctx, &host, value.trim())
        }
        EditTarget::TracerouteTarget => actions::run_traceroute(&mut ctx, value.trim()),
        EditTarget::RdpTarget => actions::launch_rdp(&mut ctx, &value),
        EditTarget::EmployeeName => {
            ctx.state.onboarding_employee = value;
            Vec::new()
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_form_key(
    key: event::KeyEvent,
    mode: &mut InputMode,
    state: &mut AppState,
    toasts: &mut ToastQueue,
    modal: &mut ModalSlot,
    store: &mut LocalStore,
    log: &mut SessionLogger,
    client: &ApiClient,
    jobs: &Sender<FetchJob>,
) {
    use crossterm::event::KeyCode;

    let InputMode::TicketForm(form) = mode else {
        return;
    };

    match key.code {
        KeyCode::Esc => *mode = InputMode::Normal,
        KeyCode::Backspace => {
            form.fields[form.active].pop();
        }
        KeyCode::Char(c) => form.fields[form.active].push(c),
        KeyCode::Tab | KeyCode::Down => form.active = (form.active + 1) % form.fields.len(),
        KeyCode::BackTab | KeyCode::Up => {
            form.active = if form.active == 0 {
                form.fields.len() - 1
            } else {
                form.active - 1
            };
        }
        KeyCode::Enter => {
            if form.active + 1 < form.fields.len() {
                form.active += 1;
            } else {
                let form = std::mem::replace(form, TicketForm::new());
                *mode = InputMode::Normal;
                let mut ctx = ActionCtx {
                    client,
                    state,
                    toasts,
                    modal,
                    store,
                    log,
                };
                let resources = actions::create_ticket(&mut ctx, form.into_ticket());
                enqueue(state, jobs, resources);
            }
        }
        _ => {}
    }
}

// ---------- drawing ----------

fn draw(
    f: &mut Frame,
    state: &AppState,
    toasts: &ToastQueue,
    modal: &ModalSlot,
    mode: &InputMode,
    store: &LocalStore,
    config: &Config,
) {
    let theme = Theme::new(state.dark_mode);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, rows[0], state, &theme, config);

    let content = if state.sidebar_collapsed {
        rows[1]
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(22), Constraint::Min(20)])
            .split(rows[1]);
        draw_sidebar(f, cols[0], state, &theme);
        cols[1]
    };

    match state.current_section {
        Section::Dashboard => draw_dashboard_panel(f, content, state, store, &theme),
        Section::System => draw_system_panel(f, content, state, &theme),
        Section::Security => draw_security_panel(f, content, state, &theme),
        Section::Network => draw_network_panel(f, content, state, &theme),
        Section::Performance => draw_performance_panel(f, content, state, &theme),
        Section::Peripherals => draw_peripherals_panel(f, content, state, &theme),
        Section::Inventory => draw_inventory_panel(f, content, state, &theme),
        Section::Tickets => draw_tickets_panel(f, content, state, &theme),
        Section::Knowledge => draw_knowledge_panel(f, content, state, &theme),
        Section::AdUsers => draw_adusers_panel(f, content, state, &theme),
        Section::Onboarding => draw_onboarding_panel(f, content, state, &theme),
        Section::Services => draw_services_panel(f, content, state, &theme),
        Section::Compliance => draw_compliance_panel(f, content, state, &theme),
        Section::RemoteTools => draw_remotetools_panel(f, content, state, &theme),
        Section::Logs => draw_logs_panel(f, content, store, &theme),
        Section::Reports => draw_reports_panel(f, content, state, &theme),
        Section::Experimental => draw_experimental_panel(f, content, state, &theme),
    }

    draw_footer(f, rows[2], state, &theme);
    draw_toasts(f, state, toasts, &theme);

    if let InputMode::Editing { target, buffer } = mode {
        draw_edit_prompt(f, *target, buffer, &theme);
    }
    if let InputMode::TicketForm(form) = mode {
        draw_ticket_form(f, form, &theme);
    }
    if let Some(current) = modal.current() {
        draw_modal(f, current, &theme);
    }
    if state.show_help {
        draw_help_overlay(f, &theme);
    }
}

fn draw_header(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme, config: &Config) {
    let clock = chrono::Local::now().format("%H:%M:%S").to_string();
    let title = Line::from(vec![
        Span::styled(
            state.current_section.title(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}  {clock}", config.server),
            Style::default().fg(theme.muted),
        ),
    ]);

    let header = Paragraph::new(title)
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" deskwatch ")
                .border_style(Style::default().fg(theme.muted)),
        );
    f.render_widget(header, area);
}

fn draw_sidebar(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let items: Vec<ListItem> = Section::all()
        .iter()
        .map(|section| {
            let style = if *section == state.current_section {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg)
            };
            ListItem::new(Span::styled(format!(" {}", section.title()), style))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Sections ")
            .border_style(Style::default().fg(theme.muted)),
    );
    f.render_widget(list, area);
}

fn draw_footer(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let auto = if state.auto_refresh {
        Span::styled("auto-refresh ON", Style::default().fg(theme.good))
    } else {
        Span::styled("auto-refresh off", Style::default().fg(theme.muted))
    };

    let footer = Line::from(vec![
        Span::styled(
            "Tab sections  ↑/↓ rows  r refresh  a auto  d theme  b sidebar  / filter  ? help  q quit   ",
            Style::default().fg(theme.muted),
        ),
        auto,
    ]);
    f.render_widget(Paragraph::new(footer), area);
}

fn load_badge<'a>(state: &AppState, kind: ResourceKind, theme: &Theme) -> Span<'a> {
    match state.load_state(kind) {
        LoadState::Loading => Span::styled(" loading…", Style::default().fg(theme.warn)),
        LoadState::Failed(_) => Span::styled(" failed", Style::default().fg(theme.bad)),
        _ => Span::raw(""),
    }
}

fn panel_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(Style::default().fg(theme.muted))
}

fn empty_state<'a>(message: &'a str, theme: &Theme) -> Paragraph<'a> {
    Paragraph::new(message)
        .style(Style::default().fg(theme.muted))
        .alignment(Alignment::Center)
}

// ---------- dashboard ----------

fn draw_dashboard_panel(
    f: &mut Frame,
    area: Rect,
    state: &AppState,
    store: &LocalStore,
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(6),
            Constraint::Length(7),
        ])
        .split(area);

    draw_stat_tiles(f, rows[0], state, theme);

    let mid = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    draw_recent_tickets(f, mid[0], state, theme);
    draw_security_summary(f, mid[1], state, theme);

    draw_recent_activity(f, rows[2], store, theme);
}

fn draw_stat_tiles(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let (cpu, mem, disk) = match &state.health {
        Some(h) => (
            format!("{:.0}%", h.cpu.usage_percent),
            format!("{:.0}%", h.memory.percent),
            h.disks
                .first()
                .map(|d| format!("{:.0}%", d.percent))
                .unwrap_or_else(|| "—".to_string()),
        ),
        // A failed fetch leaves the tiles unset, never clobbered
        None => ("—".to_string(), "—".to_string(), "—".to_string()),
    };

    let alerts = state.health.as_ref().map_or(0, |h| {
        let mut count = 0;
        if h.cpu.usage_percent > 80.0 {
            count += 1;
        }
        if h.memory.percent > 80.0 {
            count += 1;
        }
        if h.disks.iter().any(|d| d.percent > 90.0) {
            count += 1;
        }
        count
    });

    let tile = |title: &'static str, value: String, color: Color| {
        Paragraph::new(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title))
    };

    f.render_widget(tile(" CPU ", cpu, theme.accent), tiles[0]);
    f.render_widget(tile(" Memory ", mem, theme.accent), tiles[1]);
    f.render_widget(tile(" Disk ", disk, theme.accent), tiles[2]);
    let alert_color = if alerts > 0 { theme.bad } else { theme.good };
    f.render_widget(tile(" Alerts ", alerts.to_string(), alert_color), tiles[3]);
}

fn priority_color(priority: &str, theme: &Theme) -> Color {
    match priority {
        "high" | "critical" => theme.bad,
        "medium" => theme.warn,
        _ => theme.accent,
    }
}

fn status_color(status: TicketStatus, theme: &Theme) -> Color {
    match status {
        TicketStatus::Open => theme.warn,
        TicketStatus::InProgress => theme.accent,
        TicketStatus::Resolved => theme.good,
    }
}

fn draw_recent_tickets(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel_block("Recent Tickets", theme);
    if state.tickets.is_empty() {
        f.render_widget(empty_state("No tickets yet", theme).block(block), area);
        return;
    }

    let items: Vec<ListItem> = state
        .tickets
        .iter()
        .take(5)
        .map(|t| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("#{:<4}", t.id),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(
                    format!("{:<28}", truncate(&t.title, 28)),
                    Style::default().fg(theme.fg),
                ),
                Span::styled(
                    t.status.as_str().to_string(),
                    Style::default().fg(status_color(t.status, theme)),
                ),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

fn draw_security_summary(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel_block("Security Posture", theme);
    let Some(security) = &state.security else {
        f.render_widget(empty_state("No data", theme).block(block), area);
        return;
    };

    let mark = |ok: bool| {
        if ok {
            Span::styled("[ok] ", Style::default().fg(theme.good))
        } else {
            Span::styled("[!!] ", Style::default().fg(theme.bad))
        }
    };

    let lines = vec![
        Line::from(vec![
            mark(security.defender.status == "Enabled"),
            Span::raw(format!("Antivirus: {}", security.defender.status)),
        ]),
        Line::from(vec![
            mark(security.defender.real_time),
            Span::raw(format!(
                "Real-time protection: {}",
                if security.defender.real_time { "Active" } else { "Inactive" }
            )),
        ]),
        Line::from(vec![
            mark(security.firewall.enabled),
            Span::raw(format!("Firewall: {}", security.firewall.status)),
        ]),
        Line::from(vec![Span::styled(
            format!(
                "Score: {} ({})",
                security.score(),
                security.score_label()
            ),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )]),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_recent_activity(f: &mut Frame, area: Rect, store: &LocalStore, theme: &Theme) {
    let block = panel_block("Recent Activity", theme);
    if store.state.audit_logs.is_empty() {
        f.render_widget(empty_state("No recent activity", theme).block(block), area);
        return;
    }

    let items: Vec<ListItem> = store
        .state
        .audit_logs
        .iter()
        .take(5)
        .map(|log| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<26}", truncate(&log.timestamp, 26)),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(format!("{:<18}", log.action), Style::default().fg(theme.fg)),
                Span::styled(log.target.clone(), Style::default().fg(theme.accent)),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

// ---------- system ----------

fn draw_system_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(6)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let info_block = panel_block("System Information", theme);
    match &state.health {
        Some(h) => {
            let mut lines = vec![
                Line::from(format!("Hostname:  {}", h.os.hostname)),
                Line::from(format!("OS:        {} {}", h.os.system, h.os.release)),
                Line::from(format!(
                    "CPU cores: {} physical / {} logical",
                    h.cpu.physical_cores, h.cpu.logical_cores
                )),
                Line::from(format!("Total RAM: {} GB", h.memory.total_gb)),
                Line::from(format!("Boot time: {}", h.os.boot_time)),
            ];
            if let Some(battery) = &h.battery {
                lines.push(Line::from(format!(
                    "Battery:   {:.0}% {}",
                    battery.percent,
                    if battery.power_plugged {
                        "(plugged in)"
                    } else {
                        &battery.time_left
                    }
                )));
            }
            f.render_widget(Paragraph::new(lines).block(info_block), top[0]);
        }
        None => {
            let badge = load_badge(state, ResourceKind::SystemHealth, theme);
            f.render_widget(
                Paragraph::new(Line::from(vec![Span::raw("No data"), badge]))
                    .style(Style::default().fg(theme.muted))
                    .block(info_block),
                top[0],
            );
        }
    }

    let gauges = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(top[1].inner(ratatui::layout::Margin {
            horizontal: 1,
            vertical: 1,
        }));
    f.render_widget(panel_block("Usage", theme), top[1]);

    if let Some(h) = &state.health {
        let cpu_ratio = (h.cpu.usage_percent / 100.0).clamp(0.0, 1.0);
        let mem_ratio = (h.memory.percent / 100.0).clamp(0.0, 1.0);
        f.render_widget(
            Gauge::default()
                .label(format!("CPU {:.0}%", h.cpu.usage_percent))
                .ratio(cpu_ratio)
                .gauge_style(Style::default().fg(gauge_color(h.cpu.usage_percent, theme))),
            gauges[0],
        );
        f.render_widget(
            Gauge::default()
                .label(format!("Memory {:.0}%", h.memory.percent))
                .ratio(mem_ratio)
                .gauge_style(Style::default().fg(gauge_color(h.memory.percent, theme))),
            gauges[1],
        );
        let disks: Vec<Line> = h
            .disks
            .iter()
            .take(3)
            .map(|d| {
                Line::from(format!(
                    "{} {:.0}% ({} GB free of {} GB)",
                    d.device, d.percent, d.free_gb, d.total_gb
                ))
            })
            .collect();
        f.render_widget(Paragraph::new(disks).style(Style::default().fg(theme.fg)), gauges[2]);
    }

    draw_process_table(f, rows[1], state, theme);
}

fn gauge_color(percent: f64, theme: &Theme) -> Color {
    if percent > 80.0 {
        theme.bad
    } else if percent > 60.0 {
        theme.warn
    } else {
        theme.good
    }
}

fn draw_process_table(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel_block("Top Processes", theme);
    if state.processes.is_empty() {
        f.render_widget(empty_state("Failed to load processes", theme).block(block), area);
        return;
    }

    let header = Row::new(vec!["Name", "CPU %", "Memory %", "Status"])
        .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = state
        .processes
        .iter()
        .take(15)
        .enumerate()
        .map(|(i, p)| {
            let style = if i == state.selected_item {
                Style::default().fg(theme.accent)
            } else {
                Style::default().fg(theme.fg)
            };
            Row::new(vec![
                Cell::from(truncate(&p.name, 30)),
                Cell::from(format!("{:.1}", p.cpu_percent)),
                Cell::from(format!("{:.1}", p.memory_percent)),
                Cell::from(p.status.clone()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .block(block);
    f.render_widget(table, area);
}

// ---------- security ----------

fn draw_security_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel_block("Security Status", theme);
    let Some(security) = &state.security else {
        let badge = load_badge(state, ResourceKind::SecurityStatus, theme);
        f.render_widget(
            Paragraph::new(Line::from(vec![Span::raw("No data"), badge]))
                .style(Style::default().fg(theme.muted))
                .block(block),
            area,
        );
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    let score = security.score();
    f.render_widget(
        Gauge::default()
            .label(format!("Security score: {score}/100 ({})", security.score_label()))
            .ratio(f64::from(score) / 100.0)
            .gauge_style(Style::default().fg(if score >= 80 {
                theme.good
            } else if score >= 40 {
                theme.warn
            } else {
                theme.bad
            }))
            .block(panel_block("Score", theme)),
        rows[0],
    );

    let mark = |ok: bool, label: String| {
        Line::from(vec![
            if ok {
                Span::styled("  [ok] ", Style::default().fg(theme.good))
            } else {
                Span::styled("  [!!] ", Style::default().fg(theme.bad))
            },
            Span::styled(label, Style::default().fg(theme.fg)),
        ])
    };

    let lines = vec![
        mark(
            security.defender.status == "Enabled",
            format!("Windows Defender: {}", security.defender.status),
        ),
        mark(
            security.defender.real_time,
            format!(
                "Real-time protection: {}",
                if security.defender.real_time { "Enabled" } else { "Disabled" }
            ),
        ),
        mark(
            security.firewall.enabled,
            format!("Firewall: {}", security.firewall.status),
        ),
        Line::from(format!(
            "  Last update: {}",
            security.updates.last_update.as_deref().unwrap_or("Unknown")
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(block), rows[1]);
}

// ---------- network ----------

fn draw_network_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(6)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let info_block = panel_block("Network", theme);
    match &state.network {
        Some(n) => {
            let lines = vec![
                Line::from(format!("Local IP:  {}", n.local_ip)),
                Line::from(format!("Public IP: {}", n.public_ip)),
                Line::from(format!("Hostname:  {}", n.hostname)),
                Line::from(format!("Sent:      {}", format_bytes(n.stats.bytes_sent))),
                Line::from(format!("Received:  {}", format_bytes(n.stats.bytes_recv))),
            ];
            f.render_widget(Paragraph::new(lines).block(info_block), top[0]);
        }
        None => f.render_widget(empty_state("No data", theme).block(info_block), top[0]),
    }

    let wifi_block = panel_block("WiFi", theme);
    match &state.wifi {
        Some(w) => {
            let lines = vec![
                Line::from(format!(
                    "SSID:   {}",
                    w.ssid.as_deref().unwrap_or("Not Connected")
                )),
                Line::from(format!("Signal: {}", w.signal.as_deref().unwrap_or("—"))),
                Line::from(format!("Speed:  {}", w.speed.as_deref().unwrap_or("—"))),
            ];
            f.render_widget(Paragraph::new(lines).block(wifi_block), top[1]);
        }
        None => f.render_widget(empty_state("Unable to detect WiFi", theme).block(wifi_block), top[1]),
    }

    draw_diagnostics(f, rows[1], state, theme);
}

fn draw_diagnostics(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel_block("Diagnostics  (p ping, l dns, o port, t traceroute, i ipconfig)", theme);
    let mut lines: Vec<Line> = Vec::new();

    if let Some(ping) = &state.ping_result {
        lines.push(Line::from(Span::styled(
            if ping.reachable {
                "Ping: host is reachable"
            } else {
                "Ping: host is unreachable"
            },
            Style::default().fg(if ping.reachable { theme.good } else { theme.bad }),
        )));
        for out in ping.output.lines().take(4) {
            lines.push(Line::from(Span::styled(
                format!("  {out}"),
                Style::default().fg(theme.muted),
            )));
        }
    }

    if let Some(dns) = &state.dns_result {
        if dns.success {
            lines.push(Line::from(Span::styled(
                format!("DNS: {} -> {}", dns.domain, dns.resolved_ip),
                Style::default().fg(theme.good),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!(
                    "DNS: resolution failed ({})",
                    dns.error.as_deref().unwrap_or("unable to resolve")
                ),
                Style::default().fg(theme.bad),
            )));
        }
    }

    if let Some(port) = &state.port_result {
        lines.push(Line::from(Span::styled(
            format!(
                "Port: {}:{} is {}",
                port.host,
                port.port,
                if port.open { "OPEN" } else { "CLOSED" }
            ),
            Style::default().fg(if port.open { theme.good } else { theme.bad }),
        )));
    }

    if let Some(trace) = &state.trace_result {
        lines.push(Line::from("Traceroute:"));
        for out in trace.output.lines().take(8) {
            lines.push(Line::from(Span::styled(
                format!("  {out}"),
                Style::default().fg(theme.muted),
            )));
        }
    }

    if let Some(ipconfig) = &state.ipconfig_output {
        lines.push(Line::from("ipconfig:"));
        for out in ipconfig.lines().take(8) {
            lines.push(Line::from(Span::styled(
                format!("  {out}"),
                Style::default().fg(theme.muted),
            )));
        }
    }

    if lines.is_empty() {
        f.render_widget(
            empty_state("Run a diagnostic to see results here", theme).block(block),
            area,
        );
    } else {
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
    }
}

// ---------- performance ----------

fn draw_performance_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel_block("Startup Programs", theme);
    if state.startup_programs.is_empty() {
        f.render_widget(empty_state("No startup programs found", theme).block(block), area);
        return;
    }

    let items: Vec<ListItem> = state
        .startup_programs
        .iter()
        .map(|p| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<28}", truncate(&p.name, 28)), Style::default().fg(theme.fg)),
                Span::styled(truncate(&p.path, 60), Style::default().fg(theme.muted)),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

// ---------- peripherals ----------

fn draw_peripherals_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    draw_device_list(f, top[0], "Printers", &state.printers, state, ResourceKind::Printers, theme);
    draw_device_list(f, top[1], "Audio", &state.audio_devices, state, ResourceKind::AudioDevices, theme);
    draw_device_list(f, top[2], "Cameras", &state.cameras, state, ResourceKind::Cameras, theme);
    draw_device_list(f, bottom[0], "Bluetooth", &state.bluetooth, state, ResourceKind::Bluetooth, theme);
    draw_device_list(f, bottom[1], "USB", &state.usb_devices, state, ResourceKind::UsbDevices, theme);
}

fn draw_device_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    devices: &[crate::model::PeripheralDevice],
    state: &AppState,
    kind: ResourceKind,
    theme: &Theme,
) {
    let block = panel_block(title, theme);
    if devices.is_empty() {
        let message = match state.load_state(kind) {
            LoadState::Failed(_) => "Failed to load",
            LoadState::Loading => "Loading...",
            _ => "None found",
        };
        f.render_widget(empty_state(message, theme).block(block), area);
        return;
    }

    let items: Vec<ListItem> = devices
        .iter()
        .map(|d| {
            let status_style = if d.status == "Online" || d.status == "OK" || d.status == "Connected" {
                Style::default().fg(theme.good)
            } else {
                Style::default().fg(theme.muted)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<24}", truncate(&d.name, 24)), Style::default().fg(theme.fg)),
                Span::styled(d.status.clone(), status_style),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

// ---------- inventory ----------

fn draw_inventory_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(5)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    let hardware_block = panel_block("Hardware", theme);
    match &state.inventory {
        Some(inv) => {
            let lines = vec![
                Line::from(format!("Device:       {}", inv.hardware.device_name)),
                Line::from(format!("OS:           {} {}", inv.hardware.os, inv.hardware.os_version)),
                Line::from(format!("Processor:    {}", truncate(&inv.hardware.processor, 48))),
                Line::from(format!("RAM:          {} GB", inv.hardware.ram_gb)),
                Line::from(format!("Architecture: {}", inv.hardware.architecture)),
            ];
            f.render_widget(Paragraph::new(lines).block(hardware_block), top[0]);
        }
        None => f.render_widget(empty_state("No data", theme).block(hardware_block), top[0]),
    }

    let browsers_block = panel_block("Browsers", theme);
    match &state.inventory {
        Some(inv) if !inv.browsers.is_empty() => {
            let items: Vec<ListItem> = inv
                .browsers
                .iter()
                .map(|b| {
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{:<20}", b.name), Style::default().fg(theme.fg)),
                        Span::styled("Installed", Style::default().fg(theme.good)),
                    ]))
                })
                .collect();
            f.render_widget(List::new(items).block(browsers_block), top[1]);
        }
        _ => f.render_widget(empty_state("No browsers detected", theme).block(browsers_block), top[1]),
    }

    let software = state.filtered_software();
    let title = if state.software_filter.is_empty() {
        format!("Software ({})", software.len())
    } else {
        format!("Software ({}) - filter: {}", software.len(), state.software_filter)
    };
    let block = panel_block(&title, theme);

    if software.is_empty() {
        f.render_widget(empty_state("No software detected", theme).block(block), rows[1]);
        return;
    }

    let items: Vec<ListItem> = software
        .iter()
        .enumerate()
        .map(|(i, sw)| {
            let style = if i == state.selected_item {
                Style::default().fg(theme.accent)
            } else {
                Style::default().fg(theme.fg)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<36}", truncate(&sw.name, 36)), style),
                Span::styled(
                    format!("{:<24}", sw.publisher.as_deref().unwrap_or("")),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(
                    sw.version.as_deref().unwrap_or("N/A").to_string(),
                    Style::default().fg(theme.muted),
                ),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(block), rows[1]);
}

// ---------- tickets ----------

fn draw_tickets_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let filter_label = state
        .ticket_filter
        .map_or("all".to_string(), |s| s.as_str().to_string());
    let title = format!("Tickets - {filter_label}  (n new, s status, f filter, Enter details)");
    let block = panel_block(&title, theme);

    let tickets = state.filtered_tickets();
    if tickets.is_empty() {
        f.render_widget(empty_state("No tickets found", theme).block(block), area);
        return;
    }

    let header = Row::new(vec!["ID", "Title", "User", "Created", "Status", "Priority"])
        .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = tickets
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let base = if i == state.selected_item {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("#{}", t.id)).style(base.fg(theme.muted)),
                Cell::from(truncate(&t.title, 36)).style(base.fg(theme.fg)),
                Cell::from(t.user.clone()).style(base.fg(theme.fg)),
                Cell::from(t.created.clone()).style(base.fg(theme.muted)),
                Cell::from(t.status.as_str()).style(base.fg(status_color(t.status, theme))),
                Cell::from(t.priority.clone()).style(base.fg(priority_color(&t.priority, theme))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Percentage(40),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(block);
    f.render_widget(table, area);
}

// ---------- knowledge base ----------

fn draw_knowledge_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    if let Some(article) = &state.kb_detail {
        let title = format!("Article #{} - {}", article.id, article.title);
        let block = panel_block(&title, theme);
        let mut lines = vec![
            Line::from(Span::styled(
                format!("[{}]  {}", article.category, article.tags.join(", ")),
                Style::default().fg(theme.muted),
            )),
            Line::from(""),
        ];
        for text in article.content.lines() {
            lines.push(Line::from(text.to_string()));
        }
        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
            area,
        );
        return;
    }

    let articles = visible_kb(state);
    let title = if state.kb_filter.is_empty() {
        format!("Knowledge Base ({})  (/ search, Enter open)", articles.len())
    } else {
        format!(
            "Knowledge Base ({}) - search: {}",
            articles.len(),
            state.kb_filter
        )
    };
    let block = panel_block(&title, theme);

    if articles.is_empty() {
        f.render_widget(empty_state("No articles found", theme).block(block), area);
        return;
    }

    let items: Vec<ListItem> = articles
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let style = if i == state.selected_item {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{:<10}] ", truncate(&a.category, 10)), Style::default().fg(theme.muted)),
                Span::styled(truncate(&a.title, 60), style),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

// ---------- AD users ----------

fn draw_adusers_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let selected = state
        .selected_ad_user
        .as_deref()
        .unwrap_or("none");
    let title = format!(
        "AD Users - selected: {selected}  (/ search, Enter select, p reset pw, u unlock, v details)"
    );
    let block = panel_block(&title, theme);

    if state.ad_users.is_empty() {
        let message = if state.ad_query.len() < crate::validation::MIN_SEARCH_LEN {
            "Enter at least 2 characters to search"
        } else {
            "No users found"
        };
        f.render_widget(empty_state(message, theme).block(block), area);
        return;
    }

    let header = Row::new(vec!["Username", "Full Name", "Email", "Department", "Status", "Last Login"])
        .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = state
        .ad_users
        .iter()
        .enumerate()
        .map(|(i, u)| {
            let base = if i == state.selected_item {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            let status_color = if u.status == "Active" { theme.good } else { theme.bad };
            Row::new(vec![
                Cell::from(u.username.clone()).style(base.fg(theme.fg).add_modifier(Modifier::BOLD)),
                Cell::from(u.full_name.clone()).style(base.fg(theme.fg)),
                Cell::from(u.email.clone()).style(base.fg(theme.muted)),
                Cell::from(u.department.clone()).style(base.fg(theme.fg)),
                Cell::from(u.status.clone()).style(base.fg(status_color)),
                Cell::from(u.last_login.clone()).style(base.fg(theme.muted)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Percentage(24),
            Constraint::Percentage(28),
            Constraint::Length(14),
            Constraint::Length(9),
            Constraint::Length(18),
        ],
    )
    .header(header)
    .block(block);
    f.render_widget(table, area);
}

// ---------- onboarding ----------

fn draw_onboarding_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let (done, total) = state.onboarding_progress();
    let ratio = if total > 0 {
        done as f64 / total as f64
    } else {
        0.0
    };
    let employee = if state.onboarding_employee.is_empty() {
        "New Employee"
    } else {
        &state.onboarding_employee
    };
    f.render_widget(
        Gauge::default()
            .label(format!("{employee}: {done} / {total} complete"))
            .ratio(ratio)
            .gauge_style(Style::default().fg(theme.accent))
            .block(panel_block("Progress", theme)),
        rows[0],
    );

    let block = panel_block(
        "Checklist  (space toggle, w save, g report, z reset, e employee)",
        theme,
    );
    if state.onboarding_tasks.is_empty() {
        f.render_widget(empty_state("No checklist loaded", theme).block(block), rows[1]);
        return;
    }

    let mut items: Vec<ListItem> = Vec::new();
    let mut last_category = "";
    for (i, task) in state.onboarding_tasks.iter().enumerate() {
        if task.category != last_category {
            items.push(ListItem::new(Span::styled(
                task.category.clone(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )));
            last_category = &task.category;
        }
        let check = if task.completed { "[x]" } else { "[ ]" };
        let style = if i == state.selected_item {
            Style::default().fg(theme.accent)
        } else if task.completed {
            Style::default().fg(theme.good)
        } else {
            Style::default().fg(theme.fg)
        };
        items.push(ListItem::new(Span::styled(
            format!("  {check} {}", task.task),
            style,
        )));
    }
    f.render_widget(List::new(items).block(block), rows[1]);
}

// ---------- services ----------

fn draw_services_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(5)])
        .split(area);

    let critical_block = panel_block("Critical Services", theme);
    if state.critical_services.is_empty() {
        f.render_widget(empty_state("No data", theme).block(critical_block), rows[0]);
    } else {
        let line = Line::from(
            state
                .critical_services
                .iter()
                .flat_map(|svc| {
                    let color = if svc.status == "Running" { theme.good } else { theme.bad };
                    vec![
                        Span::styled(
                            format!("{} ", svc.display_name),
                            Style::default().fg(theme.fg),
                        ),
                        Span::styled(format!("[{}]  ", svc.status), Style::default().fg(color)),
                    ]
                })
                .collect::<Vec<_>>(),
        );
        f.render_widget(
            Paragraph::new(line).wrap(Wrap { trim: true }).block(critical_block),
            rows[0],
        );
    }

    let services = state.filtered_services();
    let title = if state.service_filter.is_empty() {
        format!("Services ({})  (/ filter)", services.len())
    } else {
        format!("Services ({}) - filter: {}", services.len(), state.service_filter)
    };
    let block = panel_block(&title, theme);

    if services.is_empty() {
        f.render_widget(empty_state("No services", theme).block(block), rows[1]);
        return;
    }

    let header = Row::new(vec!["Name", "Display Name", "Status", "Start Type"])
        .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));
    let table_rows: Vec<Row> = services
        .iter()
        .enumerate()
        .map(|(i, svc)| {
            let base = if i == state.selected_item {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            let color = if svc.status == "Running" { theme.good } else { theme.bad };
            Row::new(vec![
                Cell::from(svc.name.clone()).style(base.fg(theme.muted)),
                Cell::from(svc.display_name.clone()).style(base.fg(theme.fg)),
                Cell::from(svc.status.clone()).style(base.fg(color)),
                Cell::from(svc.start_type.clone()).style(base.fg(theme.muted)),
            ])
        })
        .collect();

    f.render_widget(
        Table::new(
            table_rows,
            [
                Constraint::Length(20),
                Constraint::Percentage(45),
                Constraint::Length(10),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .block(block),
        rows[1],
    );
}

// ---------- compliance ----------

fn draw_compliance_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(report) = &state.compliance else {
        f.render_widget(
            empty_state("Press 'c' to run a compliance check", theme)
                .block(panel_block("Compliance", theme)),
            area,
        );
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    let (passed, failed, warned) = report.counts();
    f.render_widget(
        Gauge::default()
            .label(format!(
                "Score {}  -  {passed} passed, {failed} failed, {warned} warnings",
                report.score
            ))
            .ratio(f64::from(report.score.min(100)) / 100.0)
            .gauge_style(Style::default().fg(if report.score >= 80 {
                theme.good
            } else if report.score >= 60 {
                theme.warn
            } else {
                theme.bad
            }))
            .block(panel_block("Compliance Score", theme)),
        rows[0],
    );

    let items: Vec<ListItem> = report
        .checks
        .iter()
        .map(|check| {
            let (mark, color) = match check.status.as_str() {
                "passed" => ("[ok]", theme.good),
                "failed" => ("[!!]", theme.bad),
                _ => ("[??]", theme.warn),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{mark} "), Style::default().fg(color)),
                Span::styled(format!("{:<30}", truncate(&check.name, 30)), Style::default().fg(theme.fg)),
                Span::styled(truncate(&check.description, 50), Style::default().fg(theme.muted)),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(items).block(panel_block("Checks  (c re-run)", theme)),
        rows[1],
    );
}

// ---------- remote tools ----------

fn draw_remotetools_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4)])
        .split(area);

    let tools = vec![
        Line::from("c  Connect via RDP (prompts for target)"),
        Line::from("1  Clear browser cache"),
        Line::from("2  Reset network configuration"),
        Line::from("3  Flush DNS resolver cache"),
        Line::from("4  Fetch recent error logs"),
    ];
    f.render_widget(
        Paragraph::new(tools)
            .style(Style::default().fg(theme.fg))
            .block(panel_block("Remote Tools", theme)),
        rows[0],
    );

    let block = panel_block("Error Logs", theme);
    if state.error_logs.is_empty() {
        f.render_widget(empty_state("No recent errors", theme).block(block), rows[1]);
        return;
    }
    let items: Vec<ListItem> = state
        .error_logs
        .iter()
        .map(|log| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<20}", truncate(&log.time, 20)), Style::default().fg(theme.muted)),
                Span::styled(format!("{:<16}", truncate(&log.source, 16)), Style::default().fg(theme.warn)),
                Span::styled(truncate(&log.message, 60), Style::default().fg(theme.fg)),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(block), rows[1]);
}

// ---------- audit logs ----------

fn draw_logs_panel(f: &mut Frame, area: Rect, store: &LocalStore, theme: &Theme) {
    let block = panel_block("Audit Logs (newest first, capped at 100)", theme);
    if store.state.audit_logs.is_empty() {
        f.render_widget(empty_state("No audit logs", theme).block(block), area);
        return;
    }

    let header = Row::new(vec!["Time", "Action", "Target", "Status", "User"])
        .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = store
        .state
        .audit_logs
        .iter()
        .map(|log| {
            Row::new(vec![
                Cell::from(truncate(&log.timestamp, 26)).style(Style::default().fg(theme.muted)),
                Cell::from(log.action.clone()).style(Style::default().fg(theme.fg)),
                Cell::from(log.target.clone()).style(Style::default().fg(theme.accent)),
                Cell::from(log.status.clone()).style(Style::default().fg(
                    if log.status == "success" { theme.good } else { theme.bad },
                )),
                Cell::from(log.user.clone()).style(Style::default().fg(theme.muted)),
            ])
        })
        .collect();

    f.render_widget(
        Table::new(
            rows,
            [
                Constraint::Length(28),
                Constraint::Length(18),
                Constraint::Percentage(30),
                Constraint::Length(10),
                Constraint::Length(14),
            ],
        )
        .header(header)
        .block(block),
        area,
    );
}

// ---------- reports ----------

fn draw_reports_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel_block("Reports  (1 full, 2 system, 3 network, e export)", theme);
    let Some(report) = &state.report else {
        f.render_widget(
            empty_state("Generate a report with 1, 2 or 3", theme).block(block),
            area,
        );
        return;
    };

    let mut lines = vec![
        Line::from(format!("Generated: {}", report.generated)),
        Line::from(format!("Device:    {}", report.device_name)),
        Line::from(format!("Type:      {}", report.kind.to_uppercase())),
        Line::from(""),
        Line::from(Span::styled("System", Style::default().fg(theme.accent))),
        Line::from(format!("  OS:               {}", report.sections.system.os)),
        Line::from(format!("  CPU usage:        {}", report.sections.system.cpu_usage)),
        Line::from(format!("  Memory usage:     {}", report.sections.system.memory_usage)),
        Line::from(format!(
            "  Memory available: {}",
            report.sections.system.memory_available
        )),
        Line::from(""),
        Line::from(Span::styled("Disks", Style::default().fg(theme.accent))),
    ];
    for disk in &report.sections.disks {
        lines.push(Line::from(format!(
            "  {}: {} used, {} free",
            disk.drive, disk.usage, disk.free
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Network", Style::default().fg(theme.accent))));
    lines.push(Line::from(format!("  Local IP: {}", report.sections.network.local_ip)));
    lines.push(Line::from(format!("  Hostname: {}", report.sections.network.hostname)));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ---------- experimental ----------

fn draw_experimental_panel(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(4)])
        .split(area);

    let speed_block = panel_block("Speed Test  (s run)", theme);
    match &state.speed_test {
        Some(result) => f.render_widget(
            Paragraph::new(Span::styled(
                format!("{:.1} Mbps download", result.download_speed_mbps),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .block(speed_block),
            rows[0],
        ),
        None => f.render_widget(empty_state("Not run yet", theme).block(speed_block), rows[0]),
    }

    let scan_block = panel_block("Network Scan  (n run)", theme);
    match &state.network_scan {
        Some(scan) => {
            let mut items = vec![ListItem::new(Span::styled(
                format!("Your IP: {}", scan.local_ip),
                Style::default().fg(theme.accent),
            ))];
            items.extend(scan.devices.iter().map(|d| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<18}", d.ip), Style::default().fg(theme.fg)),
                    Span::styled(d.mac.clone(), Style::default().fg(theme.muted)),
                ]))
            }));
            f.render_widget(List::new(items).block(scan_block), rows[1]);
        }
        None => f.render_widget(empty_state("Not run yet", theme).block(scan_block), rows[1]),
    }
}

// ---------- overlays ----------

fn draw_toasts(f: &mut Frame, _state: &AppState, toasts: &ToastQueue, theme: &Theme) {
    if toasts.is_empty() {
        return;
    }

    let width = 44u16.min(f.area().width.saturating_sub(2));
    for (i, toast) in toasts.visible().iter().take(4).enumerate() {
        let height = 4u16;
        let y = 1 + (i as u16) * height;
        if y + height >= f.area().height {
            break;
        }
        let area = Rect::new(f.area().width.saturating_sub(width + 1), y, width, height);

        let color = match toast.kind {
            ToastKind::Success => theme.good,
            ToastKind::Warning => theme.warn,
            ToastKind::Error => theme.bad,
            ToastKind::Info => theme.accent,
        };

        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(toast.message.clone())
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" {} ", toast.title))
                        .border_style(Style::default().fg(color)),
                ),
            area,
        );
    }
}

fn draw_modal(f: &mut Frame, modal: &crate::notify::Modal, theme: &Theme) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let mut lines: Vec<Line> = modal.body.iter().map(|l| Line::from(l.clone())).collect();
    if !modal.footer.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            modal.footer.clone(),
            Style::default().fg(theme.muted),
        )));
    }

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", modal.title))
                .border_style(Style::default().fg(theme.accent)),
        ),
        area,
    );
}

fn edit_prompt_label(target: EditTarget) -> &'static str {
    match target {
        EditTarget::SoftwareFilter => "Filter software",
        EditTarget::ServiceFilter => "Filter services",
        EditTarget::KbSearch => "Search knowledge base",
        EditTarget::AdSearch => "Search AD users",
        EditTarget::PingTarget => "Ping target",
        EditTarget::DnsDomain => "DNS domain",
        EditTarget::PortHost => "Port check host",
        EditTarget::PortNumber => "Port number",
        EditTarget::TracerouteTarget => "Traceroute target",
        EditTarget::RdpTarget => "RDP target",
        EditTarget::EmployeeName => "Employee name",
    }
}

fn draw_edit_prompt(f: &mut Frame, target: EditTarget, buffer: &str, theme: &Theme) {
    let area = centered_rect(50, 12, f.area());
    let area = Rect { height: 3, ..area };
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(format!("{buffer}_")).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} (Enter to apply, Esc to cancel) ", edit_prompt_label(target)))
                .border_style(Style::default().fg(theme.accent)),
        ),
        area,
    );
}

fn draw_ticket_form(f: &mut Frame, form: &TicketForm, theme: &Theme) {
    let area = centered_rect(56, 40, f.area());
    f.render_widget(Clear, area);

    let mut lines = Vec::new();
    for (i, label) in TicketForm::LABELS.iter().enumerate() {
        let style = if i == form.active {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg)
        };
        let cursor = if i == form.active { "_" } else { "" };
        lines.push(Line::from(Span::styled(
            format!("{label:<12} {}{cursor}", form.fields[i]),
            style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab next field, Enter submit on last field, Esc cancel",
        Style::default().fg(theme.muted),
    )));

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" New Ticket ")
                .border_style(Style::default().fg(theme.accent)),
        ),
        area,
    );
}

fn draw_help_overlay(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from("Global"),
        Line::from("  Tab / Shift+Tab   next / previous section"),
        Line::from("  Up/Down or j/k    move row selection"),
        Line::from("  Enter             open / select highlighted row"),
        Line::from("  r                 refresh current section"),
        Line::from("  a                 toggle 30s auto-refresh"),
        Line::from("  d                 toggle dark mode"),
        Line::from("  b                 collapse / expand sidebar"),
        Line::from("  /                 filter or search (where available)"),
        Line::from("  x                 dismiss oldest toast"),
        Line::from("  q / Ctrl+C        quit"),
        Line::from(""),
        Line::from("Sections"),
        Line::from("  Tickets      n new, s cycle status, f filter"),
        Line::from("  Network      p ping, l dns, o port, t traceroute, i ipconfig"),
        Line::from("  AD Users     p reset password, u unlock, v details"),
        Line::from("  Onboarding   space toggle, w save, g report, z reset"),
        Line::from("  Compliance   c run check"),
        Line::from("  Remote Tools c rdp, 1-4 tools"),
        Line::from("  Reports      1/2/3 generate, e export"),
        Line::from("  Experimental s speed test, n network scan"),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(theme.fg))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help (Esc to close) ")
                    .border_style(Style::default().fg(theme.accent)),
            ),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_000_000_000 {
        // Precision loss acceptable for display formatting
        #[allow(clippy::cast_precision_loss)]
        let gb = bytes as f64 / 1_000_000_000.0;
        format!("{gb:.1}GB")
    } else if bytes >= 1_000_000 {
        #[allow(clippy::cast_precision_loss)]
        let mb = bytes as f64 / 1_000_000.0;
        format!("{mb:.1}MB")
    } else if bytes >= 1_000 {
        #[allow(clippy::cast_precision_loss)]
        let kb = bytes as f64 / 1_000.0;
        format!("{kb:.1}KB")
    } else {
        format!("{bytes}B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_preserves_short_strings() {
        assert_eq!(truncate("Printer jam", 20), "Printer jam");
        assert_eq!(truncate("A very long ticket title indeed", 10), "A very lo…");
    }

    #[test]
    fn format_bytes_scales() {
        assert_eq!(format_bytes(512), "512B");
        assert_eq!(format_bytes(2_500), "2.5KB");
        assert_eq!(format_bytes(3_200_000), "3.2MB");
        assert_eq!(format_bytes(7_100_000_000), "7.1GB");
    }

    #[test]
    fn ticket_form_field_order() {
        let mut form = TicketForm::new();
        assert_eq!(TicketForm::LABELS[form.active], "Title");
        form.fields[0].push_str("Printer jam");
        form.fields[1].push_str("jdoe");
        let ticket = form.into_ticket();
        assert_eq!(ticket.title, "Printer jam");
        assert_eq!(ticket.user, "jdoe");
        assert_eq!(ticket.priority, "medium");
    }

    #[test]
    fn filter_targets_per_section() {
        assert_eq!(filter_target(Section::Inventory), Some(EditTarget::SoftwareFilter));
        assert_eq!(filter_target(Section::Services), Some(EditTarget::ServiceFilter));
        assert_eq!(filter_target(Section::Dashboard), None);
    }
}
