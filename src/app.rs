use crate::domain::{
    active_tasks, find_task_mut, transition, AppActivity, CategoryList, Context, Effect, Period,
    SessionEngineState, SessionEvent, SessionRecord, Tab, Task, TaskLink, UiMode, ValidationError,
};
use crate::persistence::{KeyValueStore, Settings, CATEGORIES, SESSIONS, TASKS};
use crate::report::{Report, ReportView};
use crate::ticker::TickSchedule;
use chrono::{DateTime, Local};
use std::time::Instant;

/// Wall and monotonic time captured together for one event
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    pub wall: DateTime<Local>,
    pub instant: Instant,
}

impl Clock {
    pub fn now() -> Self {
        Self {
            wall: Local::now(),
            instant: Instant::now(),
        }
    }
}

/// Which form is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Task,
    Category,
}

/// Input form state for adding tasks and categories
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub kind: FormKind,
    pub name: String,
    pub description: String,
    pub editing_field: usize, // 0 = name, 1 = description
}

impl InputFormState {
    fn new(kind: FormKind) -> Self {
        Self {
            kind,
            name: String::new(),
            description: String::new(),
            editing_field: 0,
        }
    }
}

/// Main application state: the single owner of the timer engine
pub struct AppState {
    pub engine: SessionEngineState,
    pub ticker: TickSchedule,
    pub activity: AppActivity,
    store: Box<dyn KeyValueStore>,

    pub tasks: Vec<Task>,
    pub categories: CategoryList,
    pub sessions: Vec<SessionRecord>,
    pub report_view: ReportView,

    pub tab: Tab,
    pub ui_mode: UiMode,
    pub notice: Option<String>,
    pub input_form: Option<InputFormState>,
    pub category_index: usize,
    pub task_index: usize,
    pub task_choice_index: usize,
    pub pending_completion: Option<TaskLink>,
}

impl AppState {
    pub fn new(store: Box<dyn KeyValueStore>, settings: &Settings) -> Self {
        let tasks = TASKS.load(store.as_ref()).unwrap_or_else(|e| {
            log::error!("Failed to load tasks: {:#}", e);
            Vec::new()
        });
        let categories = CategoryList::from_stored(CATEGORIES.load(store.as_ref()).unwrap_or_else(|e| {
            log::error!("Failed to load categories: {:#}", e);
            Vec::new()
        }));
        let sessions = SESSIONS.load(store.as_ref()).unwrap_or_else(|e| {
            log::error!("Failed to load sessions: {:#}", e);
            Vec::new()
        });

        let mut engine = SessionEngineState::new(settings.session_minutes.saturating_mul(60));
        let mut category_index = 0;
        if let Some(last) = settings.last_category.as_deref() {
            if let Some(idx) = categories.names().iter().position(|n| n == last) {
                engine.selected_category = Some(last.to_string());
                category_index = idx;
            }
        }

        log::info!(
            "Loaded {} sessions, {} tasks, {} categories",
            sessions.len(),
            tasks.len(),
            categories.len()
        );

        Self {
            engine,
            ticker: TickSchedule::default(),
            activity: AppActivity::Active,
            store,
            tasks,
            categories,
            sessions,
            report_view: ReportView::default(),
            tab: Tab::Timer,
            ui_mode: UiMode::Normal,
            notice: None,
            input_form: None,
            category_index,
            task_index: 0,
            task_choice_index: 0,
            pending_completion: None,
        }
    }

    // ── Session engine ──────────────────────────────────────────────

    /// Feed one event through the engine and carry out its effects
    pub fn dispatch(&mut self, event: SessionEvent) {
        self.dispatch_at(event, Clock::now());
    }

    pub fn dispatch_at(&mut self, event: SessionEvent, clock: Clock) {
        let ctx = Context {
            now: clock.wall,
            has_active_tasks: !active_tasks(&self.tasks).is_empty(),
        };

        match transition(&self.engine, event, &ctx) {
            Ok(t) => {
                self.engine = t.state;
                for effect in t.effects {
                    self.apply_effect(effect, clock);
                }
            }
            Err(e) => self.show_notice(e),
        }
    }

    fn apply_effect(&mut self, effect: Effect, clock: Clock) {
        match effect {
            Effect::Persist(record) => self.persist_record(record),
            Effect::StartTicker => self.ticker.start(clock.instant),
            Effect::StopTicker => self.ticker.stop(),
            Effect::PromptTaskChoice => {
                self.task_choice_index = 0;
                self.ui_mode = UiMode::TaskChoice;
            }
            Effect::PromptTaskCompletion(link) => {
                self.pending_completion = Some(link);
                self.ui_mode = UiMode::TaskCompletion;
            }
        }
    }

    /// Append a record to the stored log. Failures are logged and dropped.
    fn persist_record(&mut self, record: SessionRecord) {
        let summary = format!(
            "{} {}s/{}s ({}, {} distractions)",
            record.category,
            record.actual_seconds,
            record.target_seconds,
            record.end_reason.to_tag(),
            record.distraction_count
        );

        match SESSIONS.append(self.store.as_mut(), record) {
            Ok(log) => {
                log::info!("Session saved: {}", summary);
                self.sessions = log;
            }
            Err(e) => log::error!("Failed to save session {}: {:#}", summary, e),
        }
    }

    /// Deliver countdown ticks that have come due
    pub fn poll(&mut self, clock: Clock) {
        let due = self.ticker.due_ticks(clock.instant);
        for _ in 0..due {
            if !self.engine.is_running {
                break;
            }
            self.dispatch_at(SessionEvent::Tick, clock);
        }
    }

    pub fn toggle_start_pause(&mut self) {
        if self.engine.is_running {
            self.dispatch(SessionEvent::Pause);
        } else {
            self.dispatch(SessionEvent::Start);
        }
    }

    pub fn reset(&mut self) {
        self.dispatch(SessionEvent::Reset);
    }

    pub fn change_duration(&mut self, delta_minutes: i32) {
        self.dispatch(SessionEvent::ChangeDuration(delta_minutes));
    }

    /// Foreground/background change reported by the host
    pub fn set_activity(&mut self, next: AppActivity) {
        self.set_activity_at(next, Clock::now());
    }

    pub fn set_activity_at(&mut self, next: AppActivity, clock: Clock) {
        let previous = self.activity;
        self.activity = next;
        if previous == next {
            return;
        }

        let before = self.engine.distraction_count;
        self.dispatch_at(SessionEvent::AppActivityChanged { previous, next }, clock);
        if self.engine.distraction_count > before {
            log::info!("Distraction detected ({} this session)", self.engine.distraction_count);
        }
    }

    /// Move the category cursor and select the category under it
    pub fn select_category(&mut self, index: usize) {
        let Some(name) = self.categories.get(index).map(str::to_string) else {
            return;
        };
        let before = self.engine.selected_category.clone();
        self.dispatch(SessionEvent::SelectCategory(name));
        if self.engine.selected_category != before {
            self.category_index = index;
        }
    }

    pub fn next_category(&mut self) {
        if self.categories.is_empty() {
            return;
        }
        let idx = (self.category_index + 1) % self.categories.len();
        self.select_category(idx);
    }

    pub fn previous_category(&mut self) {
        if self.categories.is_empty() {
            return;
        }
        let len = self.categories.len();
        let idx = (self.category_index + len - 1) % len;
        self.select_category(idx);
    }

    /// Options in the task-choice prompt: active tasks, then "skip"
    pub fn task_choice_options(&self) -> Vec<&Task> {
        active_tasks(&self.tasks)
    }

    /// Resolve the task-choice prompt. Indexes past the task list mean "skip".
    pub fn choose_task(&mut self, index: usize) {
        let link = self.task_choice_options().get(index).map(|t| TaskLink {
            id: t.id.clone(),
            name: t.name.clone(),
        });
        self.ui_mode = UiMode::Normal;
        self.dispatch(SessionEvent::SelectTask(link));
    }

    pub fn cancel_task_choice(&mut self) {
        self.ui_mode = UiMode::Normal;
        self.dispatch(SessionEvent::CancelTaskChoice);
    }

    /// Answer the "is the linked task done?" prompt
    pub fn resolve_task_completion(&mut self, completed: bool) {
        if let Some(link) = self.pending_completion.take() {
            if completed {
                if let Some(task) = find_task_mut(&mut self.tasks, &link.id) {
                    if !task.completed {
                        task.toggle_completed();
                        self.save_tasks();
                    }
                }
            }
        }
        self.ui_mode = UiMode::Normal;
    }

    /// Stop the countdown on teardown
    pub fn shutdown(&mut self) {
        self.ticker.stop();
    }

    pub fn settings(&self) -> Settings {
        Settings {
            session_minutes: self.engine.session_duration / 60,
            last_category: self.engine.selected_category.clone(),
        }
    }

    // ── Notices and forms ───────────────────────────────────────────

    fn show_notice(&mut self, err: ValidationError) {
        log::debug!("Rejected: {}", err);
        self.notice = Some(err.to_string());
        self.ui_mode = UiMode::Notice;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::new(FormKind::Task));
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn start_add_category(&mut self) {
        self.input_form = Some(InputFormState::new(FormKind::Category));
        self.ui_mode = UiMode::AddingCategory;
    }

    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            if form.kind == FormKind::Task {
                form.editing_field = (form.editing_field + 1) % 2;
            }
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.name.push(c),
                _ => form.description.push(c),
            }
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.name.pop(),
                _ => form.description.pop(),
            };
        }
    }

    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };
        self.ui_mode = UiMode::Normal;

        let result = match form.kind {
            FormKind::Task => self.add_task(&form.name, &form.description),
            FormKind::Category => self.add_category(&form.name),
        };
        if let Err(e) = result {
            self.show_notice(e);
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // ── Tasks ───────────────────────────────────────────────────────

    pub fn add_task(&mut self, name: &str, description: &str) -> Result<(), ValidationError> {
        let task = Task::new(name, description, Local::now()).ok_or(ValidationError::EmptyTaskName)?;
        self.tasks.push(task);
        self.save_tasks();
        Ok(())
    }

    pub fn toggle_selected_task(&mut self) {
        if let Some(task) = self.tasks.get_mut(self.task_index) {
            task.toggle_completed();
            self.save_tasks();
        }
    }

    pub fn move_task_selection(&mut self, delta: isize) {
        if self.tasks.is_empty() {
            return;
        }
        let max = self.tasks.len() as isize - 1;
        self.task_index = (self.task_index as isize + delta).clamp(0, max) as usize;
    }

    fn save_tasks(&mut self) {
        if let Err(e) = TASKS.save(self.store.as_mut(), &self.tasks) {
            log::error!("Failed to save tasks: {:#}", e);
        }
    }

    // ── Categories ──────────────────────────────────────────────────

    pub fn add_category(&mut self, name: &str) -> Result<(), ValidationError> {
        self.categories.add(name)?;
        if let Err(e) = CATEGORIES.save(self.store.as_mut(), self.categories.names()) {
            log::error!("Failed to save categories: {:#}", e);
        }
        Ok(())
    }

    // ── Reports ─────────────────────────────────────────────────────

    /// Re-read the session log, e.g. when the reports tab gains focus
    pub fn reload_sessions(&mut self) {
        match SESSIONS.load(self.store.as_ref()) {
            Ok(sessions) => self.sessions = sessions,
            Err(e) => log::error!("Failed to reload sessions: {:#}", e),
        }
    }

    pub fn toggle_period(&mut self) {
        let next: Period = self.report_view.period.toggle();
        self.report_view.set_period(next);
    }

    pub fn cycle_category_filter(&mut self) {
        self.report_view.cycle_category_filter(&self.categories);
    }

    pub fn report(&self) -> Report {
        self.report_view
            .build(&self.sessions, &self.categories, Local::now().date_naive())
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
        if self.tab == Tab::Reports {
            self.reload_sessions();
        }
    }
}
