use super::enums::{AppActivity, EndReason};
use super::error::ValidationError;
use super::record::{SessionRecord, TaskLink};
use chrono::{DateTime, Local};

/// Shortest allowed session (5 minutes)
pub const MIN_DURATION_SECS: u32 = 300;
/// Longest allowed session (2 hours)
pub const MAX_DURATION_SECS: u32 = 7200;
/// Duration adjustments move in steps of this many minutes
pub const DURATION_STEP_MINUTES: i32 = 5;
pub const DEFAULT_DURATION_SECS: u32 = 25 * 60;

/// Observable phase derived from the raw state fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Complete state of the focus timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEngineState {
    /// Target length in seconds
    pub session_duration: u32,
    pub remaining_time: u32,
    pub is_running: bool,
    pub selected_category: Option<String>,
    pub distraction_count: u32,
    /// Set once start has been invoked since the last reconfiguration
    pub has_session_run: bool,
    pub selected_task: Option<TaskLink>,
    /// A task was linked or explicitly skipped for this configuration
    pub task_choice_made: bool,
    /// A start is waiting on the user's task choice
    pub awaiting_task_choice: bool,
    /// The current session already produced a record
    pub persisted: bool,
}

impl Default for SessionEngineState {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECS)
    }
}

impl SessionEngineState {
    /// Fresh idle state. The duration is clamped into range and snapped to the step.
    pub fn new(duration_secs: u32) -> Self {
        let step = DURATION_STEP_MINUTES as u32 * 60;
        let duration = (duration_secs.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS) / step) * step;

        Self {
            session_duration: duration,
            remaining_time: duration,
            is_running: false,
            selected_category: None,
            distraction_count: 0,
            has_session_run: false,
            selected_task: None,
            task_choice_made: false,
            awaiting_task_choice: false,
            persisted: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_running {
            Phase::Running
        } else if !self.has_session_run {
            Phase::Idle
        } else if self.remaining_time == 0 {
            Phase::Finished
        } else {
            Phase::Paused
        }
    }

    /// Seconds counted down so far in this session
    pub fn elapsed_seconds(&self) -> u32 {
        self.session_duration.saturating_sub(self.remaining_time)
    }

    /// Fraction of the session completed (0.0 to 1.0)
    /// A session has started and has not produced its record yet
    pub fn is_session_open(&self) -> bool {
        self.has_session_run && !self.persisted
    }

    pub fn progress_ratio(&self) -> f64 {
        if self.session_duration == 0 {
            return 0.0;
        }
        self.elapsed_seconds() as f64 / self.session_duration as f64
    }
}

/// Everything that can happen to the timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    Pause,
    Reset,
    Tick,
    AppActivityChanged {
        previous: AppActivity,
        next: AppActivity,
    },
    ChangeDuration(i32),
    SelectCategory(String),
    /// Link a task, or `None` to explicitly skip linking
    SelectTask(Option<TaskLink>),
    /// Dismiss the task prompt without starting
    CancelTaskChoice,
}

/// Outside facts a transition needs
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub now: DateTime<Local>,
    pub has_active_tasks: bool,
}

/// Side effects the controller must carry out after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Persist(SessionRecord),
    StartTicker,
    StopTicker,
    PromptTaskChoice,
    PromptTaskCompletion(TaskLink),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionEngineState,
    pub effects: Vec<Effect>,
}

/// Apply one event. On error the caller keeps its current state.
pub fn transition(
    state: &SessionEngineState,
    event: SessionEvent,
    ctx: &Context,
) -> Result<Transition, ValidationError> {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        SessionEvent::Start => start(&mut next, ctx, &mut effects)?,
        SessionEvent::Pause => pause(&mut next, &mut effects),
        SessionEvent::Reset => reset(&mut next, ctx, &mut effects),
        SessionEvent::Tick => tick(&mut next, ctx, &mut effects),
        SessionEvent::AppActivityChanged { previous, next: current } => {
            if is_distraction(previous, current, next.is_running) {
                pause(&mut next, &mut effects);
                next.distraction_count += 1;
            }
        }
        SessionEvent::ChangeDuration(delta_minutes) => change_duration(&mut next, delta_minutes)?,
        SessionEvent::SelectCategory(name) => {
            // A paused session keeps its category until it is reset or recorded
            if next.is_running || next.is_session_open() {
                return Err(ValidationError::SessionActive);
            }
            next.selected_category = Some(name);
        }
        SessionEvent::SelectTask(link) => {
            if next.is_running {
                return Err(ValidationError::SessionActive);
            }
            next.selected_task = link;
            next.task_choice_made = true;
            if next.awaiting_task_choice {
                next.awaiting_task_choice = false;
                start(&mut next, ctx, &mut effects)?;
            }
        }
        SessionEvent::CancelTaskChoice => next.awaiting_task_choice = false,
    }

    Ok(Transition {
        state: next,
        effects,
    })
}

/// Leaving the foreground while running counts as one distraction
pub fn is_distraction(previous: AppActivity, next: AppActivity, is_running: bool) -> bool {
    is_running && previous == AppActivity::Active && next.is_away()
}

fn start(
    s: &mut SessionEngineState,
    ctx: &Context,
    effects: &mut Vec<Effect>,
) -> Result<(), ValidationError> {
    if s.is_running {
        return Ok(());
    }
    if s.selected_category.is_none() {
        return Err(ValidationError::NoCategory);
    }

    // Previous session ran out; this start opens a new one
    if s.remaining_time == 0 {
        s.remaining_time = s.session_duration;
        s.distraction_count = 0;
        s.persisted = false;
        s.selected_task = None;
        s.task_choice_made = false;
    }

    if ctx.has_active_tasks && !s.task_choice_made {
        s.awaiting_task_choice = true;
        effects.push(Effect::PromptTaskChoice);
        return Ok(());
    }

    s.is_running = true;
    s.has_session_run = true;
    s.awaiting_task_choice = false;
    effects.push(Effect::StartTicker);
    Ok(())
}

fn pause(s: &mut SessionEngineState, effects: &mut Vec<Effect>) {
    if s.is_running {
        s.is_running = false;
        effects.push(Effect::StopTicker);
    }
}

fn tick(s: &mut SessionEngineState, ctx: &Context, effects: &mut Vec<Effect>) {
    if !s.is_running {
        return;
    }
    if s.remaining_time > 1 {
        s.remaining_time -= 1;
        return;
    }

    s.remaining_time = 0;
    s.is_running = false;
    effects.push(Effect::StopTicker);

    // Timeout credits the whole target, not the last tick's real elapsed time
    let credited = s.session_duration;
    persist(s, EndReason::Finished, credited, ctx, effects);

    if let Some(link) = s.selected_task.clone() {
        effects.push(Effect::PromptTaskCompletion(link));
    }
}

fn reset(s: &mut SessionEngineState, ctx: &Context, effects: &mut Vec<Effect>) {
    if s.has_session_run {
        let elapsed = s.elapsed_seconds();
        persist(s, EndReason::Reset, elapsed, ctx, effects);
    }

    let was_running = s.is_running;
    s.is_running = false;
    s.remaining_time = s.session_duration;
    s.distraction_count = 0;
    s.has_session_run = false;
    s.persisted = false;
    s.selected_task = None;
    s.task_choice_made = false;
    s.awaiting_task_choice = false;

    if was_running {
        effects.push(Effect::StopTicker);
    }
}

fn persist(
    s: &mut SessionEngineState,
    reason: EndReason,
    actual_seconds: u32,
    ctx: &Context,
    effects: &mut Vec<Effect>,
) {
    if s.persisted {
        return;
    }
    let Some(category) = s.selected_category.as_deref() else {
        return;
    };

    if let Some(record) = SessionRecord::new(
        category,
        u64::from(s.session_duration),
        u64::from(actual_seconds),
        u64::from(s.distraction_count),
        reason,
        s.selected_task.as_ref(),
        ctx.now,
    ) {
        s.persisted = true;
        effects.push(Effect::Persist(record));
    }
}

fn change_duration(s: &mut SessionEngineState, delta_minutes: i32) -> Result<(), ValidationError> {
    if s.is_running {
        return Err(ValidationError::DurationLocked);
    }
    if delta_minutes == 0 || delta_minutes % DURATION_STEP_MINUTES != 0 {
        return Err(ValidationError::InvalidStep(DURATION_STEP_MINUTES));
    }

    let proposed = i64::from(s.session_duration) + i64::from(delta_minutes) * 60;
    if proposed < i64::from(MIN_DURATION_SECS) || proposed > i64::from(MAX_DURATION_SECS) {
        return Err(ValidationError::DurationOutOfRange {
            min: MIN_DURATION_SECS / 60,
            max: MAX_DURATION_SECS / 60,
        });
    }

    s.session_duration = proposed as u32;
    s.remaining_time = s.session_duration;
    s.has_session_run = false;
    s.distraction_count = 0;
    s.persisted = false;
    s.selected_task = None;
    s.task_choice_made = false;
    s.awaiting_task_choice = false;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx() -> Context {
        Context {
            now: Local::now(),
            has_active_tasks: false,
        }
    }

    fn ctx_with_tasks() -> Context {
        Context {
            now: Local::now(),
            has_active_tasks: true,
        }
    }

    fn apply(state: &SessionEngineState, event: SessionEvent) -> Transition {
        transition(state, event, &ctx()).unwrap()
    }

    fn ready(duration: u32) -> SessionEngineState {
        let mut s = SessionEngineState::new(duration);
        s.selected_category = Some("Kodlama".to_string());
        s
    }

    fn running(duration: u32) -> SessionEngineState {
        apply(&ready(duration), SessionEvent::Start).state
    }

    fn persisted(effects: &[Effect]) -> Vec<&SessionRecord> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Persist(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn tick_n(mut state: SessionEngineState, n: u32) -> (SessionEngineState, Vec<Effect>) {
        let mut all = Vec::new();
        for _ in 0..n {
            let t = apply(&state, SessionEvent::Tick);
            state = t.state;
            all.extend(t.effects);
        }
        (state, all)
    }

    #[test]
    fn test_new_clamps_and_snaps_duration() {
        assert_eq!(SessionEngineState::new(60).session_duration, 300);
        assert_eq!(SessionEngineState::new(10_000).session_duration, 7200);
        assert_eq!(SessionEngineState::new(27 * 60).session_duration, 25 * 60);
        assert_eq!(SessionEngineState::default().phase(), Phase::Idle);
    }

    #[test]
    fn test_start_requires_category() {
        let state = SessionEngineState::new(1500);
        let err = transition(&state, SessionEvent::Start, &ctx()).unwrap_err();
        assert_eq!(err, ValidationError::NoCategory);
    }

    #[test]
    fn test_start_runs_and_arms_ticker() {
        let t = apply(&ready(1500), SessionEvent::Start);
        assert!(t.state.is_running);
        assert!(t.state.has_session_run);
        assert_eq!(t.state.phase(), Phase::Running);
        assert_eq!(t.effects, vec![Effect::StartTicker]);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let state = running(1500);
        let t = apply(&state, SessionEvent::Start);
        assert_eq!(t.state, state);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_tick_decrements_by_one() {
        let (state, effects) = tick_n(running(300), 10);
        assert_eq!(state.remaining_time, 290);
        assert!(state.is_running);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_tick_ignored_when_not_running() {
        let state = ready(300);
        let t = apply(&state, SessionEvent::Tick);
        assert_eq!(t.state, state);
    }

    #[test]
    fn test_timeout_credits_full_target() {
        let (state, effects) = tick_n(running(300), 300);

        assert_eq!(state.remaining_time, 0);
        assert!(!state.is_running);
        assert_eq!(state.phase(), Phase::Finished);
        assert!(effects.contains(&Effect::StopTicker));

        let records = persisted(&effects);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].actual_seconds, 300);
        assert_eq!(records[0].target_seconds, 300);
        assert_eq!(records[0].end_reason, EndReason::Finished);
    }

    #[test]
    fn test_remaining_never_below_zero() {
        let (state, _) = tick_n(running(300), 300);
        // Extra ticks after finishing are ignored
        let (state, effects) = tick_n(state, 5);
        assert_eq!(state.remaining_time, 0);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_finish_with_linked_task_prompts_completion() {
        let link = TaskLink {
            id: "t1".to_string(),
            name: "Essay".to_string(),
        };
        let mut state = ready(300);
        state = transition(&state, SessionEvent::Start, &ctx_with_tasks()).unwrap().state;
        assert!(state.awaiting_task_choice);

        state = apply(&state, SessionEvent::SelectTask(Some(link.clone()))).state;
        assert!(state.is_running);

        let (_, effects) = tick_n(state, 300);
        assert!(effects.contains(&Effect::PromptTaskCompletion(link.clone())));
        assert_eq!(persisted(&effects)[0].linked_task_name.as_deref(), Some("Essay"));
    }

    #[test]
    fn test_pause_freezes_remaining() {
        let (state, _) = tick_n(running(300), 5);
        let t = apply(&state, SessionEvent::Pause);
        assert!(!t.state.is_running);
        assert_eq!(t.state.phase(), Phase::Paused);
        assert_eq!(t.effects, vec![Effect::StopTicker]);

        let (paused, _) = tick_n(t.state, 3);
        assert_eq!(paused.remaining_time, 295);
    }

    #[test]
    fn test_pause_when_idle_is_noop() {
        let state = ready(300);
        let t = apply(&state, SessionEvent::Pause);
        assert_eq!(t.state, state);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_reset_records_elapsed_time() {
        let (state, _) = tick_n(running(1500), 120);
        let state = apply(&state, SessionEvent::Pause).state;
        let t = apply(&state, SessionEvent::Reset);

        let records = persisted(&t.effects);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].actual_seconds, 120);
        assert_eq!(records[0].target_seconds, 1500);
        assert_eq!(records[0].end_reason, EndReason::Reset);

        assert_eq!(t.state.remaining_time, 1500);
        assert_eq!(t.state.distraction_count, 0);
        assert!(!t.state.has_session_run);
        assert_eq!(t.state.phase(), Phase::Idle);
    }

    #[test]
    fn test_reset_without_progress_writes_nothing() {
        let t = apply(&running(1500), SessionEvent::Reset);
        assert!(persisted(&t.effects).is_empty());
        assert_eq!(t.effects, vec![Effect::StopTicker]);

        let t = apply(&ready(1500), SessionEvent::Reset);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_reset_after_finish_does_not_write_twice() {
        let (state, effects) = tick_n(running(300), 300);
        assert_eq!(persisted(&effects).len(), 1);

        let t = apply(&state, SessionEvent::Reset);
        assert!(persisted(&t.effects).is_empty());
        assert_eq!(t.state.remaining_time, 300);
    }

    #[test]
    fn test_start_after_finish_opens_new_session() {
        let (state, _) = tick_n(running(300), 300);
        let mut state = state;
        state.distraction_count = 3;

        let t = apply(&state, SessionEvent::Start);
        assert!(t.state.is_running);
        assert_eq!(t.state.remaining_time, 300);
        assert_eq!(t.state.distraction_count, 0);
        assert!(!t.state.persisted);
    }

    #[test]
    fn test_background_while_running_counts_distraction() {
        let state = running(1500);
        let t = apply(
            &state,
            SessionEvent::AppActivityChanged {
                previous: AppActivity::Active,
                next: AppActivity::Background,
            },
        );
        assert!(!t.state.is_running);
        assert_eq!(t.state.distraction_count, 1);
        assert_eq!(t.effects, vec![Effect::StopTicker]);

        // Coming back does not resume
        let back = apply(
            &t.state,
            SessionEvent::AppActivityChanged {
                previous: AppActivity::Background,
                next: AppActivity::Active,
            },
        );
        assert!(!back.state.is_running);
        assert_eq!(back.state.distraction_count, 1);
    }

    #[test]
    fn test_background_while_paused_or_idle_ignored() {
        let away = SessionEvent::AppActivityChanged {
            previous: AppActivity::Active,
            next: AppActivity::Inactive,
        };
        let paused = apply(&running(1500), SessionEvent::Pause).state;
        assert_eq!(apply(&paused, away.clone()).state, paused);

        let idle = ready(1500);
        assert_eq!(apply(&idle, away).state, idle);
    }

    #[test]
    fn test_distractions_accumulate_across_resumes() {
        let away = SessionEvent::AppActivityChanged {
            previous: AppActivity::Active,
            next: AppActivity::Background,
        };
        let mut state = running(1500);
        for _ in 0..3 {
            state = apply(&state, away.clone()).state;
            state = apply(&state, SessionEvent::Start).state;
        }
        assert_eq!(state.distraction_count, 3);
        assert!(state.is_running);
    }

    #[test]
    fn test_is_distraction_predicate() {
        assert!(is_distraction(AppActivity::Active, AppActivity::Background, true));
        assert!(is_distraction(AppActivity::Active, AppActivity::Inactive, true));
        assert!(!is_distraction(AppActivity::Inactive, AppActivity::Background, true));
        assert!(!is_distraction(AppActivity::Active, AppActivity::Background, false));
    }

    #[test]
    fn test_change_duration_while_running_rejected() {
        let state = running(1500);
        let err = transition(&state, SessionEvent::ChangeDuration(5), &ctx()).unwrap_err();
        assert_eq!(err, ValidationError::DurationLocked);
    }

    #[test]
    fn test_change_duration_resets_configuration() {
        let (state, _) = tick_n(running(1500), 30);
        let mut state = apply(&state, SessionEvent::Pause).state;
        state.distraction_count = 2;

        let t = apply(&state, SessionEvent::ChangeDuration(5));
        assert_eq!(t.state.session_duration, 1800);
        assert_eq!(t.state.remaining_time, 1800);
        assert_eq!(t.state.distraction_count, 0);
        assert!(!t.state.has_session_run);
        assert!(persisted(&t.effects).is_empty());
    }

    #[test]
    fn test_change_duration_bounds_and_step() {
        let state = ready(300);
        assert_eq!(
            transition(&state, SessionEvent::ChangeDuration(-5), &ctx()).unwrap_err(),
            ValidationError::DurationOutOfRange { min: 5, max: 120 }
        );
        assert_eq!(
            transition(&state, SessionEvent::ChangeDuration(3), &ctx()).unwrap_err(),
            ValidationError::InvalidStep(5)
        );

        let state = ready(7200);
        assert!(transition(&state, SessionEvent::ChangeDuration(5), &ctx()).is_err());
        assert_eq!(apply(&state, SessionEvent::ChangeDuration(-10)).state.session_duration, 6600);
    }

    #[test]
    fn test_task_gate_defers_start_until_choice() {
        let state = ready(1500);
        let t = transition(&state, SessionEvent::Start, &ctx_with_tasks()).unwrap();
        assert!(!t.state.is_running);
        assert!(t.state.awaiting_task_choice);
        assert_eq!(t.effects, vec![Effect::PromptTaskChoice]);

        // Skipping starts the deferred session
        let t = transition(&t.state, SessionEvent::SelectTask(None), &ctx_with_tasks()).unwrap();
        assert!(t.state.is_running);
        assert!(t.state.task_choice_made);
        assert_eq!(t.state.selected_task, None);
        assert_eq!(t.effects, vec![Effect::StartTicker]);

        // Resuming after a pause does not ask again
        let paused = apply(&t.state, SessionEvent::Pause).state;
        let t = transition(&paused, SessionEvent::Start, &ctx_with_tasks()).unwrap();
        assert!(t.state.is_running);
    }

    #[test]
    fn test_select_while_running_rejected() {
        let state = running(1500);
        assert_eq!(
            transition(&state, SessionEvent::SelectCategory("Proje".to_string()), &ctx()).unwrap_err(),
            ValidationError::SessionActive
        );
        assert_eq!(
            transition(&state, SessionEvent::SelectTask(None), &ctx()).unwrap_err(),
            ValidationError::SessionActive
        );
    }

    #[test]
    fn test_category_locked_while_session_open() {
        let (state, _) = tick_n(running(300), 30);
        let paused = apply(&state, SessionEvent::Pause).state;
        assert!(paused.is_session_open());
        assert_eq!(
            transition(&paused, SessionEvent::SelectCategory("Proje".to_string()), &ctx()).unwrap_err(),
            ValidationError::SessionActive
        );

        // After a reset the category can change again
        let reset = apply(&paused, SessionEvent::Reset).state;
        let t = apply(&reset, SessionEvent::SelectCategory("Proje".to_string()));
        assert_eq!(t.state.selected_category.as_deref(), Some("Proje"));

        // A finished session is already recorded, so the next one may switch
        let (finished, _) = tick_n(running(300), 300);
        assert!(!finished.is_session_open());
        let t = apply(&finished, SessionEvent::SelectCategory("Proje".to_string()));
        assert_eq!(t.state.selected_category.as_deref(), Some("Proje"));
    }

    #[test]
    fn test_cancel_task_choice_clears_deferred_start() {
        let deferred = transition(&ready(1500), SessionEvent::Start, &ctx_with_tasks())
            .unwrap()
            .state;
        assert!(deferred.awaiting_task_choice);

        let t = apply(&deferred, SessionEvent::CancelTaskChoice);
        assert!(!t.state.awaiting_task_choice);
        assert!(!t.state.is_running);
        assert!(!t.state.task_choice_made);
        assert!(t.effects.is_empty());

        // Starting again asks again
        let t = transition(&t.state, SessionEvent::Start, &ctx_with_tasks()).unwrap();
        assert_eq!(t.effects, vec![Effect::PromptTaskChoice]);
    }

    #[test]
    fn test_progress_ratio() {
        let (state, _) = tick_n(running(300), 150);
        assert!((state.progress_ratio() - 0.5).abs() < f64::EPSILON);
        assert_eq!(state.elapsed_seconds(), 150);
    }
}
