pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod reports_pane;
pub mod styles;
pub mod tasks_pane;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::{Tab, UiMode};
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::{render_notice_modal, render_task_choice_modal, render_task_completion_modal};
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};
use reports_pane::render_reports_pane;
use styles::{border_style, selected_style, title_style};
use tasks_pane::render_tasks_pane;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area, app.tab);

    let titles: Vec<Line> = Tab::all().iter().map(|t| Line::from(t.name())).collect();
    let selected = Tab::all().iter().position(|t| *t == app.tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" odak ", title_style())),
        )
        .select(selected)
        .highlight_style(selected_style());
    f.render_widget(tabs, layout.tabs_area);

    match app.tab {
        Tab::Timer => render_timer_pane(f, app, layout.body_area),
        Tab::Tasks => render_tasks_pane(f, app, layout.body_area),
        Tab::Reports => render_reports_pane(f, app, layout.body_area),
    }

    match app.ui_mode {
        UiMode::Normal => {}
        UiMode::Notice => render_notice_modal(f, app, size),
        UiMode::TaskChoice => render_task_choice_modal(f, app, size),
        UiMode::TaskCompletion => render_task_completion_modal(f, app, size),
        UiMode::AddingTask | UiMode::AddingCategory => render_input_form(f, app, size),
    }
}
