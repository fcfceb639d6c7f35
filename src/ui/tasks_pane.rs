use crate::app::AppState;
use crate::domain::{active_tasks, done_tasks};
use crate::ui::styles::{border_style, default_style, done_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the task list. Active and done tasks share one list in stored order.
pub fn render_tasks_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let (marker, style) = if task.completed {
                ("[x] ", done_style())
            } else {
                ("[ ] ", default_style())
            };

            let mut spans = vec![Span::styled(marker, style), Span::styled(task.name.clone(), style)];
            if !task.description.is_empty() {
                spans.push(Span::styled(format!("  {}", task.description), border_style()));
            }

            let item = ListItem::new(Line::from(spans));
            if idx == app.task_index {
                item.style(selected_style())
            } else {
                item
            }
        })
        .collect();

    let title = format!(
        " Tasks ({} active, {} done) ",
        active_tasks(&app.tasks).len(),
        done_tasks(&app.tasks).len()
    );
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
