use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style, selected_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, modal_title_style()))
        .style(modal_bg_style())
}

/// Render a rejected-action notice
pub fn render_notice_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(message) = &app.notice else {
        return;
    };
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(format!("  {}", message), error_style())),
        Line::raw(""),
        Line::raw("  Press any key to continue."),
    ];

    let paragraph = Paragraph::new(lines)
        .block(modal_block(" Not now "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, modal_area);
}

/// Render the "which task is this session for?" prompt
pub fn render_task_choice_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw(""), Line::raw("  Link this session to a task?"), Line::raw("")];

    let options = app.task_choice_options();
    for (idx, task) in options.iter().enumerate() {
        let text = format!("  {}  ", task.name);
        lines.push(if idx == app.task_choice_index {
            Line::styled(text, selected_style())
        } else {
            Line::raw(text)
        });
    }
    let skip = "  (no task)  ";
    lines.push(if app.task_choice_index >= options.len() {
        Line::styled(skip, selected_style())
    } else {
        Line::raw(skip)
    });

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("  [Enter]", modal_title_style()),
        Span::raw(" Choose  "),
        Span::styled("[s]", modal_title_style()),
        Span::raw(" Skip  "),
        Span::styled("[Esc]", modal_title_style()),
        Span::raw(" Cancel"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(modal_block(" Choose Task "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, modal_area);
}

/// Render the "did you finish the task?" prompt after a session ends
pub fn render_task_completion_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(link) = &app.pending_completion else {
        return;
    };
    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw("  Session complete!"),
        Line::raw(""),
        Line::raw(format!("  Did you finish \"{}\"?", link.name)),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Yes, mark done  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Not yet"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(modal_block(" ⏱ Time's Up "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, modal_area);
}
