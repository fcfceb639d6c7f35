use crate::app::{AppState, FormKind};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn field_lines<'a>(label: &'a str, value: &'a str, editing: bool) -> Vec<Line<'a>> {
    vec![
        Line::raw(if editing {
            format!("{}: (editing)", label)
        } else {
            format!("{}:", label)
        }),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(value, modal_title_style()),
            if editing {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ]),
        Line::raw(""),
    ]
}

/// Render the input form for adding tasks/categories
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };
    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];

    let title_text = match form.kind {
        FormKind::Task => {
            lines.extend(field_lines("Name", &form.name, form.editing_field == 0));
            lines.extend(field_lines("Description", &form.description, form.editing_field == 1));
            lines.push(Line::raw("Tab to switch fields  ·  Enter to submit  ·  Esc to cancel"));
            " Add Task "
        }
        FormKind::Category => {
            lines.extend(field_lines("Name", &form.name, true));
            lines.push(Line::raw("Enter to submit  ·  Esc to cancel"));
            " Add Category "
        }
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title_text, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
