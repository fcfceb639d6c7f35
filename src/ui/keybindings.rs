use crate::domain::Tab;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hints for the active screen
fn hints_for(tab: Tab) -> Vec<&'static str> {
    let mut hints = match tab {
        Tab::Timer => vec![
            " Enter/Space start/pause   ",
            "r reset   ",
            "+ / - duration   ",
            "←/→ or 1-9 category   ",
            "c new category   ",
        ],
        Tab::Tasks => vec![" ↑/↓ select   ", "Enter toggle done   ", "a add   "],
        Tab::Reports => vec![" p week/month   ", "f filter   ", "R reload   "],
    };
    hints.push("Tab screen   ");
    hints.push("q quit");
    hints
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect, tab: Tab) {
    let hints = Line::from(hints_for(tab).into_iter().map(Span::raw).collect::<Vec<_>>());

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
