use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::DayView;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::date_header::HEADER_HEIGHT;
use crate::tui::components::{DateHeader, HelpBar, NoteBody};
use crate::tui::keymap::DEFAULT_KEYMAP;

/// Horizontal breathing room around the note body.
const BODY_MARGIN: u16 = 2;

pub fn draw_ui(frame: &mut Frame, app: &DayView, tui: &mut TuiState) {
    let [header_area, body_area, help_area] = layout(frame.area());

    DateHeader::new(app.date, tui.palette.muted).render(frame, header_area);

    NoteBody::new(&mut tui.body, &app.content, tui.render_markdown, &tui.palette)
        .render(frame, body_area);

    HelpBar::new(&DEFAULT_KEYMAP, &tui.palette).render(frame, help_area);
}

fn layout(area: Rect) -> [Rect; 3] {
    use Constraint::{Length, Min};
    let [header, body, _spacer, help] =
        Layout::vertical([Length(HEADER_HEIGHT), Min(0), Length(1), Length(1)]).areas(area);
    let [_, body, _] =
        Layout::horizontal([Length(BODY_MARGIN), Min(0), Length(BODY_MARGIN)]).areas(body);
    let [_, help, _] =
        Layout::horizontal([Length(BODY_MARGIN), Min(0), Length(BODY_MARGIN)]).areas(help);
    [header, body, help]
}
