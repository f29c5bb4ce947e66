use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
};

use crate::api::SurahDetail;
use crate::app::{App, wrap_chars};
use crate::location::ViewState;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.view() {
        ViewState::SurahList => render_list_screen(app, frame, body_area),
        ViewState::SurahDetail(_) => render_detail_screen(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);

    if app.location_input.is_some() {
        render_location_prompt(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" My Qur'an ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(app.location().to_string(), Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_list_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let [search_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    let search_style = if app.searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(app.search_input.as_str()).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search Surah "),
    );
    frame.render_widget(search, search_area);

    if app.list_loading {
        render_centered_note(frame, list_area, &loading_label("Loading surahs", app));
        return;
    }

    let items: Vec<ListItem> = app
        .visible_surahs()
        .iter()
        .map(|surah| {
            let line = Line::from(vec![
                Span::styled(
                    format!("{:>3}. ", surah.number),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    surah.name_latin.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(surah.name.clone(), Style::default().fg(Color::Cyan)),
                Span::raw("  "),
                Span::styled(
                    format!(
                        "{} • {} Ayat • {}",
                        surah.revelation.label(),
                        surah.verse_count,
                        surah.meaning
                    ),
                    Style::default().fg(Color::Gray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    if items.is_empty() {
        let message = if app.search_input.is_empty() {
            "No surahs available".to_string()
        } else {
            format!("No surah found matching \"{}\"", app.search_input)
        };
        render_centered_note(frame, list_area, &message);
        return;
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Surahs "))
        .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
        .highlight_symbol("› ");
    frame.render_stateful_widget(list, list_area, &mut app.list_state);
}

fn render_detail_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let [hero_area, body_area] =
        Layout::vertical([Constraint::Length(5), Constraint::Min(0)]).areas(area);

    // Inner text width of the verse body; the jump locator wraps at the same
    // width, so its offsets match what lands on screen.
    let wrap = body_area.width.saturating_sub(7).max(10) as usize;

    let Some(detail) = app.active_detail() else {
        let note = if app.detail_loading {
            loading_label("Loading surah", app)
        } else {
            "Nothing here. Press Esc to go back.".to_string()
        };
        frame.render_widget(
            Block::default().borders(Borders::ALL).title(" My Qur'an "),
            hero_area,
        );
        render_centered_note(frame, body_area, &note);
        return;
    };

    let hero_lines = build_hero_lines(detail, app.jump.selected());
    let body_lines = build_verse_lines(detail, wrap, app.jump.highlighted(), app.jump.selected());
    let verse_count = detail.summary.verse_count;

    app.content_width = wrap as u16;
    app.content_height = body_area.height.saturating_sub(2);
    app.total_content_lines = body_lines.len() as u16;
    let max_scroll = app.total_content_lines.saturating_sub(app.content_height);
    app.content_scroll = app.content_scroll.min(max_scroll);

    let hero = Paragraph::new(Text::from(hero_lines))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(hero, hero_area);

    let body = Paragraph::new(Text::from(body_lines))
        .block(Block::default().borders(Borders::ALL))
        .scroll((app.content_scroll, 0));
    frame.render_widget(body, body_area);

    let mut scrollbar_state =
        ScrollbarState::new(max_scroll as usize).position(app.content_scroll as usize);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        body_area,
        &mut scrollbar_state,
    );

    if app.jump.dropdown_open() {
        render_jump_dropdown(app, frame, area, verse_count);
    }
}

fn build_hero_lines(detail: &SurahDetail, selected: Option<u16>) -> Vec<Line<'static>> {
    let summary = &detail.summary;

    let ayat_label = match selected {
        Some(number) => format!("Ayat {}", number),
        None => "Ayat".to_string(),
    };

    vec![
        Line::from(Span::styled(
            summary.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} — {}", summary.name_latin, summary.meaning),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} • {} Ayat • [a] {}",
                summary.revelation.label(),
                summary.verse_count,
                ayat_label
            ),
            Style::default().fg(Color::Gray),
        )),
    ]
}

fn build_verse_lines(
    detail: &SurahDetail,
    wrap: usize,
    highlighted: Option<u16>,
    selected: Option<u16>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for verse in &detail.verses {
        let base = if highlighted == Some(verse.number) {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let number_style = if selected == Some(verse.number) {
            base.fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            base.fg(Color::Cyan)
        };

        let mut arabic = wrap_chars(&verse.text_arabic, wrap).into_iter();
        if let Some(first) = arabic.next() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:>3} ", verse.number), number_style),
                Span::styled(first, base.add_modifier(Modifier::BOLD)),
            ]));
        }
        for chunk in arabic {
            lines.push(Line::from(vec![
                Span::styled("    ".to_string(), base),
                Span::styled(chunk, base.add_modifier(Modifier::BOLD)),
            ]));
        }

        for chunk in wrap_chars(&verse.text_latin, wrap) {
            lines.push(Line::from(vec![
                Span::styled("    ".to_string(), base),
                Span::styled(chunk, base.fg(Color::Cyan).add_modifier(Modifier::ITALIC)),
            ]));
        }

        for chunk in wrap_chars(&verse.text_translation, wrap) {
            lines.push(Line::from(vec![
                Span::styled("    ".to_string(), base),
                Span::styled(chunk, base.fg(Color::Gray)),
            ]));
        }

        lines.push(Line::default());
    }

    lines
}

fn render_jump_dropdown(app: &mut App, frame: &mut Frame, area: Rect, verse_count: u16) {
    let width = 22u16.min(area.width);
    let height = (verse_count + 2).min(14).min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let items: Vec<ListItem> = (1..=verse_count)
        .map(|number| {
            let marker = if app.jump.selected() == Some(number) {
                "● "
            } else {
                "  "
            };
            ListItem::new(format!("{}Ayat {}", marker, number))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Jump to Ayat "),
        )
        .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black));

    frame.render_widget(Clear, popup);
    frame.render_stateful_widget(list, popup, &mut app.dropdown_state);

    // Published for outside-press hit-testing while the dropdown is open.
    app.dropdown_area = Some(popup);
}

fn render_location_prompt(app: &App, frame: &mut Frame, area: Rect) {
    let width = area.width.min(44);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(3) / 2,
        width,
        height: 3u16.min(area.height),
    };

    let input = app.location_input.as_deref().unwrap_or("");
    let prompt = Paragraph::new(input).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Open location (e.g. #/chapter/36) "),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(prompt, popup);
}

fn render_centered_note(frame: &mut Frame, area: Rect, message: &str) {
    let note = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(note, area);
}

fn loading_label(prefix: &str, app: &App) -> String {
    format!("{}{}", prefix, ".".repeat(app.animation_frame as usize + 1))
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);
    let hint = |key: &'static str, label: &'static str| {
        [
            Span::styled(key, key_style),
            Span::styled(label, label_style),
        ]
    };

    let hints: Vec<Span> = if app.location_input.is_some() {
        [hint(" Enter ", " go "), hint(" Esc ", " cancel ")]
            .concat()
    } else {
        match app.view() {
            ViewState::SurahList => {
                if app.searching {
                    [hint(" type ", " filter "), hint(" Enter/Esc ", " done ")].concat()
                } else {
                    [
                        hint(" j/k ", " nav "),
                        hint(" Enter ", " open "),
                        hint(" / ", " search "),
                        hint(" o ", " location "),
                        hint(" q ", " quit "),
                    ]
                    .concat()
                }
            }
            ViewState::SurahDetail(_) => {
                if app.jump.dropdown_open() {
                    [
                        hint(" j/k ", " pick "),
                        hint(" Enter ", " jump "),
                        hint(" Esc ", " close "),
                    ]
                    .concat()
                } else {
                    [
                        hint(" j/k ", " scroll "),
                        hint(" a ", " ayat "),
                        hint(" o ", " location "),
                        hint(" Esc ", " back "),
                        hint(" q ", " quit "),
                    ]
                    .concat()
                }
            }
        }
    };

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}
