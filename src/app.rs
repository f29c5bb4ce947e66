use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::collections::HashMap;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::{ApiError, SurahClient, SurahDetail, SurahSummary, Verse};
use crate::jump::JumpController;
use crate::location::{self, ViewState};
use crate::search;

/// Lines kept above a jumped-to ayah so it does not sit flush with the top.
const JUMP_TOP_MARGIN: u16 = 1;

pub struct App {
    // Core state
    pub should_quit: bool,
    view: ViewState,
    location: String,

    // Surah list screen
    pub list_loading: bool,
    pub surahs: Vec<SurahSummary>,
    pub list_state: ListState,
    pub search_input: String,
    pub searching: bool,

    // Detail screen
    pub detail_loading: bool,
    detail_cache: HashMap<u16, SurahDetail>,
    pub content_scroll: u16,
    pub content_height: u16,
    pub content_width: u16,
    pub total_content_lines: u16,
    scroll_target: Option<u16>,

    // Verse jump
    pub jump: JumpController,
    pub dropdown_state: ListState,
    // Hit area for outside-press detection; set by the renderer only while
    // the dropdown is open, cleared on every close path.
    pub dropdown_area: Option<Rect>,

    // "Open location" prompt
    pub location_input: Option<String>,

    // Animation state
    pub animation_frame: u8,

    // In-flight fetches
    list_task: Option<JoinHandle<Result<Vec<SurahSummary>, ApiError>>>,
    detail_task: Option<(u16, JoinHandle<Result<SurahDetail, ApiError>>)>,

    client: SurahClient,
}

impl App {
    pub fn new(client: SurahClient, start_location: &str) -> Self {
        let mut app = Self {
            should_quit: false,
            view: ViewState::SurahList,
            location: location::encode(ViewState::SurahList),

            list_loading: false,
            surahs: Vec::new(),
            list_state: ListState::default(),
            search_input: String::new(),
            searching: false,

            detail_loading: false,
            detail_cache: HashMap::new(),
            content_scroll: 0,
            content_height: 0,
            content_width: 0,
            total_content_lines: 0,
            scroll_target: None,

            jump: JumpController::default(),
            dropdown_state: ListState::default(),
            dropdown_area: None,

            location_input: None,

            animation_frame: 0,

            list_task: None,
            detail_task: None,

            client,
        };

        if start_location.is_empty() {
            app.apply_view(ViewState::SurahList);
        } else {
            app.navigate_to(start_location);
        }
        app
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    // Navigation transitions. The location string is the source of truth:
    // internal transitions write it and re-derive, external changes
    // (startup argument, location prompt) are decoded and adopted.

    pub fn navigate_to(&mut self, location: &str) {
        self.location = location.to_string();
        self.apply_view(location::decode(location));
    }

    pub fn select_surah(&mut self, number: u16) {
        let view = ViewState::SurahDetail(number);
        self.location = location::encode(view);
        self.apply_view(view);
    }

    pub fn go_back(&mut self) {
        self.location = location::encode(ViewState::SurahList);
        self.apply_view(ViewState::SurahList);
    }

    fn apply_view(&mut self, view: ViewState) {
        let surah_changed = match (self.view, view) {
            (ViewState::SurahDetail(old), ViewState::SurahDetail(new)) => old != new,
            (_, ViewState::SurahDetail(_)) => true,
            _ => false,
        };
        let leaving_detail = matches!(self.view, ViewState::SurahDetail(_))
            && matches!(view, ViewState::SurahList);
        self.view = view;

        match view {
            ViewState::SurahList => {
                if leaving_detail {
                    self.reset_detail_state();
                }
                self.ensure_list();
            }
            ViewState::SurahDetail(number) => {
                if surah_changed {
                    self.reset_detail_state();
                    self.ensure_detail(number);
                }
            }
        }
    }

    fn reset_detail_state(&mut self) {
        self.jump.reset();
        self.dropdown_state = ListState::default();
        self.dropdown_area = None;
        self.content_scroll = 0;
        self.scroll_target = None;
        self.detail_loading = false;
    }

    // Fetch management. Fetches run as spawned tasks and are polled from the
    // main loop; every detail task carries the surah number it was issued
    // for, and its result only lands if that surah is still the active view.

    fn ensure_list(&mut self) {
        if !self.surahs.is_empty() || self.list_task.is_some() {
            return;
        }

        self.list_loading = true;
        let client = self.client.clone();
        self.list_task = Some(tokio::spawn(async move { client.fetch_surah_list().await }));
    }

    fn ensure_detail(&mut self, number: u16) {
        if self.detail_cache.contains_key(&number) {
            return;
        }

        if let Some((pending, _)) = &self.detail_task {
            if *pending == number {
                self.detail_loading = true;
                return;
            }
            debug!(surah = pending, "superseding in-flight detail fetch");
        }

        self.detail_loading = true;
        let client = self.client.clone();
        self.detail_task = Some((
            number,
            tokio::spawn(async move { client.fetch_surah_detail(number).await }),
        ));
    }

    /// Drain any finished fetch task. Called from the main loop between
    /// events, so completions interleave with input on one scheduler.
    pub async fn poll_fetches(&mut self) {
        if self.list_task.as_ref().is_some_and(|task| task.is_finished()) {
            if let Some(task) = self.list_task.take() {
                match task.await {
                    Ok(result) => self.apply_list_response(result),
                    Err(err) => {
                        warn!(error = %err, "surah list task failed");
                        self.list_loading = false;
                    }
                }
            }
        }

        if self
            .detail_task
            .as_ref()
            .is_some_and(|(_, task)| task.is_finished())
        {
            if let Some((number, task)) = self.detail_task.take() {
                match task.await {
                    Ok(result) => self.apply_detail_response(number, result),
                    Err(err) => {
                        warn!(surah = number, error = %err, "surah detail task failed");
                        self.detail_loading = false;
                    }
                }
            }
        }
    }

    fn apply_list_response(&mut self, result: Result<Vec<SurahSummary>, ApiError>) {
        match result {
            Ok(surahs) => {
                self.surahs = surahs;
                if !self.surahs.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            // Terminal for this attempt; the list renders empty.
            Err(err) => warn!(error = %err, "surah list fetch failed"),
        }
        self.list_loading = false;
    }

    fn apply_detail_response(&mut self, number: u16, result: Result<SurahDetail, ApiError>) {
        if self.view != ViewState::SurahDetail(number) {
            debug!(surah = number, "discarding stale detail response");
            return;
        }

        match result {
            Ok(detail) => {
                self.detail_cache.insert(number, detail);
            }
            Err(err) => warn!(surah = number, error = %err, "surah detail fetch failed"),
        }
        self.detail_loading = false;
    }

    // Surah list helpers

    pub fn visible_surahs(&self) -> Vec<&SurahSummary> {
        search::filter_surahs(&self.surahs, &self.search_input)
    }

    /// Keep the selection valid after the filter narrows or widens.
    pub fn clamp_list_selection(&mut self) {
        let len = self.visible_surahs().len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let i = self.list_state.selected().unwrap_or(0).min(len - 1);
            self.list_state.select(Some(i));
        }
    }

    pub fn list_nav_down(&mut self) {
        let len = self.visible_surahs().len();
        if len > 0 {
            let i = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn list_nav_up(&mut self) {
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(i.saturating_sub(1)));
    }

    pub fn list_nav_first(&mut self) {
        if !self.visible_surahs().is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn list_nav_last(&mut self) {
        let len = self.visible_surahs().len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }

    pub fn open_selected_surah(&mut self) {
        let number = self
            .list_state
            .selected()
            .and_then(|i| self.visible_surahs().get(i).map(|s| s.number));
        if let Some(number) = number {
            self.select_surah(number);
        }
    }

    // Detail helpers

    pub fn active_detail(&self) -> Option<&SurahDetail> {
        match self.view {
            ViewState::SurahDetail(number) => self.detail_cache.get(&number),
            ViewState::SurahList => None,
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll_target = None;
        let max_scroll = self.total_content_lines.saturating_sub(self.content_height);
        if self.content_scroll < max_scroll {
            self.content_scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_target = None;
        self.content_scroll = self.content_scroll.saturating_sub(1);
    }

    pub fn scroll_half_page_down(&mut self) {
        self.scroll_target = None;
        let half_page = self.content_height / 2;
        let max_scroll = self.total_content_lines.saturating_sub(self.content_height);
        self.content_scroll = (self.content_scroll + half_page).min(max_scroll);
    }

    pub fn scroll_half_page_up(&mut self) {
        self.scroll_target = None;
        let half_page = self.content_height / 2;
        self.content_scroll = self.content_scroll.saturating_sub(half_page);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_target = None;
        self.content_scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_target = None;
        self.content_scroll = self.total_content_lines.saturating_sub(self.content_height);
    }

    // Verse jump

    pub fn toggle_dropdown(&mut self) {
        if self.active_detail().is_none() {
            return;
        }

        self.jump.toggle_dropdown();
        if self.jump.dropdown_open() {
            let initial = self.jump.selected().map(|n| n as usize - 1).unwrap_or(0);
            self.dropdown_state.select(Some(initial));
        } else {
            self.dropdown_area = None;
        }
    }

    pub fn close_dropdown(&mut self) {
        self.jump.close_dropdown();
        self.dropdown_area = None;
    }

    pub fn dropdown_nav_down(&mut self) {
        let Some(count) = self.active_detail().map(|d| d.summary.verse_count as usize) else {
            return;
        };
        if count > 0 {
            let i = self.dropdown_state.selected().unwrap_or(0);
            self.dropdown_state.select(Some((i + 1).min(count - 1)));
        }
    }

    pub fn dropdown_nav_up(&mut self) {
        let i = self.dropdown_state.selected().unwrap_or(0);
        self.dropdown_state.select(Some(i.saturating_sub(1)));
    }

    pub fn jump_to_selected_dropdown(&mut self) {
        if let Some(i) = self.dropdown_state.selected() {
            self.jump_to_ayat((i + 1) as u16);
        }
    }

    pub fn jump_to_ayat(&mut self, number: u16) {
        let (verse_count, offsets) = match self.active_detail() {
            Some(detail) => (
                detail.summary.verse_count,
                verse_line_offsets(&detail.verses, self.content_width),
            ),
            None => return,
        };

        let mut target = None;
        let accepted = self.jump.jump_to(
            number,
            verse_count,
            |n| offsets.get(n as usize - 1).copied(),
            |line| target = Some(line),
            Instant::now(),
        );
        if !accepted {
            return;
        }

        self.dropdown_area = None;
        if let Some(line) = target {
            let max_scroll = self.total_content_lines.saturating_sub(self.content_height);
            self.scroll_target = Some(line.saturating_sub(JUMP_TOP_MARGIN).min(max_scroll));
        }
    }

    // Tick handling

    pub fn on_tick(&mut self) {
        self.jump.tick(Instant::now());
        self.animate_scroll();
        if self.list_loading || self.detail_loading {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Ease the viewport toward the jump target a few lines per tick.
    fn animate_scroll(&mut self) {
        let Some(target) = self.scroll_target else {
            return;
        };
        if self.content_scroll == target {
            self.scroll_target = None;
            return;
        }

        let step = (self.content_scroll.abs_diff(target) / 4).max(1);
        if self.content_scroll < target {
            self.content_scroll = (self.content_scroll + step).min(target);
        } else {
            self.content_scroll = self.content_scroll.saturating_sub(step).max(target);
        }
    }
}

/// Split text into display lines of at most `wrap` characters. Empty text
/// still occupies one line. The renderer and the jump locator both go
/// through this, so scroll offsets agree with what is on screen.
pub fn wrap_chars(text: &str, wrap: usize) -> Vec<String> {
    let wrap = wrap.max(1);
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(wrap)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

pub fn verse_display_lines(verse: &Verse, wrap: usize) -> u16 {
    (wrap_chars(&verse.text_arabic, wrap).len()
        + wrap_chars(&verse.text_latin, wrap).len()
        + wrap_chars(&verse.text_translation, wrap).len()
        + 1) as u16
}

/// Start line of every ayah within the rendered verse body.
pub fn verse_line_offsets(verses: &[Verse], width: u16) -> Vec<u16> {
    let wrap = width.max(1) as usize;
    let mut offsets = Vec::with_capacity(verses.len());
    let mut line = 0u16;
    for verse in verses {
        offsets.push(line);
        line = line.saturating_add(verse_display_lines(verse, wrap));
    }
    offsets
}
