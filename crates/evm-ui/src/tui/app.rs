//! Console state and event loop

use super::input::TextInput;
use super::ui;
use crate::photo::{PhotoLoader, decode_photo};
use anyhow::Result;
use crossterm::{
    cursor::SetCursorStyle,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use evm_core::{
    ElectionResult, MarkOutcome, Party, PollingBridge, Selection, SignalSource, TickOutcome,
    Ticker, VoteStore, Voter, mark_voted,
};
use image::DynamicImage;
use log::{debug, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend, widgets::ListState};
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

const SEARCH_DEBOUNCE: Duration = Duration::from_millis(150);
const TOAST_DURATION: Duration = Duration::from_secs(3);
const MAX_INPUT_WAIT: Duration = Duration::from_millis(250);

/// Toast notification state
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
    pub is_error: bool,
}

impl Toast {
    pub fn new(message: String, duration: Duration) -> Self {
        Self {
            message,
            expires_at: Instant::now() + duration,
            is_error: false,
        }
    }

    pub fn error(message: String, duration: Duration) -> Self {
        Self {
            is_error: true,
            ..Self::new(message, duration)
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    /// Period of the device polling tick
    pub poll_interval: Duration,
    /// Edge length photos are scaled to, in pixels
    pub photo_size: u32,
    /// Shown in the status bar
    pub device_label: String,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            photo_size: 200,
            device_label: "no device".to_string(),
        }
    }
}

/// Modal dialog drawn over the console. Esc or Enter closes it; Ctrl+C still quits.
#[derive(Debug, Clone)]
pub enum Popup {
    Info(String),
    Error(String),
    Results(ElectionResult),
}

/// Application state
pub struct App<S, D> {
    store: S,
    bridge: PollingBridge<D>,
    ticker: Ticker,
    loader: Box<dyn PhotoLoader>,
    pub options: ConsoleOptions,
    pub search_input: TextInput,
    /// Voters matching the last search that ran
    pub voters: Vec<Voter>,
    /// Highlighted row in `voters`
    pub list_state: ListState,
    pub selection: Selection,
    /// Photo of the selected voter, `None` shows the placeholder
    pub photo: Option<DynamicImage>,
    pub photo_protocol: Option<StatefulProtocol>,
    /// Image picker for rendering (None until the terminal has been queried)
    pub picker: Option<Picker>,
    pub parties: Vec<Party>,
    pub toast: Option<Toast>,
    pub popup: Option<Popup>,
    pub should_quit: bool,
    /// Time of the last search edit that has not been searched yet
    search_pending_since: Option<Instant>,
}

impl<S: VoteStore, D: SignalSource> App<S, D> {
    pub fn new(
        store: S,
        bridge: PollingBridge<D>,
        loader: Box<dyn PhotoLoader>,
        options: ConsoleOptions,
    ) -> Self {
        let mut app = Self {
            store,
            bridge,
            ticker: Ticker::new(options.poll_interval, Instant::now()),
            loader,
            options,
            search_input: TextInput::new(),
            voters: Vec::new(),
            list_state: ListState::default(),
            selection: Selection::new(),
            photo: None,
            photo_protocol: None,
            picker: None,
            parties: Vec::new(),
            toast: None,
            popup: None,
            should_quit: false,
            search_pending_since: None,
        };
        app.refresh();
        app
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn highlighted(&self) -> Option<&Voter> {
        self.list_state.selected().and_then(|i| self.voters.get(i))
    }

    /// Re-run the current search and re-read the tallies
    pub fn refresh(&mut self) {
        if let Err(e) = self.reload_voters(true) {
            self.show_error(format!("Error searching voters: {e}"));
            return;
        }
        if let Err(e) = self.reload_parties() {
            self.show_error(format!("Error reading vote tallies: {e}"));
        }
    }

    fn reload_voters(&mut self, keep_highlight: bool) -> Result<(), S::Error> {
        let query = self.search_input.text.clone();
        self.voters = self.store.search_voters(&query)?;
        debug!("Search {query:?} matched {} voters", self.voters.len());

        let highlight = match self.list_state.selected() {
            _ if self.voters.is_empty() => None,
            Some(i) if keep_highlight => Some(i.min(self.voters.len() - 1)),
            _ => Some(0),
        };
        self.list_state.select(highlight);
        Ok(())
    }

    fn reload_parties(&mut self) -> Result<(), S::Error> {
        self.parties = self.store.parties()?;
        Ok(())
    }

    fn show_error(&mut self, message: String) {
        warn!("{message}");
        self.popup = Some(Popup::Error(message));
    }

    fn notify(&mut self, message: String) {
        self.toast = Some(Toast::new(message, TOAST_DURATION));
    }

    fn notify_error(&mut self, message: String) {
        self.toast = Some(Toast::error(message, TOAST_DURATION));
    }

    /// Run the pending search once typing has paused
    pub fn maybe_search(&mut self, now: Instant) {
        if let Some(since) = self.search_pending_since
            && now.saturating_duration_since(since) >= SEARCH_DEBOUNCE
        {
            self.run_pending_search();
        }
    }

    /// Run the pending search now. Returns false if the search failed.
    fn run_pending_search(&mut self) -> bool {
        if self.search_pending_since.take().is_none() {
            return true;
        }
        match self.reload_voters(false) {
            Ok(()) => true,
            Err(e) => {
                self.show_error(format!("Error searching voters: {e}"));
                false
            }
        }
    }

    /// Run one bridge step if the polling tick is due
    pub fn on_tick(&mut self, now: Instant) {
        if !self.ticker.fire(now) {
            return;
        }
        let outcome = self.bridge.step(&mut self.store, &mut self.selection);
        self.apply_tick(outcome);
    }

    /// Errors here come from background polling; they are logged and toasted,
    /// never shown as a dialog.
    fn apply_tick(&mut self, outcome: TickOutcome) {
        if outcome.changes_tallies()
            && let Err(e) = self.reload_parties()
        {
            warn!("Failed to refresh tallies: {e}");
            self.notify_error(format!("Could not refresh tallies: {e}"));
        }
        if outcome.changes_voters()
            && let Err(e) = self.reload_voters(true)
        {
            warn!("Failed to refresh voter list: {e}");
            self.notify_error(format!("Could not refresh voters: {e}"));
        }

        match outcome {
            TickOutcome::Idle | TickOutcome::Voted(_) | TickOutcome::Unrecognized(_) => {}
            TickOutcome::MarkedVoted(voter) => {
                self.notify(format!("{} marked as voted", voter.name));
            }
            TickOutcome::AlreadyVoted(voter) => {
                self.notify(format!("{} has already voted", voter.name));
            }
            TickOutcome::VoterMissing(voter) => {
                self.clear_photo();
                self.notify_error(format!("Voter {} no longer exists", voter.id));
            }
            TickOutcome::NoSelection => {
                self.notify_error("Mark-voted signal ignored: no voter selected".to_string());
            }
            TickOutcome::UnknownParty(party) => {
                self.notify_error(format!("Vote for unknown party {party} ignored"));
            }
            TickOutcome::Failed(message) => self.notify_error(message),
        }
    }

    /// How long the loop may block on terminal input
    fn input_wait(&self, now: Instant) -> Duration {
        let mut wait = self.ticker.time_until_due(now).min(MAX_INPUT_WAIT);
        if let Some(since) = self.search_pending_since {
            wait = wait.min((since + SEARCH_DEBOUNCE).saturating_duration_since(now));
        }
        wait
    }

    fn move_highlight(&mut self, delta: isize) {
        if self.voters.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = current
            .saturating_add_signed(delta)
            .min(self.voters.len() - 1);
        self.list_state.select(Some(next));
    }

    /// Load the highlighted voter's current record and photo
    fn select_highlighted(&mut self) {
        // The highlight must refer to the list for the query as typed
        if !self.run_pending_search() {
            return;
        }
        let Some(id) = self.highlighted().map(|v| v.id.clone()) else {
            return;
        };

        match self.store.voter(&id) {
            Ok(Some(voter)) => {
                info!("Selected voter {} ({})", voter.id, voter.name);
                self.selection.select(voter);
                self.load_photo();
            }
            Ok(None) => {
                self.selection.clear();
                self.clear_photo();
                self.notify_error(format!("Voter {id} no longer exists"));
                if let Err(e) = self.reload_voters(true) {
                    self.show_error(format!("Error searching voters: {e}"));
                }
            }
            Err(e) => self.show_error(format!("Error loading voter {id}: {e}")),
        }
    }

    fn clear_photo(&mut self) {
        self.photo = None;
        self.photo_protocol = None;
    }

    /// Failure leaves the placeholder in place; selection is unaffected
    fn load_photo(&mut self) {
        self.clear_photo();
        let Some(voter) = self.selection.current() else {
            return;
        };
        let url = voter.image_url.trim();
        if url.is_empty() {
            return;
        }

        let size = self.options.photo_size;
        match self
            .loader
            .load(url)
            .and_then(|bytes| decode_photo(&bytes, size))
        {
            Ok(img) => {
                if let Some(picker) = &self.picker {
                    self.photo_protocol = Some(picker.new_resize_protocol(img.clone()));
                }
                self.photo = Some(img);
            }
            Err(e) => warn!("Could not load photo for voter {}: {e}", voter.id),
        }
    }

    fn mark_selected_voted(&mut self) {
        match mark_voted(&mut self.store, &mut self.selection) {
            Ok(MarkOutcome::Marked(voter)) => {
                self.popup = Some(Popup::Info(format!(
                    "{} ({}) marked as voted",
                    voter.name, voter.id
                )));
                if let Err(e) = self.reload_voters(true) {
                    self.show_error(format!("Error searching voters: {e}"));
                }
            }
            Ok(MarkOutcome::AlreadyVoted(voter)) => {
                self.notify(format!("{} has already voted", voter.name));
            }
            Ok(MarkOutcome::Missing(voter)) => {
                self.clear_photo();
                self.notify_error(format!("Voter {} no longer exists", voter.id));
                if let Err(e) = self.reload_voters(true) {
                    self.show_error(format!("Error searching voters: {e}"));
                }
            }
            Ok(MarkOutcome::NoSelection) => self.notify_error("Select a voter first".to_string()),
            Err(e) => self.show_error(format!("Error marking voter as voted: {e}")),
        }
    }

    fn end_voting(&mut self) {
        match self.store.parties() {
            Ok(parties) => {
                let result = ElectionResult::from_parties(parties.clone());
                info!(
                    "Voting ended with {} votes across {} parties",
                    result.total_votes,
                    parties.len()
                );
                self.parties = parties;
                self.popup = Some(Popup::Results(result));
            }
            Err(e) => self.show_error(format!("Error reading vote tallies: {e}")),
        }
    }

    /// Clear expired toast
    fn update_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    fn mark_search_dirty(&mut self) {
        self.search_pending_since = Some(Instant::now());
    }

    /// Handle input event
    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.popup.is_some() {
            match (key.code, key.modifiers) {
                (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.should_quit = true,
                (KeyCode::Esc | KeyCode::Enter, _) => self.popup = None,
                _ => {}
            }
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            (KeyCode::Up, _) => self.move_highlight(-1),
            (KeyCode::Down, _) => self.move_highlight(1),
            (KeyCode::Enter, _) => self.select_highlighted(),
            (KeyCode::Char('v'), KeyModifiers::CONTROL) => self.mark_selected_voted(),
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => self.end_voting(),
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => self.refresh(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.search_input.clear();
                self.mark_search_dirty();
            }
            _ => {
                if self.search_input.handle_key(key.code, key.modifiers) {
                    self.mark_search_dirty();
                }
            }
        }
    }
}

/// Run the console until the operator quits
pub fn run<S: VoteStore, D: SignalSource>(app: &mut App<S, D>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetCursorStyle::BlinkingBar)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if app.picker.is_none() {
        let picker = Picker::from_query_stdio().unwrap_or_else(|e| {
            debug!("Terminal graphics query failed ({e:?}), using half blocks");
            Picker::halfblocks()
        });
        app.picker = Some(picker);
    }

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        SetCursorStyle::DefaultUserShape
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop<S: VoteStore, D: SignalSource>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S, D>,
) -> Result<()> {
    loop {
        let now = Instant::now();
        app.update_toast();
        app.maybe_search(now);
        app.on_tick(now);

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(app.input_wait(Instant::now()))? {
            let event = event::read()?;
            app.handle_event(event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhotoError;
    use crate::photo::tests::png_bytes;
    use crossterm::event::KeyEvent;
    use evm_core::{PartyId, SignalMap};
    use evm_db::{Database, sample_parties, sample_voters};
    use std::collections::VecDeque;

    struct ScriptedDevice(VecDeque<String>);

    impl SignalSource for ScriptedDevice {
        type Error = io::Error;

        fn poll(&mut self) -> std::result::Result<Option<String>, io::Error> {
            Ok(self.0.pop_front())
        }
    }

    struct StubLoader {
        fail: bool,
    }

    impl PhotoLoader for StubLoader {
        fn load(&self, _url: &str) -> std::result::Result<Vec<u8>, PhotoError> {
            if self.fail {
                Err(PhotoError::Status(404))
            } else {
                Ok(png_bytes(330, 412))
            }
        }
    }

    type TestApp = App<Database, ScriptedDevice>;

    fn app_with(lines: &[&str], photo_fails: bool) -> TestApp {
        let mut db = Database::open_in_memory().unwrap();
        db.populate_voters(&sample_voters()).unwrap();
        db.populate_parties(&sample_parties()).unwrap();

        let device = ScriptedDevice(lines.iter().map(|l| l.to_string()).collect());
        let bridge = PollingBridge::new(device, SignalMap::default());
        App::new(
            db,
            bridge,
            Box::new(StubLoader { fail: photo_fails }),
            ConsoleOptions::default(),
        )
    }

    fn press(app: &mut TestApp, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn ctrl(app: &mut TestApp, c: char) {
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )));
    }

    fn type_search(app: &mut TestApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        app.maybe_search(Instant::now() + Duration::from_secs(1));
    }

    /// Tick far enough apart that every call is due
    fn tick(app: &mut TestApp, n: u64) {
        app.on_tick(Instant::now() + Duration::from_secs(n));
    }

    #[test]
    fn test_starts_with_everyone_listed() {
        let app = app_with(&[], false);
        assert_eq!(app.voters.len(), 7);
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(app.parties.len(), 3);
        assert!(app.selection.current().is_none());
    }

    #[test]
    fn test_search_waits_for_debounce() {
        let mut app = app_with(&[], false);
        for c in "gandhi".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        app.maybe_search(Instant::now() - Duration::from_secs(1));
        assert_eq!(app.voters.len(), 7);

        app.maybe_search(Instant::now() + Duration::from_secs(1));
        assert_eq!(app.voters.len(), 1);
        assert_eq!(app.voters[0].name, "Rahul Gandhi");
    }

    #[test]
    fn test_clear_search_lists_everyone() {
        let mut app = app_with(&[], false);
        type_search(&mut app, "zzz");
        assert!(app.voters.is_empty());
        assert_eq!(app.list_state.selected(), None);

        ctrl(&mut app, 'u');
        app.maybe_search(Instant::now() + Duration::from_secs(1));
        assert_eq!(app.voters.len(), 7);
    }

    #[test]
    fn test_select_loads_voter_and_photo() {
        let mut app = app_with(&[], false);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        let voter = app.selection.current().unwrap();
        assert_eq!(voter.id, "2");
        assert!(app.selection.can_mark_voted());

        let photo = app.photo.as_ref().unwrap();
        assert_eq!((photo.width(), photo.height()), (200, 200));
    }

    #[test]
    fn test_photo_failure_keeps_selection() {
        let mut app = app_with(&[], true);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.selection.current().unwrap().id, "1");
        assert!(app.photo.is_none());
        assert!(app.popup.is_none());
    }

    #[test]
    fn test_mark_voted_then_again() {
        let mut app = app_with(&[], false);
        type_search(&mut app, "kasula");
        press(&mut app, KeyCode::Enter);

        ctrl(&mut app, 'v');
        assert!(matches!(app.popup, Some(Popup::Info(_))));
        assert!(app.voters[0].has_voted);
        assert!(app.store().voter("4").unwrap().unwrap().has_voted);

        press(&mut app, KeyCode::Esc);
        assert!(app.popup.is_none());
        assert!(!app.should_quit);

        ctrl(&mut app, 'v');
        assert!(app.popup.is_none());
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.message, "Kasula Raghu has already voted");
    }

    #[test]
    fn test_mark_voted_without_selection() {
        let mut app = app_with(&[], false);
        ctrl(&mut app, 'v');
        assert!(app.toast.as_ref().unwrap().is_error);
        assert!(app.store().all_voters().unwrap().iter().all(|v| !v.has_voted));
    }

    #[test]
    fn test_enter_right_after_typing_selects_from_new_results() {
        let mut app = app_with(&["4"], false);
        for c in "gandhi".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.voters.len(), 1);
        assert_eq!(app.selection.current().unwrap().name, "Rahul Gandhi");

        tick(&mut app, 1);
        assert!(app.store().voter("2").unwrap().unwrap().has_voted);
        assert!(!app.store().voter("1").unwrap().unwrap().has_voted);
    }

    #[test]
    fn test_enter_with_no_matches_selects_nobody() {
        let mut app = app_with(&[], false);
        for c in "zzz".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert!(app.voters.is_empty());
        assert!(app.selection.current().is_none());
    }

    #[test]
    fn test_mark_voted_after_voter_removed() {
        let mut app = app_with(&[], false);
        press(&mut app, KeyCode::Enter);
        app.store.delete_all_voters().unwrap();

        ctrl(&mut app, 'v');

        let toast = app.toast.as_ref().unwrap();
        assert!(toast.is_error);
        assert_eq!(toast.message, "Voter 1 no longer exists");
        assert!(app.selection.current().is_none());
        assert!(app.photo.is_none());
        assert!(app.voters.is_empty());
    }

    #[test]
    fn test_device_mark_after_voter_removed() {
        let mut app = app_with(&["4"], false);
        press(&mut app, KeyCode::Enter);
        app.store.delete_all_voters().unwrap();

        tick(&mut app, 1);

        assert_eq!(
            app.toast.as_ref().unwrap().message,
            "Voter 1 no longer exists"
        );
        assert!(app.selection.current().is_none());
        assert!(app.voters.is_empty());
        assert!(app.popup.is_none());
    }

    #[test]
    fn test_popup_ignores_other_keys() {
        let mut app = app_with(&[], false);
        ctrl(&mut app, 'e');
        press(&mut app, KeyCode::Char('x'));
        assert!(matches!(app.popup, Some(Popup::Results(_))));
        assert!(app.search_input.text.is_empty());

        press(&mut app, KeyCode::Enter);
        assert!(app.popup.is_none());
    }

    #[test]
    fn test_device_votes_refresh_tallies() {
        let mut app = app_with(&["1", "1", "3"], false);
        tick(&mut app, 1);
        tick(&mut app, 2);
        tick(&mut app, 3);
        let votes: Vec<u64> = app.parties.iter().map(|p| p.votes).collect();
        assert_eq!(votes, vec![2, 0, 1]);
    }

    #[test]
    fn test_tick_waits_for_period() {
        let mut app = app_with(&["1", "1"], false);
        let now = Instant::now() + Duration::from_secs(1);
        app.on_tick(now);
        app.on_tick(now);
        assert_eq!(app.parties[0].votes, 1);
    }

    #[test]
    fn test_device_mark_voted_code() {
        let mut app = app_with(&["4"], false);
        press(&mut app, KeyCode::Enter);
        tick(&mut app, 1);

        assert!(app.store().voter("1").unwrap().unwrap().has_voted);
        assert!(app.voters[0].has_voted);
        assert_eq!(
            app.toast.as_ref().unwrap().message,
            "Narendra Modi marked as voted"
        );
    }

    #[test]
    fn test_device_mark_voted_without_selection_is_dropped() {
        let mut app = app_with(&["4", "2"], false);
        tick(&mut app, 1);
        assert!(app.toast.as_ref().unwrap().is_error);
        assert!(app.popup.is_none());

        tick(&mut app, 2);
        assert_eq!(app.parties[1].id, PartyId(2));
        assert_eq!(app.parties[1].votes, 1);
    }

    #[test]
    fn test_end_voting_shows_results() {
        let mut app = app_with(&["2", "2", "1"], false);
        for n in 1..=3 {
            tick(&mut app, n);
        }
        ctrl(&mut app, 'e');

        let Some(Popup::Results(result)) = &app.popup else {
            panic!("expected results popup, got {:?}", app.popup);
        };
        assert_eq!(result.total_votes, 3);
        assert!(
            result
                .summary_lines()
                .contains(&"Winner: Party 2".to_string())
        );
    }

    #[test]
    fn test_store_error_shows_dialog() {
        let mut app = app_with(&[], false);
        app.store.drop_parties_table().unwrap();
        ctrl(&mut app, 'e');
        assert!(matches!(app.popup, Some(Popup::Error(_))));
    }

    #[test]
    fn test_polling_store_error_only_toasts() {
        let mut app = app_with(&["1"], false);
        app.store.drop_parties_table().unwrap();
        tick(&mut app, 1);
        assert!(app.popup.is_none());
        assert!(app.toast.as_ref().unwrap().is_error);
    }

    fn render_to_string(app: &mut TestApp) -> String {
        use ratatui::backend::TestBackend;

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| ui::render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_lists_voters_and_tallies() {
        let mut app = app_with(&["3"], false);
        tick(&mut app, 1);
        press(&mut app, KeyCode::Enter);

        let screen = render_to_string(&mut app);
        assert!(screen.contains("Voters [7]"));
        assert!(screen.contains("Narendra Modi"));
        assert!(screen.contains("Dhruva Gupta"));
        assert!(screen.contains("Tallies [1]"));
        assert!(screen.contains("Ctrl+V: mark as voted"));
        assert!(screen.contains("200x200 photo"));
        assert!(screen.contains("no device"));
    }

    #[test]
    fn test_render_results_dialog() {
        let mut app = app_with(&[], false);
        ctrl(&mut app, 'e');

        let screen = render_to_string(&mut app);
        assert!(screen.contains("Voting Results"));
        assert!(screen.contains("There is a tie between:"));
    }

    #[test]
    fn test_esc_quits_and_ctrl_c_quits_from_popup() {
        let mut app = app_with(&[], false);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);

        let mut app = app_with(&[], false);
        ctrl(&mut app, 'e');
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }
}
