// Navigation state machine and event loop.
// Screens are values: every transition replaces `screen` wholesale, so no
// widget state from the previous screen can outlive it.

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;

use crate::{
    action::Action,
    config::global::AppConfig,
    event::poll_event,
    gh::client::HostClient,
    git::branches,
    model::{
        repo::{Listing, RepoId},
        session::Session,
    },
    pipeline::{self, BranchAction},
    runner::{CommandRunner, SystemRunner},
    tui::Tui,
    ui::{self, picker::PickerState},
    workspace,
};

const TICK_MS: u64 = 100;

// ── Screens & modes ───────────────────────────────────────────────────────────

pub enum Screen {
    /// gh is not logged in; terminal for this run.
    AuthGate,
    OwnerPicker {
        picker: PickerState,
    },
    RepositoryPicker {
        owner: String,
        picker: PickerState,
    },
    /// Repository and working copy live in the session.
    BranchPicker {
        picker: PickerState,
    },
}

impl Screen {
    pub fn picker_mut(&mut self) -> Option<&mut PickerState> {
        match self {
            Screen::AuthGate => None,
            Screen::OwnerPicker { picker }
            | Screen::RepositoryPicker { picker, .. }
            | Screen::BranchPicker { picker } => Some(picker),
        }
    }

    pub fn picker(&self) -> Option<&PickerState> {
        match self {
            Screen::AuthGate => None,
            Screen::OwnerPicker { picker }
            | Screen::RepositoryPicker { picker, .. }
            | Screen::BranchPicker { picker, .. } => Some(picker),
        }
    }
}

pub enum Mode {
    Normal,
    Filter,
    Confirm {
        message: String,
        action: BranchAction,
    },
}

// ── App ──────────────────────────────────────────────────────────────────────

pub struct App {
    pub screen: Screen,
    pub mode: Mode,
    pub session: Session,
    pub config: AppConfig,
    pub status_message: Option<String>,
    /// Label of the blocking operation in flight, drawn as an overlay.
    pub loading: Option<String>,
    pub running: bool,
    runner: Rc<dyn CommandRunner>,
    config_path: PathBuf,
    cache_root: PathBuf,
}

impl App {
    pub fn new() -> Self {
        Self::with_parts(
            Rc::new(SystemRunner),
            AppConfig::default_path(),
            workspace::default_cache_root(),
        )
    }

    /// Loads config, checks gh auth and lands on the first screen.
    pub fn with_parts(runner: Rc<dyn CommandRunner>, config_path: PathBuf, cache_root: PathBuf) -> Self {
        let (config, status_message) = match AppConfig::load_from(&config_path) {
            Ok(config) => (config, None),
            Err(e) => {
                log::warn!("ignoring unreadable config: {:#}", e);
                (AppConfig::default(), Some(format!("Config ignored: {:#}", e)))
            }
        };

        let mut app = Self {
            screen: Screen::AuthGate,
            mode: Mode::Normal,
            session: Session::default(),
            config,
            status_message,
            loading: None,
            running: true,
            runner,
            config_path,
            cache_root,
        };
        app.start();
        app
    }

    fn host(&self) -> HostClient<'_> {
        HostClient::new(&*self.runner).with_login(self.session.viewer_login.clone())
    }

    fn start(&mut self) {
        let (authenticated, login, owners) = {
            let host = self.host();
            if host.is_authenticated() {
                let owners = host.owner_choices();
                (true, host.current_user_login(), owners)
            } else {
                (false, None, Listing::default())
            }
        };
        if !authenticated {
            log::warn!("gh is not authenticated");
            self.screen = Screen::AuthGate;
            return;
        }

        let mut problems = Vec::new();
        if login.is_none() {
            log::warn!("could not read the signed-in user");
            problems.push("Could not read signed-in user".to_string());
        }
        if let Some(reason) = &owners.failure {
            problems.push(format!("Organizations unavailable: {}", reason));
        }
        if owners.items.is_empty() {
            problems.push("No owners to choose from".to_string());
        }
        if !problems.is_empty() {
            // keep an earlier config warning in front
            if let Some(earlier) = self.status_message.take() {
                problems.insert(0, earlier);
            }
            self.status_message = Some(problems.join("; "));
        }

        self.session.viewer_login = login;
        self.session.owners = owners.items;
        self.screen = Screen::OwnerPicker { picker: self.owner_picker() };
    }

    fn owner_picker(&self) -> PickerState {
        PickerState::new("Owners", self.session.owners.clone()).with_selected(&self.config.selected_owner)
    }

    fn repository_picker(&self, owner: &str) -> PickerState {
        PickerState::new(format!("Repositories of {}", owner), self.session.owner_repositories.clone())
            .with_selected(&self.config.selected_repository)
    }

    pub fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        while self.running {
            terminal.draw(|frame| ui::render(frame, self))?;

            let in_input = matches!(self.mode, Mode::Filter);
            if let Some(action) = poll_event(Duration::from_millis(TICK_MS), in_input)? {
                if let Some(label) = self.busy_label(action) {
                    self.loading = Some(label);
                    terminal.draw(|frame| ui::render(frame, self))?;
                }
                self.dispatch(action);
                self.loading = None;
            }
        }
        Ok(())
    }

    /// Non-None when `action` will block on external commands.
    fn busy_label(&self, action: Action) -> Option<String> {
        match (&self.mode, action) {
            (Mode::Confirm { action: pending, .. }, Action::ConfirmYes | Action::Select) => {
                Some(format!("{}...", pending.title()))
            }
            (Mode::Confirm { .. }, _) => None,
            (_, Action::Select) => match &self.screen {
                Screen::OwnerPicker { .. } => Some("Loading repositories...".into()),
                Screen::RepositoryPicker { .. } => Some("Preparing working copy...".into()),
                _ => None,
            },
            (Mode::Normal, Action::Refresh) if matches!(self.screen, Screen::BranchPicker { .. }) => {
                Some("Fetching branches...".into())
            }
            _ => None,
        }
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    pub fn dispatch(&mut self, action: Action) {
        if action == Action::ForceQuit {
            self.running = false;
            return;
        }
        match self.mode {
            Mode::Normal => self.dispatch_normal(action),
            Mode::Filter => self.dispatch_filter(action),
            Mode::Confirm { .. } => self.dispatch_confirm(action),
        }
    }

    fn dispatch_normal(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::NavigateUp | Action::NavigateDown => {
                // moving on dismisses the last message and brings the hints back
                self.status_message = None;
                if action == Action::NavigateUp {
                    self.navigate(PickerState::navigate_up);
                } else {
                    self.navigate(PickerState::navigate_down);
                }
            }
            Action::Select => self.select(),
            Action::Back => self.back(),
            Action::StartFilter => {
                if self.screen.picker().is_some() {
                    self.mode = Mode::Filter;
                }
            }
            Action::DeleteBranch => self.request_action(BranchAction::DeleteBranch),
            Action::PrMergeDelete => self.request_action(BranchAction::PrMergeDelete),
            Action::Refresh => self.refresh_branches(),
            _ => {}
        }
    }

    fn dispatch_filter(&mut self, action: Action) {
        match action {
            Action::InputEscape => {
                self.mode = Mode::Normal;
                self.navigate(PickerState::clear_filter);
            }
            Action::Select => {
                self.mode = Mode::Normal;
                self.select();
            }
            Action::InputChar(c) => self.navigate(|p| p.push_filter(c)),
            Action::InputBackspace => self.navigate(PickerState::pop_filter),
            Action::NavigateUp => self.navigate(PickerState::navigate_up),
            Action::NavigateDown => self.navigate(PickerState::navigate_down),
            _ => {}
        }
    }

    fn dispatch_confirm(&mut self, action: Action) {
        match action {
            Action::ConfirmYes | Action::Select => self.confirm_action(),
            Action::ConfirmNo | Action::Back | Action::InputEscape | Action::Quit => {
                self.mode = Mode::Normal;
            }
            _ => {}
        }
    }

    /// Apply a cursor/filter change to the current picker and keep the
    /// session's branch selection in step with it.
    fn navigate(&mut self, f: impl FnOnce(&mut PickerState)) {
        if let Some(picker) = self.screen.picker_mut() {
            f(picker);
        }
        self.sync_branch_selection();
    }

    fn sync_branch_selection(&mut self) {
        if let Screen::BranchPicker { picker, .. } = &self.screen {
            self.session.highlight_branch(picker.selected_item());
        }
    }

    fn select(&mut self) {
        let Some(item) = self.screen.picker().and_then(|p| p.selected_item()).map(str::to_string) else {
            return;
        };
        match &self.screen {
            Screen::OwnerPicker { .. } => self.choose_owner(&item),
            Screen::RepositoryPicker { owner, .. } => {
                let owner = owner.clone();
                self.choose_repository(&owner, &item);
            }
            Screen::BranchPicker { .. } | Screen::AuthGate => {}
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    /// OwnerPicker -> RepositoryPicker
    pub fn choose_owner(&mut self, owner: &str) {
        let repos = self.host().repositories_for_owner(owner);
        self.status_message = if repos.is_complete() {
            repos.items.is_empty().then(|| format!("{} has no repositories", owner))
        } else {
            let reason = repos.failure.as_deref().unwrap_or_default();
            if repos.items.is_empty() {
                Some(format!("Could not list repositories: {}", reason))
            } else {
                Some(format!("Repository list incomplete: {}", reason))
            }
        };
        self.session.select_owner(owner, repos.items);
        self.mode = Mode::Normal;
        self.screen = Screen::RepositoryPicker {
            owner: owner.to_string(),
            picker: self.repository_picker(owner),
        };
    }

    /// RepositoryPicker -> BranchPicker. The choice is persisted before the
    /// working copy is prepared; a failed clone keeps the repository screen.
    pub fn choose_repository(&mut self, owner: &str, full_name: &str) {
        let repo: RepoId = match full_name.parse() {
            Ok(repo) => repo,
            Err(e) => {
                self.status_message = Some(format!("{}", e));
                return;
            }
        };

        self.config.select(owner, full_name);
        let save_error = self
            .config
            .save_to(&self.config_path)
            .err()
            .map(|e| {
                log::warn!("saving config failed: {:#}", e);
                format!("Could not save config: {:#}", e)
            });

        let ws = match workspace::ensure_workspace(&*self.runner, &self.cache_root, &repo) {
            Ok(ws) => ws,
            Err(e) => {
                log::warn!("preparing {} failed: {}", repo, e);
                self.status_message = Some(e.to_string());
                return;
            }
        };

        self.status_message = save_error
            .or(ws.pull_warning)
            .or_else(|| ws.branches.failure.clone())
            .or_else(|| ws.branches.items.is_empty().then(|| "No branches on origin".to_string()));

        let picker = PickerState::new(format!("Branches of {}", repo), ws.branches.items.clone());
        self.session.select_repository(repo, ws.path, ws.branches.items);
        self.mode = Mode::Normal;
        self.screen = Screen::BranchPicker { picker };
        self.sync_branch_selection();
    }

    /// BranchPicker -> RepositoryPicker -> OwnerPicker, rebuilt from the
    /// session without touching the network.
    pub fn back(&mut self) {
        match &self.screen {
            Screen::BranchPicker { .. } => {
                let current = self.session.selected_repository.take();
                let owner = match (&self.session.selected_owner, &current) {
                    (Some(owner), _) => owner.clone(),
                    (None, Some(repo)) => repo.owner.clone(),
                    (None, None) => String::new(),
                };
                let current = current.map(|r| r.to_string()).unwrap_or_default();
                self.session.clear_repository();
                let picker = self.repository_picker(&owner).with_selected(&current);
                self.screen = Screen::RepositoryPicker { owner, picker };
            }
            Screen::RepositoryPicker { owner, .. } => {
                let picker = self.owner_picker().with_selected(owner);
                self.screen = Screen::OwnerPicker { picker };
            }
            Screen::OwnerPicker { .. } | Screen::AuthGate => return,
        }
        self.mode = Mode::Normal;
        self.status_message = None;
    }

    fn request_action(&mut self, action: BranchAction) {
        if !matches!(self.screen, Screen::BranchPicker { .. }) {
            return;
        }
        match pipeline::single_branch(&self.session.selected_branches) {
            Ok(branch) => {
                self.mode = Mode::Confirm { message: action.confirm_message(branch), action };
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    fn confirm_action(&mut self) {
        let mode = std::mem::replace(&mut self.mode, Mode::Normal);
        let Mode::Confirm { action, .. } = mode else { return };
        let Some(path) = &self.session.workspace_path else { return };

        let result = pipeline::run_action(&*self.runner, path, &self.session.selected_branches, action);
        let message = match result {
            Ok(msg) => msg,
            Err(e) => e.to_string(),
        };
        let listing = self.reload_branches();
        self.status_message = Some(match listing.failure {
            Some(reason) => format!("{}; {}", message, reason),
            None => message,
        });
    }

    fn refresh_branches(&mut self) {
        if !matches!(self.screen, Screen::BranchPicker { .. }) {
            return;
        }
        let listing = self.reload_branches();
        self.status_message = Some(match listing.failure {
            Some(reason) => reason,
            None => format!("Branches refreshed ({})", listing.items.len()),
        });
    }

    /// Fetch + list again and push the result into session and picker.
    fn reload_branches(&mut self) -> Listing {
        let (Screen::BranchPicker { picker }, Some(path)) = (&mut self.screen, &self.session.workspace_path)
        else {
            return Listing::default();
        };
        let listing = branches::refresh_branches(&*self.runner, path);
        picker.set_items(listing.items.clone());
        self.session.current_branches = listing.items.clone();
        self.sync_branch_selection();
        listing
    }
}
