use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::model::{Package, PackageVersion, Repository};
use crate::page::{cursor_down, cursor_up, shortcut_index};
use crate::state::{Screen, Session};

/// Terminal-independent key input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    /// Enter or space
    Select,
    /// Page-relative shortcut, `0` addresses the tenth row
    Digit(u8),
    /// Backspace or escape
    Back,
    /// `q` or interrupt
    Quit,
    Other,
}

/// Everything the event loop feeds into `reduce`.
#[derive(Clone, Debug)]
pub enum Msg {
    IndexRefreshed,
    RepositoriesLoaded(Vec<Repository>),
    PackagesLoaded(Vec<Package>),
    VersionsLoaded(Vec<PackageVersion>),
    ArtifactFetched(PathBuf),
    Failed(String),
    KeyPressed(Key),
}

/// Work the event loop must start on behalf of the state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchRequest {
    RefreshIndex,
    ListRepositories,
    ListPackages { repository: String },
    /// `package` is the qualified name
    ListVersions { package: String },
    FetchArtifact { package: String, version: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Fetch(FetchRequest),
    Quit,
}

/// The request that starts every session.
pub fn initial_fetch() -> FetchRequest {
    FetchRequest::RefreshIndex
}

pub fn reduce(session: &mut Session, msg: Msg) -> Effect {
    match msg {
        Msg::KeyPressed(key) => handle_key(session, key),
        Msg::Failed(error) => {
            if session.screen.is_terminal() {
                debug!(%error, "ignoring failure after session finished");
                return Effect::None;
            }
            warn!(screen = ?session.screen, %error, "fetch failed");
            session.loading = false;
            session.screen = Screen::Failed { error };
            Effect::None
        }
        Msg::IndexRefreshed => {
            if session.screen != Screen::RefreshingIndex {
                debug!(screen = ?session.screen, "unexpected index refresh");
                return Effect::None;
            }
            session.screen = Screen::RepositoryList;
            session.loading = true;
            Effect::Fetch(FetchRequest::ListRepositories)
        }
        Msg::RepositoriesLoaded(repositories) => {
            if !awaiting(session, &Screen::RepositoryList) {
                return Effect::None;
            }
            info!(count = repositories.len(), "repositories loaded");
            session.repositories = repositories;
            session.loading = false;
            session.cursor = 0;
            Effect::None
        }
        Msg::PackagesLoaded(packages) => {
            if !awaiting(session, &Screen::PackageList) {
                return Effect::None;
            }
            info!(count = packages.len(), "packages loaded");
            session.packages = packages;
            session.loading = false;
            session.cursor = 0;
            Effect::None
        }
        Msg::VersionsLoaded(versions) => {
            if !awaiting(session, &Screen::VersionList) {
                return Effect::None;
            }
            info!(count = versions.len(), "versions loaded");
            session.versions = versions;
            session.loading = false;
            session.cursor = 0;
            Effect::None
        }
        Msg::ArtifactFetched(path) => {
            if session.screen != Screen::Fetching {
                debug!(screen = ?session.screen, "unexpected artifact");
                return Effect::None;
            }
            info!(path = %path.display(), "values saved");
            session.loading = false;
            session.screen = Screen::Complete { path };
            Effect::None
        }
    }
}

fn awaiting(session: &Session, screen: &Screen) -> bool {
    let expected = session.loading && session.screen == *screen;
    if !expected {
        debug!(screen = ?session.screen, loading = session.loading, "dropping stale load");
    }
    expected
}

fn handle_key(session: &mut Session, key: Key) -> Effect {
    if key == Key::Quit || session.screen.is_terminal() {
        return Effect::Quit;
    }
    // Navigation is ignored until the current list has arrived.
    if !session.is_interactive() {
        return Effect::None;
    }

    let len = session.active_len();
    match key {
        Key::Up => {
            session.cursor = cursor_up(session.cursor);
            Effect::None
        }
        Key::Down => {
            session.cursor = cursor_down(session.cursor, len);
            Effect::None
        }
        Key::Select => select(session, session.cursor),
        Key::Digit(digit) => match shortcut_index(digit, session.cursor, len) {
            Some(index) => select(session, index),
            None => Effect::None,
        },
        Key::Back => back(session),
        Key::Quit | Key::Other => Effect::None,
    }
}

/// Chooses row `index` of the current list and descends one level.
fn select(session: &mut Session, index: usize) -> Effect {
    if index >= session.active_len() {
        return Effect::None;
    }

    let request = match session.screen {
        Screen::RepositoryList => {
            session.selection.repository = index;
            session.cursor = 0;
            session.screen = Screen::PackageList;
            FetchRequest::ListPackages {
                repository: session.repositories[index].name.clone(),
            }
        }
        Screen::PackageList => {
            session.selection.package = index;
            session.cursor = 0;
            session.screen = Screen::VersionList;
            FetchRequest::ListVersions {
                package: session.packages[index].qualified_name.clone(),
            }
        }
        Screen::VersionList => {
            session.selection.version = index;
            session.screen = Screen::Fetching;
            let version = &session.versions[index];
            FetchRequest::FetchArtifact {
                package: version.qualified_name.clone(),
                version: version.version.clone(),
            }
        }
        _ => return Effect::None,
    };

    session.loading = true;
    debug!(?request, "selection issued fetch");
    Effect::Fetch(request)
}

fn back(session: &mut Session) -> Effect {
    match session.screen {
        Screen::PackageList => {
            session.screen = Screen::RepositoryList;
            session.packages.clear();
            session.cursor = session.selection.repository;
        }
        Screen::VersionList => {
            session.screen = Screen::PackageList;
            session.versions.clear();
            session.cursor = session.selection.package;
        }
        _ => {}
    }
    Effect::None
}
