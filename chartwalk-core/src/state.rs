use std::path::PathBuf;

use crate::model::{Package, PackageVersion, Repository};
use crate::page::Page;

/// The screen currently shown; each screen owns one step of the drill-down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Waiting for the tool to refresh its repository index
    RefreshingIndex,
    RepositoryList,
    PackageList,
    VersionList,
    /// Waiting for the values file of the chosen version
    Fetching,
    /// Values file saved; any key quits
    Complete { path: PathBuf },
    /// A fetch failed; any key quits
    Failed { error: String },
}

impl Screen {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Screen::Complete { .. } | Screen::Failed { .. })
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Screen::RepositoryList | Screen::PackageList | Screen::VersionList
        )
    }
}

/// Indices chosen on each list screen.
///
/// An index is only meaningful once its screen has been left through a
/// selection; on earlier screens it may be stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionPath {
    pub repository: usize,
    pub package: usize,
    pub version: usize,
}

/// The whole mutable state of one browsing session.
#[derive(Debug)]
pub struct Session {
    pub screen: Screen,
    pub repositories: Vec<Repository>,
    pub packages: Vec<Package>,
    pub versions: Vec<PackageVersion>,
    pub selection: SelectionPath,
    pub cursor: usize,
    /// True while a fetch for the current screen is in flight
    pub loading: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            screen: Screen::RefreshingIndex,
            repositories: Vec::new(),
            packages: Vec::new(),
            versions: Vec::new(),
            selection: SelectionPath::default(),
            cursor: 0,
            loading: true,
        }
    }

    /// Length of the list shown on the current screen (0 off list screens).
    pub fn active_len(&self) -> usize {
        match self.screen {
            Screen::RepositoryList => self.repositories.len(),
            Screen::PackageList => self.packages.len(),
            Screen::VersionList => self.versions.len(),
            _ => 0,
        }
    }

    pub fn page(&self) -> Page {
        Page::for_cursor(self.cursor, self.active_len())
    }

    /// True when the current list screen has its data and accepts navigation.
    pub fn is_interactive(&self) -> bool {
        self.screen.is_list() && !self.loading
    }

    pub fn selected_repository(&self) -> Option<&Repository> {
        self.repositories.get(self.selection.repository)
    }

    pub fn selected_package(&self) -> Option<&Package> {
        self.packages.get(self.selection.package)
    }

    pub fn selected_version(&self) -> Option<&PackageVersion> {
        self.versions.get(self.selection.version)
    }

    /// Success or error text of a finished session.
    pub fn message(&self) -> Option<String> {
        match &self.screen {
            Screen::Complete { path } => {
                Some(format!("Successfully downloaded: {}", path.display()))
            }
            Screen::Failed { error } => Some(error.clone()),
            _ => None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_refreshes_index() {
        let session = Session::new();
        assert_eq!(session.screen, Screen::RefreshingIndex);
        assert!(session.loading);
        assert_eq!(session.active_len(), 0);
        assert!(!session.is_interactive());
    }

    #[test]
    fn test_active_len_follows_screen() {
        let mut session = Session::new();
        session.repositories = vec![Repository {
            name: "argo".into(),
            url: "https://argoproj.github.io/argo-helm".into(),
        }];
        session.screen = Screen::RepositoryList;
        assert_eq!(session.active_len(), 1);
        session.screen = Screen::PackageList;
        assert_eq!(session.active_len(), 0);
    }

    #[test]
    fn test_terminal_messages() {
        let mut session = Session::new();
        assert!(session.message().is_none());

        session.screen = Screen::Complete {
            path: PathBuf::from("argo-cd-5.46.8-default-values.yaml"),
        };
        assert!(session.screen.is_terminal());
        assert!(
            session
                .message()
                .unwrap()
                .contains("argo-cd-5.46.8-default-values.yaml")
        );
    }
}
