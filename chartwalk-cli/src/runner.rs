use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use chartwalk_core::fetcher::{Fetcher, perform};
use chartwalk_core::reducer::{FetchRequest, Msg};

/// Spawns one task per fetch request and posts the result back as a message.
///
/// Tasks are fire-and-forget: nothing cancels them once issued.
pub struct FetchRunner {
    fetcher: Arc<dyn Fetcher>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl FetchRunner {
    pub fn new(fetcher: Arc<dyn Fetcher>, msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self { fetcher, msg_tx }
    }

    pub fn dispatch(&self, request: FetchRequest) -> JoinHandle<()> {
        info!(fetcher = self.fetcher.name(), ?request, "issuing fetch");
        let fetcher = self.fetcher.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let msg = perform(fetcher.as_ref(), request).await;
            if tx.send(msg).is_err() {
                // Event loop already gone; the session has ended.
                debug!("dropping fetch result after shutdown");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use async_trait::async_trait;

    use chartwalk_core::fetcher::{FetchError, Operation};
    use chartwalk_core::model::{Package, PackageVersion, Repository};
    use chartwalk_core::reducer::{Effect, Key, initial_fetch, reduce};
    use chartwalk_core::state::{Screen, Session};

    use super::*;

    /// Canned answers; `failing_repo` makes `list_packages` exit non-zero.
    struct ScriptedFetcher {
        failing_repo: Option<&'static str>,
    }

    #[async_trait]
    impl Fetcher for ScriptedFetcher {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn refresh_index(&self) -> Result<(), FetchError> {
            Ok(())
        }

        async fn list_repositories(&self) -> Result<Vec<Repository>, FetchError> {
            Ok(["argo", "external-secrets", "apisix"]
                .iter()
                .map(|name| Repository {
                    name: name.to_string(),
                    url: format!("https://{}.example.com", name),
                })
                .collect())
        }

        async fn list_packages(&self, repository: &str) -> Result<Vec<Package>, FetchError> {
            if self.failing_repo == Some(repository) {
                return Err(FetchError::Exit {
                    op: Operation::ListPackages,
                    status: "exit status: 1".into(),
                    stderr: "Error: no such repo".into(),
                });
            }
            Ok(vec![Package {
                qualified_name: format!("{}/argo-cd", repository),
                version: "5.46.8".into(),
                app_version: "v2.8.4".into(),
                description: String::new(),
            }])
        }

        async fn list_versions(&self, package: &str) -> Result<Vec<PackageVersion>, FetchError> {
            Ok(["5.46.8", "5.46.7"]
                .iter()
                .map(|v| PackageVersion {
                    qualified_name: package.to_string(),
                    version: v.to_string(),
                    app_version: "v2.8.4".into(),
                    created_timestamp: String::new(),
                })
                .collect())
        }

        async fn fetch_artifact(&self, package: &str, version: &str) -> Result<PathBuf, FetchError> {
            Ok(PathBuf::from(chartwalk_core::model::values_filename(
                package, version,
            )))
        }
    }

    fn runner(failing_repo: Option<&'static str>) -> (FetchRunner, mpsc::UnboundedReceiver<Msg>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (FetchRunner::new(Arc::new(ScriptedFetcher { failing_repo }), tx), rx)
    }

    /// Feeds `keys` in order, running each fetch to completion before the next key.
    async fn drive(
        runner: &FetchRunner,
        rx: &mut mpsc::UnboundedReceiver<Msg>,
        session: &mut Session,
        keys: &[Key],
    ) {
        let mut pending = Some(initial_fetch());
        let mut keys = keys.iter();
        loop {
            if let Some(request) = pending.take() {
                runner.dispatch(request).await.unwrap();
                let msg = rx.recv().await.unwrap();
                if let Effect::Fetch(next) = reduce(session, msg) {
                    pending = Some(next);
                }
                continue;
            }
            let Some(key) = keys.next() else { break };
            if let Effect::Fetch(next) = reduce(session, Msg::KeyPressed(*key)) {
                pending = Some(next);
            }
        }
    }

    #[tokio::test]
    async fn test_dispatch_delivers_loaded_message() {
        let (runner, mut rx) = runner(None);
        runner.dispatch(FetchRequest::ListRepositories);

        match rx.recv().await.unwrap() {
            Msg::RepositoriesLoaded(repos) => assert_eq!(repos.len(), 3),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_select_repository_lists_its_packages() {
        let (runner, mut rx) = runner(None);
        let mut session = Session::new();

        drive(&runner, &mut rx, &mut session, &[Key::Down, Key::Select]).await;

        assert_eq!(session.screen, Screen::PackageList);
        assert_eq!(session.selection.repository, 1);
        assert_eq!(session.packages[0].qualified_name, "external-secrets/argo-cd");
    }

    #[tokio::test]
    async fn test_full_drill_down_completes() {
        let (runner, mut rx) = runner(None);
        let mut session = Session::new();

        drive(
            &runner,
            &mut rx,
            &mut session,
            &[Key::Select, Key::Digit(1), Key::Select],
        )
        .await;

        assert_eq!(
            session.screen,
            Screen::Complete {
                path: PathBuf::from("argo-cd-5.46.8-default-values.yaml")
            }
        );
        assert!(session.message().unwrap().contains("argo-cd-5.46.8-default-values.yaml"));
    }

    #[tokio::test]
    async fn test_subprocess_failure_reaches_failed_screen() {
        let (runner, mut rx) = runner(Some("argo"));
        let mut session = Session::new();

        drive(&runner, &mut rx, &mut session, &[Key::Select]).await;

        match &session.screen {
            Screen::Failed { error } => assert!(error.contains("no such repo")),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
