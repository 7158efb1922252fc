//! The bot engine: drives every bot through every simulation.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use super::results::{ResultStore, SourceCache};
use super::settings::EngineSettings;
use super::state::RunPhase;
use crate::error::EngineError;
use crate::execution::{DockerSandbox, SandboxRuntime};
use crate::models::{Bot, Simulation};
use crate::rpc::{ActionInvoker, GrpcActionClient};
use crate::source::{GithubSource, SourceAcquirer, SourceFetcher};
use crate::validation::{validate_bots, validate_simulations};

/// Logs at `info` when verbose logging is enabled, `debug` otherwise.
macro_rules! progress {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+)
        } else {
            tracing::debug!($($arg)+)
        }
    };
}

/// Removes `path` if present and recreates it empty.
pub fn reset_resource_dir(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    std::fs::create_dir_all(path)
}

/// Runs bots sequentially, one sandbox at a time.
///
/// Infrastructure failures (validation, source retrieval, sandbox start or
/// cleanup) end the run. A failed bot invocation is recorded as an absent
/// result and the run moves on to the next iteration.
pub struct BotEngine {
    settings: EngineSettings,
    bots: Vec<Bot>,
    simulations: Vec<Simulation>,
    results: ResultStore,
    source_cache: SourceCache,
    phase: RunPhase,
    source_acquirer: Box<dyn SourceAcquirer>,
    sandbox: Box<dyn SandboxRuntime>,
    invoker: Box<dyn ActionInvoker>,
}

impl BotEngine {
    /// Creates an engine wired to GitHub/local sources, Docker and gRPC.
    pub fn new(simulations: Vec<Simulation>, bots: Vec<Bot>, settings: EngineSettings) -> Self {
        let fetcher = SourceFetcher::new(settings.working_dir.clone(), GithubSource::default());

        Self {
            settings,
            bots,
            simulations,
            results: ResultStore::new(),
            source_cache: SourceCache::new(),
            phase: RunPhase::Idle,
            source_acquirer: Box::new(fetcher),
            sandbox: Box::new(DockerSandbox::default()),
            invoker: Box::new(GrpcActionClient::default()),
        }
    }

    /// Replaces the source acquirer.
    pub fn with_source_acquirer(mut self, acquirer: impl SourceAcquirer + 'static) -> Self {
        self.source_acquirer = Box::new(acquirer);
        self
    }

    /// Replaces the sandbox runtime.
    pub fn with_sandbox_runtime(mut self, runtime: impl SandboxRuntime + 'static) -> Self {
        self.sandbox = Box::new(runtime);
        self
    }

    /// Replaces the action invoker.
    pub fn with_action_invoker(mut self, invoker: impl ActionInvoker + 'static) -> Self {
        self.invoker = Box::new(invoker);
        self
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn phase(&self) -> &RunPhase {
        &self.phase
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn into_results(self) -> ResultStore {
        self.results
    }

    /// Human-readable description of the settings and bots.
    pub fn summarize(&self) -> String {
        let mut out = String::from("Engine Summary\n\n");

        out.push_str("Settings:\n");
        out.push_str(&format!("\tNumSimulations: {}\n", self.simulations.len()));
        out.push_str(&format!(
            "\tVerboseLoggingEnabled: {}\n",
            self.settings.verbose_logging_enabled
        ));

        out.push_str("\nBots:\n");
        out.push_str(&format!("\tCount: {}\n", self.bots.len()));
        for bot in &self.bots {
            out.push_str(&format!("\t - {}\n", bot.id));
        }

        out
    }

    /// Renders the result store.
    pub fn format_results(&self) -> String {
        self.results.render()
    }

    /// Prints the result store to stdout.
    pub fn print_results(&self) {
        print!("{}", self.format_results());
    }

    /// Validates the configuration and runs every bot.
    ///
    /// An error means a fatal condition occurred; no bot after the failing one
    /// was processed. Results recorded before the failure remain readable.
    pub async fn run(&mut self) -> Result<(), EngineError> {
        let outcome = self.run_phases().await;
        self.phase = match &outcome {
            Ok(()) => RunPhase::Done,
            Err(e) => {
                error!(error = %e, phase = %self.phase, "Engine run failed");
                RunPhase::Failed
            }
        };
        outcome
    }

    async fn run_phases(&mut self) -> Result<(), EngineError> {
        validate_bots(&self.bots)?;
        validate_simulations(&self.simulations)?;

        progress!(self.settings.verbose_logging_enabled, "Running engine");
        self.results = ResultStore::new();
        self.source_cache.clear();

        let resource_dir = self.collect_bot_resources()?;
        self.phase = RunPhase::ResourcesCollected;

        self.initialize_bots().await?;
        self.phase = RunPhase::SourcesFetched;

        for index in 0..self.bots.len() {
            let bot = self.bots[index].clone();
            self.run_bot(&bot, &resource_dir).await?;
        }

        info!(
            bots = self.bots.len(),
            simulations = self.simulations.len(),
            failed_iterations = self.results.failure_count(),
            "Engine run complete"
        );
        Ok(())
    }

    fn collect_bot_resources(&self) -> Result<PathBuf, EngineError> {
        let working_dir =
            self.settings
                .resolve_working_dir()
                .map_err(|source| EngineError::Resources {
                    path: PathBuf::from("."),
                    source,
                })?;
        let resource_dir = self
            .settings
            .resource_dir(&working_dir)
            .map_err(|source| EngineError::Resources {
                path: working_dir.join(self.settings.resource_folder.trim_matches('/')),
                source,
            })?;

        reset_resource_dir(&resource_dir).map_err(|source| EngineError::Resources {
            path: resource_dir.clone(),
            source,
        })?;

        debug!(path = %resource_dir.display(), "Reset bot resource directory");
        Ok(resource_dir)
    }

    async fn initialize_bots(&mut self) -> Result<(), EngineError> {
        info!(count = self.bots.len(), "Initializing bots");

        for bot in &self.bots {
            let source = self
                .source_acquirer
                .acquire(&bot.source_location())
                .await
                .map_err(|source| {
                    error!(bot = %bot.id, "Failed to retrieve bot source code");
                    EngineError::Retrieval {
                        bot_id: bot.id.clone(),
                        source,
                    }
                })?;

            info!(bot = %bot.id, bytes = source.len(), "Retrieved source code");
            self.source_cache.insert(bot.id.clone(), source);
        }

        Ok(())
    }

    async fn run_bot(&mut self, bot: &Bot, resource_dir: &Path) -> Result<(), EngineError> {
        info!(bot = %bot.id, "Bootstrapping server for bot");

        let source = self
            .source_cache
            .get(&bot.id)
            .ok_or_else(|| EngineError::MissingSource {
                bot_id: bot.id.clone(),
            })?;

        let handle = self
            .sandbox
            .provision(source, resource_dir)
            .await
            .map_err(|source| EngineError::Sandbox {
                bot_id: bot.id.clone(),
                source,
            })?;
        self.phase = RunPhase::ContainerStarted {
            bot_id: bot.id.clone(),
        };
        self.results.begin_bot(&bot.id);

        info!(
            bot = %bot.id,
            container = %handle,
            username = %bot.source_repo_username,
            repo = %bot.source_repo_name,
            fantasy_team_id = bot.fantasy_team_id,
            source_type = %bot.source_type,
            source_path = %bot.source_path,
            "Setup bot"
        );

        self.run_simulations_on_bot(&bot.id).await;
        self.phase = RunPhase::SimulationsRun {
            bot_id: bot.id.clone(),
        };

        if let Err(source) = self.sandbox.teardown(handle, resource_dir).await {
            error!(bot = %bot.id, error = %source, "CRITICAL: failed to clean up after bot run");
            return Err(EngineError::Sandbox {
                bot_id: bot.id.clone(),
                source,
            });
        }

        self.phase = RunPhase::ContainerCleaned {
            bot_id: bot.id.clone(),
        };
        info!(bot = %bot.id, "Finished cleaning server for bot");
        Ok(())
    }

    async fn run_simulations_on_bot(&mut self, bot_id: &str) {
        let verbose = self.settings.verbose_logging_enabled;

        for simulation in &self.simulations {
            progress!(verbose, bot = %bot_id, simulation = %simulation.id, "Running simulation");
            self.results.begin_simulation(bot_id, &simulation.id);

            for iteration in 1..=simulation.num_iterations {
                progress!(verbose, iteration, "Making gRPC call");

                match self.invoker.invoke(&simulation.landscape).await {
                    Ok(selections) => {
                        progress!(verbose, iteration, "Bot ran successfully");
                        self.results.record(bot_id, &simulation.id, Some(selections));
                    }
                    Err(e) => {
                        warn!(
                            bot = %bot_id,
                            simulation = %simulation.id,
                            iteration,
                            error = %e,
                            "Failed to make gRPC call"
                        );
                        self.results.record(bot_id, &simulation.id, None);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InvocationError, RetrievalError, SandboxError};
    use crate::execution::SandboxHandle;
    use crate::models::SourceLocation;
    use crate::proto::{FantasyLandscape, FantasySelections};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Serves canned sources; bots named in `missing` are not found.
    struct MockSources {
        missing: Vec<String>,
    }

    #[async_trait]
    impl SourceAcquirer for MockSources {
        async fn acquire(&self, location: &SourceLocation) -> Result<Vec<u8>, RetrievalError> {
            let path = match location {
                SourceLocation::Local { path } => path.clone(),
                SourceLocation::Remote { path, .. } => path.clone(),
            };
            if self.missing.contains(&path) {
                return Err(RetrievalError::NotFound {
                    owner: "owner".to_string(),
                    repo: "repo".to_string(),
                    path,
                });
            }
            Ok(format!("# {path}").into_bytes())
        }
    }

    #[derive(Default)]
    struct SandboxLog {
        attempted: AtomicUsize,
        provisioned: AtomicUsize,
        torn_down: AtomicUsize,
        live: AtomicUsize,
        max_live: AtomicUsize,
    }

    /// Records lifecycle calls. Provision fails on the `fail_provision_at`-th
    /// call and teardown on the `fail_teardown_at`-th call.
    struct MockSandbox {
        log: Arc<SandboxLog>,
        fail_provision_at: Option<usize>,
        fail_teardown_at: Option<usize>,
    }

    #[async_trait]
    impl SandboxRuntime for MockSandbox {
        async fn provision(
            &self,
            source: &[u8],
            mount_dir: &Path,
        ) -> Result<SandboxHandle, SandboxError> {
            let attempt = self.log.attempted.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_provision_at == Some(attempt) {
                return Err(SandboxError::StartFailed {
                    id: format!("container-{attempt}"),
                    reason: "port is already allocated".to_string(),
                });
            }
            crate::execution::write_entry_point(mount_dir, "bot.py", source)?;
            let n = self.log.provisioned.fetch_add(1, Ordering::SeqCst);
            let live = self.log.live.fetch_add(1, Ordering::SeqCst) + 1;
            self.log.max_live.fetch_max(live, Ordering::SeqCst);
            Ok(SandboxHandle::new(format!("container-{n}")))
        }

        async fn teardown(
            &self,
            handle: SandboxHandle,
            mount_dir: &Path,
        ) -> Result<(), SandboxError> {
            let n = self.log.torn_down.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_teardown_at == Some(n) {
                return Err(SandboxError::RemoveFailed {
                    id: handle.id().to_string(),
                    reason: "device busy".to_string(),
                });
            }
            self.log.live.fetch_sub(1, Ordering::SeqCst);
            crate::execution::remove_entry_point(mount_dir, "bot.py")
        }
    }

    /// Replays a script of outcomes, then succeeds.
    struct MockInvoker {
        script: Mutex<VecDeque<bool>>,
        calls: Arc<AtomicUsize>,
    }

    impl MockInvoker {
        fn new(script: Vec<bool>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl ActionInvoker for MockInvoker {
        async fn invoke(
            &self,
            _landscape: &FantasyLandscape,
        ) -> Result<FantasySelections, InvocationError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            let ok = self
                .script
                .lock()
                .expect("lock not poisoned")
                .pop_front()
                .unwrap_or(true);
            if ok {
                Ok(FantasySelections::draft(format!("player-{n}")))
            } else {
                Err(InvocationError::Connect {
                    endpoint: "http://localhost:8080".to_string(),
                    reason: "connection refused".to_string(),
                })
            }
        }
    }

    fn engine(
        temp_dir: &TempDir,
        bots: Vec<Bot>,
        simulations: Vec<Simulation>,
        log: Arc<SandboxLog>,
        fail_teardown_at: Option<usize>,
        script: Vec<bool>,
        missing: Vec<&str>,
    ) -> BotEngine {
        let settings = EngineSettings::default().with_working_dir(temp_dir.path());
        BotEngine::new(simulations, bots, settings)
            .with_source_acquirer(MockSources {
                missing: missing.into_iter().map(String::from).collect(),
            })
            .with_sandbox_runtime(MockSandbox {
                log,
                fail_provision_at: None,
                fail_teardown_at,
            })
            .with_action_invoker(MockInvoker::new(script))
    }

    fn sim(id: &str, iterations: u32) -> Simulation {
        Simulation::new(id, iterations, FantasyLandscape::default())
    }

    #[tokio::test]
    async fn test_all_iterations_succeed() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let log = Arc::new(SandboxLog::default());
        let mut engine = engine(
            &temp_dir,
            vec![Bot::local("bot-a", "a.py")],
            vec![sim("draft", 3)],
            log.clone(),
            None,
            vec![],
            vec![],
        );

        engine.run().await.expect("run succeeds");

        assert_eq!(engine.phase(), &RunPhase::Done);
        assert_eq!(engine.results().len(), 1);
        let outcomes = engine.results().simulation("bot-a", "draft").expect("results");
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(Option::is_some));
        assert_eq!(outcomes[0], Some(FantasySelections::draft("player-0")));
        assert_eq!(outcomes[2], Some(FantasySelections::draft("player-2")));
        assert_eq!(log.provisioned.load(Ordering::SeqCst), 1);
        assert_eq!(log.torn_down.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_iteration_is_recorded_absent() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut engine = engine(
            &temp_dir,
            vec![Bot::local("bot-a", "a.py")],
            vec![sim("draft", 2)],
            Arc::new(SandboxLog::default()),
            None,
            vec![false, true],
            vec![],
        );

        engine.run().await.expect("invocation failures are not fatal");

        let outcomes = engine.results().simulation("bot-a", "draft").expect("results");
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].is_none());
        assert!(outcomes[1].is_some());
    }

    #[tokio::test]
    async fn test_every_iteration_failing_still_completes() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut engine = engine(
            &temp_dir,
            vec![Bot::local("a", "a.py"), Bot::local("b", "b.py")],
            vec![sim("s1", 2), sim("s2", 1)],
            Arc::new(SandboxLog::default()),
            None,
            vec![false; 6],
            vec![],
        );

        engine.run().await.expect("run completes");

        for bot in ["a", "b"] {
            assert_eq!(engine.results().simulation(bot, "s1").map(<[_]>::len), Some(2));
            assert_eq!(engine.results().simulation(bot, "s2").map(<[_]>::len), Some(1));
        }
        assert_eq!(engine.results().failure_count(), 6);
    }

    #[tokio::test]
    async fn test_lengths_match_iteration_counts() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let simulations = vec![sim("zero", 0), sim("one", 1), sim("five", 5)];
        let mut engine = engine(
            &temp_dir,
            vec![Bot::local("a", "a.py"), Bot::remote("b", "o", "r", "b.py")],
            simulations.clone(),
            Arc::new(SandboxLog::default()),
            None,
            vec![true, false, true, false],
            vec![],
        );

        engine.run().await.expect("run succeeds");

        for bot in ["a", "b"] {
            for simulation in &simulations {
                let outcomes = engine
                    .results()
                    .simulation(bot, &simulation.id)
                    .expect("sequence exists");
                assert_eq!(outcomes.len(), simulation.num_iterations as usize);
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_provisions_nothing() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let log = Arc::new(SandboxLog::default());
        let invoker = MockInvoker::new(vec![]);
        let calls = invoker.calls.clone();

        let settings = EngineSettings::default().with_working_dir(temp_dir.path());
        let mut engine = BotEngine::new(
            vec![sim("draft", 1)],
            vec![Bot::local("a", "a.py"), Bot::remote("b", "o", "r", "gone.py")],
            settings,
        )
        .with_source_acquirer(MockSources {
            missing: vec!["gone.py".to_string()],
        })
        .with_sandbox_runtime(MockSandbox {
            log: log.clone(),
            fail_provision_at: None,
            fail_teardown_at: None,
        })
        .with_action_invoker(invoker);

        let err = engine.run().await.expect_err("fetch failure is fatal");

        assert!(err.is_retrieval());
        assert_eq!(engine.phase(), &RunPhase::Failed);
        assert_eq!(log.provisioned.load(Ordering::SeqCst), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!engine.results().contains_bot("a"));
        assert!(!engine.results().contains_bot("b"));
    }

    #[tokio::test]
    async fn test_teardown_failure_stops_later_bots() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let log = Arc::new(SandboxLog::default());
        let mut engine = engine(
            &temp_dir,
            vec![
                Bot::local("first", "1.py"),
                Bot::local("second", "2.py"),
                Bot::local("third", "3.py"),
            ],
            vec![sim("draft", 2)],
            log.clone(),
            Some(2),
            vec![],
            vec![],
        );

        let err = engine.run().await.expect_err("teardown failure is fatal");

        assert!(err.is_sandbox());
        assert!(err.to_string().contains("second"));
        assert_eq!(log.provisioned.load(Ordering::SeqCst), 2);
        assert_eq!(engine.results().simulation("second", "draft").map(<[_]>::len), Some(2));
        assert!(engine.results().contains_bot("first"));
        assert!(!engine.results().contains_bot("third"));
    }

    #[tokio::test]
    async fn test_provision_failure_stops_run() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let log = Arc::new(SandboxLog::default());
        let invoker = MockInvoker::new(vec![]);
        let calls = invoker.calls.clone();

        let settings = EngineSettings::default().with_working_dir(temp_dir.path());
        let mut engine = BotEngine::new(
            vec![sim("draft", 2)],
            vec![
                Bot::local("first", "1.py"),
                Bot::local("second", "2.py"),
                Bot::local("third", "3.py"),
            ],
            settings,
        )
        .with_source_acquirer(MockSources { missing: vec![] })
        .with_sandbox_runtime(MockSandbox {
            log: log.clone(),
            fail_provision_at: Some(2),
            fail_teardown_at: None,
        })
        .with_action_invoker(invoker);

        let err = engine.run().await.expect_err("provision failure is fatal");

        assert!(err.is_sandbox());
        assert!(matches!(
            &err,
            EngineError::Sandbox { bot_id, source: SandboxError::StartFailed { .. } }
                if bot_id == "second"
        ));
        assert_eq!(engine.phase(), &RunPhase::Failed);
        assert_eq!(log.attempted.load(Ordering::SeqCst), 2);
        assert_eq!(log.provisioned.load(Ordering::SeqCst), 1);
        assert_eq!(log.torn_down.load(Ordering::SeqCst), 1);
        // Only the first bot's two iterations reached the invoker.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(engine.results().simulation("first", "draft").map(<[_]>::len), Some(2));
        assert!(!engine.results().contains_bot("second"));
        assert!(!engine.results().contains_bot("third"));
    }

    #[tokio::test]
    async fn test_escaping_resource_folder_is_rejected() {
        for folder in ["/", "", ".."] {
            let temp_dir = TempDir::new().expect("failed to create temp dir");
            let work = temp_dir.path().join("work");
            std::fs::create_dir_all(work.join("bots")).expect("create bots dir");
            std::fs::write(work.join("bots/a.py"), b"# bot a").expect("write bot");
            std::fs::write(work.join("league.yaml"), b"teams: 12").expect("write league");
            std::fs::write(temp_dir.path().join("sibling.txt"), b"keep").expect("write sibling");

            let log = Arc::new(SandboxLog::default());
            let settings = EngineSettings {
                resource_folder: folder.to_string(),
                ..EngineSettings::default().with_working_dir(&work)
            };
            let mut engine = BotEngine::new(vec![], vec![], settings)
                .with_source_acquirer(MockSources { missing: vec![] })
                .with_sandbox_runtime(MockSandbox {
                    log: log.clone(),
                    fail_provision_at: None,
                    fail_teardown_at: None,
                })
                .with_action_invoker(MockInvoker::new(vec![]));

            let err = engine.run().await.expect_err("folder outside the working directory");

            assert!(
                matches!(err, EngineError::Resources { .. }),
                "folder {folder:?}: {err}"
            );
            assert_eq!(engine.phase(), &RunPhase::Failed);
            assert!(work.join("bots/a.py").exists(), "folder {folder:?}");
            assert!(work.join("league.yaml").exists(), "folder {folder:?}");
            assert!(temp_dir.path().join("sibling.txt").exists(), "folder {folder:?}");
        }
    }

    #[tokio::test]
    async fn test_one_sandbox_alive_at_a_time() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let log = Arc::new(SandboxLog::default());
        let mut engine = engine(
            &temp_dir,
            vec![Bot::local("a", "a.py"), Bot::local("b", "b.py"), Bot::local("c", "c.py")],
            vec![sim("draft", 1)],
            log.clone(),
            None,
            vec![],
            vec![],
        );

        engine.run().await.expect("run succeeds");

        assert_eq!(log.provisioned.load(Ordering::SeqCst), 3);
        assert_eq!(log.torn_down.load(Ordering::SeqCst), 3);
        assert_eq!(log.max_live.load(Ordering::SeqCst), 1);
        assert_eq!(log.live.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_validation_failure_runs_nothing() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let log = Arc::new(SandboxLog::default());
        let mut engine = engine(
            &temp_dir,
            vec![Bot::local("dup", "a.py"), Bot::local("dup", "b.py")],
            vec![sim("draft", 1)],
            log.clone(),
            None,
            vec![],
            vec![],
        );

        let err = engine.run().await.expect_err("duplicate ids are invalid");

        assert!(matches!(err, EngineError::Validation(_)));
        assert_eq!(log.provisioned.load(Ordering::SeqCst), 0);
        assert!(!temp_dir.path().join("tmp").exists());
    }

    #[tokio::test]
    async fn test_resource_dir_is_recreated_and_entry_point_removed() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let resource_dir = temp_dir.path().join("tmp");
        std::fs::create_dir_all(&resource_dir).expect("create stale dir");
        std::fs::write(resource_dir.join("stale.txt"), b"old").expect("write stale file");

        let mut engine = engine(
            &temp_dir,
            vec![Bot::local("a", "a.py")],
            vec![sim("draft", 1)],
            Arc::new(SandboxLog::default()),
            None,
            vec![],
            vec![],
        );
        engine.run().await.expect("run succeeds");

        assert!(resource_dir.is_dir());
        assert!(!resource_dir.join("stale.txt").exists());
        assert!(!resource_dir.join("bot.py").exists());
    }

    #[test]
    fn test_reset_resource_dir_twice() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let dir = temp_dir.path().join("tmp");

        reset_resource_dir(&dir).expect("first reset");
        std::fs::write(dir.join("bot.py"), b"x").expect("write residue");
        reset_resource_dir(&dir).expect("second reset");

        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).expect("read dir").count(), 0);
    }

    #[tokio::test]
    async fn test_summarize_and_results() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let mut engine = engine(
            &temp_dir,
            vec![Bot::local("a", "a.py")],
            vec![sim("draft", 2)],
            Arc::new(SandboxLog::default()),
            None,
            vec![true, false],
            vec![],
        );

        let summary = engine.summarize();
        assert!(summary.contains("NumSimulations: 1"));
        assert!(summary.contains("VerboseLoggingEnabled: false"));
        assert!(summary.contains("Count: 1"));
        assert!(summary.contains(" - a"));

        assert_eq!(engine.format_results(), "");
        engine.run().await.expect("run succeeds");
        assert_eq!(
            engine.format_results(),
            "a:\n\tdraft: [draft(player-0), <absent>]\n"
        );

        let results = engine.into_results();
        assert_eq!(results.failure_count(), 1);
        assert!(results.contains_bot("a"));
    }
}
