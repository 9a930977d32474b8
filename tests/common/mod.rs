//! Shared utilities for bootstrap integration tests.

#![allow(dead_code)]

use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pandora_helper::config::{ConfigRoot, Configuration};
use pandora_helper::lifecycle::{Release, Shutdown};
use pandora_helper::wire::{Application, Assembler, Assembly, AssemblyError, RunError};
use tracing_subscriber::fmt::MakeWriter;

pub const VALID_CONFIG: &str = r#"
[http]
host = "0.0.0.0"
port = 9000

[security]
admin_password = "adminpass1"
"#;

/// Write `contents` as `config.toml` inside a fresh directory.
pub fn config_dir(contents: &str) -> (tempfile::TempDir, ConfigRoot) {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), contents);
    let root = ConfigRoot::new(dir.path());
    (dir, root)
}

pub fn write_config(dir: &Path, contents: &str) {
    std::fs::write(dir.join("config.toml"), contents).unwrap();
}

/// In-memory log sink for asserting on emitted records.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Subscriber writing plain, uncolored lines into this buffer.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .with_max_level(tracing::Level::DEBUG)
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Number of lines containing `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.contents().lines().filter(|l| l.contains(needle)).count()
    }

    pub fn fatal_lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|l| l.contains("severity=\"fatal\""))
            .map(str::to_string)
            .collect()
    }
}

pub struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter(self.0.clone())
    }
}

/// How the mock assembler and application behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Assemble, then run until shutdown.
    Serve,
    /// Fail assembly but still hand back a release.
    FailAssembly,
    /// Assemble, then fail while running.
    FailRun,
}

/// Counters observed by the mock collaborators.
#[derive(Clone, Default)]
pub struct Counters {
    pub assembled: Arc<AtomicUsize>,
    pub released: Arc<AtomicUsize>,
    pub ran: Arc<AtomicUsize>,
    /// Readiness records already emitted when `run` started.
    pub readiness_at_run: Arc<AtomicUsize>,
    /// Whether the release had already run when `run` started.
    pub released_before_run: Arc<AtomicBool>,
}

impl Counters {
    pub fn assembled(&self) -> usize {
        self.assembled.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn ran(&self) -> usize {
        self.ran.load(Ordering::SeqCst)
    }
}

pub struct MockAssembler {
    pub counters: Counters,
    pub behavior: Behavior,
    pub logs: CapturedLogs,
}

impl MockAssembler {
    pub fn new(behavior: Behavior, logs: &CapturedLogs) -> Self {
        Self {
            counters: Counters::default(),
            behavior,
            logs: logs.clone(),
        }
    }
}

#[async_trait]
impl Assembler for MockAssembler {
    type App = MockApp;

    async fn assemble(&self, _config: Arc<Configuration>) -> Assembly<MockApp> {
        self.counters.assembled.fetch_add(1, Ordering::SeqCst);

        let released = self.counters.released.clone();
        let release = Release::new(move || {
            released.fetch_add(1, Ordering::SeqCst);
        });

        if self.behavior == Behavior::FailAssembly {
            return Assembly::failed(
                AssemblyError::Component {
                    component: "database",
                    message: "connection refused".to_string(),
                },
                release,
            );
        }

        Assembly::ready(
            MockApp {
                counters: self.counters.clone(),
                fail: self.behavior == Behavior::FailRun,
                logs: self.logs.clone(),
            },
            release,
        )
    }
}

pub struct MockApp {
    counters: Counters,
    fail: bool,
    logs: CapturedLogs,
}

#[async_trait]
impl Application for MockApp {
    async fn run(self, shutdown: Shutdown) -> Result<(), RunError> {
        self.counters.ran.fetch_add(1, Ordering::SeqCst);
        self.counters
            .readiness_at_run
            .store(self.logs.count("Server starting"), Ordering::SeqCst);
        self.counters
            .released_before_run
            .store(self.counters.released() > 0, Ordering::SeqCst);

        if self.fail {
            return Err(RunError::Failed("listener closed unexpectedly".to_string()));
        }
        shutdown.cancelled().await;
        Ok(())
    }
}
