use crate::error::Error;
use crate::k8s::ResourceClient;
use crate::registry;
use descriptors::{Dependency, ResourceKind};
use log::debug;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Interval between two polls of the same phase.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// How a single dependency is polled. Without limits a dependency is waited on
/// for as long as it takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    /// Polls allowed per phase.
    pub max_attempts: Option<u32>,
    /// Deadline for both phases of one dependency together.
    pub timeout: Option<Duration>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
            timeout: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WaitState {
    Unknown,
    AwaitingExistence,
    AwaitingReadiness,
    Satisfied,
    Failed,
}

impl fmt::Display for WaitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WaitState::Unknown => "unknown",
            WaitState::AwaitingExistence => "awaiting existence",
            WaitState::AwaitingReadiness => "awaiting readiness",
            WaitState::Satisfied => "satisfied",
            WaitState::Failed => "failed",
        })
    }
}

/// How a dependency ended up satisfied.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Satisfied {
    Ready,
    Exists,
}

impl Satisfied {
    pub fn status_line(&self, kind: ResourceKind) -> String {
        match self {
            Satisfied::Ready => format!("{} is ready", kind.label()),
            Satisfied::Exists => format!("{} exists", kind.label()),
        }
    }
}

/// Waits for `dependency` to exist and, for status-bearing kinds, to become
/// ready. Any failed API call ends the wait immediately.
pub async fn wait_for(
    client: &dyn ResourceClient,
    dependency: &Dependency,
    settings: &PollSettings,
) -> Result<Satisfied, Error> {
    let mut waiter = Waiter {
        dependency,
        settings,
        state: WaitState::Unknown,
        deadline: settings.timeout.map(|timeout| Instant::now() + timeout),
    };

    let result = waiter.drive(client).await;
    if result.is_err() {
        waiter.transition(WaitState::Failed);
    }
    result
}

struct Waiter<'a> {
    dependency: &'a Dependency,
    settings: &'a PollSettings,
    state: WaitState,
    deadline: Option<Instant>,
}

impl Waiter<'_> {
    async fn drive(&mut self, client: &dyn ResourceClient) -> Result<Satisfied, Error> {
        let dependency = self.dependency;
        let kind = dependency.kind();
        let namespace = dependency.namespace();
        let name = dependency.name();
        let predicates = registry::predicates(kind);

        self.transition(WaitState::AwaitingExistence);
        self.poll(move || async move {
            let listing = client.list(kind, namespace).await?;
            Ok((predicates.exists)(&listing, name))
        })
        .await?;

        let Some(ready) = predicates.ready else {
            self.transition(WaitState::Satisfied);
            return Ok(Satisfied::Exists);
        };

        self.transition(WaitState::AwaitingReadiness);
        self.poll(move || async move {
            let resource = client.get(kind, namespace, name).await?;
            Ok(ready(&resource))
        })
        .await?;

        self.transition(WaitState::Satisfied);
        Ok(Satisfied::Ready)
    }

    /// Runs `check` until it reports true, sleeping the fixed interval after
    /// every negative answer.
    async fn poll<F, Fut>(&self, mut check: F) -> Result<(), Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool, Error>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            if check().await? {
                return Ok(());
            }

            if let Some(max_attempts) = self.settings.max_attempts {
                if attempt >= max_attempts {
                    return Err(
                        self.give_up(format!("still {} after {} polls", self.state, attempt))
                    );
                }
            }
            let mut pause = self.settings.interval;
            if let Some(deadline) = self.deadline {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(self.give_up(format!(
                        "still {} after {:?}",
                        self.state,
                        self.settings.timeout.unwrap_or_default()
                    )));
                }
                // The last poll lands on the deadline rather than past it.
                pause = pause.min(remaining);
            }

            debug!(
                "{} is {} (poll {}), retrying in {:?}",
                self.dependency, self.state, attempt, pause
            );
            tokio::time::sleep(pause).await;
        }
    }

    fn transition(&mut self, next: WaitState) {
        debug!("{}: {} -> {}", self.dependency, self.state, next);
        self.state = next;
    }

    fn give_up(&self, reason: String) -> Error {
        Error::GaveUp {
            dependency: self.dependency.to_string(),
            reason,
        }
    }
}
