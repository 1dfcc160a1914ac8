pub mod config;

use crate::wait::PollSettings;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub polling: Polling,
}

/// Polling limits. Zero for `max_attempts` or `timeout_secs` means no limit,
/// zero for `interval_secs` means the default interval.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Polling {
    pub interval_secs: u64,
    pub max_attempts: u32,
    pub timeout_secs: u64,
}

impl Default for Polling {
    fn default() -> Self {
        Self {
            interval_secs: crate::wait::DEFAULT_POLL_INTERVAL.as_secs(),
            max_attempts: 0,
            timeout_secs: 0,
        }
    }
}

impl Polling {
    pub fn override_with(
        mut self,
        interval_secs: Option<u64>,
        max_attempts: Option<u32>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(interval_secs) = interval_secs {
            self.interval_secs = interval_secs;
        }
        if let Some(max_attempts) = max_attempts {
            self.max_attempts = max_attempts;
        }
        if let Some(timeout_secs) = timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        self
    }
}

impl From<Polling> for PollSettings {
    fn from(polling: Polling) -> Self {
        PollSettings {
            interval: match polling.interval_secs {
                0 => crate::wait::DEFAULT_POLL_INTERVAL,
                secs => Duration::from_secs(secs),
            },
            max_attempts: (polling.max_attempts > 0).then_some(polling.max_attempts),
            timeout: (polling.timeout_secs > 0).then(|| Duration::from_secs(polling.timeout_secs)),
        }
    }
}
