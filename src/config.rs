//! Configuration for [`FetchMock`].

use crate::intercept::FetchMock;
use crate::transport::TransportSlot;
use std::sync::Arc;

/// Environment variable that turns on diagnostic logging.
pub const VERBOSE_ENV: &str = "VERBOSE";

/// Runtime settings of a [`FetchMock`].
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Log registrations and calls. `None` consults [`VERBOSE_ENV`] on every
    /// event.
    pub verbose: Option<bool>,
}

impl Settings {
    /// Settings fixed from the current environment.
    pub fn from_env() -> Self {
        Settings {
            verbose: Some(env_flag(VERBOSE_ENV)),
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.unwrap_or_else(|| env_flag(VERBOSE_ENV))
    }
}

/// A variable is on when set to anything but empty, `0` or `false`.
fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| {
            let v = v.trim();
            !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false")
        })
        .unwrap_or(false)
}

/// Builder for configuring a [`FetchMock`].
#[derive(Debug, Default)]
pub struct FetchMockBuilder {
    slot: Option<Arc<TransportSlot>>,
    settings: Settings,
    disable_real_requests: bool,
}

impl FetchMockBuilder {
    /// Install into this slot instead of a fresh one.
    pub fn slot(mut self, slot: Arc<TransportSlot>) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Turn diagnostic logging on or off, ignoring the environment.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.settings.verbose = Some(verbose);
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Start with real requests disabled.
    pub fn disable_real_requests(mut self) -> Self {
        self.disable_real_requests = true;
        self
    }

    pub fn build(self) -> FetchMock {
        let slot = self.slot.unwrap_or_default();
        FetchMock::from_parts(slot, self.settings, self.disable_real_requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_from_env() {
        temp_env::with_var(VERBOSE_ENV, Some("1"), || {
            assert!(Settings::from_env().is_verbose());
            assert!(Settings::default().is_verbose());
        });
        temp_env::with_var(VERBOSE_ENV, Some("false"), || {
            assert!(!Settings::from_env().is_verbose());
        });
        temp_env::with_var(VERBOSE_ENV, Some(""), || {
            assert!(!Settings::default().is_verbose());
        });
        temp_env::with_var_unset(VERBOSE_ENV, || {
            assert!(!Settings::from_env().is_verbose());
        });
    }

    #[test]
    fn test_explicit_verbose_ignores_env() {
        temp_env::with_var(VERBOSE_ENV, Some("1"), || {
            let settings = Settings {
                verbose: Some(false),
            };
            assert!(!settings.is_verbose());
        });
    }
}
