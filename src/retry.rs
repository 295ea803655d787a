use std::time::Duration;

/// Delay before the first retry (service default, 100 ms).
pub const DEFAULT_INITIAL_RETRY_DELAY_MS: u64 = 100;
/// Factor applied to the delay after each retry (service default).
pub const DEFAULT_RETRY_DELAY_MULTIPLIER: f64 = 1.3;
/// Upper bound on the delay between retries (service default, 1 minute).
pub const DEFAULT_MAX_RETRY_DELAY_MS: u64 = 60_000;
/// Maximum attempts; `0` means attempts are bounded by the total timeout only
/// (service default).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 0;
/// Overall budget for one logical call including retries (service default,
/// 10 minutes).
pub const DEFAULT_TOTAL_TIMEOUT_MS: u64 = 600_000;

/// Effective retry schedule applied to every request a client sends.
///
/// Defaults mirror the Natural Language service retry policy. Values are
/// resolved field-by-field from three sources, highest priority first:
/// an explicitly supplied [`RetryOverrides`] (see
/// [`LanguageClient::with_retry`](crate::LanguageClient::with_retry)),
/// retry properties bound into [`LanguageConfig`](crate::LanguageConfig),
/// and finally these defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct RetrySettings {
    /// Delay before the first retry.
    pub initial_retry_delay: Duration,
    /// Factor applied to the previous delay on each subsequent retry.
    pub retry_delay_multiplier: f64,
    /// Cap on the delay between retries.
    pub max_retry_delay: Duration,
    /// Maximum number of attempts, counting the initial one. `0` disables
    /// the attempt bound; the total timeout still applies.
    pub max_attempts: u32,
    /// Budget for the whole call. No retry is scheduled past this point.
    pub total_timeout: Duration,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            initial_retry_delay: Duration::from_millis(DEFAULT_INITIAL_RETRY_DELAY_MS),
            retry_delay_multiplier: DEFAULT_RETRY_DELAY_MULTIPLIER,
            max_retry_delay: Duration::from_millis(DEFAULT_MAX_RETRY_DELAY_MS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            total_timeout: Duration::from_millis(DEFAULT_TOTAL_TIMEOUT_MS),
        }
    }
}

impl RetrySettings {
    /// Applies a partial override record on top of `self`.
    ///
    /// Only the fields set in `overrides` change; everything else keeps its
    /// current value. Layering calls therefore realizes the precedence rule
    /// "explicit override > property override > service default" per field.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &RetryOverrides) -> Self {
        if let Some(delay) = overrides.initial_retry_delay {
            self.initial_retry_delay = delay;
        }
        if let Some(multiplier) = overrides.retry_delay_multiplier {
            self.retry_delay_multiplier = multiplier;
        }
        if let Some(delay) = overrides.max_retry_delay {
            self.max_retry_delay = delay;
        }
        if let Some(attempts) = overrides.max_attempts {
            self.max_attempts = attempts;
        }
        if let Some(timeout) = overrides.total_timeout {
            self.total_timeout = timeout;
        }
        self
    }

    /// Delay to wait before the retry with the given zero-based index.
    pub(crate) fn retry_delay(&self, retry_index: u32) -> Duration {
        let factor = self
            .retry_delay_multiplier
            .powi(retry_index.min(64) as i32);
        let scaled = self.initial_retry_delay.as_secs_f64() * factor;
        if !scaled.is_finite() || scaled >= self.max_retry_delay.as_secs_f64() {
            return self.max_retry_delay;
        }
        Duration::from_secs_f64(scaled.max(0.0)).min(self.max_retry_delay)
    }

    /// Whether another attempt may be scheduled after `attempts_made`
    /// attempts and `elapsed` time, given the delay that would precede it.
    pub(crate) fn allows_retry(
        &self,
        attempts_made: u32,
        elapsed: Duration,
        next_delay: Duration,
    ) -> bool {
        if self.max_attempts != 0 && attempts_made >= self.max_attempts {
            return false;
        }
        elapsed.saturating_add(next_delay) < self.total_timeout
    }
}

/// Partial retry record; fields left `None` fall through to the next
/// priority level.
///
/// Bound from retry properties by [`LanguageConfig`](crate::LanguageConfig),
/// or supplied directly to
/// [`LanguageClient::with_retry`](crate::LanguageClient::with_retry).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RetryOverrides {
    /// Overrides [`RetrySettings::initial_retry_delay`].
    pub initial_retry_delay: Option<Duration>,
    /// Overrides [`RetrySettings::retry_delay_multiplier`].
    pub retry_delay_multiplier: Option<f64>,
    /// Overrides [`RetrySettings::max_retry_delay`].
    pub max_retry_delay: Option<Duration>,
    /// Overrides [`RetrySettings::max_attempts`].
    pub max_attempts: Option<u32>,
    /// Overrides [`RetrySettings::total_timeout`].
    pub total_timeout: Option<Duration>,
}

impl RetryOverrides {
    /// Returns `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        self.initial_retry_delay.is_none()
            && self.retry_delay_multiplier.is_none()
            && self.max_retry_delay.is_none()
            && self.max_attempts.is_none()
            && self.total_timeout.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{RetryOverrides, RetrySettings};
    use std::time::Duration;

    #[test]
    fn defaults_match_service_policy() {
        let settings = RetrySettings::default();
        assert_eq!(settings.initial_retry_delay, Duration::from_millis(100));
        assert_eq!(settings.retry_delay_multiplier, 1.3);
        assert_eq!(settings.max_retry_delay, Duration::from_secs(60));
        assert_eq!(settings.max_attempts, 0);
        assert_eq!(settings.total_timeout, Duration::from_secs(600));
    }

    #[test]
    fn overrides_change_only_set_fields() {
        let overrides = RetryOverrides {
            initial_retry_delay: Some(Duration::from_millis(500)),
            retry_delay_multiplier: Some(2.0),
            ..RetryOverrides::default()
        };
        let settings = RetrySettings::default().with_overrides(&overrides);

        assert_eq!(settings.initial_retry_delay, Duration::from_millis(500));
        assert_eq!(settings.retry_delay_multiplier, 2.0);
        assert_eq!(settings.max_retry_delay, Duration::from_secs(60));
        assert_eq!(settings.max_attempts, 0);
    }

    #[test]
    fn layered_overrides_resolve_per_field() {
        let from_properties = RetryOverrides {
            retry_delay_multiplier: Some(2.0),
            max_retry_delay: Some(Duration::from_secs(10)),
            ..RetryOverrides::default()
        };
        let explicit = RetryOverrides {
            initial_retry_delay: Some(Duration::from_millis(250)),
            max_retry_delay: Some(Duration::from_secs(5)),
            ..RetryOverrides::default()
        };

        let settings = RetrySettings::default()
            .with_overrides(&from_properties)
            .with_overrides(&explicit);

        // explicit wins where both set, property where only it is set,
        // default where neither is.
        assert_eq!(settings.max_retry_delay, Duration::from_secs(5));
        assert_eq!(settings.retry_delay_multiplier, 2.0);
        assert_eq!(settings.initial_retry_delay, Duration::from_millis(250));
        assert_eq!(settings.max_attempts, 0);
    }

    #[test]
    fn empty_overrides_keep_defaults() {
        let overrides = RetryOverrides::default();
        assert!(overrides.is_empty());
        assert_eq!(
            RetrySettings::default().with_overrides(&overrides),
            RetrySettings::default()
        );
    }

    #[test]
    fn retry_delay_grows_by_multiplier_and_caps() {
        let settings = RetrySettings {
            initial_retry_delay: Duration::from_millis(100),
            retry_delay_multiplier: 2.0,
            max_retry_delay: Duration::from_millis(350),
            ..RetrySettings::default()
        };

        assert_eq!(settings.retry_delay(0), Duration::from_millis(100));
        assert_eq!(settings.retry_delay(1), Duration::from_millis(200));
        assert_eq!(settings.retry_delay(2), Duration::from_millis(350));
        assert_eq!(settings.retry_delay(10), Duration::from_millis(350));
    }

    #[test]
    fn max_attempts_zero_defers_to_total_timeout() {
        let settings = RetrySettings {
            max_attempts: 0,
            total_timeout: Duration::from_secs(1),
            ..RetrySettings::default()
        };

        assert!(settings.allows_retry(50, Duration::from_millis(100), Duration::from_millis(100)));
        assert!(!settings.allows_retry(1, Duration::from_secs(1), Duration::ZERO));
    }

    #[test]
    fn max_attempts_bounds_retries() {
        let settings = RetrySettings {
            max_attempts: 3,
            ..RetrySettings::default()
        };

        assert!(settings.allows_retry(2, Duration::ZERO, Duration::from_millis(1)));
        assert!(!settings.allows_retry(3, Duration::ZERO, Duration::from_millis(1)));
    }
}
