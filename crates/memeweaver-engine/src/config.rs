//! Engine configuration

/// Tunables for the behaviour layer.
///
/// `Default` reads the `MEMEWEAVER_*` environment, so a plain
/// `EngineConfig::default()` picks up deployment settings; tests override
/// fields directly (a zero `max_action_delay_secs` disables the jitter).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Skip the engagement pass entirely and report done
    pub skip_engagement: bool,
    /// Upper bound, in seconds, of the randomized delay between actions
    pub max_action_delay_secs: u64,
    /// Minimum native balance required to enter an action round
    pub minimum_gas_balance: u128,
    /// How many of the agent's own tweets the decision prompt includes
    pub prompt_tweet_history: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            skip_engagement: env_flag("MEMEWEAVER_SKIP_ENGAGEMENT"),
            max_action_delay_secs: env_parse("MEMEWEAVER_MAX_ACTION_DELAY_SECS", 4),
            minimum_gas_balance: env_parse("MEMEWEAVER_MINIMUM_GAS_BALANCE", 0),
            prompt_tweet_history: 5,
        }
    }
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn env_parse<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
