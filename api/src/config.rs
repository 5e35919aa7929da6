use std::{
    env,
    fmt::Display,
    num::{NonZeroU32, NonZeroUsize},
    str::FromStr,
};
use tracing::{info, warn};

const DEFAULT_POSTS_PER_HOUR: NonZeroU32 = NonZeroU32::new(3).unwrap();
const DEFAULT_MAX_CONCURRENT_REQUESTS: NonZeroUsize = NonZeroUsize::new(512).unwrap();

/// Runtime settings, read from the environment (and `.env` via dotenvy in `main`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub posts_per_hour: NonZeroU32,
    pub max_concurrent_requests: NonZeroUsize,
    pub seed_demo_posts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            posts_per_hour: DEFAULT_POSTS_PER_HOUR,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            seed_demo_posts: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: load("HOST", defaults.host),
            port: load("PORT", defaults.port),
            posts_per_hour: load("POSTS_PER_HOUR", defaults.posts_per_hour),
            max_concurrent_requests: load(
                "MAX_CONCURRENT_REQUESTS",
                defaults.max_concurrent_requests,
            ),
            seed_demo_posts: load("SEED_DEMO_POSTS", defaults.seed_demo_posts),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    parse_or(key, env::var(key).ok(), default)
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = raw else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_the_default() {
        assert_eq!(parse_or("PORT", None, 3000u16), 3000);
    }

    #[test]
    fn values_are_trimmed_and_parsed() {
        assert_eq!(parse_or("PORT", Some(" 8080 ".into()), 3000u16), 8080);
        assert!(parse_or("SEED_DEMO_POSTS", Some("true".into()), false));
    }

    #[test]
    fn invalid_values_fall_back() {
        let default = NonZeroU32::new(3).unwrap();
        assert_eq!(parse_or("POSTS_PER_HOUR", Some("0".into()), default), default);
        assert_eq!(parse_or("PORT", Some("http".into()), 3000u16), 3000);
    }
}
