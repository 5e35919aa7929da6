/// Environment variable holding the deployment's default API base URL.
pub const BASE_URL_ENV: &str = "FUCKBOSS_API_BASE_URL";

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Picks the API base URL: explicit override, then the configured default,
/// then `""` for same-origin relative paths. Blank values count as unset.
pub fn resolve_base_url(explicit: Option<&str>, configured: Option<&str>) -> String {
    explicit
        .into_iter()
        .chain(configured)
        .map(str::trim)
        .find(|url| !url.is_empty())
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_default()
}

/// [`resolve_base_url`] with the configured default read from [`BASE_URL_ENV`].
pub fn base_url_from_env(explicit: Option<&str>) -> String {
    let configured = std::env::var(BASE_URL_ENV).ok();
    resolve_base_url(explicit, configured.as_deref())
}
