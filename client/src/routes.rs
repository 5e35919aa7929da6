use std::fmt;

/// In-app navigation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Create,
    Post(String),
    Search,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Create => "/create".to_string(),
            Route::Post(id) => format!("/post/{}", urlencoding::encode(id)),
            Route::Search => "/search".to_string(),
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Route::Home),
            "/create" => Some(Route::Create),
            "/search" => Some(Route::Search),
            other => {
                let id = other.strip_prefix("/post/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                let id = urlencoding::decode(id).ok()?;
                Some(Route::Post(id.into_owned()))
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_route_path() {
        assert_eq!(Route::Post("abc-123".into()).path(), "/post/abc-123");
        assert_eq!(Route::Home.to_string(), "/");
    }

    #[test]
    fn parses_app_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/create"), Some(Route::Create));
        assert_eq!(Route::parse("/search/"), Some(Route::Search));
        assert_eq!(Route::parse("/post/abc-123"), Some(Route::Post("abc-123".into())));
    }

    #[test]
    fn unknown_paths_do_not_parse() {
        assert_eq!(Route::parse("/post/"), None);
        assert_eq!(Route::parse("/post/a/b"), None);
        assert_eq!(Route::parse("/admin"), None);
    }
}
