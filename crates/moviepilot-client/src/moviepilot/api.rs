//! MoviePilot v1 REST endpoints.

pub const LOGIN_PATH: &str = "/api/v1/login/access-token";
pub const SEARCH_PATH: &str = "/api/v1/media/search";
pub const SEASONS_PATH: &str = "/api/v1/tmdb/seasons";
pub const SUBSCRIBE_PATH: &str = "/api/v1/subscribe/";
pub const DOWNLOAD_PATH: &str = "/api/v1/download/";

pub fn login_url(base_url: &str) -> String {
    format!("{}{}", base_url, LOGIN_PATH)
}

pub fn search_url(base_url: &str, title: &str) -> String {
    format!("{}{}?title={}", base_url, SEARCH_PATH, urlencoding::encode(title))
}

pub fn seasons_url(base_url: &str, tmdb_id: &str) -> String {
    format!("{}{}/{}", base_url, SEASONS_PATH, urlencoding::encode(tmdb_id))
}

pub fn subscribe_url(base_url: &str) -> String {
    format!("{}{}", base_url, SUBSCRIBE_PATH)
}

pub fn download_url(base_url: &str) -> String {
    format!("{}{}", base_url, DOWNLOAD_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_plain_title() {
        assert_eq!(
            search_url("http://mp:3000", "Inception"),
            "http://mp:3000/api/v1/media/search?title=Inception"
        );
    }

    #[test]
    fn test_search_url_escapes_query() {
        assert_eq!(
            search_url("http://mp:3000", "Tom & Jerry"),
            "http://mp:3000/api/v1/media/search?title=Tom%20%26%20Jerry"
        );
    }

    #[test]
    fn test_path_urls() {
        assert_eq!(seasons_url("http://mp", "1399"), "http://mp/api/v1/tmdb/seasons/1399");
        assert_eq!(subscribe_url("http://mp"), "http://mp/api/v1/subscribe/");
        assert_eq!(download_url("http://mp"), "http://mp/api/v1/download/");
        assert_eq!(login_url("http://mp"), "http://mp/api/v1/login/access-token");
    }
}
