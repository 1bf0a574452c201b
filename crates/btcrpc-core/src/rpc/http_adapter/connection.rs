use std::path::Path;

use reqwest::Url;

use crate::error::CoreError;

/// Environment variable consulted when no endpoint is passed explicitly.
pub const ENDPOINT_ENV: &str = "BITCOIN_HTTP_PROVIDER_URI";

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8332";

/// Pick the endpoint: explicit value, then the environment, then the default.
pub(super) fn resolve_endpoint(
    explicit: Option<&str>,
    from_env: Option<String>,
) -> Result<Url, CoreError> {
    match (explicit, from_env) {
        (Some(endpoint), _) => parse_connection(endpoint),
        (None, Some(endpoint)) => parse_connection(&endpoint),
        (None, None) => parse_connection(DEFAULT_ENDPOINT),
    }
}

pub(super) fn parse_connection(connection: &str) -> Result<Url, CoreError> {
    let parsed = Url::parse(connection).map_err(|e| {
        CoreError::Configuration(format!(
            "invalid endpoint `{connection}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(CoreError::Configuration(format!(
            "unsupported endpoint scheme `{other}`; expected http or https"
        ))),
    }
}

/// Target URL for a call: the base endpoint, or `<base>/wallet/<name>`.
///
/// The wallet name is pushed as a single percent-encoded path segment, so
/// names with spaces or slashes reach the node intact.
pub(super) fn wallet_url(base: &Url, wallet: Option<&str>) -> Result<Url, CoreError> {
    let Some(wallet) = wallet.filter(|w| !w.is_empty()) else {
        return Ok(base.clone());
    };

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            CoreError::Configuration(format!("endpoint `{base}` cannot carry a wallet path"))
        })?
        .pop_if_empty()
        .push("wallet")
        .push(wallet);
    Ok(url)
}

pub(super) fn resolve_auth(
    user: Option<&str>,
    pass: Option<&str>,
    cookie_file: Option<&Path>,
) -> Result<Option<(String, String)>, CoreError> {
    match (user, pass) {
        (Some(u), Some(p)) => return Ok(Some((u.to_owned(), p.to_owned()))),
        (Some(_), None) | (None, Some(_)) => {
            return Err(CoreError::Configuration(
                "both rpc user and rpc password must be set together".to_owned(),
            ));
        }
        (None, None) => {}
    }

    let Some(cookie_file) = cookie_file else {
        return Ok(None);
    };

    let content = std::fs::read_to_string(cookie_file).map_err(|e| {
        CoreError::Configuration(format!(
            "failed to read rpc cookie file {}: {e}",
            cookie_file.display()
        ))
    })?;
    let line = content
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .ok_or_else(|| {
            CoreError::Configuration(format!(
                "rpc cookie file {} is empty",
                cookie_file.display()
            ))
        })?;

    let (cookie_user, cookie_pass) = line.split_once(':').ok_or_else(|| {
        CoreError::Configuration(format!(
            "rpc cookie file {} must contain `username:password`",
            cookie_file.display()
        ))
    })?;
    if cookie_user.is_empty() || cookie_pass.is_empty() {
        return Err(CoreError::Configuration(format!(
            "rpc cookie file {} must contain non-empty `username:password`",
            cookie_file.display()
        )));
    }

    Ok(Some((cookie_user.to_owned(), cookie_pass.to_owned())))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn base() -> Url {
        parse_connection("http://127.0.0.1:8332").expect("should parse")
    }

    #[test]
    fn resolve_endpoint_prefers_explicit_value() {
        let url = resolve_endpoint(Some("https://node.example:8332"), Some("http://env:1".into()))
            .expect("should parse");
        assert_eq!(url.as_str(), "https://node.example:8332/");
    }

    #[test]
    fn resolve_endpoint_falls_back_to_env_then_default() {
        let url = resolve_endpoint(None, Some("http://10.0.0.2:18443".into())).expect("env url");
        assert_eq!(url.port(), Some(18443));

        let url = resolve_endpoint(None, None).expect("default url");
        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert_eq!(url.port(), Some(8332));
    }

    #[test]
    fn parse_connection_invalid_scheme() {
        let err = parse_connection("ftp://example.com").expect_err("must reject ftp");
        assert!(matches!(err, CoreError::Configuration(_)));
        assert!(err.to_string().contains("unsupported endpoint scheme"));
    }

    #[test]
    fn parse_connection_rejects_garbage() {
        let err = parse_connection("not a url").expect_err("must reject");
        assert!(matches!(err, CoreError::Configuration(_)));
    }

    #[test]
    fn wallet_url_without_wallet_is_base() {
        assert_eq!(wallet_url(&base(), None).expect("url"), base());
        assert_eq!(wallet_url(&base(), Some("")).expect("url"), base());
    }

    #[test]
    fn wallet_url_appends_wallet_segment() {
        let url = wallet_url(&base(), Some("alice")).expect("url");
        assert_eq!(url.as_str(), "http://127.0.0.1:8332/wallet/alice");
    }

    #[test]
    fn wallet_url_keeps_base_path_and_escapes_name() {
        let base = parse_connection("http://127.0.0.1:8332/rpc/").expect("should parse");
        let url = wallet_url(&base, Some("cold storage/2")).expect("url");
        assert_eq!(url.as_str(), "http://127.0.0.1:8332/rpc/wallet/cold%20storage%2F2");
    }

    #[test]
    fn resolve_auth_rejects_partial_credentials() {
        let err = resolve_auth(Some("user"), None, None).expect_err("must reject partial auth");
        assert!(err.to_string().contains("must be set together"));
    }

    #[test]
    fn resolve_auth_accepts_user_and_pass() {
        let auth = resolve_auth(Some("alice"), Some("secret"), None).expect("auth must parse");
        assert_eq!(auth, Some(("alice".to_owned(), "secret".to_owned())));
    }

    #[test]
    fn resolve_auth_without_anything_is_anonymous() {
        assert_eq!(resolve_auth(None, None, None).expect("no auth"), None);
    }

    #[test]
    fn resolve_auth_reads_cookie_file() {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time must be after unix epoch")
            .as_nanos();
        let cookie_path = std::env::temp_dir().join(format!("btcrpc-cookie-{unique}.txt"));
        fs::write(&cookie_path, "__cookie__:token\n").expect("cookie file must be writable");

        let auth = resolve_auth(None, None, Some(&cookie_path)).expect("cookie must parse");
        assert_eq!(auth, Some(("__cookie__".to_owned(), "token".to_owned())));

        let _ = fs::remove_file(cookie_path);
    }

    #[test]
    fn resolve_auth_missing_cookie_file_is_configuration_error() {
        let path = std::env::temp_dir().join("btcrpc-cookie-does-not-exist");
        let err = resolve_auth(None, None, Some(&path)).expect_err("missing file");
        assert!(matches!(err, CoreError::Configuration(_)));
    }
}
