use anyhow::Result;

/// Endpoint defaults (OrbitronAI production deployment).
pub const DEFAULT_BASE_URL: &str = "https://laminar.orbitronai.com";
pub const DEFAULT_OTLP_GRPC_URL: &str = "https://otlp-grpc.laminar.orbitronai.com:443";
pub const DEFAULT_OTLP_HTTP_URL: &str = "https://otlp-http.laminar.orbitronai.com";

pub const API_KEY_VAR: &str = "LAMINAR_API_KEY";
pub const BASE_URL_VAR: &str = "LAMINAR_BASE_URL";
pub const OTLP_GRPC_URL_VAR: &str = "LAMINAR_OTLP_GRPC_URL";
pub const OTLP_HTTP_URL_VAR: &str = "LAMINAR_OTLP_HTTP_URL";

/// Backend endpoints and credential, resolved once at startup and passed
/// into every probe. Never re-read from the environment after this.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub base_url: String,
    pub otlp_grpc_url: String,
    pub otlp_http_url: String,
    pub api_key: String,
}

/// Resolve configuration from the process environment.
pub fn from_env() -> Result<EndpointConfig> {
    resolve(|var| std::env::var(var).ok())
}

/// Resolve configuration from an arbitrary variable lookup.
///
/// URL variables fall back to the production defaults when absent or
/// empty. A missing or blank API key is the only fatal error in the
/// program: the message carries the remediation steps.
pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<EndpointConfig> {
    let api_key = lookup(API_KEY_VAR).unwrap_or_default().trim().to_string();
    if api_key.is_empty() {
        anyhow::bail!(
            "{API_KEY_VAR} is not set.\n  1. Go to {DEFAULT_BASE_URL}\n  2. Open your project -> Settings -> API Keys\n  3. export {API_KEY_VAR}='<your-key>'"
        );
    }

    Ok(EndpointConfig {
        base_url: url_or_default(&lookup, BASE_URL_VAR, DEFAULT_BASE_URL),
        otlp_grpc_url: url_or_default(&lookup, OTLP_GRPC_URL_VAR, DEFAULT_OTLP_GRPC_URL),
        otlp_http_url: url_or_default(&lookup, OTLP_HTTP_URL_VAR, DEFAULT_OTLP_HTTP_URL),
        api_key,
    })
}

fn url_or_default(lookup: &impl Fn(&str) -> Option<String>, var: &str, default: &str) -> String {
    match lookup(var) {
        Some(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_applied_when_urls_absent() {
        let env = vars(&[(API_KEY_VAR, "sk-test")]);
        let cfg = resolve(|var| env.get(var).cloned()).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.otlp_grpc_url, DEFAULT_OTLP_GRPC_URL);
        assert_eq!(cfg.otlp_http_url, DEFAULT_OTLP_HTTP_URL);
        assert_eq!(cfg.api_key, "sk-test");
    }

    #[test]
    fn test_empty_url_falls_back_to_default() {
        let env = vars(&[(API_KEY_VAR, "sk-test"), (BASE_URL_VAR, "  ")]);
        let cfg = resolve(|var| env.get(var).cloned()).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_url_overrides_honored() {
        let env = vars(&[
            (API_KEY_VAR, "sk-test"),
            (BASE_URL_VAR, "https://laminar.internal"),
            (OTLP_GRPC_URL_VAR, "https://grpc.laminar.internal:443"),
            (OTLP_HTTP_URL_VAR, "https://http.laminar.internal"),
        ]);
        let cfg = resolve(|var| env.get(var).cloned()).unwrap();
        assert_eq!(cfg.base_url, "https://laminar.internal");
        assert_eq!(cfg.otlp_grpc_url, "https://grpc.laminar.internal:443");
        assert_eq!(cfg.otlp_http_url, "https://http.laminar.internal");
    }

    #[test]
    fn test_missing_api_key_is_fatal_with_remediation() {
        let err = resolve(|_| None).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains(API_KEY_VAR));
        assert!(msg.contains("Settings -> API Keys"));
    }

    #[test]
    fn test_blank_api_key_is_fatal() {
        let env = vars(&[(API_KEY_VAR, "   ")]);
        assert!(resolve(|var| env.get(var).cloned()).is_err());
    }

    #[test]
    fn test_api_key_is_trimmed() {
        let env = vars(&[(API_KEY_VAR, "  sk-test \n")]);
        let cfg = resolve(|var| env.get(var).cloned()).unwrap();
        assert_eq!(cfg.api_key, "sk-test");
    }
}
