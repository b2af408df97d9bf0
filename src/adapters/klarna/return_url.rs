//! Return URL construction for Klarna payment requests.
//!
//! Klarna only redirects to whitelisted HTTPS hosts, so the host is reduced
//! to a bare domain before the URL is built.

/// Host used when neither the request nor configuration names one.
pub const DEFAULT_PUBLIC_HOST: &str = "paytrail-payment-api-demo.vercel.app";

/// Picks the public host for return URLs.
///
/// Order: `x-forwarded-host`, `host`, the configured public host, then
/// [`DEFAULT_PUBLIC_HOST`]. Blank candidates are skipped. Any port or path is
/// stripped from the chosen value.
pub fn resolve_return_host(
    forwarded_host: Option<&str>,
    host: Option<&str>,
    configured: Option<&str>,
) -> String {
    let chosen = [forwarded_host, host, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(DEFAULT_PUBLIC_HOST);

    let bare = strip_port(chosen.split('/').next().unwrap_or_default());

    if bare.is_empty() {
        DEFAULT_PUBLIC_HOST.to_string()
    } else {
        bare.to_string()
    }
}

/// Removes a trailing `:port`, keeping bracketed IPv6 literals whole.
fn strip_port(authority: &str) -> &str {
    if authority.starts_with('[') {
        return match authority.find(']') {
            Some(end) => &authority[..=end],
            None => "",
        };
    }
    authority.split(':').next().unwrap_or_default()
}

/// Builds the success URL with Klarna's placeholder tokens left intact.
pub fn payment_return_url(host: &str) -> String {
    format!(
        "https://{}/payment-success?payment_request_id={{klarna.payment_request.id}}&state={{klarna.payment_request.state}}&payment_token={{klarna.payment_request.payment_token}}",
        host
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwarded_host_wins() {
        let host = resolve_return_host(Some("shop.example"), Some("internal:8080"), Some("cfg.example"));
        assert_eq!(host, "shop.example");
    }

    #[test]
    fn host_header_is_stripped_of_port() {
        assert_eq!(resolve_return_host(None, Some("localhost:3000"), None), "localhost");
    }

    #[test]
    fn bracketed_ipv6_host_keeps_address() {
        assert_eq!(resolve_return_host(None, Some("[::1]:3000"), None), "[::1]");
        assert_eq!(resolve_return_host(Some("[2001:db8::7]"), None, None), "[2001:db8::7]");
    }

    #[test]
    fn unterminated_ipv6_host_falls_back() {
        assert_eq!(resolve_return_host(None, Some("[::1"), None), DEFAULT_PUBLIC_HOST);
    }

    #[test]
    fn path_is_stripped() {
        assert_eq!(resolve_return_host(Some("shop.example/checkout"), None, None), "shop.example");
    }

    #[test]
    fn configured_host_then_default() {
        assert_eq!(resolve_return_host(None, None, Some("cfg.example")), "cfg.example");
        assert_eq!(resolve_return_host(None, Some("  "), None), DEFAULT_PUBLIC_HOST);
    }

    #[test]
    fn return_url_keeps_placeholders() {
        assert_eq!(
            payment_return_url("shop.example"),
            "https://shop.example/payment-success?payment_request_id={klarna.payment_request.id}&state={klarna.payment_request.state}&payment_token={klarna.payment_request.payment_token}"
        );
    }
}
