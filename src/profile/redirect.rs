//! Redirect target discovery
//!
//! The API answers some requests with a temporary redirect whose HTML body
//! lists anchors; the second anchor points at the real endpoint. The first is
//! assumed to be decorative, which matches observed responses but is not a
//! documented contract.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{LoginRadiusError, Result};

/// Position of the followed anchor among all anchors in the body
pub const REDIRECT_ANCHOR_INDEX: usize = 1;

static ANCHOR_HREF: OnceLock<Regex> = OnceLock::new();

fn anchor_href() -> &'static Regex {
    ANCHOR_HREF.get_or_init(|| {
        Regex::new(r#"(?is)<a\s[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
            .expect("anchor pattern is a valid regex")
    })
}

/// All anchor hrefs in document order
pub fn anchor_hrefs(body: &str) -> Vec<String> {
    anchor_href()
        .captures_iter(body)
        .filter_map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().trim().replace("&amp;", "&"))
        })
        .collect()
}

/// Pick the redirect target from a redirect body and make it absolute.
///
/// Relative hrefs are resolved against the URL that produced the redirect.
pub fn redirect_target(body: &str, request_url: &str) -> Result<String> {
    let hrefs = anchor_hrefs(body);
    let href = hrefs.get(REDIRECT_ANCHOR_INDEX).ok_or_else(|| {
        LoginRadiusError::RedirectResolution(format!(
            "expected at least {} anchors in redirect body, found {}",
            REDIRECT_ANCHOR_INDEX + 1,
            hrefs.len()
        ))
    })?;

    if href.is_empty() {
        return Err(LoginRadiusError::RedirectResolution(
            "redirect anchor has an empty href".to_string(),
        ));
    }

    let base = url::Url::parse(request_url).map_err(|e| {
        LoginRadiusError::RedirectResolution(format!("bad request url {}: {}", request_url, e))
    })?;
    let target = base.join(href).map_err(|e| {
        LoginRadiusError::RedirectResolution(format!("bad redirect href {}: {}", href, e))
    })?;

    match target.scheme() {
        "http" | "https" => Ok(target.to_string()),
        other => Err(LoginRadiusError::RedirectResolution(format!(
            "refusing to follow {} redirect",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST_URL: &str = "https://hub.loginradius.com/userprofile.ashx";

    const TWO_ANCHORS: &str = r#"<html><body>
        <a href="https://www.loginradius.com/"><img src="logo.png"></a>
        <h2>Object moved to <a href="https://api.loginradius.com/userprofile.ashx">here</a>.</h2>
        </body></html>"#;

    #[test]
    fn test_anchor_hrefs_in_order() {
        let hrefs = anchor_hrefs(TWO_ANCHORS);
        assert_eq!(
            hrefs,
            vec![
                "https://www.loginradius.com/".to_string(),
                "https://api.loginradius.com/userprofile.ashx".to_string(),
            ]
        );
    }

    #[test]
    fn test_anchor_hrefs_quote_styles_and_attributes() {
        let body = r#"<A class="x" HREF='/one'>1</A><a
            target=_blank href=/two>2</a><abbr href="/nope">"#;
        assert_eq!(anchor_hrefs(body), vec!["/one".to_string(), "/two".to_string()]);
    }

    #[test]
    fn test_redirect_target_uses_second_anchor() {
        let target = redirect_target(TWO_ANCHORS, REQUEST_URL).unwrap();
        assert_eq!(target, "https://api.loginradius.com/userprofile.ashx");
    }

    #[test]
    fn test_redirect_target_resolves_relative_href() {
        let body = r#"<a href="/">home</a><a href="v2/userprofile.ashx?x=1&amp;y=2">moved</a>"#;
        let target = redirect_target(body, REQUEST_URL).unwrap();
        assert_eq!(target, "https://hub.loginradius.com/v2/userprofile.ashx?x=1&y=2");
    }

    #[test]
    fn test_redirect_target_needs_two_anchors() {
        let body = r#"<a href="https://api.loginradius.com/userprofile.ashx">here</a>"#;
        let err = redirect_target(body, REQUEST_URL).unwrap_err();
        assert!(matches!(err, LoginRadiusError::RedirectResolution(_)));

        let err = redirect_target("", REQUEST_URL).unwrap_err();
        assert!(matches!(err, LoginRadiusError::RedirectResolution(_)));
    }

    #[test]
    fn test_redirect_target_rejects_non_http() {
        let body = r#"<a href="/">a</a><a href="javascript:alert(1)">b</a>"#;
        let err = redirect_target(body, REQUEST_URL).unwrap_err();
        assert!(matches!(err, LoginRadiusError::RedirectResolution(_)));
    }
}
