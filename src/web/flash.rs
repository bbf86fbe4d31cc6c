//! One-shot flash messages carried in a signed cookie.
//!
//! A handler that redirects attaches messages with [`redirect_with_flash`];
//! the next page render reads them through the [`IncomingFlashes`] extractor
//! and clears the cookie with [`render_with_flashes`].
//!
//! # Cookie Format
//!
//! ```text
//! flash=<base64url(json)>.<hex(hmac-sha256(base64url(json)))>
//! ```
//!
//! A cookie whose signature does not verify is ignored.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{
        HeaderValue,
        header::{COOKIE, SET_COOKIE},
        request::Parts,
    },
    response::{IntoResponse, Redirect, Response},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

const COOKIE_NAME: &str = "flash";

/// Bootstrap alert category of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Info,
    Danger,
}

impl FlashCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashCategory::Success => "success",
            FlashCategory::Info => "info",
            FlashCategory::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Info,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Danger,
            message: message.into(),
        }
    }

    /// Alert category as a CSS class suffix.
    pub fn css_class(&self) -> &'static str {
        self.category.as_str()
    }
}

/// Signs and verifies flash cookie payloads with HMAC-SHA256.
#[derive(Clone)]
pub struct FlashSigner {
    secret: String,
}

impl FlashSigner {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.secret.as_bytes()).expect("HMAC accepts any key length")
    }

    /// Encodes and signs `flashes` into a cookie value.
    pub fn sign(&self, flashes: &[Flash]) -> String {
        let json = serde_json::to_vec(flashes).unwrap_or_default();
        let payload = URL_SAFE_NO_PAD.encode(json);

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        format!("{payload}.{signature}")
    }

    /// Verifies a cookie value and decodes its messages.
    ///
    /// Returns `None` if the value is malformed or the signature is wrong.
    pub fn verify(&self, value: &str) -> Option<Vec<Flash>> {
        let (payload, signature) = value.rsplit_once('.')?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }
}

/// Flash messages sent with the current request.
#[derive(Debug, Clone, Default)]
pub struct IncomingFlashes(pub Vec<Flash>);

impl IncomingFlashes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Flash> {
        self.0
    }
}

impl FromRequestParts<AppState> for IncomingFlashes {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let flashes = read_cookie(parts)
            .and_then(|value| {
                let verified = state.flash_signer.verify(&value);
                if verified.is_none() {
                    tracing::warn!("Ignoring flash cookie with an invalid signature");
                }
                verified
            })
            .unwrap_or_default();

        Ok(IncomingFlashes(flashes))
    }
}

fn read_cookie(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .find_map(|cookie| {
            let mut kv = cookie.trim().splitn(2, '=');
            match (kv.next(), kv.next()) {
                (Some(COOKIE_NAME), Some(value)) if !value.is_empty() => Some(value.to_string()),
                _ => None,
            }
        })
}

fn set_cookie(signer: &FlashSigner, flashes: &[Flash]) -> HeaderValue {
    let value = format!(
        "{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax",
        signer.sign(flashes)
    );
    // base64url and hex output is always a valid header value
    HeaderValue::from_str(&value).unwrap_or_else(|_| clear_cookie())
}

fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Redirects to `location` carrying one flash message.
pub fn redirect_with_flash(signer: &FlashSigner, location: &str, flash: Flash) -> Response {
    (
        [(SET_COOKIE, set_cookie(signer, &[flash]))],
        Redirect::to(location),
    )
        .into_response()
}

/// Renders `page`, clearing the flash cookie if the request carried one.
pub fn render_with_flashes(incoming: bool, page: impl IntoResponse) -> Response {
    let mut response = page.into_response();
    if incoming {
        response.headers_mut().append(SET_COOKIE, clear_cookie());
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let signer = FlashSigner::new("secret");
        let flashes = vec![Flash::success("Page successfully added")];

        let value = signer.sign(&flashes);

        assert_eq!(signer.verify(&value), Some(flashes));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = FlashSigner::new("secret");
        let value = signer.sign(&[Flash::info("Page already exists")]);
        let (_, signature) = value.rsplit_once('.').unwrap();

        let forged_payload = URL_SAFE_NO_PAD.encode(r#"[{"category":"danger","message":"x"}]"#);
        let forged = format!("{forged_payload}.{signature}");

        assert!(signer.verify(&forged).is_none());
    }

    #[test]
    fn test_wrong_key_rejected() {
        let value = FlashSigner::new("one").sign(&[Flash::danger("Invalid URL")]);

        assert!(FlashSigner::new("two").verify(&value).is_none());
    }

    #[test]
    fn test_malformed_values_rejected() {
        let signer = FlashSigner::new("secret");

        assert!(signer.verify("").is_none());
        assert!(signer.verify("no-dot").is_none());
        assert!(signer.verify("abc.not-hex").is_none());
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Flash::danger("x")).unwrap();

        assert_eq!(json, r#"{"category":"danger","message":"x"}"#);
    }

    #[test]
    fn test_render_clears_cookie_only_when_present() {
        let response = render_with_flashes(true, "page");
        let cookie = response.headers().get(SET_COOKIE).unwrap();
        assert!(cookie.to_str().unwrap().contains("Max-Age=0"));

        let response = render_with_flashes(false, "page");
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[test]
    fn test_redirect_sets_signed_cookie() {
        let signer = FlashSigner::new("secret");

        let response = redirect_with_flash(&signer, "/urls/1", Flash::success("ok"));

        assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        let value = cookie
            .strip_prefix("flash=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        assert_eq!(signer.verify(value), Some(vec![Flash::success("ok")]));
    }
}
