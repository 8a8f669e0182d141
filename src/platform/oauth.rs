//! OAuth 1.0a request signing (HMAC-SHA1) for the platform REST API.

use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::Rng;
use rand::distributions::Alphanumeric;
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Consumer keypair plus user access keypair.
pub struct OauthKeys {
    pub consumer_key: String,
    pub consumer_secret: SecretString,
    pub access_token: String,
    pub access_secret: SecretString,
}

impl OauthKeys {
    /// Build the `Authorization: OAuth ...` header value for one
    /// request, with a fresh nonce and timestamp.
    ///
    /// `params` must carry every query and form parameter the request
    /// sends; the platform folds them all into the signature base.
    pub fn authorization(&self, method: &str, url: &str, params: &[(&str, &str)]) -> String {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.authorization_with(method, url, params, &nonce, &timestamp)
    }

    fn authorization_with(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> String {
        let oauth_params = [
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.access_token.as_str()),
            ("oauth_version", "1.0"),
        ];

        // Signature base: every parameter percent-encoded, sorted, and
        // joined, then the whole string encoded once more
        let mut encoded: Vec<(String, String)> = params
            .iter()
            .chain(oauth_params.iter())
            .map(|(k, v)| {
                (
                    urlencoding::encode(k).into_owned(),
                    urlencoding::encode(v).into_owned(),
                )
            })
            .collect();
        encoded.sort();

        let param_string = encoded
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let base = format!(
            "{method}&{}&{}",
            urlencoding::encode(url),
            urlencoding::encode(&param_string)
        );

        let signing_key = format!(
            "{}&{}",
            urlencoding::encode(self.consumer_secret.expose_secret()),
            urlencoding::encode(self.access_secret.expose_secret())
        );

        let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
            .expect("HMAC-SHA1 accepts keys of any length");
        mac.update(base.as_bytes());
        let signature = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        let mut header_params: Vec<(String, String)> = oauth_params
            .iter()
            .map(|(k, v)| (k.to_string(), urlencoding::encode(v).into_owned()))
            .collect();
        header_params.push((
            "oauth_signature".into(),
            urlencoding::encode(&signature).into_owned(),
        ));
        header_params.sort();

        let fields = header_params
            .iter()
            .map(|(k, v)| format!(r#"{k}="{v}""#))
            .collect::<Vec<_>>()
            .join(", ");

        format!("OAuth {fields}")
    }
}

// ── Tests ───────────────────────────────────────────────────────────
