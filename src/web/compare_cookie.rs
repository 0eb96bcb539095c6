//! Cookie-backed [`DurableScope`] for the comparison selection.
//!
//! Each key maps to one cookie whose value is the base64url (no padding)
//! encoding of the stored string, so the JSON array survives cookie syntax.

use std::collections::{BTreeSet, HashMap};

use axum::http::{
    HeaderMap, HeaderValue,
    header::{COOKIE, SET_COOKIE},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use tracing::debug;

use crate::domain::comparison::DurableScope;

/// One year.
const COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 365;

/// Request cookies plus the writes that must be sent back.
#[derive(Debug, Clone, Default)]
pub struct CookieScope {
    entries: HashMap<String, String>,
    dirty: BTreeSet<String>,
}

impl CookieScope {
    /// Reads every cookie in the `Cookie` headers. Values that are not valid
    /// base64url UTF-8 are skipped.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut entries = HashMap::new();

        for header in headers.get_all(COOKIE) {
            let Ok(raw) = header.to_str() else {
                continue;
            };
            for cookie in raw.split(';') {
                let mut parts = cookie.trim().splitn(2, '=');
                let (Some(name), Some(value)) = (parts.next(), parts.next()) else {
                    continue;
                };
                match decode(value) {
                    Some(decoded) => {
                        entries.insert(name.to_string(), decoded);
                    }
                    None => debug!(cookie = name, "Ignoring undecodable cookie"),
                }
            }
        }

        Self {
            entries,
            dirty: BTreeSet::new(),
        }
    }

    /// `Set-Cookie` values for every key written or removed since loading.
    pub fn set_cookie_headers(&self) -> Vec<HeaderValue> {
        self.dirty
            .iter()
            .filter_map(|name| {
                let cookie = match self.entries.get(name) {
                    Some(value) => format!(
                        "{}={}; Path=/; Max-Age={}; SameSite=Lax; HttpOnly",
                        name,
                        URL_SAFE_NO_PAD.encode(value),
                        COOKIE_MAX_AGE
                    ),
                    None => format!("{}=; Path=/; Max-Age=0; SameSite=Lax; HttpOnly", name),
                };
                HeaderValue::from_str(&cookie).ok()
            })
            .collect()
    }

    /// Appends the pending `Set-Cookie` headers to `headers`.
    pub fn write_to(&self, headers: &mut HeaderMap) {
        for value in self.set_cookie_headers() {
            headers.append(SET_COOKIE, value);
        }
    }
}

fn decode(value: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(value.trim().trim_matches('"')).ok()?;
    String::from_utf8(bytes).ok()
}

impl DurableScope for CookieScope {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
        self.dirty.insert(key.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.dirty.insert(key.to_string());
    }
}
