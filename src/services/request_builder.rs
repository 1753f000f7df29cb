use std::collections::BTreeMap;

use url::Url;

use crate::error::{Error, Result};

const KEY_PARAM: &str = "key";
const FORMAT_PARAM: &str = "format";
const FORMAT_JSON: &str = "json";

/// Composes a request URL from `base_url` and `params`. Any query already on
/// `base_url` is replaced; `key` and `format=json` are always set, overriding
/// caller-supplied values. Keys are emitted in sorted order.
pub fn build_url<K, V>(base_url: &str, api_key: &str, params: &[(K, V)]) -> Result<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = Url::parse(base_url).map_err(|source| Error::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })?;

    let mut values: BTreeMap<&str, &str> = params
        .iter()
        .map(|(k, v)| (k.as_ref(), v.as_ref()))
        .collect();
    values.insert(KEY_PARAM, api_key);
    values.insert(FORMAT_PARAM, FORMAT_JSON);

    url.set_query(None);
    url.query_pairs_mut().extend_pairs(values);

    Ok(url.into())
}

/// The URL with the API key masked, for logging.
pub fn redact_key(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == KEY_PARAM { "***".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    if pairs.is_empty() {
        return url.to_string();
    }
    parsed.set_query(None);
    parsed.query_pairs_mut().extend_pairs(pairs);
    parsed.into()
}
