//! Query string serialization.
//!
//! Keys and values are percent-encoded with the RFC 3986 unreserved set
//! left as-is, so bracket and comma delimiters are always escaped
//! (`a%5B%5D=1`, `a=1%2C2`).

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::options::ArrayFormat;
use crate::types::{QueryParams, QueryValue, Scalar};

const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Serialize `params` into a query string (without the leading `?`).
///
/// Sequences are expanded according to `format`; an empty sequence emits
/// nothing.
pub fn build_query_string(params: &QueryParams, format: ArrayFormat) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        match value {
            QueryValue::Scalar(scalar) => pairs.push(pair(key, scalar)),
            QueryValue::List(items) => push_list(&mut pairs, key, items, format),
        }
    }
    pairs.join("&")
}

/// Append `params` to `url`, reusing an existing query string if present.
pub fn append_query(url: &str, params: &QueryParams, format: ArrayFormat) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let query = build_query_string(params, format);
    if query.is_empty() {
        return url.to_string();
    }
    let delimiter = if url.contains('?') { '&' } else { '?' };
    format!("{url}{delimiter}{query}")
}

fn push_list(pairs: &mut Vec<String>, key: &str, items: &[Scalar], format: ArrayFormat) {
    match format {
        ArrayFormat::Brackets => {
            let key = format!("{key}[]");
            pairs.extend(items.iter().map(|item| pair(&key, item)));
        }
        ArrayFormat::Indices => {
            pairs.extend(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| pair(&format!("{key}[{index}]"), item)),
            );
        }
        ArrayFormat::Repeat => {
            pairs.extend(items.iter().map(|item| pair(key, item)));
        }
        ArrayFormat::Comma => {
            if !items.is_empty() {
                let joined = items.iter().map(Scalar::to_string).collect::<Vec<_>>().join(",");
                pairs.push(format!("{}={}", encode(key), encode(&joined)));
            }
        }
    }
}

fn pair(key: &str, value: &Scalar) -> String {
    format!("{}={}", encode(key), encode(&value.to_string()))
}

fn encode(text: &str) -> String {
    utf8_percent_encode(text, QUERY_COMPONENT).to_string()
}
