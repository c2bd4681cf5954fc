//! Query string parsing with URL decoding.

use std::collections::HashMap;

/// Parse a query string into a map, percent-decoding keys and values.
///
/// Repeated keys fold into one comma-separated value.
pub fn parse_query_string(query_str: &str) -> HashMap<String, String> {
    let mut result = HashMap::new();

    if query_str.is_empty() {
        return result;
    }

    for pair in query_str.split('&') {
        if pair.is_empty() {
            continue;
        }

        let parts: Vec<&str> = pair.splitn(2, '=').collect();
        let key = urlencoding::decode(parts[0])
            .unwrap_or_else(|_| parts[0].into())
            .to_string();
        let value = if parts.len() > 1 {
            urlencoding::decode(parts[1])
                .unwrap_or_else(|_| parts[1].into())
                .to_string()
        } else {
            String::new()
        };

        if let Some(existing) = result.get_mut(&key) {
            existing.push(',');
            existing.push_str(&value);
        } else {
            result.insert(key, value);
        }
    }

    result
}
