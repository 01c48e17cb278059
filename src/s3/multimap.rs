// S3Kit Rust Library for Amazon S3 Compatible Cloud Storage
// Copyright 2025 the S3Kit authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Multimap for HTTP headers and query parameters, with the canonical
//! renderings Signature V4 is computed over.

use crate::s3::utils::uri_encode;
use multimap::MultiMap;
use std::collections::BTreeMap;

/// Multimap for string key and string value
pub type Multimap = MultiMap<String, String>;

pub trait MultimapExt {
    /// Adds a key-value pair, keeping any existing values for the key.
    fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V);

    /// Replaces all values stored under the key (compared
    /// case-insensitively, HTTP header names are not case-sensitive).
    fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V);

    /// Removes every entry whose key matches case-insensitively.
    fn delete(&mut self, key: &str);

    /// First value stored under the key, compared case-insensitively.
    fn value_of(&self, key: &str) -> Option<&String>;

    /// Converts multimap to HTTP query string
    fn to_query_string(&self) -> String;

    /// Converts multimap to canonical query string
    fn get_canonical_query_string(&self) -> String;

    /// Converts multimap to signed headers and canonical headers. `host` is
    /// injected when the map carries no host header of its own.
    fn get_canonical_headers(&self, host: &str) -> (String, String);
}

impl MultimapExt for Multimap {
    fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.insert(key.into(), value.into());
    }

    fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        self.delete(&key);
        self.insert(key, value.into());
    }

    fn delete(&mut self, key: &str) {
        let needle = key.to_ascii_lowercase();
        let matches: Vec<String> = self
            .keys()
            .filter(|k| k.to_ascii_lowercase() == needle)
            .cloned()
            .collect();
        for k in matches {
            self.remove(&k);
        }
    }

    fn value_of(&self, key: &str) -> Option<&String> {
        let needle = key.to_ascii_lowercase();
        self.iter_all()
            .find(|(k, _)| k.to_ascii_lowercase() == needle)
            .and_then(|(_, values)| values.first())
    }

    fn to_query_string(&self) -> String {
        let mut query = String::new();
        for (key, values) in self.iter_all() {
            for value in values {
                if !query.is_empty() {
                    query.push('&');
                }
                query.push_str(&uri_encode(key, false));
                query.push('=');
                query.push_str(&uri_encode(value, false));
            }
        }
        query
    }

    fn get_canonical_query_string(&self) -> String {
        let mut pairs: Vec<(String, String)> = Vec::new();
        for (key, values) in self.iter_all() {
            for value in values {
                pairs.push((uri_encode(key, false), uri_encode(value, false)));
            }
        }
        // Sorted by encoded key; an empty value still renders as "key=".
        pairs.sort();

        let mut query = String::new();
        for (key, value) in pairs {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(&key);
            query.push('=');
            query.push_str(&value);
        }
        query
    }

    fn get_canonical_headers(&self, host: &str) -> (String, String) {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (k, values) in self.iter_all() {
            grouped
                .entry(k.to_ascii_lowercase())
                .or_default()
                .extend(values.iter().map(|v| v.trim().to_string()));
        }

        if !grouped.contains_key("host") {
            grouped.insert("host".to_string(), vec![host.to_string()]);
        }

        let mut signed_headers = String::new();
        let mut canonical_headers = String::new();
        for (key, mut values) in grouped {
            if !signed_headers.is_empty() {
                signed_headers.push(';');
                canonical_headers.push('\n');
            }

            signed_headers.push_str(&key);

            // Duplicate header names carry their values comma-joined in
            // sorted order under the lowered name.
            values.sort();
            canonical_headers.push_str(&key);
            canonical_headers.push(':');
            canonical_headers.push_str(&values.join(","));
        }

        (signed_headers, canonical_headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_case_insensitively() {
        let mut map = Multimap::new();
        map.add("X-Amz-Date", "a");
        map.add("x-amz-date", "b");
        map.set("X-AMZ-DATE", "c");
        assert_eq!(map.value_of("x-amz-date"), Some(&"c".to_string()));
        assert_eq!(map.iter_all().count(), 1);
    }

    #[test]
    fn delete_removes_all_cases() {
        let mut map = Multimap::new();
        map.add("Authorization", "a");
        map.add("authorization", "b");
        map.delete("AUTHORIZATION");
        assert!(map.is_empty());
    }

    #[test]
    fn canonical_headers_are_lowered_trimmed_and_sorted() {
        let mut map = Multimap::new();
        map.add("X-Amz-Date", " 19840805T135000Z ");
        map.add("Content-Length", "14");
        let (signed, canonical) = map.get_canonical_headers("example.com");
        assert_eq!(signed, "content-length;host;x-amz-date");
        assert_eq!(
            canonical,
            "content-length:14\nhost:example.com\nx-amz-date:19840805T135000Z"
        );
    }

    #[test]
    fn canonical_headers_join_duplicates_sorted() {
        let mut map = Multimap::new();
        map.add("X-Custom", "zebra");
        map.add("x-custom", "alpha");
        let (signed, canonical) = map.get_canonical_headers("example.com");
        assert_eq!(signed, "host;x-custom");
        assert_eq!(canonical, "host:example.com\nx-custom:alpha,zebra");
    }

    #[test]
    fn canonical_headers_keep_explicit_host() {
        let mut map = Multimap::new();
        map.add("Host", "override.example.com");
        let (_, canonical) = map.get_canonical_headers("ignored.example.com");
        assert_eq!(canonical, "host:override.example.com");
    }

    #[test]
    fn canonical_query_string_sorts_by_encoded_key() {
        let mut map = Multimap::new();
        map.add("prefix", "a/b");
        map.add("location", "");
        map.add("max-keys", "100");
        assert_eq!(
            map.get_canonical_query_string(),
            "location=&max-keys=100&prefix=a%2Fb"
        );
    }

    #[test]
    fn canonical_query_string_empty_map() {
        assert_eq!(Multimap::new().get_canonical_query_string(), "");
    }
}
