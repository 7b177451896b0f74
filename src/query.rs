// Copyright 2025 Ticketpark GmbH
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Query-string encoding with bracket notation for nested parameters.

use serde_json::{Map, Value};
use url::form_urlencoded;

/// Encodes a parameter map as an `application/x-www-form-urlencoded` query
/// string.
///
/// Nested objects use bracket notation, `filter[name]=value`, and arrays
/// use positional brackets, `ids[0]=a&ids[1]=b`. Null values are skipped.
/// The default `serde_json` map keeps keys sorted, so the output is
/// deterministic.
pub(crate) fn encode(parameters: &Map<String, Value>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in parameters {
        append(&mut serializer, key, value);
    }
    serializer.finish()
}

fn append(serializer: &mut form_urlencoded::Serializer<'_, String>, key: &str, value: &Value) {
    match value {
        Value::Object(object) => {
            for (sub, v) in object {
                append(serializer, &format!("{key}[{sub}]"), v);
            }
        }
        Value::Array(array) => {
            for (i, v) in array.iter().enumerate() {
                append(serializer, &format!("{key}[{i}]"), v);
            }
        }
        Value::Null => {}
        Value::String(s) => {
            serializer.append_pair(key, s);
        }
        Value::Number(n) => {
            serializer.append_pair(key, &format!("{n}"));
        }
        Value::Bool(b) => {
            serializer.append_pair(key, if *b { "true" } else { "false" });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn scalars_and_nested_object() {
        let parameters = object(json!({"a": 1, "b": 2, "c": {"d": 3}}));
        assert_eq!(encode(&parameters), "a=1&b=2&c%5Bd%5D=3");
    }

    #[test]
    fn arrays_use_positional_brackets() {
        let parameters = object(json!({"ids": ["a", "b"]}));
        assert_eq!(encode(&parameters), "ids%5B0%5D=a&ids%5B1%5D=b");
    }

    #[test]
    fn values_are_percent_encoded() {
        let parameters = object(json!({"q": "a b&c"}));
        assert_eq!(encode(&parameters), "q=a+b%26c");
    }

    #[test]
    fn null_is_skipped() {
        let parameters = object(json!({"a": null, "b": true}));
        assert_eq!(encode(&parameters), "b=true");
    }

    #[test]
    fn deeply_nested() {
        let parameters = object(json!({"filter": {"date": {"from": "2025-01-01"}}}));
        assert_eq!(
            encode(&parameters),
            "filter%5Bdate%5D%5Bfrom%5D=2025-01-01"
        );
    }

    #[test]
    fn empty() {
        let parameters = Map::new();
        assert_eq!(encode(&parameters), "");
    }
}
