// src/handlers/mod.rs

pub mod questions;
pub mod users;

use axum::{
    body::Bytes,
    http::{HeaderMap, header::CONTENT_TYPE},
};
use bson::oid::ObjectId;
use serde::de::DeserializeOwned;

/// Parses an id taken from the request path.
fn object_id(id: &str) -> Result<ObjectId, String> {
    ObjectId::parse_str(id).map_err(|_| format!("Cast to ObjectId failed for value \"{}\"", id))
}

/// Reads a request body as JSON.
/// A request that is not declared as JSON, or has no body, carries no fields.
fn json_body<T: DeserializeOwned + Default>(
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<T, serde_json::Error> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Named {
        name: Option<String>,
    }

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn body_without_json_content_type_is_empty() {
        let body = Bytes::from_static(br#"{"name":"Ada"}"#);

        let plain: Named = json_body(&headers("text/plain"), &body).unwrap();
        assert_eq!(plain, Named::default());

        let missing: Named = json_body(&HeaderMap::new(), &body).unwrap();
        assert_eq!(missing, Named::default());
    }

    #[test]
    fn json_body_is_parsed_or_rejected() {
        let json = headers("Application/JSON; charset=utf-8");

        let named: Named = json_body(&json, &Bytes::from_static(br#"{"name":"Ada"}"#)).unwrap();
        assert_eq!(named.name.as_deref(), Some("Ada"));

        let blank: Named = json_body(&json, &Bytes::from_static(b"  \n")).unwrap();
        assert_eq!(blank, Named::default());

        assert!(json_body::<Named>(&json, &Bytes::from_static(b"{ not json")).is_err());
        let vendor = headers("application/vnd.api+json");
        assert!(json_body::<Named>(&vendor, &Bytes::from_static(b"[")).is_err());
    }
}
