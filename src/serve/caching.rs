use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Duration;
use etag::EntityTag;
use lazy_static::lazy_static;
use serde::Serialize;
use tracing::{error, trace};

lazy_static! {
    static ref ONE_MINUTE: Duration = Duration::minutes(1);
    static ref TEN_MINUTES: Duration = Duration::minutes(10);
}

fn if_none_match_hit(request_headers: &HeaderMap, etag: &EntityTag) -> bool {
    match request_headers.get(header::IF_NONE_MATCH) {
        None => false,
        Some(if_none_match) => match if_none_match
            .to_str()
            .ok()
            .and_then(|value| value.parse::<EntityTag>().ok())
        {
            None => {
                error!(?if_none_match, "failed to parse if-none-match header");
                false
            }
            Some(if_none_match_etag) => etag.strong_eq(&if_none_match_etag),
        },
    }
}

/// Serializes `value` as a JSON response with cache-control and a strong etag. Answers 304 when
/// the request's if-none-match matches.
pub fn cached_json_with_custom_duration(
    request_headers: &HeaderMap,
    value: &impl Serialize,
    max_age: &Duration,
    stale_while_revalidate: &Duration,
) -> Response {
    let bytes = match serde_json::to_vec(value) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(%err, "failed to serialize response");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let etag = EntityTag::from_data(&bytes);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_str(&format!(
            "public, max-age={}, stale-while-revalidate={}",
            max_age.num_seconds(),
            stale_while_revalidate.num_seconds()
        ))
        .expect("cache-control to be a valid header value"),
    );
    headers.insert(
        header::ETAG,
        HeaderValue::from_str(&etag.to_string()).expect("etag to be a valid header value"),
    );

    if if_none_match_hit(request_headers, &etag) {
        trace!(%etag, "if-none-match hit");
        return (StatusCode::NOT_MODIFIED, headers).into_response();
    }

    let mut response = (headers, bytes).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

pub fn cached_json(request_headers: &HeaderMap, value: &impl Serialize) -> Response {
    cached_json_with_custom_duration(request_headers, value, &ONE_MINUTE, &TEN_MINUTES)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn sets_etag_and_cache_control() {
        let response = cached_json(&HeaderMap::new(), &json!({"rows": []}));
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::ETAG));
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=60, stale-while-revalidate=600"
        );
    }

    #[test]
    fn matching_if_none_match_is_not_modified() {
        let value = json!({"rows": [1, 2, 3]});
        let first = cached_json(&HeaderMap::new(), &value);
        let etag = first.headers()[header::ETAG].clone();

        let mut request_headers = HeaderMap::new();
        request_headers.insert(header::IF_NONE_MATCH, etag);
        let second = cached_json(&request_headers, &value);

        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }

    #[test]
    fn stale_if_none_match_gets_body() {
        let mut request_headers = HeaderMap::new();
        request_headers.insert(
            header::IF_NONE_MATCH,
            HeaderValue::from_static("\"some-old-etag\""),
        );
        let response = cached_json(&request_headers, &json!({"rows": []}));
        assert_eq!(response.status(), StatusCode::OK);
    }
}
