//! Request builders, one per remote endpoint.
//!
//! Builders only assemble URLs, query parameters, bodies, and timeouts;
//! sending and classification live in `transport` and `response`.

use std::time::Duration;

use reqwest::Method;

use crate::options::{ImageOptions, TextOptions, VideoOptions};
use crate::settings;
use crate::transport::{ApiRequest, RequestBody};

/// Liveness probe. Unauthenticated, short timeout.
pub(crate) fn health_check(base_url: &str) -> ApiRequest {
    ApiRequest::new(Method::GET, format!("{base_url}/v1/system/live"))
        .timeout(settings::HEALTH_TIMEOUT)
}

pub(crate) fn token_check(base_url: &str, api_key: &str) -> ApiRequest {
    ApiRequest::new(Method::GET, format!("{base_url}/v1/credentials/tokens"))
        .bearer(api_key)
        .timeout(settings::TOKEN_TIMEOUT)
}

pub(crate) fn token_refresh(base_url: &str, api_key: &str) -> ApiRequest {
    ApiRequest::new(Method::PUT, format!("{base_url}/v1/credentials/tokens"))
        .bearer(api_key)
        .timeout(settings::TOKEN_TIMEOUT)
}

pub(crate) fn token_revoke(base_url: &str, api_key: &str) -> ApiRequest {
    ApiRequest::new(Method::DELETE, format!("{base_url}/v1/credentials/tokens"))
        .bearer(api_key)
        .timeout(settings::TOKEN_TIMEOUT)
}

/// Multipart upload body for an image submission.
pub(crate) fn image_upload(data: Vec<u8>) -> RequestBody {
    RequestBody::File {
        field: "image",
        filename: "image".to_string(),
        data,
    }
}

/// Multipart upload body for a video submission.
pub(crate) fn video_upload(data: Vec<u8>) -> RequestBody {
    RequestBody::File {
        field: "video",
        filename: "video".to_string(),
        data,
    }
}

/// Multipart upload body for an audio submission.
pub(crate) fn audio_upload(data: Vec<u8>, filename: &str) -> RequestBody {
    RequestBody::File {
        field: "file",
        filename: filename.to_string(),
        data,
    }
}

/// JSON body submitting remote content by URL.
pub(crate) fn url_submission(url: &str) -> RequestBody {
    RequestBody::Json(serde_json::json!({ "object": url }))
}

pub(crate) fn image_report(
    base_url: &str,
    api_key: &str,
    body: RequestBody,
    options: &ImageOptions,
    timeout: Duration,
) -> ApiRequest {
    let mut req = ApiRequest::new(Method::POST, format!("{base_url}/v2/image/sync"))
        .bearer(api_key)
        .body(body)
        .timeout(timeout);
    for ty in &options.only {
        req = req.query("only", ty.as_str());
    }
    for ty in &options.excluding {
        req = req.query("excluding", ty.as_str());
    }
    if let Some(id) = &options.external_id {
        req = req.query("external_id", id);
    }
    req
}

pub(crate) fn video_report(
    base_url: &str,
    api_key: &str,
    body: RequestBody,
    options: &VideoOptions,
    timeout: Duration,
) -> ApiRequest {
    let mut req = ApiRequest::new(Method::POST, format!("{base_url}/v2/video/sync"))
        .bearer(api_key)
        .body(body)
        .timeout(timeout);
    for ty in &options.only {
        req = req.query("only", ty.as_str());
    }
    for ty in &options.excluding {
        req = req.query("excluding", ty.as_str());
    }
    if let Some(id) = &options.external_id {
        req = req.query("external_id", id);
    }
    req
}

pub(crate) fn voice_report(
    base_url: &str,
    api_key: &str,
    body: RequestBody,
    timeout: Duration,
) -> ApiRequest {
    ApiRequest::new(Method::POST, format!("{base_url}/v1/reports/voice"))
        .bearer(api_key)
        .body(body)
        .timeout(timeout)
}

pub(crate) fn music_report(
    base_url: &str,
    api_key: &str,
    body: RequestBody,
    timeout: Duration,
) -> ApiRequest {
    ApiRequest::new(Method::POST, format!("{base_url}/v1/reports/music"))
        .bearer(api_key)
        .body(body)
        .timeout(timeout)
}

pub(crate) fn text_report(
    base_url: &str,
    api_key: &str,
    text: &str,
    options: &TextOptions,
    timeout: Duration,
) -> ApiRequest {
    let mut req = ApiRequest::new(Method::POST, format!("{base_url}/v2/text/sync"))
        .bearer(api_key)
        .body(RequestBody::Form(vec![(
            "text".to_string(),
            text.to_string(),
        )]))
        .timeout(timeout)
        .query(
            "include_annotations",
            if options.include_annotations {
                "true"
            } else {
                "false"
            },
        );
    if let Some(id) = &options.external_id {
        req = req.query("external_id", id);
    }
    req
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::enums::ImageAnalysisType;

    const BASE: &str = "https://api.example.com";

    #[test]
    fn test_health_check_request() {
        let req = health_check(BASE);
        assert_eq!(req.url, "https://api.example.com/v1/system/live");
        assert_eq!(req.method, Method::GET);
        assert!(req.bearer.is_none());
        assert_eq!(req.timeout, settings::HEALTH_TIMEOUT);
    }

    #[test]
    fn test_token_requests_use_short_timeout() {
        for req in [
            token_check(BASE, "key"),
            token_refresh(BASE, "key"),
            token_revoke(BASE, "key"),
        ] {
            assert_eq!(req.url, "https://api.example.com/v1/credentials/tokens");
            assert_eq!(req.bearer.as_deref(), Some("key"));
            assert_eq!(req.timeout, settings::TOKEN_TIMEOUT);
        }
    }

    #[test]
    fn test_image_report_filters_are_repeated_params() {
        let options = ImageOptions::default()
            .only([ImageAnalysisType::AiGenerated, ImageAnalysisType::Nsfw])
            .excluding([ImageAnalysisType::ReverseSearch])
            .external_id("job-3");
        let req = image_report(
            BASE,
            "key",
            image_upload(vec![1, 2, 3]),
            &options,
            settings::DEFAULT_TIMEOUT,
        );

        assert_eq!(req.url, "https://api.example.com/v2/image/sync");
        assert_eq!(
            req.query,
            vec![
                ("only".to_string(), "ai_generated".to_string()),
                ("only".to_string(), "nsfw".to_string()),
                ("excluding".to_string(), "reverse_search".to_string()),
                ("external_id".to_string(), "job-3".to_string()),
            ]
        );
        assert!(matches!(req.body, RequestBody::File { field: "image", .. }));
    }

    #[test]
    fn test_text_report_is_form_encoded() {
        let req = text_report(
            BASE,
            "key",
            "some prose",
            &TextOptions::default(),
            settings::DEFAULT_TIMEOUT,
        );
        assert_eq!(req.url, "https://api.example.com/v2/text/sync");
        match &req.body {
            RequestBody::Form(pairs) => {
                assert_eq!(pairs, &[("text".to_string(), "some prose".to_string())]);
            }
            other => panic!("expected form body, got {other:?}"),
        }
        assert_eq!(
            req.query,
            vec![("include_annotations".to_string(), "false".to_string())]
        );
    }

    #[test]
    fn test_url_submission_body() {
        match url_submission("https://example.com/a.png") {
            RequestBody::Json(value) => {
                assert_eq!(value["object"], "https://example.com/a.png");
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[test]
    fn test_audio_upload_keeps_filename() {
        match audio_upload(vec![0u8; 8], "take1.wav") {
            RequestBody::File {
                field, filename, ..
            } => {
                assert_eq!(field, "file");
                assert_eq!(filename, "take1.wav");
            }
            other => panic!("expected file body, got {other:?}"),
        }
    }
}
