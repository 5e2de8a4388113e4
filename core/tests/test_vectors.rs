//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use cachefly_core::{
    ApiError, CacheflyClient, HttpMethod, HttpRequest, HttpResponse, LegacyApiKey, ServiceOptions,
};

const BASE_URL: &str = "http://localhost:3000/api/2.5";

fn client() -> CacheflyClient {
    CacheflyClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn load(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap()
}

fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_expected_error(name: &str, err: ApiError, expected: &str) {
    match expected {
        "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
        "Unauthorized" => assert!(
            matches!(err, ApiError::Unauthorized { .. }),
            "{name}: expected Unauthorized"
        ),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Get options
// ---------------------------------------------------------------------------

#[test]
fn get_options_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/get_options.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_get_options(id).unwrap();
        assert_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let result = c.parse_get_options(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let expected: ServiceOptions =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

#[test]
fn metadata_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/metadata.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        let req = c.build_get_options_metadata(id).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let meta = c.parse_get_options_metadata(simulated(case)).unwrap();
        assert_eq!(meta.meta.count, case["expected_count"].as_u64().unwrap(), "{name}: count");
        let expected_names: Vec<&str> = case["expected_names"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n.as_str().unwrap())
            .collect();
        assert_eq!(meta.names().collect::<Vec<_>>(), expected_names, "{name}: names");
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_options_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/update_options.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let input: ServiceOptions = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_update_options(id, &input).unwrap();
        assert_request(name, &req, expected_req);

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let updated = c.parse_update_options(simulated(case)).unwrap();
        let expected: ServiceOptions = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(updated, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Legacy API key
// ---------------------------------------------------------------------------

#[test]
fn legacy_api_key_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/legacy_api_key.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let operation = case["operation"].as_str().unwrap();

        let req = match operation {
            "get" => c.build_get_legacy_api_key(id),
            "regenerate" => c.build_regenerate_legacy_api_key(id),
            "delete" => c.build_delete_legacy_api_key(id),
            other => panic!("{name}: unknown operation: {other}"),
        }
        .unwrap();
        assert_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let response = simulated(case);
        let result: Result<Option<LegacyApiKey>, ApiError> = match operation {
            "get" => c.parse_get_legacy_api_key(response).map(Some),
            "regenerate" => c.parse_regenerate_legacy_api_key(response).map(Some),
            _ => c.parse_delete_legacy_api_key(response).map(|()| None),
        };

        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else if let Some(expected) = case.get("expected_result") {
            let expected: LegacyApiKey = serde_json::from_value(expected.clone()).unwrap();
            assert_eq!(result.unwrap(), Some(expected), "{name}: parsed result");
        } else {
            assert_eq!(result.unwrap(), None, "{name}: expected empty success");
        }
    }
}
