use super::*;

#[test]
fn test_evaluate_params_returning_value() {
    let params = EvaluateParams::returning_value("1 + 1");
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json["expression"], "1 + 1");
    assert_eq!(json["returnByValue"], true);
    assert!(json.get("awaitPromise").is_none());
}

#[test]
fn test_evaluate_result_success() {
    let json = r#"{"result":{"type":"undefined"}}"#;
    let result: EvaluateResult = serde_json::from_str(json).unwrap();
    assert_eq!(result.result.object_type, "undefined");
    assert!(result.exception_details.is_none());
}

#[test]
fn test_evaluate_result_transient_type_error() {
    let json = r#"{
        "result": {"type": "undefined"},
        "exceptionDetails": {
            "exceptionId": 1,
            "text": "Uncaught",
            "lineNumber": 0,
            "columnNumber": 0,
            "exception": {"type": "object", "className": "TypeError", "description": "Cannot read properties of null"}
        }
    }"#;
    let result: EvaluateResult = serde_json::from_str(json).unwrap();
    let details = result.exception_details.unwrap();
    assert_eq!(
        details.exception.unwrap().class_name.as_deref(),
        Some("TypeError")
    );
}

#[test]
fn test_evaluate_result_permanent_error() {
    let json = r#"{
        "result": {"type": "undefined"},
        "exceptionDetails": {
            "exceptionId": 2,
            "text": "Uncaught",
            "lineNumber": 0,
            "columnNumber": 0,
            "exception": {"type": "object", "className": "SyntaxError", "description": "bad token"}
        }
    }"#;
    let result: EvaluateResult = serde_json::from_str(json).unwrap();
    let details = result.exception_details.unwrap();
    assert_eq!(
        details.exception.unwrap().class_name.as_deref(),
        Some("SyntaxError")
    );
}
