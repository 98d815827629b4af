use super::*;
use skininject_cdp::protocol::runtime::RemoteObject;

fn exception(class_name: Option<&str>, text: &str) -> ExceptionDetails {
    ExceptionDetails {
        exception_id: 1,
        text: text.to_string(),
        line_number: 0,
        column_number: 0,
        script_id: None,
        url: None,
        exception: Some(RemoteObject {
            object_type: "object".to_string(),
            subtype: Some("error".to_string()),
            class_name: class_name.map(str::to_string),
            value: None,
            description: None,
            object_id: None,
        }),
    }
}

#[test]
fn test_classify_no_exception_is_success() {
    assert_eq!(classify(None), EvalOutcome::Success);
}

#[test]
fn test_classify_type_error_is_transient() {
    let outcome = classify(Some(exception(Some("TypeError"), "Cannot read property of null")));
    assert_eq!(outcome, EvalOutcome::Transient);
}

#[test]
fn test_classify_other_exception_is_permanent() {
    let outcome = classify(Some(exception(Some("SyntaxError"), "Unexpected token")));
    assert_eq!(outcome, EvalOutcome::Permanent("Unexpected token".to_string()));
}

#[test]
fn test_classify_missing_class_name_is_permanent() {
    let outcome = classify(Some(exception(None, "unknown failure")));
    assert_eq!(outcome, EvalOutcome::Permanent("unknown failure".to_string()));
}

#[test]
fn test_css_wrapper_escapes_quotes_and_creates_style_element() {
    let wrapped = css_wrapper(r#".a { content: "hi"; }"#);
    assert!(wrapped.contains("document.createElement('style')"));
    assert!(wrapped.contains("document.head.appendChild(style)"));
    assert!(wrapped.contains(r#"\"hi\""#));
}

#[test]
fn test_css_wrapper_is_idempotent_tolerant_textually() {
    // Calling the same wrapper twice must be syntactically independent —
    // no shared identifiers that would collide if evaluated twice in the
    // same document.
    let first = css_wrapper(".a{color:red}");
    let second = css_wrapper(".a{color:red}");
    assert_eq!(first, second);
    assert!(!first.contains("getElementById"));
}
