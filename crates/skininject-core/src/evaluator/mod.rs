//! Evaluation (C2): turning a patch artifact into a CDP call and classifying
//! the result.

use skininject_cdp::protocol::runtime::{EvaluateParams, EvaluateResult, ExceptionDetails};
use skininject_cdp::{CdpConnection, CdpError};
use tracing::{trace, warn};

/// Outcome of a single evaluation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalOutcome {
    /// The script ran without throwing.
    Success,
    /// The script threw a `TypeError` — the document likely isn't ready yet.
    /// Safe to retry.
    Transient,
    /// The script threw something other than `TypeError`. Not retried.
    Permanent(String),
}

/// Evaluate a raw JS expression in a session, or browser-scoped if
/// `session_id` is `None`.
///
/// # Errors
///
/// Returns an error if the CDP call itself fails (transport or top-level
/// protocol error). A thrown JS exception is not an error here — see
/// [`EvalOutcome`].
pub async fn evaluate_js(
    connection: &CdpConnection,
    session_id: Option<&str>,
    source: &str,
) -> Result<EvalOutcome, CdpError> {
    run_evaluate(connection, session_id, source).await
}

/// Evaluate CSS by wrapping it in a JS snippet that installs a `<style>` element.
///
/// The wrapper is idempotent-tolerant: invoking it twice inserts two `<style>`
/// elements rather than erroring. The remote engine's retry loop (§4.5) relies
/// on this — it may re-run a successful evaluation before observing success.
///
/// # Errors
///
/// Same as [`evaluate_js`].
pub async fn evaluate_css(
    connection: &CdpConnection,
    session_id: Option<&str>,
    source: &str,
) -> Result<EvalOutcome, CdpError> {
    let wrapped = css_wrapper(source);
    run_evaluate(connection, session_id, &wrapped).await
}

/// Build the `<style>`-installing JS wrapper for a CSS source string.
///
/// The CSS is serialized as a JSON string literal so it is safely escaped
/// regardless of quotes, newlines, or backticks it contains.
fn css_wrapper(css: &str) -> String {
    let escaped = serde_json::to_string(css).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "(function() {{ var style = document.createElement('style'); \
         style.textContent = {escaped}; document.head.appendChild(style); }})();"
    )
}

async fn run_evaluate(
    connection: &CdpConnection,
    session_id: Option<&str>,
    expression: &str,
) -> Result<EvalOutcome, CdpError> {
    let result: EvaluateResult = connection
        .send_command(
            "Runtime.evaluate",
            Some(EvaluateParams::returning_value(expression)),
            session_id,
        )
        .await?;

    Ok(classify(result.exception_details))
}

/// Classify an evaluation result's exception details, if any.
///
/// A `TypeError` is treated as transient (the document isn't ready yet); any
/// other exception class is permanent and logged once.
fn classify(exception_details: Option<ExceptionDetails>) -> EvalOutcome {
    let Some(exception) = exception_details else {
        trace!("evaluation succeeded");
        return EvalOutcome::Success;
    };

    let class_name = exception.exception.as_ref().and_then(|e| e.class_name.clone());

    if class_name.as_deref() == Some("TypeError") {
        EvalOutcome::Transient
    } else {
        warn!(text = %exception.text, "permanent evaluation failure");
        EvalOutcome::Permanent(exception.text)
    }
}

#[cfg(test)]
mod tests;
