//! Token issuance and validation against the externally owned auth endpoints.
//!
//! Both calls fail closed: any transport error, non-success status, or malformed payload is
//! reported as plain absence/invalidity so the caller can convert it into an authorization
//! failure envelope.

// self
use crate::_prelude::*;

const ISSUE_PATH: &str = "jwt-auth/v1/token";
const VALIDATE_PATH: &str = "jwt-auth/v1/token/validate";
const VALID_TOKEN_CODE: &str = "jwt_auth_valid_token";

#[derive(Debug, Deserialize)]
struct IssuePayload {
	#[serde(default)]
	data: Option<IssueData>,
}

#[derive(Debug, Deserialize)]
struct IssueData {
	#[serde(default)]
	token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValidatePayload {
	#[serde(default)]
	code: Option<String>,
}

/// Requests a fresh access token for the supplied credentials.
///
/// Returns `None` on any failure along the way.
pub(crate) async fn issue(
	http: &ReqwestClient,
	base_url: &Url,
	username: &str,
	password: &str,
) -> Option<String> {
	let endpoint = base_url.join(ISSUE_PATH).ok()?;
	let response = http
		.post(endpoint)
		.form(&[("username", username), ("password", password)])
		.send()
		.await
		.ok()?;

	if !response.status().is_success() {
		return None;
	}

	let body = response.text().await.ok()?;
	let payload = serde_json::from_str::<IssuePayload>(&body).ok()?;

	payload.data.and_then(|data| data.token)
}

/// Checks whether a cached token is still accepted by the validation endpoint.
pub(crate) async fn validate(http: &ReqwestClient, base_url: &Url, access_token: &str) -> bool {
	let Ok(endpoint) = base_url.join(VALIDATE_PATH) else {
		return false;
	};
	let Ok(response) =
		http.post(endpoint).bearer_auth(access_token).send().await
	else {
		return false;
	};

	if !response.status().is_success() {
		return false;
	}

	let Ok(body) = response.text().await else {
		return false;
	};
	let Ok(payload) = serde_json::from_str::<ValidatePayload>(&body) else {
		return false;
	};

	payload.code.as_deref() == Some(VALID_TOKEN_CODE)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn issuance_payload_tolerates_missing_members() {
		let payload: IssuePayload =
			serde_json::from_str("{}").expect("Empty object should deserialize.");

		assert!(payload.data.is_none());

		let payload: IssuePayload =
			serde_json::from_str(r#"{"data":{"token":"abc","id":3,"email":"a@b.c"}}"#)
				.expect("Full payload should deserialize.");

		assert_eq!(payload.data.and_then(|data| data.token).as_deref(), Some("abc"));
	}

	#[test]
	fn validation_requires_the_exact_code() {
		let valid: ValidatePayload =
			serde_json::from_str(r#"{"code":"jwt_auth_valid_token","data":{"status":200}}"#)
				.expect("Valid payload should deserialize.");
		let invalid: ValidatePayload =
			serde_json::from_str(r#"{"code":"jwt_auth_invalid_token"}"#)
				.expect("Invalid payload should deserialize.");

		assert_eq!(valid.code.as_deref(), Some(VALID_TOKEN_CODE));
		assert_ne!(invalid.code.as_deref(), Some(VALID_TOKEN_CODE));
	}
}
