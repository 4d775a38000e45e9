use serde::Deserialize;

/// The login is the only `/user` field the tool needs; the rest is ignored.
#[derive(Deserialize, Debug, PartialEq)]
pub struct UserResponse {
    pub login: String,
}

/// Extracts the `login` field from a `/user` response body.
///
/// An empty login is rejected, since it would yield an unscoped default query.
pub fn extract_login_from_user_response(json: &str) -> Result<String, String> {
    let user = serde_json::from_str::<UserResponse>(json)
        .map_err(|e| format!("Failed to parse user response: {e}"))?;
    if user.login.trim().is_empty() {
        return Err("User response contains an empty login".to_string());
    }
    Ok(user.login)
}
