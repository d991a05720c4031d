//! SetMapDetails submission.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Serialize;
use thiserror::Error;
use wzmap::Command;

pub const SET_MAP_DETAILS_URL: &str = "https://www.warzone.com/API/SetMapDetails";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required parameter(s): {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub api_token: String,
    pub map_id: u64,
}

impl Credentials {
    /// All three values are required; every missing one is named in the error.
    pub fn resolve(
        email: Option<String>,
        api_token: Option<String>,
        map_id: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let email = email.filter(|value| !value.trim().is_empty());
        let api_token = api_token.filter(|value| !value.trim().is_empty());

        let mut missing = Vec::new();
        if email.is_none() {
            missing.push("--email");
        }
        if api_token.is_none() {
            missing.push("--api-token");
        }
        if map_id.is_none() {
            missing.push("--mapid");
        }

        match (email, api_token, map_id) {
            (Some(email), Some(api_token), Some(map_id)) => Ok(Self {
                email,
                api_token,
                map_id,
            }),
            _ => Err(ConfigError::MissingCredentials(missing)),
        }
    }
}

/// Request body of the SetMapDetails call.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SetMapDetails<'a> {
    pub email: &'a str,
    #[serde(rename = "APIToken")]
    pub api_token: &'a str,
    #[serde(rename = "mapID")]
    pub map_id: u64,
    pub commands: &'a [Command],
}

impl<'a> SetMapDetails<'a> {
    pub fn new(credentials: &'a Credentials, commands: &'a [Command]) -> Self {
        Self {
            email: &credentials.email,
            api_token: &credentials.api_token,
            map_id: credentials.map_id,
            commands,
        }
    }

    /// Copy safe to print: the token is masked.
    pub fn redacted(&self) -> Self {
        Self {
            api_token: "***",
            ..*self
        }
    }
}

/// Sends the batch in a single request and returns the response body as-is.
pub fn submit(endpoint: &str, request: &SetMapDetails) -> Result<String> {
    log::info!(
        "Submitting {} commands for map {} to {}",
        request.commands.len(),
        request.map_id,
        endpoint
    );

    let client = Client::new();
    let resp = client
        .post(endpoint)
        .json(request)
        .send()
        .context("Failed to contact the SetMapDetails endpoint")?;

    let status = resp.status();
    let body = resp.text().context("Failed to read the API response")?;
    if !status.is_success() {
        log::warn!("API responded with HTTP {}", status);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_missing_credentials_are_named() {
        let err = Credentials::resolve(None, Some(" ".to_string()), None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingCredentials(vec!["--email", "--api-token", "--mapid"])
        );
        assert_eq!(
            err.to_string(),
            "Missing required parameter(s): --email, --api-token, --mapid"
        );
    }

    #[test]
    fn test_payload_shape() {
        let credentials =
            Credentials::resolve(Some("me@example.com".into()), Some("tok".into()), Some(42))
                .unwrap();
        let commands = vec![Command::SetTerritoryName {
            id: 1,
            name: "Home".to_string(),
        }];
        let request = SetMapDetails::new(&credentials, &commands);

        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "email": "me@example.com",
                "APIToken": "tok",
                "mapID": 42,
                "commands": [{"command": "setTerritoryName", "id": 1, "name": "Home"}]
            })
        );
        assert_eq!(
            serde_json::to_value(request.redacted()).unwrap()["APIToken"],
            "***"
        );
    }
}
