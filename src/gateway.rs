// tailview — a terminal viewer for remote log panels
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use crate::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

// The wire contract has no timeout; the client sets one so a hung request
// eventually surfaces as a transport failure instead of pinning the
// refresh cycle forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The network collaborator: one POST with a JSON context, resolving to
/// the raw reply text or a uniform failure. Callers never see status
/// codes, only success vs. `FetchError`. No retries.
#[async_trait(?Send)]
pub trait Gateway {
    async fn request(&self, endpoint: &str, context: &Value) -> Result<String, FetchError>;

    /// Variant for callers expecting structured data (generic actions).
    async fn request_json(&self, endpoint: &str, context: &Value) -> Result<Value, FetchError> {
        let body = self.request(endpoint, context).await?;
        serde_json::from_str(&body).map_err(|err| FetchError::Decode(err.to_string()))
    }
}

pub struct HttpGateway {
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait(?Send)]
impl Gateway for HttpGateway {
    async fn request(&self, endpoint: &str, context: &Value) -> Result<String, FetchError> {
        let body =
            serde_json::to_vec(context).map_err(|err| FetchError::Decode(err.to_string()))?;
        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json; charset=UTF-8")
            .body(body)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        response.text().await.map_err(|err| FetchError::Transport(err.to_string()))
    }
}
