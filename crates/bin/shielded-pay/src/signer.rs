//! signer daemon client
//!
//! the local signer holds the shielded wallet and produces proofs. it speaks
//! plain JSON over HTTP: `GET version`, `POST sign`, `POST address`.

use async_trait::async_trait;
use private_transfer::{
    Network, ProvingError, ProvingService, ShieldedAddress, SignRequest, SignedPost,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SIGNER_URL: &str = "http://127.0.0.1:29987/";

/// proving can take minutes on slow machines
const SIGN_TIMEOUT: Duration = Duration::from_secs(600);
const QUERY_TIMEOUT: Duration = Duration::from_millis(1500);

#[derive(Debug, Deserialize)]
enum SignResponse {
    Ok { posts: Vec<SignedPost> },
    Err(String),
}

#[derive(Debug, Serialize)]
struct AddressRequest {
    network: Network,
}

#[derive(Debug, Deserialize)]
struct AddressResponse {
    receiving_key: [u8; 32],
}

#[derive(Debug, Deserialize)]
pub struct Version(pub String);

#[derive(Clone)]
pub struct HttpSigner {
    url: String,
    client: Client,
}

impl HttpSigner {
    pub fn new(url: &str) -> Self {
        let url = if url.ends_with('/') {
            url.to_string()
        } else {
            format!("{}/", url)
        };
        Self {
            url,
            client: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    pub async fn version(&self) -> Result<Version, ProvingError> {
        let response = self
            .client
            .get(self.endpoint("version"))
            .timeout(QUERY_TIMEOUT)
            .send()
            .await
            .map_err(transport)?;
        response.json().await.map_err(transport)
    }
}

fn transport(e: reqwest::Error) -> ProvingError {
    ProvingError::Transport(e.to_string())
}

#[async_trait]
impl ProvingService for HttpSigner {
    async fn sign(&self, request: &SignRequest) -> Result<Vec<SignedPost>, ProvingError> {
        tracing::debug!("sending sign request to {}", self.url);
        let response = self
            .client
            .post(self.endpoint("sign"))
            .timeout(SIGN_TIMEOUT)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(ProvingError::Internal(format!(
                "signer returned {}",
                response.status()
            )));
        }

        match response.json::<SignResponse>().await.map_err(transport)? {
            SignResponse::Ok { posts } => Ok(posts),
            SignResponse::Err(reason) => Err(ProvingError::Rejected(reason)),
        }
    }

    async fn address(&self, network: Network) -> Result<ShieldedAddress, ProvingError> {
        let response: AddressResponse = self
            .client
            .post(self.endpoint("address"))
            .timeout(QUERY_TIMEOUT)
            .json(&AddressRequest { network })
            .send()
            .await
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;
        Ok(ShieldedAddress::from_receiving_key(response.receiving_key))
    }
}
