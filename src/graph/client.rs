// client.rs
use crate::graph::GraphError;
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("waba_monitor/", env!("CARGO_PKG_VERSION"));

const ACCOUNT_FIELDS: &str = "id,status";
const PHONE_FIELDS: &str = "display_phone_number,quality_rating,status,messaging_limit_tier";

/// Anything that can turn a Graph URL into a raw JSON body.
pub trait GraphFetch {
    fn fetch(&self, url: &str) -> Result<String, GraphError>;
}

pub struct GraphClient {
    client: Client,
}

impl GraphClient {
    pub fn new(timeout: Duration) -> Result<Self, GraphError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| GraphError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

impl GraphFetch for GraphClient {
    /// Single attempt: a failed fetch fails the whole business account for this run.
    fn fetch(&self, url: &str) -> Result<String, GraphError> {
        let start = std::time::Instant::now();

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| GraphError::Network(e.without_url().to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| GraphError::Network(e.without_url().to_string()))?;

        tracing::debug!(status = %status, elapsed = ?start.elapsed(), "graph fetch");

        if !status.is_success() {
            return Err(GraphError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}

pub fn owned_accounts_url(
    base_url: &str,
    version: &str,
    business_id: &str,
    token: &str,
) -> Result<String, GraphError> {
    edge_url(
        base_url,
        version,
        business_id,
        "owned_whatsapp_business_accounts",
        ACCOUNT_FIELDS,
        token,
    )
}

pub fn phone_numbers_url(
    base_url: &str,
    version: &str,
    account_id: &str,
    token: &str,
) -> Result<String, GraphError> {
    edge_url(base_url, version, account_id, "phone_numbers", PHONE_FIELDS, token)
}

fn edge_url(
    base_url: &str,
    version: &str,
    node: &str,
    edge: &str,
    fields: &str,
    token: &str,
) -> Result<String, GraphError> {
    let mut url = Url::parse(base_url).map_err(|e| GraphError::Network(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| GraphError::Network(format!("cannot use {base_url} as a base URL")))?
        .pop_if_empty()
        .extend([version, node, edge]);
    url.query_pairs_mut()
        .append_pair("fields", fields)
        .append_pair("access_token", token);
    Ok(url.into())
}
