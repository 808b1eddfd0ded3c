use color_eyre::eyre::{Result, WrapErr};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::ports::catalog::SearchFilter;

const CLIENT_NAME: &str = "WEB_REMIX";

/// Client identity sent with every InnerTube request.
#[derive(Debug, Clone)]
pub struct InnerTubeContext {
    pub client_version: String,
    /// Interface language, e.g. `en`.
    pub language: String,
    /// Content region, e.g. `US`.
    pub region: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientInfo<'a> {
    client_name: &'a str,
    client_version: &'a str,
    hl: &'a str,
    gl: &'a str,
}

#[derive(Debug, Serialize)]
struct RequestContext<'a> {
    client: ClientInfo<'a>,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    context: RequestContext<'a>,
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a str>,
}

/// Encoded search params selecting a result category.
///
/// Unfiltered searches send no params at all.
pub fn search_params(filter: SearchFilter) -> Option<&'static str> {
    match filter {
        SearchFilter::Songs => Some("EgWKAQIIAWoMEA4QChADEAQQCRAF"),
        SearchFilter::Videos => Some("EgWKAQIQAWoMEA4QChADEAQQCRAF"),
        SearchFilter::None => None,
    }
}

fn build_request<'a>(
    context: &'a InnerTubeContext,
    query: &'a str,
    filter: SearchFilter,
) -> SearchRequest<'a> {
    SearchRequest {
        context: RequestContext {
            client: ClientInfo {
                client_name: CLIENT_NAME,
                client_version: &context.client_version,
                hl: &context.language,
                gl: &context.region,
            },
        },
        query,
        params: search_params(filter),
    }
}

/// Run a search and return the raw InnerTube response.
///
/// Endpoint
/// - `POST /youtubei/v1/search`
pub async fn search(
    client: &Client,
    base_url: &Url,
    context: &InnerTubeContext,
    query: &str,
    filter: SearchFilter,
) -> Result<Value> {
    let url = base_url.join("youtubei/v1/search?prettyPrint=false")?;

    let res = client
        .post(url)
        .header("Accept", "application/json")
        .header("Origin", base_url.as_str().trim_end_matches('/'))
        .json(&build_request(context, query, filter))
        .send()
        .await
        .wrap_err("Failed to send YouTube Music search request")?
        .error_for_status()
        .wrap_err("YouTube Music search request was rejected")?
        .json::<Value>()
        .await
        .wrap_err("Failed to deserialize YouTube Music search response")?;

    Ok(res)
}
