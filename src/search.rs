use tracing::{debug, instrument};

use crate::error::Result;
use crate::index::Index;
use crate::transport::Request;
use crate::types::{SearchRequest, SearchResponse};

/// Translate a search request into query parameters.
///
/// Every parameter is always present, even when empty or zero, so the service
/// sees the same set of keys on every call. List fields are comma joined.
pub fn search_params(request: &SearchRequest) -> Vec<(&'static str, String)> {
    vec![
        ("q", request.query.clone()),
        ("filters", request.filters.clone()),
        ("offset", request.offset.to_string()),
        ("limit", request.limit.to_string()),
        ("cropLength", request.crop_length.to_string()),
        (
            "attributesToRetrieve",
            request.attributes_to_retrieve.join(","),
        ),
        ("attributesToCrop", request.attributes_to_crop.join(",")),
        (
            "attributesToHighlight",
            request.attributes_to_highlight.join(","),
        ),
        ("matches", request.matches.to_string()),
    ]
}

/// URL-encoded form of [`search_params`], e.g. `q=&filters=&offset=0&...`.
pub fn encode_search_query(request: &SearchRequest) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(search_params(request))
        .finish()
}

impl Index {
    #[instrument(skip(self, request), fields(index = %self.uid(), query = %request.query))]
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let http_request =
            Request::get(self.path(&["search"]), "Search").with_query(search_params(request));
        let response: SearchResponse = self.transport().execute(http_request).await?;

        debug!(
            hits = response.hits.len(),
            nb_hits = response.nb_hits,
            processing_time_ms = response.processing_time_ms,
            "search complete"
        );
        Ok(response)
    }
}
