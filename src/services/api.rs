//! Shelter API client
//!
//! All calls are credentialed through the client's cookie store: the session
//! cookie set by `POST /auth/login` is attached to every later request.

use crate::config::Config;
use crate::error::{endpoint, ApiError};
use crate::model::dog::{Dog, LoginRequest, MatchResponse, SearchResponse};
use crate::model::query::{CatalogQuery, SortOrder, PAGE_SIZE};
use crate::model::state::CatalogPage;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

/// Parameters of `GET /dogs/search`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub breeds: Vec<String>,
    pub sort: SortOrder,
    pub size: usize,
    pub from: usize,
}

impl SearchParams {
    pub fn for_query(query: &CatalogQuery) -> Self {
        Self {
            breeds: query.selected_breeds.clone(),
            sort: query.sort_order,
            size: PAGE_SIZE,
            from: query.from_offset(),
        }
    }

    /// Query string pairs; `breeds` repeats once per selected breed
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("sort", self.sort.sort_param()),
            ("size", self.size.to_string()),
            ("from", self.from.to_string()),
        ];
        pairs.extend(self.breeds.iter().map(|b| ("breeds", b.clone())));
        pairs
    }
}

/// Operations offered by the remote shelter service
pub trait ShelterApi: Send + Sync {
    fn login(&self, name: &str, email: &str) -> Result<(), ApiError>;
    fn breeds(&self) -> Result<Vec<String>, ApiError>;
    fn search(&self, params: &SearchParams) -> Result<SearchResponse, ApiError>;
    fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>, ApiError>;
    fn find_match(&self, ids: &[String]) -> Result<MatchResponse, ApiError>;
}

/// Two-phase catalog fetch: search for ids, then resolve the first page of
/// them into full records. Either phase failing fails the whole fetch.
pub fn fetch_catalog_page(
    api: &dyn ShelterApi,
    query: &CatalogQuery,
) -> Result<CatalogPage, ApiError> {
    let search = api.search(&SearchParams::for_query(query))?;

    let ids: Vec<String> = search.result_ids.into_iter().take(PAGE_SIZE).collect();
    let dogs = if ids.is_empty() {
        Vec::new()
    } else {
        api.dogs(&ids)?
    };

    Ok(CatalogPage {
        page: query.current_page,
        total: search.total,
        dogs,
    })
}

/// HTTP implementation backed by a blocking reqwest client
pub struct HttpShelterApi {
    client: Client,
    base_url: String,
}

impl HttpShelterApi {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| ApiError::Transport {
            endpoint: "client",
            source,
        })?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(
        endpoint: &'static str,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<Response, ApiError> {
        tracing::debug!(endpoint, "sending request");
        let response = request
            .send()
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    fn decode<T: DeserializeOwned>(endpoint: &'static str, response: Response) -> Result<T, ApiError> {
        let body = response
            .text()
            .map_err(|source| ApiError::Transport { endpoint, source })?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode { endpoint, source })
    }
}

impl ShelterApi for HttpShelterApi {
    fn login(&self, name: &str, email: &str) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url(endpoint::LOGIN))
            .json(&LoginRequest { name, email });
        // Body is plain text; only the status and the cookie matter
        Self::send(endpoint::LOGIN, request)?;
        Ok(())
    }

    fn breeds(&self) -> Result<Vec<String>, ApiError> {
        let request = self.client.get(self.url(endpoint::BREEDS));
        let response = Self::send(endpoint::BREEDS, request)?;
        Self::decode(endpoint::BREEDS, response)
    }

    fn search(&self, params: &SearchParams) -> Result<SearchResponse, ApiError> {
        let request = self
            .client
            .get(self.url(endpoint::SEARCH))
            .query(&params.to_pairs());
        let response = Self::send(endpoint::SEARCH, request)?;
        Self::decode(endpoint::SEARCH, response)
    }

    fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>, ApiError> {
        let request = self.client.post(self.url(endpoint::DOGS)).json(ids);
        let response = Self::send(endpoint::DOGS, request)?;
        Self::decode(endpoint::DOGS, response)
    }

    fn find_match(&self, ids: &[String]) -> Result<MatchResponse, ApiError> {
        let request = self.client.post(self.url(endpoint::MATCH)).json(ids);
        let response = Self::send(endpoint::MATCH, request)?;
        Self::decode(endpoint::MATCH, response)
    }
}


#[cfg(test)]
mod tests {
    use super::fake::{dog, ApiCall, FakeShelterApi};
    use super::*;

    fn many_dogs(count: usize) -> Vec<Dog> {
        (0..count)
            .map(|i| dog(&format!("d{:03}", i), &format!("Dog {}", i), "Beagle"))
            .collect()
    }

    #[test]
    fn test_search_params_pairs() {
        let mut query = CatalogQuery::new(SortOrder::Desc);
        query.toggle_breed("Beagle");
        query.toggle_breed("Pug");
        query.current_page = 2;

        let params = SearchParams::for_query(&query);
        assert_eq!(params.from, 25);
        assert_eq!(params.size, PAGE_SIZE);
        assert_eq!(
            params.to_pairs(),
            vec![
                ("sort", "breed:desc".to_string()),
                ("size", "25".to_string()),
                ("from", "25".to_string()),
                ("breeds", "Beagle".to_string()),
                ("breeds", "Pug".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_breed_selection_sends_no_breed_filter() {
        let params = SearchParams::for_query(&CatalogQuery::default());
        assert!(params.to_pairs().iter().all(|(key, _)| *key != "breeds"));
    }

    #[test]
    fn test_fetch_catalog_page_two_phases() {
        let api = FakeShelterApi::new(many_dogs(30));
        let mut query = CatalogQuery::new(SortOrder::Desc);

        let first = fetch_catalog_page(&api, &query).unwrap();
        assert_eq!(first.total, 30);
        assert_eq!(first.dogs.len(), 25);
        assert_eq!(crate::model::query::total_pages(first.total), 2);

        query.current_page = 2;
        let second = fetch_catalog_page(&api, &query).unwrap();
        assert_eq!(second.page, 2);
        assert_eq!(second.dogs.len(), 5);

        let calls = api.calls();
        assert!(matches!(&calls[0], ApiCall::Search(p) if p.from == 0));
        assert!(matches!(&calls[1], ApiCall::Dogs(ids) if ids.len() == 25));
        assert!(matches!(&calls[2], ApiCall::Search(p) if p.from == 25));
    }

    #[test]
    fn test_fetch_catalog_page_filters_breeds() {
        let mut dogs = many_dogs(3);
        dogs.push(dog("p1", "Pugsley", "Pug"));
        let api = FakeShelterApi::new(dogs);
        let mut query = CatalogQuery::default();
        query.toggle_breed("Pug");

        let page = fetch_catalog_page(&api, &query).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.dogs[0].name, "Pugsley");
    }

    #[test]
    fn test_fetch_catalog_page_skips_detail_call_for_no_results() {
        let api = FakeShelterApi::new(Vec::new());
        let page = fetch_catalog_page(&api, &CatalogQuery::default()).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.dogs.is_empty());
        assert_eq!(api.calls().len(), 1);
    }

    #[test]
    fn test_fetch_catalog_page_detail_failure_fails_whole_fetch() {
        let mut api = FakeShelterApi::new(many_dogs(3));
        api.failing.push(endpoint::DOGS);
        let err = fetch_catalog_page(&api, &CatalogQuery::default()).unwrap_err();
        assert_eq!(err.endpoint(), endpoint::DOGS);
    }

    #[test]
    fn test_http_client_builds_from_config() {
        let config = Config {
            api_base_url: "http://localhost:9/".to_string(),
            request_timeout_secs: Some(5),
            ..Config::default()
        };
        let api = HttpShelterApi::new(&config).unwrap();
        assert_eq!(api.url(endpoint::SEARCH), "http://localhost:9/dogs/search");
    }
}
