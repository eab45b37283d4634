use common_lib::{app::AddAppRequest, review::ReviewsResponse};
use derive_more::Display;
use futures::{future::LocalBoxFuture, FutureExt};
use gloo_net::http::Request;
use log::warn;
use serde::de::DeserializeOwned;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Network-level failures of explicit user actions; the only error class
/// that becomes user-visible text.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "server returned status {}", _0)]
    Status(u16),
    #[display(fmt = "network error: {}", _0)]
    Transport(gloo_net::Error),
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        Self::Transport(e)
    }
}

/// Backend client. Abstracted so tests can substitute a double for the
/// HTTP implementation.
pub trait ApiClient {
    /// Registers a new tracked app with the backend. The response body is
    /// ignored on success.
    fn register_app<'a>(&'a self, app_id: &'a str) -> LocalBoxFuture<'a, Result<(), ApiError>>;

    /// Fetches the recent reviews of `app_id`. An absent, empty or
    /// malformed body is normalized to the empty response, never an error.
    fn recent_reviews<'a>(
        &'a self,
        app_id: &'a str,
    ) -> LocalBoxFuture<'a, Result<ReviewsResponse, ApiError>>;
}

/// The real client. The base endpoint is resolved once, at construction,
/// from the build-time configuration with a fixed fallback.
pub struct HttpApi {
    base: String,
}

impl HttpApi {
    pub fn new() -> Self {
        let base = option_env!("REVIEWS_API_URL").unwrap_or(DEFAULT_API_URL);
        Url::parse(base).expect("invalid API base URL");
        Self {
            base: base.trim_end_matches('/').to_owned(),
        }
    }
}

impl ApiClient for HttpApi {
    fn register_app<'a>(&'a self, app_id: &'a str) -> LocalBoxFuture<'a, Result<(), ApiError>> {
        async move {
            let response = Request::post(&format!("{}/api/v1/app", self.base))
                .json(&AddAppRequest {
                    app_id: app_id.to_owned(),
                })?
                .send()
                .await?;
            if !response.ok() {
                return Err(ApiError::Status(response.status()));
            }
            Ok(())
        }
        .boxed_local()
    }

    fn recent_reviews<'a>(
        &'a self,
        app_id: &'a str,
    ) -> LocalBoxFuture<'a, Result<ReviewsResponse, ApiError>> {
        async move {
            let response = Request::get(&format!(
                "{}/api/v1/app/{}/reviews/recent",
                self.base, app_id
            ))
            .send()
            .await?;
            if !response.ok() {
                return Err(ApiError::Status(response.status()));
            }

            let headers = response.headers();
            if response.status() == 204
                || headers.get("content-type").is_none()
                || headers.get("content-length").as_deref() == Some("0")
            {
                return Ok(ReviewsResponse::default());
            }
            let body = response.text().await?;
            Ok(decode_lenient(&body))
        }
        .boxed_local()
    }
}

// Centralized so every caller gets identical "absent/empty/malformed body
// means empty result" semantics.
fn decode_lenient<T: DeserializeOwned + Default>(body: &str) -> T {
    if body.trim().is_empty() {
        return T::default();
    }
    match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            warn!("can't decode response body, treating as empty: {e}");
            T::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::Cell;

    use common_lib::review::{Review, ReviewsResponse};
    use futures::{future, future::LocalBoxFuture, FutureExt};

    use super::{ApiClient, ApiError};

    /// Test double serving canned reviews (matched by app id) and counting
    /// calls.
    pub struct FakeApi {
        pub reviews: Vec<Review>,
        pub fail_register: bool,
        pub fail_reviews: bool,
        pub register_calls: Cell<usize>,
        pub review_calls: Cell<usize>,
    }

    impl FakeApi {
        pub fn with_reviews(reviews: Vec<Review>) -> Self {
            Self {
                reviews,
                fail_register: false,
                fail_reviews: false,
                register_calls: Cell::new(0),
                review_calls: Cell::new(0),
            }
        }

        pub fn empty() -> Self {
            Self::with_reviews(Vec::new())
        }

        pub fn failing() -> Self {
            let mut api = Self::empty();
            api.fail_register = true;
            api.fail_reviews = true;
            api
        }
    }

    impl ApiClient for FakeApi {
        fn register_app<'a>(&'a self, _app_id: &'a str) -> LocalBoxFuture<'a, Result<(), ApiError>> {
            self.register_calls.set(self.register_calls.get() + 1);
            let result = if self.fail_register {
                Err(ApiError::Status(500))
            } else {
                Ok(())
            };
            future::ready(result).boxed_local()
        }

        fn recent_reviews<'a>(
            &'a self,
            app_id: &'a str,
        ) -> LocalBoxFuture<'a, Result<ReviewsResponse, ApiError>> {
            self.review_calls.set(self.review_calls.get() + 1);
            let result = if self.fail_reviews {
                Err(ApiError::Status(502))
            } else {
                Ok(ReviewsResponse {
                    reviews: self
                        .reviews
                        .iter()
                        .filter(|review| review.app_id == app_id)
                        .cloned()
                        .collect(),
                })
            };
            future::ready(result).boxed_local()
        }
    }
}
