//! Flash state and redirects.
//!
//! A redirect may carry errors, the submitted input and a status line to the
//! next page the browser loads. The payload is kept in the cache for a few
//! minutes and referenced from the `blog_flash` cookie; rendering a page
//! consumes it.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use blog_core::ValidationErrors;
use blog_core::ports::{Cache, CacheError};
use blog_shared::ApiResponse;
use blog_shared::view::{Flash, FlashError};

/// Cookie naming the pending flash payload.
pub const FLASH_COOKIE: &str = "blog_flash";

const FLASH_TTL: Duration = Duration::from_secs(300);

fn cache_key(id: &str) -> String {
    format!("flash:{id}")
}

/// Stores flash payloads in the cache port.
#[derive(Clone)]
pub struct FlashStore {
    cache: Arc<dyn Cache>,
}

impl FlashStore {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }

    /// Persist a payload and return the id to put in the cookie.
    pub async fn put(&self, flash: &Flash) -> Result<String, CacheError> {
        let id = Uuid::new_v4().to_string();
        let payload =
            serde_json::to_string(flash).map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.cache
            .set(&cache_key(&id), &payload, Some(FLASH_TTL))
            .await?;
        Ok(id)
    }

    /// Consume the payload referenced by the request's flash cookie.
    /// Missing, expired or unreadable payloads yield an empty flash.
    pub async fn take(&self, req: &HttpRequest) -> Flash {
        let Some(cookie) = req.cookie(FLASH_COOKIE) else {
            return Flash::default();
        };

        let payload = match self.cache.take(&cache_key(cookie.value())).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return Flash::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read flash state");
                return Flash::default();
            }
        };

        serde_json::from_str(&payload).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding malformed flash state");
            Flash::default()
        })
    }
}

/// Render a page as JSON, expiring the flash cookie if the request sent one.
pub fn page<T: Serialize>(req: &HttpRequest, data: T) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    if req.cookie(FLASH_COOKIE).is_some() {
        let mut removal = Cookie::build(FLASH_COOKIE, "").path("/").finish();
        removal.make_removal();
        response.cookie(removal);
    }
    response.json(ApiResponse::ok(data))
}

/// A `303 See Other` response under construction.
#[derive(Debug)]
pub struct Redirect {
    location: String,
    flash: Flash,
}

impl Redirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            flash: Flash::default(),
        }
    }

    /// Redirect to the page the request came from, per the `Referer`
    /// header, or to `fallback`. Only same-host referers are followed.
    pub fn back(req: &HttpRequest, fallback: &str) -> Self {
        let location = req
            .headers()
            .get(header::REFERER)
            .and_then(|v| v.to_str().ok())
            .and_then(|referer| local_path(referer, req.connection_info().host()))
            .unwrap_or_else(|| fallback.to_string());
        Self::to(location)
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Keep the submitted values for re-filling the form.
    pub fn with_input(mut self, input: BTreeMap<String, String>) -> Self {
        self.flash.old_input = input;
        self
    }

    pub fn with_errors(mut self, errors: ValidationErrors) -> Self {
        self.flash
            .errors
            .extend(errors.into_iter().map(|e| FlashError {
                field: e.field,
                message: e.message,
            }));
        self
    }

    /// Attach one form-wide error message.
    pub fn with_error(self, message: &str) -> Self {
        self.with_errors(ValidationErrors::general(message))
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.flash.status = Some(status.into());
        self
    }

    /// Store the flash (if any) and build the response. A flash that cannot
    /// be stored is logged and dropped; the redirect itself still happens.
    pub async fn finish(self, store: &FlashStore) -> HttpResponse {
        let mut response = HttpResponse::SeeOther();
        response.insert_header((header::LOCATION, self.location));

        if !self.flash.is_empty() {
            match store.put(&self.flash).await {
                Ok(id) => {
                    response.cookie(
                        Cookie::build(FLASH_COOKIE, id)
                            .path("/")
                            .http_only(true)
                            .same_site(SameSite::Lax)
                            .finish(),
                    );
                }
                Err(e) => tracing::warn!(error = %e, "Failed to store flash state"),
            }
        }

        response.finish()
    }
}

/// Reduce a referer to a path on this host.
fn local_path(referer: &str, host: &str) -> Option<String> {
    let path = if referer.starts_with('/') {
        referer.to_string()
    } else {
        let url = Url::parse(referer).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        let authority = match (url.host_str(), url.port()) {
            (Some(name), Some(port)) => format!("{name}:{port}"),
            (Some(name), None) => name.to_string(),
            (None, _) => return None,
        };
        if !authority.eq_ignore_ascii_case(host) {
            return None;
        }
        match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        }
    };

    // `//host` and `/\host` are read by browsers as another origin.
    let rest = &path[1..];
    (!rest.starts_with('/') && !rest.starts_with('\\')).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use blog_infra::InMemoryCache;

    #[test]
    fn test_local_path() {
        assert_eq!(
            local_path("http://localhost:8080/article/1", "localhost:8080").as_deref(),
            Some("/article/1")
        );
        assert_eq!(
            local_path("/admin/article/create", "localhost").as_deref(),
            Some("/admin/article/create")
        );
        assert_eq!(local_path("https://evil.example/x", "localhost"), None);
        assert_eq!(local_path("//evil.example/x", "localhost"), None);
        assert_eq!(
            local_path("http://blog.test/article/1?page=2", "blog.test").as_deref(),
            Some("/article/1?page=2")
        );
    }

    #[test]
    fn test_local_path_rejects_other_origins_hidden_in_path() {
        assert_eq!(local_path("http://blog.test//evil.example/x", "blog.test"), None);
        assert_eq!(local_path("/\\evil.example/x", "blog.test"), None);
        assert_eq!(local_path("javascript:alert(1)", "blog.test"), None);
        assert_eq!(local_path("http://blog.test@evil.example/", "blog.test"), None);
    }

    #[test]
    fn test_back_ignores_protocol_relative_referer() {
        let req = TestRequest::default()
            .insert_header(("host", "blog.test"))
            .insert_header((header::REFERER, "http://blog.test//evil.example/x"))
            .to_http_request();
        assert_eq!(Redirect::back(&req, "/article/1").location(), "/article/1");
    }

    #[test]
    fn test_back_uses_fallback_without_referer() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(Redirect::back(&req, "/admin/article").location(), "/admin/article");
    }

    #[test]
    fn test_back_follows_same_host_referer() {
        let req = TestRequest::default()
            .insert_header(("host", "blog.test"))
            .insert_header((header::REFERER, "http://blog.test/article/abc"))
            .to_http_request();
        assert_eq!(Redirect::back(&req, "/").location(), "/article/abc");
    }

    #[actix_web::test]
    async fn test_flash_round_trip_is_single_use() {
        let store = FlashStore::new(Arc::new(InMemoryCache::new()));
        let flash = Flash {
            errors: vec![FlashError {
                field: None,
                message: "Save failed".to_string(),
            }],
            old_input: BTreeMap::from([("title".to_string(), "Hello".to_string())]),
            status: None,
        };
        let id = store.put(&flash).await.unwrap();

        let req = TestRequest::default()
            .cookie(Cookie::new(FLASH_COOKIE, id))
            .to_http_request();

        assert_eq!(store.take(&req).await, flash);
        assert!(store.take(&req).await.is_empty());
    }
}
