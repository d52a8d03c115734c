use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response, UrlSearchParams};

use crate::dom;
use crate::error::{Error, Result};
use crate::post::{Post, PostId};

pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// The two calls the page makes against the forum's post API.
#[allow(async_fn_in_trait)]
pub trait PostsApi {
    /// Raw, unrendered markdown of a post.
    async fn fetch_raw(&self, id: &PostId) -> Result<String>;

    /// Replaces a post's text, returning the post as the server stored it.
    async fn update_text(&self, id: &PostId, text: &str) -> Result<Post>;
}

/// `PostsApi` over `window.fetch`, talking to `{api_base}/{id}`.
pub struct HttpPostsApi {
    api_base: String,
}

impl HttpPostsApi {
    pub fn new(api_base: impl Into<String>) -> Self {
        HttpPostsApi {
            api_base: api_base.into(),
        }
    }

    /// `GET {api_base}/{id}` for the raw text.
    pub fn raw_request(&self, id: &PostId) -> Result<Request> {
        let headers = Headers::new()?;
        headers.set("Accept", "text/html, text/plain, */*")?;
        headers.set("X-Requested-With", "XMLHttpRequest")?;

        let init = RequestInit::new();
        init.set_method("GET");
        init.set_headers(&headers);

        Ok(Request::new_with_str_and_init(&id.api_url(&self.api_base), &init)?)
    }

    /// The update is a form `POST` tunnelled as `PUT` through the method
    /// override header.
    pub fn update_request(&self, id: &PostId, text: &str) -> Result<Request> {
        let headers = Headers::new()?;
        headers.set("Accept", "application/json")?;
        headers.set("X-Requested-With", "XMLHttpRequest")?;
        headers.set(METHOD_OVERRIDE_HEADER, "PUT")?;

        let form = UrlSearchParams::new()?;
        form.append("text", text);

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&form);

        Ok(Request::new_with_str_and_init(&id.api_url(&self.api_base), &init)?)
    }

    async fn send(&self, request: Request) -> Result<String> {
        let response: Response = JsFuture::from(dom::window()?.fetch_with_request(&request))
            .await?
            .dyn_into()?;

        if !response.ok() {
            return Err(Error::Status {
                url: request.url(),
                status: response.status(),
            });
        }

        let body = JsFuture::from(response.text()?).await?;
        Ok(body.as_string().unwrap_or_default())
    }
}

impl PostsApi for HttpPostsApi {
    async fn fetch_raw(&self, id: &PostId) -> Result<String> {
        let request = self.raw_request(id)?;
        log::debug!("GET {}", request.url());
        self.send(request).await
    }

    async fn update_text(&self, id: &PostId, text: &str) -> Result<Post> {
        let request = self.update_request(id, text)?;
        log::debug!("PUT {} ({} bytes)", request.url(), text.len());

        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
