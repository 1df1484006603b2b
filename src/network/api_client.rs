use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::errors::DataError;

/// Minimal GET-only transport used by the listing services.
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    /// Fetch `url` and return the response body as text.
    async fn get(&self, url: &str) -> Result<String, DataError>;
}

fn js_err(context: &str, e: JsValue) -> DataError {
    DataError::Http(format!("{}: {:?}", context, e))
}

/// `fetch`-backed client for the browser.
#[derive(Debug, Clone, Default)]
pub struct BrowserHttp;

impl HttpClient for BrowserHttp {
    async fn get(&self, url: &str) -> Result<String, DataError> {
        use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new().map_err(|e| js_err("headers", e))?;
        headers
            .append("Accept", "application/json")
            .map_err(|e| js_err("headers", e))?;
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts).map_err(|e| js_err("request", e))?;

        let window = web_sys::window().ok_or_else(|| DataError::Http("no global window exists".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_err("fetch", e))?;
        let resp: Response = resp_value.dyn_into().map_err(|e| js_err("response", e))?;

        if !resp.ok() {
            return Err(DataError::Http(format!(
                "GET {} failed: {} {}",
                url,
                resp.status(),
                resp.status_text()
            )));
        }

        let text = JsFuture::from(resp.text().map_err(|e| js_err("body", e))?)
            .await
            .map_err(|e| js_err("body", e))?;
        Ok(text.as_string().unwrap_or_default())
    }
}
