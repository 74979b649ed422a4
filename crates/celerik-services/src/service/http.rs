use crate::error::{ServiceError, ServiceResult};
use crate::model::{ApiResponse, ApiStatusCode};
use celerik_core::ServiceResources;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Body markers of the validation problem ASP.NET returns for an invalid
/// model state
const VALIDATION_PROBLEM_MARKERS: [&str; 5] = ["\"errors\"", "\"type\"", "\"title\"", "\"status\"", "\"traceId\""];

/// Client for a remote service that answers with [`ApiResponse`] envelopes
#[derive(Debug, Clone)]
pub struct ApiServiceHttp {
    client: Client,
    base_address: Url,
    controller: String,
}

impl ApiServiceHttp {
    pub fn new(base_address: &str, controller: impl Into<String>) -> ServiceResult<Self> {
        Self::with_client(Client::new(), base_address, controller)
    }

    pub fn with_client(client: Client, base_address: &str, controller: impl Into<String>) -> ServiceResult<Self> {
        Ok(Self {
            client,
            base_address: Url::parse(base_address)?,
            controller: controller.into(),
        })
    }

    pub fn base_address(&self) -> &Url {
        &self.base_address
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Call `{controller}/{endpoint}` relative to the base address
    ///
    /// GET and DELETE send the payload's non-null fields as the query
    /// string; other methods send it as a JSON body. A 200 is decoded as an
    /// envelope and a 400 becomes a failed envelope carrying the response
    /// body. Any other status is an error.
    pub async fn call<T, P>(&self, method: Method, endpoint: &str, payload: Option<&P>) -> ServiceResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let sends_query = method == Method::GET || method == Method::DELETE;
        let url = self.url(endpoint, payload.filter(|_| sends_query))?;

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(payload) = payload.filter(|_| !sends_query) {
            request = request.json(payload);
        }

        tracing::debug!(%method, %url, "Calling service");
        let response = request.send().await?;
        let status = response.status();
        let content = response.text().await?;

        match status {
            StatusCode::OK => Ok(serde_json::from_str(&content)?),
            StatusCode::BAD_REQUEST => {
                let message = if is_validation_problem(&content) {
                    first_validation_message(&content).to_string()
                } else {
                    content
                };
                Ok(ApiResponse::failure(message, ApiStatusCode::BadRequest))
            }
            other => {
                let code = other.as_u16();
                tracing::warn!(
                    "{}",
                    ServiceResources::get("ApiServiceHttp.Call.Error", &[&url, &code, &content])
                );
                Err(ServiceError::http(url.as_str(), code, content))
            }
        }
    }

    pub async fn get<T, P>(&self, endpoint: &str, payload: Option<&P>) -> ServiceResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.call(Method::GET, endpoint, payload).await
    }

    pub async fn post<T, P>(&self, endpoint: &str, payload: Option<&P>) -> ServiceResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.call(Method::POST, endpoint, payload).await
    }

    pub async fn put<T, P>(&self, endpoint: &str, payload: Option<&P>) -> ServiceResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.call(Method::PUT, endpoint, payload).await
    }

    pub async fn delete<T, P>(&self, endpoint: &str, payload: Option<&P>) -> ServiceResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.call(Method::DELETE, endpoint, payload).await
    }

    fn url<P: Serialize + ?Sized>(&self, endpoint: &str, query: Option<&P>) -> ServiceResult<Url> {
        let mut url = self.base_address.join(&format!("{}/{}", self.controller, endpoint))?;

        if let Some(payload) = query {
            if let Value::Object(fields) = serde_json::to_value(payload)? {
                let mut pairs = url.query_pairs_mut();
                for (name, value) in fields {
                    match value {
                        Value::Null => {}
                        Value::String(text) => {
                            pairs.append_pair(&name, &text);
                        }
                        other => {
                            pairs.append_pair(&name, &other.to_string());
                        }
                    }
                }
            }
        }

        Ok(url)
    }
}

/// Whether `body` looks like an ASP.NET validation problem
///
/// Plain substring checks. Only this exact shape is recognized.
pub fn is_validation_problem(body: &str) -> bool {
    !body.is_empty() && VALIDATION_PROBLEM_MARKERS.iter().all(|marker| body.contains(marker))
}

/// The first message of a validation problem body
///
/// Takes the text between the first `["` and the following quote, minus
/// its last character, so a one-character message yields an empty string.
/// Falls back to the whole body when that text cannot be found.
pub fn first_validation_message(body: &str) -> &str {
    let Some(start) = body.find("[\"").map(|index| index + 2) else {
        return body;
    };
    let rest = &body[start..];
    let Some(end) = rest.find('"') else {
        return body;
    };

    let mut message = rest[..end].chars();
    message.next_back();
    message.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBLEM: &str = r#"{"type":"https://tools.ietf.org/html/rfc7231#section-6.5.1","title":"One or more validation errors occurred.","status":400,"traceId":"|8e3c-1","errors":{"Name":["The Name field is required."]}}"#;

    #[test]
    fn test_detects_validation_problem() {
        assert!(is_validation_problem(PROBLEM));
        assert!(!is_validation_problem(r#"{"errors":["x"],"title":"t"}"#));
        assert!(!is_validation_problem(""));
    }

    #[test]
    fn test_first_validation_message() {
        assert_eq!(first_validation_message(PROBLEM), "The Name field is required");
        assert_eq!(first_validation_message("no brackets here"), "no brackets here");
        assert_eq!(first_validation_message(r#"{"errors":["unclosed"#), r#"{"errors":["unclosed"#);
    }

    #[test]
    fn test_one_character_validation_message_is_empty() {
        assert_eq!(first_validation_message(r#"["x"]"#), "");
        assert_eq!(first_validation_message(r#"{"errors":{"Name":[""]}}"#), "");
    }

    #[test]
    fn test_url_joins_controller_and_query() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Filter {
            page_number: i32,
            name: Option<String>,
            sort_key: &'static str,
        }

        let service = ApiServiceHttp::new("http://localhost:5000/", "orders").unwrap();
        let filter = Filter {
            page_number: 2,
            name: None,
            sort_key: "created at",
        };
        let url = service.url("list", Some(&filter)).unwrap();

        assert_eq!(url.path(), "/orders/list");
        assert_eq!(url.query(), Some("pageNumber=2&sortKey=created+at"));
    }

    #[test]
    fn test_invalid_base_address() {
        assert!(matches!(ApiServiceHttp::new("not a url", "orders"), Err(ServiceError::Url(_))));
    }
}
