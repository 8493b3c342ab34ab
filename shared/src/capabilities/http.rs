use crux_core::{Command, Request, capability::Operation, command::RequestBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HttpOperation {
    Get {
        url: String,
        headers: Vec<(String, String)>,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HttpOutput {
    Success {
        data: Option<String>,
        status_code: i32,
    },
    Error {
        message: String,
    },
}

impl Operation for HttpOperation {
    type Output = HttpOutput;
}

impl HttpOutput {
    /// The response body of a 2xx response, otherwise a description of what went wrong.
    pub fn into_body(self) -> Result<String, String> {
        match self {
            HttpOutput::Success { data, status_code } if (200..300).contains(&status_code) => {
                Ok(data.unwrap_or_default())
            }
            HttpOutput::Success { status_code, .. } => {
                Err(format!("server responded with status {status_code}"))
            }
            HttpOutput::Error { message } => Err(message),
        }
    }
}

#[must_use]
pub fn get<Effect, Event>(
    url: Url,
) -> RequestBuilder<Effect, Event, impl Future<Output = HttpOutput>>
where
    Effect: Send + From<Request<HttpOperation>> + 'static,
    Event: Send + 'static,
{
    get_with_headers(url, Vec::new())
}

#[must_use]
pub fn get_with_headers<Effect, Event>(
    url: Url,
    headers: Vec<(String, String)>,
) -> RequestBuilder<Effect, Event, impl Future<Output = HttpOutput>>
where
    Effect: Send + From<Request<HttpOperation>> + 'static,
    Event: Send + 'static,
{
    Command::request_from_shell(HttpOperation::Get {
        url: url.to_string(),
        headers,
    })
}
