//! Executes the core's http requests.

use log::{debug, warn};
use shared::capabilities::http::{HttpOperation, HttpOutput};

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Requests go through `proxy` when one is given.
    pub fn new(proxy: Option<&str>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(proxy) = proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self {
            http_client: builder.build()?,
        })
    }

    pub async fn execute(&self, operation: &HttpOperation) -> HttpOutput {
        match operation {
            HttpOperation::Get { url, headers } => {
                let request = headers
                    .iter()
                    .fold(self.http_client.get(url), |request, (name, value)| {
                        request.header(name.as_str(), value.as_str())
                    });

                match send(request).await {
                    Ok(output) => output,
                    Err(error) => {
                        warn!("GET {url} failed: {error}");
                        HttpOutput::Error {
                            message: error.to_string(),
                        }
                    }
                }
            }
        }
    }
}

async fn send(request: reqwest::RequestBuilder) -> Result<HttpOutput, reqwest::Error> {
    let response = request.send().await?;
    let status_code = i32::from(response.status().as_u16());
    debug!("{} responded with {status_code}", response.url());

    let data = response.text().await?;

    Ok(HttpOutput::Success {
        data: Some(data),
        status_code,
    })
}
