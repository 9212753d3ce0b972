use reqwest::{Client, RequestBuilder, multipart};
use url::Url;

use crate::error::{Error, Result};
use crate::media::MediaUploadRequest;
use crate::rate_limit::RateLimit;
use crate::rest_types::{MediaUploadData, MediaUploadResponse};

pub const DEFAULT_API_HOST: &str = "https://api.twitter.com";
const MEDIA_UPLOAD_ROUTE: &str = "2/media/upload";
const OCTET_STREAM: &str = "application/octet-stream";

/// Signs outgoing requests. Implementations add whatever credentials the
/// account uses; the client never inspects them.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder;
}

/// OAuth 2.0 app-only bearer token.
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

impl Authorizer for BearerToken {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.0)
    }
}

impl<F> Authorizer for F
where
    F: Fn(RequestBuilder) -> RequestBuilder + Send + Sync,
{
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        self(request)
    }
}

pub struct MediaClient {
    client: Client,
    host: Url,
    authorizer: Box<dyn Authorizer>,
}

impl MediaClient {
    pub fn new(host: Url, authorizer: impl Authorizer + 'static) -> Self {
        Self::with_http_client(Client::new(), host, authorizer)
    }

    pub fn with_http_client(
        client: Client,
        host: Url,
        authorizer: impl Authorizer + 'static,
    ) -> Self {
        Self {
            client,
            host,
            authorizer: Box::new(authorizer),
        }
    }

    pub fn host(&self) -> &Url {
        &self.host
    }

    /// Uploads media in a single request.
    ///
    /// The request is validated first; a missing field returns
    /// [`Error::Parameter`] without contacting the server. Large media that
    /// needs the INIT/APPEND/FINALIZE flow is not handled here. Any
    /// `processing_info` in the result is a one-off snapshot.
    pub async fn upload_media(&self, request: &MediaUploadRequest) -> Result<MediaUploadResponse> {
        request.validate()?;

        let url = self.host.join(MEDIA_UPLOAD_ROUTE)?;

        let form = upload_form_fields(request)
            .into_iter()
            .fold(multipart::Form::new().part("media", media_part(request)), |form, (name, value)| {
                form.text(name, value)
            });

        log::debug!(
            "uploading {} bytes of {} to {}",
            request.media.len(),
            request.media_type,
            url
        );

        let response = self
            .authorizer
            .authorize(self.client.post(url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let rate_limit = RateLimit::from_headers(response.headers());

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    log::warn!("failed to read media upload error body: {}", e);
                    String::new()
                }
            };
            log::warn!("media upload failed: {} - {}", status, body);
            return Err(Error::Response {
                status,
                rate_limit,
                body,
            });
        }

        let body = response.bytes().await?;
        let data: MediaUploadData = serde_json::from_slice(&body)?;
        log::debug!("uploaded media {} ({} bytes)", data.media_id_string, data.size);

        Ok(MediaUploadResponse { data, rate_limit })
    }
}

/// The binary `media` part. The MIME type is also sent as its own text field,
/// so a value that is not `type/subtype` falls back to an octet stream here
/// instead of failing the request.
fn media_part(request: &MediaUploadRequest) -> multipart::Part {
    let part = || multipart::Part::bytes(request.media.clone()).file_name("media");
    match part().mime_str(&request.media_type) {
        Ok(part) => part,
        Err(_) => {
            log::debug!(
                "{:?} is not a MIME type, sending media as {}",
                request.media_type,
                OCTET_STREAM
            );
            part().mime_str(OCTET_STREAM).unwrap_or_else(|_| part())
        }
    }
}

/// Text parts sent next to the binary `media` part.
fn upload_form_fields(request: &MediaUploadRequest) -> Vec<(&'static str, String)> {
    let mut fields = vec![("media_type", request.media_type.clone())];
    if let Some(category) = &request.media_category {
        fields.push(("media_category", category.to_string()));
    }
    if !request.additional_owners.is_empty() {
        fields.push(("additional_owners", request.additional_owners.join(",")));
    }
    fields
}
