use flate2::read::GzDecoder;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use shared::error::{config_err, ExportError};
use shared::utils::HEADER_PLEX_TOKEN;
use std::io::Read;
use std::time::Duration;

pub const MIME_XML: &str = "application/xml";

pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0x1F && bytes[1] == 0x8B
}

pub fn decompress_gzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut decoded = Vec::with_capacity(bytes.len() * 2);
    decoder.read_to_end(&mut decoded)?;
    Ok(decoded)
}

pub fn format_http_status(status: StatusCode) -> String {
    let code = status.as_u16();
    match status.canonical_reason() {
        Some(reason) => format!("{code} {reason}"),
        None => code.to_string(),
    }
}

/// Client builder sending the token with every request.
pub fn create_client(token: &str) -> Result<reqwest::ClientBuilder, ExportError> {
    let mut token_value = HeaderValue::from_str(token)
        .map_err(|_| config_err!("Plex token contains invalid characters"))?;
    token_value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(HEADER_PLEX_TOKEN, token_value);
    headers.insert(ACCEPT, HeaderValue::from_static(MIME_XML));

    Ok(reqwest::Client::builder()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .pool_idle_timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10))
}
