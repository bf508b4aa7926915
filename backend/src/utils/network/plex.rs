use crate::model::{parse_xml_document, ExportConfig, ItemRef, LibraryDescriptor, MediaRecord, SectionInfo, XmlTag};
use crate::utils::debug_if_enabled;
use crate::utils::request::{create_client, decompress_gzip, format_http_status, is_gzip};
use log::debug;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_TYPE};
use reqwest::StatusCode;
use shared::error::{artifact_err, config_err, item_err, section_err, ExportError};
use shared::model::XML_ELEMENT_DIRECTORY;
use shared::utils::{sanitize_sensitive_info, ENCODING_GZIP, HEADER_CONTAINER_SIZE, HEADER_CONTAINER_START};
use url::Url;

/// Window of the paged listing fallback.
pub const PAGE_SIZE: usize = 1000;

const PATH_SECTIONS: &str = "library/sections";
const PATH_METADATA: &str = "library/metadata";

/// Read access to the media server. All calls are awaited one after another.
#[allow(async_fn_in_trait)]
pub trait PlexApi {
    async fn list_sections(&self) -> Result<Vec<SectionInfo>, ExportError>;
    /// Every entry of a library. Falls back to paged requests when the bulk listing is rejected.
    async fn list_items(&self, library: &LibraryDescriptor) -> Result<Vec<ItemRef>, ExportError>;
    async fn fetch_detail(&self, rating_key: &str, element: &str) -> Result<MediaRecord, ExportError>;
    async fn fetch_children(&self, rating_key: &str, element: &str) -> Result<Vec<XmlTag>, ExportError>;
    async fn fetch_image(&self, path: &str) -> Result<Vec<u8>, ExportError>;
}

pub struct PlexClient {
    client: reqwest::Client,
    base_url: Url,
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') { url.to_string() } else { format!("{url}/") }
}

fn collect_entries<T>(root: &XmlTag, element: &str, map: fn(&XmlTag) -> Option<T>) -> Vec<T> {
    root.find_children(element).filter_map(map).collect()
}

impl PlexClient {
    pub fn new(config: &ExportConfig) -> Result<Self, ExportError> {
        let base_url = Url::parse(&with_trailing_slash(&config.base_url))
            .map_err(|err| config_err!("Invalid Plex url {}: {err}", config.base_url))?;
        let client = create_client(&config.token)?
            .build()
            .map_err(|err| config_err!("Failed to create http client: {err}"))?;
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            Url::parse(path)
        } else {
            self.base_url.join(path.trim_start_matches('/'))
        }
    }

    async fn get(&self, url: &Url, window: Option<(usize, usize)>) -> Result<(StatusCode, Vec<u8>), reqwest::Error> {
        let mut request = self.client.get(url.clone());
        if let Some((start, size)) = window {
            request = request
                .header(HEADER_CONTAINER_START, start.to_string())
                .header(HEADER_CONTAINER_SIZE, size.to_string());
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }

    async fn list_paged(&self, url: &Url, library: &LibraryDescriptor) -> Result<Vec<ItemRef>, ExportError> {
        let element = library.kind.item_element();
        let mut items = vec![];
        let mut start = 0;
        loop {
            debug_if_enabled!("Requesting {} entries {}..{}", library, start, start + PAGE_SIZE);
            let (status, body) = self.get(url, Some((start, PAGE_SIZE))).await
                .map_err(|err| section_err!("Failed to get library info: {err}"))?;
            if status != StatusCode::OK {
                return Err(section_err!("Failed to get library info with error code {}: {}",
                    format_http_status(status), String::from_utf8_lossy(&body)));
            }
            let page = parse_listing(&body, element, ItemRef::from_tag)?;
            let page_len = page.len();
            items.extend(page);
            if page_len < PAGE_SIZE {
                break;
            }
            start += PAGE_SIZE;
        }
        Ok(items)
    }

    async fn fetch_container(&self, url: &Url) -> Result<XmlTag, ExportError> {
        let (status, body) = self.get(url, None).await
            .map_err(|err| item_err!("Request to {} failed: {err}", sanitize_sensitive_info(url.as_str())))?;
        if status != StatusCode::OK {
            return Err(item_err!("Request to {} failed with {}", sanitize_sensitive_info(url.as_str()), format_http_status(status)));
        }
        parse_xml_document(&body)
            .map_err(|err| item_err!("Can't parse response of {}: {err}", sanitize_sensitive_info(url.as_str())))?
            .ok_or_else(|| item_err!("Empty response from {}", sanitize_sensitive_info(url.as_str())))
    }
}

fn parse_listing<T>(body: &[u8], element: &str, map: fn(&XmlTag) -> Option<T>) -> Result<Vec<T>, ExportError> {
    let root = parse_xml_document(body)
        .map_err(|err| section_err!("Can't parse library listing: {err}"))?;
    Ok(root.map(|root| collect_entries(&root, element, map)).unwrap_or_default())
}

impl PlexApi for PlexClient {
    async fn list_sections(&self) -> Result<Vec<SectionInfo>, ExportError> {
        let url = self.url(PATH_SECTIONS).map_err(|err| config_err!("Invalid Plex url: {err}"))?;
        let (status, body) = self.get(&url, None).await
            .map_err(|err| section_err!("Failed to get library sections: {err}"))?;
        if status != StatusCode::OK {
            return Err(section_err!("Failed to get library sections with error code {}: {}",
                format_http_status(status), String::from_utf8_lossy(&body)));
        }
        parse_listing(&body, XML_ELEMENT_DIRECTORY, SectionInfo::from_tag)
    }

    async fn list_items(&self, library: &LibraryDescriptor) -> Result<Vec<ItemRef>, ExportError> {
        let path = format!("{PATH_SECTIONS}/{}/{}", library.key, library.kind.listing_endpoint());
        let url = self.url(&path).map_err(|err| section_err!("Invalid listing url {path}: {err}"))?;
        let (status, body) = self.get(&url, None).await
            .map_err(|err| section_err!("Failed to get library info: {err}"))?;
        match status {
            StatusCode::OK => parse_listing(&body, library.kind.item_element(), ItemRef::from_tag),
            StatusCode::BAD_REQUEST => {
                debug!("Bulk listing of {library} rejected, switching to paged requests");
                self.list_paged(&url, library).await
            }
            _ => Err(section_err!("Failed to get library info with error code {}: {}",
                format_http_status(status), String::from_utf8_lossy(&body))),
        }
    }

    async fn fetch_detail(&self, rating_key: &str, element: &str) -> Result<MediaRecord, ExportError> {
        let path = format!("{PATH_METADATA}/{rating_key}");
        let url = self.url(&path).map_err(|err| item_err!("Invalid detail url {path}: {err}"))?;
        let container = self.fetch_container(&url).await?;
        container.find_child(element)
            .map(|tag| MediaRecord::new(tag.clone()))
            .ok_or_else(|| item_err!("Item {rating_key} not found"))
    }

    async fn fetch_children(&self, rating_key: &str, element: &str) -> Result<Vec<XmlTag>, ExportError> {
        let path = format!("{PATH_METADATA}/{rating_key}/children");
        let url = self.url(&path).map_err(|err| item_err!("Invalid children url {path}: {err}"))?;
        let container = self.fetch_container(&url).await?;
        Ok(container.find_children(element).cloned().collect())
    }

    async fn fetch_image(&self, path: &str) -> Result<Vec<u8>, ExportError> {
        let url = self.url(path).map_err(|err| artifact_err!("Invalid image url {path}: {err}"))?;
        let response = self.client.get(url)
            .header(ACCEPT_ENCODING, ENCODING_GZIP)
            .send().await
            .map_err(|err| artifact_err!("Download Image failed: {err}"))?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(artifact_err!("Image does not exist"));
        }
        if status != StatusCode::OK {
            return Err(artifact_err!("Download Image HTTP Response: {}", format_http_status(status)));
        }
        let headers = response.headers();
        let content_type = headers.get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_lowercase();
        if !content_type.starts_with("image/") {
            return Err(artifact_err!("Download Image returned content type '{content_type}'"));
        }
        let gzip_encoded = headers.get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case(ENCODING_GZIP));
        let body = response.bytes().await
            .map_err(|err| artifact_err!("Download Image failed: {err}"))?;
        if gzip_encoded || is_gzip(&body) {
            decompress_gzip(&body).map_err(|err| artifact_err!("Can't inflate image: {err}"))
        } else {
            Ok(body.to_vec())
        }
    }
}
