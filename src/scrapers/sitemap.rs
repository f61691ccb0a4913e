use crate::error::ScrapeError;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};
use quick_xml::Reader;
use reqwest::Client;
use tracing::{debug, info};

/// Element path holding a page location inside a sitemap
const LOC_PATH: [&[u8]; 3] = [b"urlset", b"url", b"loc"];

/// Fetch a sitemap and return every `urlset/url/loc` in document order.
///
/// Any failure here is fatal for the refresh cycle that asked for it.
pub async fn fetch_sitemap(client: &Client, sitemap_url: &str) -> Result<Vec<String>, ScrapeError> {
    debug!("Fetching sitemap: {}", sitemap_url);

    let response = client
        .get(sitemap_url)
        .send()
        .await
        .map_err(|source| ScrapeError::SitemapFetch {
            url: sitemap_url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::SitemapStatus {
            url: sitemap_url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| ScrapeError::SitemapFetch {
            url: sitemap_url.to_string(),
            source,
        })?;

    let urls = parse_sitemap(&body)?;
    info!("Sitemap {} lists {} URLs", sitemap_url, urls.len());

    Ok(urls)
}

/// Keep only the URLs containing `marker`, preserving their order
pub fn filter_by_marker(urls: Vec<String>, marker: &str) -> Vec<String> {
    urls.into_iter().filter(|url| url.contains(marker)).collect()
}

/// Parse sitemap XML into its page locations.
///
/// Namespace prefixes are ignored; blank `<loc>` elements are skipped.
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>, ScrapeError> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut locations = Vec::new();
    let mut current = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                path.push(e.local_name().as_ref().to_vec());
                if at_loc(&path) {
                    current.clear();
                }
            }
            Ok(Event::End(_)) => {
                if at_loc(&path) {
                    let loc = current.trim();
                    if !loc.is_empty() {
                        locations.push(loc.to_string());
                    }
                }
                path.pop();
            }
            Ok(Event::Text(e)) if at_loc(&path) => {
                let text = e
                    .decode()
                    .map_err(|err| ScrapeError::SitemapParse(err.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::CData(e)) if at_loc(&path) => {
                current.push_str(&String::from_utf8_lossy(&e));
            }
            Ok(Event::GeneralRef(e)) if at_loc(&path) => {
                current.push_str(&resolve_reference(&e)?);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(ScrapeError::SitemapParse(format!(
                    "at byte {}: {}",
                    reader.error_position(),
                    err
                )));
            }
        }
    }

    if let Some(open) = path.last() {
        return Err(ScrapeError::SitemapParse(format!(
            "document ended inside <{}>",
            String::from_utf8_lossy(open)
        )));
    }

    Ok(locations)
}

fn at_loc(path: &[Vec<u8>]) -> bool {
    path.len() == LOC_PATH.len()
        && path
            .iter()
            .zip(LOC_PATH.iter())
            .all(|(seen, expected)| seen.as_slice() == *expected)
}

fn resolve_reference(reference: &BytesRef) -> Result<String, ScrapeError> {
    let parse_error = |msg: String| ScrapeError::SitemapParse(msg);

    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|err| parse_error(err.to_string()))?
    {
        return Ok(ch.to_string());
    }

    let name = reference
        .decode()
        .map_err(|err| parse_error(err.to_string()))?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| parse_error(format!("unknown entity &{};", name)))
}
