//! Title and subtitle suggestions derived from a website address.
//!
//! Nothing is fetched; the text comes from the host name alone.

use url::Url;

use crate::error::EditorError;

/// Text derived from a website URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlStub {
    /// Host name without a leading `www.`.
    pub domain: String,
    pub title: String,
    pub subtitle: String,
}

/// Derives a title and subtitle from an `http` or `https` URL.
///
/// `https://www.my-site.example.com` becomes the title
/// `My Site Example Com | Official OG Image`.
pub fn derive(input: &str) -> Result<UrlStub, EditorError> {
    let invalid = || EditorError::InvalidUrl(input.to_string());

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let url = Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    let host = url.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
    let domain = host.strip_prefix("www.").unwrap_or(host).to_string();

    let words: Vec<String> = domain.split(['.', '-']).map(capitalize).collect();
    Ok(UrlStub {
        title: format!("{} | Official OG Image", words.join(" ")),
        subtitle: format!(
            "Share the best content from {domain} with our custom social previews"
        ),
        domain,
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
