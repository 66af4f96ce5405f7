//! `Content-Type` header inspection

/// Extracts the media type from a `Content-Type` value
///
/// Parameters (`; charset=UTF-8`) are dropped and the result is lowercased.
/// Returns None when nothing that looks like `type/subtype` remains.
///
/// # Examples
///
/// ```
/// use spider_sitemap::resource::media_type;
///
/// assert_eq!(media_type("Text/XML; charset=UTF-8").as_deref(), Some("text/xml"));
/// assert_eq!(media_type("  "), None);
/// ```
pub fn media_type(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim();

    let (kind, subtype) = essence.split_once('/')?;
    if kind.trim().is_empty() || subtype.trim().is_empty() {
        return None;
    }

    Some(essence.to_ascii_lowercase())
}

/// Returns true for `text/xml`, `application/xml` and any `+xml` suffix type
pub fn is_xml_media_type(content_type: &str) -> bool {
    match media_type(content_type) {
        Some(media) => media == "text/xml" || media == "application/xml" || media.ends_with("+xml"),
        None => false,
    }
}

/// Returns true for `text/html` and `application/xhtml+xml`
pub fn is_html_media_type(content_type: &str) -> bool {
    matches!(
        media_type(content_type).as_deref(),
        Some("text/html") | Some("application/xhtml+xml")
    )
}
