//! Pre-parse check for sitemap resources

use crate::resource::Resource;

/// Path suffix that marks a sitemap document
const SITEMAP_SUFFIX: &str = "sitemap.xml";

/// Returns true if the request path ends with `sitemap.xml`
///
/// The match is case-sensitive and runs against the whole path, so
/// `/sitemap.xml`, `/news-sitemap.xml` and `/a/b/sitemap.xml` all match.
pub fn is_sitemap_path(path: &str) -> bool {
    path.ends_with(SITEMAP_SUFFIX)
}

/// Decides whether the sitemap parser should be offered a resource
///
/// An absent resource is never a candidate. Whether another parser already
/// handled the resource does not matter: a `sitemap.xml` path is reason
/// enough to try.
pub fn is_sitemap_resource(
    resource: Option<&Resource>,
    path: &str,
    _already_handled: bool,
) -> bool {
    resource.is_some() && is_sitemap_path(path)
}
