use crate::utils::error::Result;
use url::Url;

const PSEUDO_LINK_SCHEME: &str = "javascript:";
const PSEUDO_LINK_VERB: &str = "view";

/// Turns listing-row hrefs into absolute detail-page URLs.
#[derive(Debug, Clone)]
pub struct DetailUrlResolver {
    base: Url,
    /// Listing URL up to its `list.do` suffix.
    view_prefix: String,
    menu_no: String,
}

impl DetailUrlResolver {
    pub fn new(listing_url: &str, default_menu_no: &str) -> Result<Self> {
        let base = Url::parse(listing_url)?;

        let menu_no = base
            .query_pairs()
            .find(|(key, value)| key == "menuNo" && !value.trim().is_empty())
            .map(|(_, value)| value.into_owned())
            .unwrap_or_else(|| default_menu_no.to_string());

        let view_prefix = match listing_url.find("list.do") {
            Some(idx) => listing_url[..idx].to_string(),
            None => listing_url.to_string(),
        };

        Ok(Self {
            base,
            view_prefix,
            menu_no,
        })
    }

    pub fn menu_no(&self) -> &str {
        &self.menu_no
    }

    pub fn resolve(&self, raw_href: &str) -> Result<String> {
        let href = raw_href.trim();

        if let Some(article_id) = pseudo_link_article_id(href) {
            return Ok(format!(
                "{}view.do?articleId={}&menuNo={}",
                self.view_prefix, article_id, self.menu_no
            ));
        }

        if has_http_scheme(href) {
            return Ok(href.to_string());
        }

        Ok(self.base.join(href)?.to_string())
    }
}

/// All ASCII digits of a `javascript:view(...)` href; `None` for other hrefs
/// and for pseudo-links without any digit.
fn pseudo_link_article_id(href: &str) -> Option<String> {
    let call = href.strip_prefix(PSEUDO_LINK_SCHEME)?.trim_start();
    if !call.starts_with(PSEUDO_LINK_VERB) {
        return None;
    }
    let digits: String = href.chars().filter(|c| c.is_ascii_digit()).collect();
    (!digits.is_empty()).then_some(digits)
}

fn has_http_scheme(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

pub fn resolve_detail_url(raw_href: &str, listing_url: &str, default_menu_no: &str) -> Result<String> {
    DetailUrlResolver::new(listing_url, default_menu_no)?.resolve(raw_href)
}
