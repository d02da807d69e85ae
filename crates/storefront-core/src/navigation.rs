//! Page and category state carried in the navigable location.
//!
//! The `page` and `category` query parameters are the only source of truth
//! for what a listing request shows. [`ListingQuery`] parses them leniently
//! and writes them back so links round-trip. [`ListingNavigation`] is the
//! control state a listing page renders from.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::products::Listing;

/// Sentinel category value meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Label of the unfiltered option in the category control.
pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

/// Category selection for a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive category value.
    Only(String),
}

impl CategoryFilter {
    /// Missing, empty, and the literal `"all"` all select every category.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            None | Some("" | ALL_CATEGORIES) => Self::All,
            Some(value) => Self::Only(value.to_owned()),
        }
    }

    /// The category to filter the backend query by, if any.
    #[must_use]
    pub fn as_filter(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }

    /// Value used by the filter control (`"all"` for no filter).
    #[must_use]
    pub fn as_param(&self) -> &str {
        self.as_filter().unwrap_or(ALL_CATEGORIES)
    }
}

/// Listing state decoded from the `page` and `category` query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// 1-based page number.
    pub page: u32,
    pub category: CategoryFilter,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: 1,
            category: CategoryFilter::All,
        }
    }
}

impl ListingQuery {
    #[must_use]
    pub fn from_params(page: Option<&str>, category: Option<&str>) -> Self {
        Self {
            page: parse_page(page),
            category: CategoryFilter::from_param(category),
        }
    }

    /// Query pairs that encode this state. `category` is omitted for the
    /// unfiltered listing.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string())];
        if let Some(category) = self.category.as_filter() {
            pairs.push(("category", category.to_owned()));
        }
        pairs
    }

    /// Moves to `page`, keeping the current category.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            category: self.category.clone(),
        }
    }

    /// Switches category and returns to the first page.
    #[must_use]
    pub fn with_category(&self, category: CategoryFilter) -> Self {
        Self { page: 1, category }
    }

    /// Zero-based offset of the first entry on this page.
    #[must_use]
    pub fn offset(&self, page_size: u32) -> u32 {
        self.page.saturating_sub(1).saturating_mul(page_size)
    }
}

/// Reads the leading base-10 digits of `raw`; anything unusable means page 1.
fn parse_page(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else { return 1 };
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    match digits.parse::<u32>() {
        Ok(page) if page >= 1 => page,
        _ => 1,
    }
}

/// Previous/next controls for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub total_pages: u64,
}

impl Pager {
    #[must_use]
    pub fn new(page: u32, total_pages: u64) -> Self {
        Self { page, total_pages }
    }

    /// The pager is only drawn when there is more than one page.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.total_pages > 1
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }

    #[must_use]
    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.page - 1)
    }

    #[must_use]
    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }
}

/// Display label for a category: first character uppercased. The value
/// itself stays untouched for filtering.
#[must_use]
pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turns a protocol-relative CMS asset URL into an absolute `https:` one.
#[must_use]
pub fn absolute_image_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_owned()
    }
}

/// Query parameters of a listing link, keyed by parameter name.
pub type LinkQuery = BTreeMap<&'static str, String>;

fn link_query(query: &ListingQuery) -> LinkQuery {
    query.to_query_pairs().into_iter().collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagerLinks {
    pub visible: bool,
    pub previous: Option<LinkQuery>,
    pub next: Option<LinkQuery>,
}

/// One entry of the category control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
    /// First page of this category.
    pub query: LinkQuery,
}

/// Absolute primary image of one listed product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: String,
    pub url: Option<String>,
}

/// Pager, category control and card images for one rendered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingNavigation {
    pub pager: PagerLinks,
    pub categories: Vec<CategoryOption>,
    pub images: Vec<ProductImage>,
}

impl ListingNavigation {
    /// Builds the controls for `listing`, which was served for `query`.
    ///
    /// Page links use the listing's own page, so a failed listing (reset to
    /// page 1) never links past it.
    #[must_use]
    pub fn new(query: &ListingQuery, listing: &Listing) -> Self {
        let current = query.with_page(listing.page);
        let pager = Pager::new(listing.page, listing.total_pages);
        let link_to = |page: u32| link_query(&current.with_page(page));

        let option = |filter: CategoryFilter, label: String| CategoryOption {
            value: filter.as_param().to_owned(),
            selected: filter == current.category,
            query: link_query(&current.with_category(filter.clone())),
            label,
        };
        let mut categories = vec![option(CategoryFilter::All, ALL_CATEGORIES_LABEL.to_owned())];
        categories.extend(listing.categories.iter().map(|category| {
            option(
                CategoryFilter::Only(category.clone()),
                category_label(category),
            )
        }));

        let images = listing
            .products
            .iter()
            .map(|product| ProductImage {
                id: product.id.clone(),
                url: product.image.as_deref().map(absolute_image_url),
            })
            .collect();

        Self {
            pager: PagerLinks {
                visible: pager.visible(),
                previous: pager.previous().map(link_to),
                next: pager.next().map(link_to),
            },
            categories,
            images,
        }
    }
}
