//! Catalog query engine.
//!
//! One pure-function module for the filter/sort/presentation rules that
//! every catalog page shares, parameterized over the listing kind through
//! [`CatalogEntry`]. All operations are total: unknown categories and sort
//! keys degrade to empty results or identity order, never to errors.
//!
//! Composition contract: category filter, then search filter, then sort.
//! The two filters commute; sorting always comes last.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::models::{Category, Product, Project};

/// Parsed category query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Sentinel `"all"` (or an absent parameter): no filtering.
    All,
    /// One of the five known categories.
    Only(Category),
    /// Unrecognized id: matches nothing.
    Unknown,
}

impl CategoryFilter {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == "all" {
            return CategoryFilter::All;
        }
        match Category::from_str(raw) {
            Some(category) => CategoryFilter::Only(category),
            None => CategoryFilter::Unknown,
        }
    }
}

/// Sort key shared across listing kinds. Keys that do not apply to a kind
/// leave the order untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Popular,
    Funding,
    Deadline,
    Rating,
    PriceLow,
    PriceHigh,
    Newest,
}

impl SortKey {
    /// Unknown keys parse to `None`, which sorts as identity.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "popular" => Some(SortKey::Popular),
            "funding" => Some(SortKey::Funding),
            "deadline" => Some(SortKey::Deadline),
            "rating" => Some(SortKey::Rating),
            "price-low" => Some(SortKey::PriceLow),
            "price-high" => Some(SortKey::PriceHigh),
            "newest" => Some(SortKey::Newest),
            _ => None,
        }
    }
}

/// A listing the engine can filter and order.
pub trait CatalogEntry {
    fn category(&self) -> Category;

    /// Case-insensitive substring match against the kind's searched
    /// fields. `needle` is already lowercased and non-empty.
    fn matches_query(&self, needle: &str) -> bool;

    /// Relative order under `key`. Inapplicable keys return `Equal` so a
    /// stable sort preserves the input order.
    fn compare_by(&self, other: &Self, key: SortKey) -> Ordering;
}

impl CatalogEntry for Project {
    fn category(&self) -> Category {
        self.category
    }

    fn matches_query(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    fn compare_by(&self, other: &Self, key: SortKey) -> Ordering {
        match key {
            SortKey::Popular => other.creator.followers.cmp(&self.creator.followers),
            SortKey::Funding => other.current_funding.cmp(&self.current_funding),
            SortKey::Deadline => self.funding_period.end.cmp(&other.funding_period.end),
            SortKey::Newest => other.created_at.cmp(&self.created_at),
            _ => Ordering::Equal,
        }
    }
}

impl CatalogEntry for Product {
    fn category(&self) -> Category {
        self.category
    }

    fn matches_query(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }

    fn compare_by(&self, other: &Self, key: SortKey) -> Ordering {
        match key {
            SortKey::Popular => other.sales_count.cmp(&self.sales_count),
            SortKey::Rating => other
                .rating
                .partial_cmp(&self.rating)
                .unwrap_or(Ordering::Equal),
            SortKey::PriceLow => self.price.cmp(&other.price),
            SortKey::PriceHigh => other.price.cmp(&self.price),
            SortKey::Newest => other.created_at.cmp(&self.created_at),
            _ => Ordering::Equal,
        }
    }
}

/// Keep only listings in the selected category. `All` keeps everything,
/// `Unknown` keeps nothing.
pub fn filter_by_category<T: CatalogEntry>(mut items: Vec<T>, filter: CategoryFilter) -> Vec<T> {
    match filter {
        CategoryFilter::All => items,
        CategoryFilter::Only(category) => {
            items.retain(|item| item.category() == category);
            items
        }
        CategoryFilter::Unknown => Vec::new(),
    }
}

/// Keep only listings matching the free-text query. Empty and
/// whitespace-only queries match everything.
pub fn filter_by_search<T: CatalogEntry>(mut items: Vec<T>, query: &str) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items.retain(|item| item.matches_query(&needle));
    items
}

/// Stable sort under `key`; `None` (unknown key) is identity order.
pub fn sort_listings<T: CatalogEntry>(items: &mut [T], key: Option<SortKey>) {
    if let Some(key) = key {
        items.sort_by(|a, b| a.compare_by(b, key));
    }
}

/// Full query pipeline: category filter, search filter, sort.
pub fn apply_query<T: CatalogEntry>(
    items: Vec<T>,
    filter: CategoryFilter,
    query: &str,
    sort: Option<SortKey>,
) -> Vec<T> {
    let mut items = filter_by_search(filter_by_category(items, filter), query);
    sort_listings(&mut items, sort);
    items
}

/// Whole days remaining until `end`, rounded up and floored at zero. A
/// listing past its deadline reports 0, never a negative count.
pub fn days_left(end: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    const DAY_SECS: i64 = 24 * 60 * 60;
    let secs = (end - now).num_seconds();
    if secs <= 0 {
        0
    } else {
        (secs + DAY_SECS - 1) / DAY_SECS
    }
}

/// Discount badge percentage: `round((original − price) / original × 100)`.
/// Returns 0 unless `original > price` (no badge without a real discount).
pub fn discount_percentage(original: u64, price: u64) -> u32 {
    if original == 0 || price >= original {
        return 0;
    }
    let off = (original - price) as f64 / original as f64 * 100.0;
    off.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::models::{
        DeliveryMethod, FundingPeriod, ProductStatus, ProjectStatus, User, UserRole,
    };

    fn creator(id: &str, followers: u32) -> User {
        User {
            id: id.to_string(),
            name: format!("creator-{}", id),
            email: format!("{}@example.com", id),
            profile_image: None,
            role: UserRole::Creator,
            followers,
            following: 0,
            likes: 0,
        }
    }

    fn project(id: &str, title: &str, category: Category, followers: u32) -> Project {
        let day = chrono::Utc.with_ymd_and_hms(2024, 1, id.parse::<u32>().unwrap_or(1), 0, 0, 0);
        Project {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{} 설명", title),
            category,
            main_image: String::new(),
            images: Vec::new(),
            creator: creator(id, followers),
            current_funding: followers as u64 * 1000,
            funding_period: FundingPeriod {
                start: day.unwrap(),
                end: day.unwrap() + Duration::days(60),
            },
            rewards: Vec::new(),
            status: ProjectStatus::Active,
            created_at: day.unwrap(),
            updated_at: day.unwrap(),
        }
    }

    fn product(id: &str, title: &str, price: u64, sales: u32, tags: &[&str]) -> Product {
        Product {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{} 설명", title),
            category: Category::AppService,
            price,
            original_price: None,
            main_image: String::new(),
            images: Vec::new(),
            creator: creator(id, 0),
            rating: 4.5,
            review_count: 10,
            sales_count: sales,
            delivery_method: DeliveryMethod::File,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            status: ProductStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn category_filter_only_keeps_matches() {
        let items = vec![
            project("1", "AI 앱", Category::AppService, 10),
            project("2", "노션 템플릿", Category::NotionTemplate, 20),
            project("3", "자동화 도구", Category::AutomationTool, 30),
        ];
        let filtered =
            filter_by_category(items, CategoryFilter::parse("notion-template"));
        assert_eq!(filtered.len(), 1);
        assert!(filtered
            .iter()
            .all(|p| p.category() == Category::NotionTemplate));
    }

    #[test]
    fn category_filter_all_sentinel_is_identity() {
        let items = vec![
            project("1", "AI 앱", Category::AppService, 10),
            project("2", "노션 템플릿", Category::NotionTemplate, 20),
        ];
        let ids: Vec<String> = items.iter().map(|p| p.id.clone()).collect();
        let filtered = filter_by_category(items, CategoryFilter::parse("all"));
        assert_eq!(
            filtered.iter().map(|p| p.id.clone()).collect::<Vec<_>>(),
            ids
        );
    }

    #[test]
    fn category_filter_unknown_id_is_empty_not_an_error() {
        let items = vec![project("1", "AI 앱", Category::AppService, 10)];
        assert!(filter_by_category(items, CategoryFilter::parse("no-such-category")).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let items = vec![
            product("1", "AI Assistant App", 29000, 100, &["AI"]),
            product("2", "Design System", 35000, 50, &["UI/UX"]),
        ];
        let hits = filter_by_search(items, "assistant");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[test]
    fn search_covers_product_tags() {
        let items = vec![
            product("1", "디자인 시스템", 35000, 50, &["UI/UX", "컴포넌트"]),
            product("2", "노션 템플릿", 15000, 80, &["협업"]),
        ];
        let hits = filter_by_search(items, "컴포넌트");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[test]
    fn empty_query_matches_everything() {
        let items = vec![
            product("1", "a", 1, 1, &[]),
            product("2", "b", 2, 2, &[]),
        ];
        assert_eq!(filter_by_search(items, "   ").len(), 2);
    }

    #[test]
    fn project_sort_keys() {
        let mut items = vec![
            project("1", "low", Category::AppService, 10),
            project("2", "high", Category::AppService, 30),
            project("3", "mid", Category::AppService, 20),
        ];
        sort_listings(&mut items, SortKey::parse("popular"));
        let ids: Vec<&str> = items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);

        sort_listings(&mut items, SortKey::parse("deadline"));
        let ids: Vec<&str> = items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn product_price_sorts_both_directions() {
        let mut items = vec![
            product("1", "a", 45000, 1, &[]),
            product("2", "b", 15000, 2, &[]),
            product("3", "c", 29000, 3, &[]),
        ];
        sort_listings(&mut items, SortKey::parse("price-low"));
        let prices: Vec<u64> = items.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![15000, 29000, 45000]);

        sort_listings(&mut items, SortKey::parse("price-high"));
        let prices: Vec<u64> = items.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![45000, 29000, 15000]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut items = vec![
            product("1", "a", 29000, 100, &[]),
            product("2", "b", 29000, 100, &[]),
            product("3", "c", 29000, 100, &[]),
        ];
        sort_listings(&mut items, Some(SortKey::Popular));
        let ids: Vec<&str> = items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn unknown_sort_key_is_identity() {
        let mut items = vec![
            product("1", "a", 45000, 1, &[]),
            product("2", "b", 15000, 9, &[]),
        ];
        sort_listings(&mut items, SortKey::parse("unknown-key"));
        let ids: Vec<&str> = items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn rating_sort_key_does_not_apply_to_projects() {
        let mut items = vec![
            project("1", "first", Category::AppService, 10),
            project("2", "second", Category::AppService, 99),
        ];
        sort_listings(&mut items, Some(SortKey::Rating));
        let ids: Vec<&str> = items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn days_left_never_negative() {
        let end = Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();
        assert_eq!(days_left(end, end), 0);
        assert_eq!(days_left(end, end + Duration::days(10)), 0);
        assert_eq!(days_left(end, end - Duration::days(1)), 1);
        assert_eq!(days_left(end, end - Duration::seconds(1)), 1);
        assert_eq!(days_left(end, end - Duration::days(30)), 30);
    }

    #[test]
    fn discount_percentage_rounds() {
        assert_eq!(discount_percentage(49000, 29000), 41);
        assert_eq!(discount_percentage(69000, 45000), 35);
        // No badge without a real discount.
        assert_eq!(discount_percentage(29000, 29000), 0);
        assert_eq!(discount_percentage(29000, 49000), 0);
        assert_eq!(discount_percentage(0, 0), 0);
    }

    #[test]
    fn query_pipeline_filters_then_sorts() {
        let items = vec![
            product("1", "AI 비서 앱", 29000, 2340, &["AI"]),
            product("2", "노션 템플릿", 15000, 1200, &["노션"]),
            product("3", "AI 요약 도구", 45000, 890, &["AI"]),
        ];
        let result = apply_query(
            items,
            CategoryFilter::All,
            "ai",
            SortKey::parse("popular"),
        );
        let ids: Vec<&str> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
