//! Category enum and the static category metadata table.
//!
//! The category set is closed: exactly five categories exist, and each one
//! declares whether it offers a funding tab, a purchase tab, or both. All
//! pages read this single table instead of carrying their own copy.

use serde::{Deserialize, Serialize};

/// Product/project category. Serialized as the kebab-case ids used in URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    AppService,
    NotionTemplate,
    SlideProposal,
    AutomationTool,
    DesignResource,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::AppService,
        Category::NotionTemplate,
        Category::SlideProposal,
        Category::AutomationTool,
        Category::DesignResource,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AppService => "app-service",
            Category::NotionTemplate => "notion-template",
            Category::SlideProposal => "slide-proposal",
            Category::AutomationTool => "automation-tool",
            Category::DesignResource => "design-resource",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "app-service" => Some(Category::AppService),
            "notion-template" => Some(Category::NotionTemplate),
            "slide-proposal" => Some(Category::SlideProposal),
            "automation-tool" => Some(Category::AutomationTool),
            "design-resource" => Some(Category::DesignResource),
            _ => None,
        }
    }
}

/// Display metadata and tab support flags for one category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub id: Category,
    pub name: &'static str,
    pub icon: &'static str,
    pub has_funding: bool,
    pub has_purchase: bool,
}

/// The category configuration table.
pub const CATEGORY_TABLE: [CategoryInfo; 5] = [
    CategoryInfo {
        id: Category::AppService,
        name: "앱/서비스",
        icon: "📱",
        has_funding: true,
        has_purchase: true,
    },
    CategoryInfo {
        id: Category::NotionTemplate,
        name: "노션 템플릿",
        icon: "📝",
        has_funding: false,
        has_purchase: true,
    },
    CategoryInfo {
        id: Category::SlideProposal,
        name: "슬라이드/제안서",
        icon: "📊",
        has_funding: false,
        has_purchase: true,
    },
    CategoryInfo {
        id: Category::AutomationTool,
        name: "자동화툴",
        icon: "⚙️",
        has_funding: true,
        has_purchase: true,
    },
    CategoryInfo {
        id: Category::DesignResource,
        name: "디자인 리소스",
        icon: "🎨",
        has_funding: false,
        has_purchase: true,
    },
];

impl CategoryInfo {
    /// Look up the metadata for a raw category id. Unknown ids resolve to
    /// `None`, which the API layer renders as the not-found fallback.
    pub fn lookup(raw: &str) -> Option<&'static CategoryInfo> {
        let category = Category::from_str(raw)?;
        CATEGORY_TABLE.iter().find(|info| info.id == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_category_id() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()), Some(category));
        }
    }

    #[test]
    fn lookup_unknown_id_is_none() {
        assert!(CategoryInfo::lookup("unknown-id").is_none());
        assert!(CategoryInfo::lookup("").is_none());
    }

    #[test]
    fn funding_categories_match_the_table() {
        let funding: Vec<Category> = CATEGORY_TABLE
            .iter()
            .filter(|info| info.has_funding)
            .map(|info| info.id)
            .collect();
        assert_eq!(
            funding,
            vec![Category::AppService, Category::AutomationTool]
        );
        assert!(CATEGORY_TABLE.iter().all(|info| info.has_purchase));
    }
}
