//! Catalog filtering, search, and pagination.
//!
//! Operates purely over a product collection fetched once per session;
//! changing the category, search text, or page never triggers a network
//! request. This trades staleness of the full set against request-free
//! interaction.

use bazaar_core::{Category, CategoryId, Product, ProductId};

/// Ephemeral catalog view: the fetched collection plus the current query
/// (selected category, search text, 1-based page).
///
/// Query state is not persisted; a new browser starts at page 1 with no
/// filters.
#[derive(Debug, Clone)]
pub struct CatalogBrowser {
    products: Vec<Product>,
    categories: Vec<Category>,
    category: Option<CategoryId>,
    search: String,
    page: usize,
    page_size: usize,
}

impl CatalogBrowser {
    /// Create a browser over a fetched product collection.
    ///
    /// `page_size` is clamped to at least 1.
    #[must_use]
    pub fn new(products: Vec<Product>, categories: Vec<Category>, page_size: usize) -> Self {
        Self {
            products,
            categories,
            category: None,
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// All fetched categories, for rendering the filter bar.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a product from the fetched collection. Absent ids resolve to
    /// `None`, not an error.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// The currently selected category filter.
    #[must_use]
    pub const fn category(&self) -> Option<CategoryId> {
        self.category
    }

    /// The current search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// The current 1-based page number.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Select a category filter (or `None` for all). Resets to page 1.
    pub fn set_category(&mut self, category: Option<CategoryId>) {
        self.category = category;
        self.page = 1;
    }

    /// Set the search text. Resets to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Move to a page, clamped to `1..=total_pages`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    /// Products matching the current category and search filters, in catalog
    /// order.
    ///
    /// A product matches when no category is selected or its category id
    /// equals the selection, and when the search text is empty or its title
    /// contains the search text case-insensitively.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Product> {
        let needle = self.search.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                let matches_category = self.category.is_none_or(|c| p.category.id == c);
                let matches_search =
                    needle.is_empty() || p.title.to_lowercase().contains(&needle);
                matches_category && matches_search
            })
            .collect()
    }

    /// Number of pages for the current filtered result; at least 1 even when
    /// nothing matches.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size).max(1)
    }

    /// The slice of filtered products on the current page.
    #[must_use]
    pub fn page_items(&self) -> Vec<&Product> {
        self.filtered()
            .into_iter()
            .skip((self.page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            name: name.to_string(),
            image: String::new(),
        }
    }

    fn product(id: i64, title: &str, category_id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Decimal::TEN,
            description: String::new(),
            category: category(category_id, "Category"),
            images: vec![],
        }
    }

    fn numbered_products(n: i64) -> Vec<Product> {
        (1..=n).map(|i| product(i, &format!("Item {i}"), 1)).collect()
    }

    fn browser(products: Vec<Product>) -> CatalogBrowser {
        CatalogBrowser::new(products, vec![category(1, "Clothes")], 12)
    }

    #[test]
    fn test_total_pages_unfiltered() {
        // 30 products at 12 per page => 3 pages.
        let browser = browser(numbered_products(30));
        assert_eq!(browser.total_pages(), 3);
    }

    #[test]
    fn test_total_pages_minimum_one() {
        let browser = browser(vec![]);
        assert_eq!(browser.total_pages(), 1);
        assert!(browser.page_items().is_empty());
    }

    #[test]
    fn test_page_slicing() {
        let mut browser = browser(numbered_products(30));

        assert_eq!(browser.page_items().len(), 12);

        browser.set_page(3);
        let last_page = browser.page_items();
        assert_eq!(last_page.len(), 6);
        assert_eq!(last_page[0].id, ProductId::new(25));
    }

    #[test]
    fn test_set_page_clamps() {
        let mut browser = browser(numbered_products(30));

        browser.set_page(99);
        assert_eq!(browser.page(), 3);

        browser.set_page(0);
        assert_eq!(browser.page(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut browser = browser(vec![
            product(1, "Classic Red SHIRT", 1),
            product(2, "Blue shirt", 1),
            product(3, "Wool socks", 1),
        ]);

        browser.set_search("shirt");
        let titles: Vec<_> = browser.filtered().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Classic Red SHIRT", "Blue shirt"]);
    }

    #[test]
    fn test_search_change_resets_page() {
        let mut browser = browser(numbered_products(30));
        browser.set_page(3);

        browser.set_search("Item");
        assert_eq!(browser.page(), 1);
    }

    #[test]
    fn test_category_filter() {
        let mut browser = browser(vec![
            product(1, "Shirt", 1),
            product(2, "Lamp", 2),
            product(3, "Socks", 1),
        ]);

        browser.set_category(Some(CategoryId::new(1)));
        assert_eq!(browser.filtered().len(), 2);

        browser.set_category(None);
        assert_eq!(browser.filtered().len(), 3);
    }

    #[test]
    fn test_category_change_resets_page() {
        let mut browser = browser(numbered_products(30));
        browser.set_page(2);

        browser.set_category(Some(CategoryId::new(1)));
        assert_eq!(browser.page(), 1);
    }

    #[test]
    fn test_combined_filters() {
        let mut browser = browser(vec![
            product(1, "Red shirt", 1),
            product(2, "Blue shirt", 2),
            product(3, "Red socks", 1),
        ]);

        browser.set_category(Some(CategoryId::new(1)));
        browser.set_search("shirt");

        let filtered = browser.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, ProductId::new(1));
    }

    #[test]
    fn test_product_lookup_absent_is_none() {
        let browser = browser(numbered_products(3));
        assert!(browser.product(ProductId::new(2)).is_some());
        assert!(browser.product(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_zero_page_size_clamped() {
        let browser = CatalogBrowser::new(numbered_products(5), vec![], 0);
        assert_eq!(browser.page_items().len(), 1);
    }
}
