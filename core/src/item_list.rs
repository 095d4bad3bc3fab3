//! Admin item list: presentation state plus its handlers.
//!
//! # Design
//! The view never performs I/O. Each handler mutates local state and returns
//! the `ViewEffect`s the host has to carry out: execute a request, navigate,
//! or show a blocking alert. Responses are fed back through `apply_*`.
//!
//! There is no request sequencing. If the host runs two fetches concurrently
//! and applies their responses out of order, the response applied last wins,
//! even when it belongs to the older request.
//!
//! The offset counts pages from one: offsets `0` and `1` both load the first
//! page, and a paged fetch asks for `pageNo = max(offset - 1, 0)`.

use std::fmt;
use std::str::FromStr;

use crate::client::GroceteriaClient;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::{ApiError, ParseCategoryError};
use crate::http::{HttpRequest, HttpResponse};
use crate::route::Route;
use crate::session::{KeyValueStore, Session};
use crate::types::{Category, Item, ItemPage};

/// Selector value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "100";

pub const DELETE_CONFIRMATION: &str = "Item deleted Successfully";

/// Which items the view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every item, unpaged.
    All,
    /// One category, paged.
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_CATEGORIES {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

/// Something the host must do on the view's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEffect {
    /// Execute the request and pass the response to the matching `apply_*`.
    Fetch(HttpRequest),
    Navigate(Route),
    /// Show a blocking acknowledgement dialog.
    Alert(String),
}

#[derive(Debug, Clone)]
pub struct ItemListView {
    client: GroceteriaClient,
    category: CategoryFilter,
    offset: u32,
    page_size: u32,
    total_items: u64,
    items: Vec<Item>,
}

impl ItemListView {
    pub fn new(client: GroceteriaClient) -> Self {
        Self::with_page_size(client, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(client: GroceteriaClient, page_size: u32) -> Self {
        Self {
            client,
            category: CategoryFilter::All,
            offset: 0,
            page_size: page_size.max(1),
            total_items: 1,
            items: Vec::new(),
        }
    }

    /// Entry effects: a login redirect when no admin is signed in, then the
    /// initial all-items fetch. The fetch is issued either way.
    pub fn open<S: KeyValueStore>(&self, session: &Session<S>) -> Vec<ViewEffect> {
        let mut effects = Vec::with_capacity(2);
        if let Some(route) = session.is_admin_login_present() {
            effects.push(ViewEffect::Navigate(route));
        }
        effects.push(self.fetch());
        effects
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn categories(&self) -> &'static [Category] {
        self.client.categories()
    }

    /// Zero-based page number a paged fetch asks for.
    pub fn page_no(&self) -> u32 {
        self.offset.saturating_sub(1)
    }

    pub fn page_count(&self) -> u64 {
        self.total_items.div_ceil(u64::from(self.page_size))
    }

    /// The request for the current filter and offset.
    pub fn fetch_request(&self) -> HttpRequest {
        match self.category {
            CategoryFilter::All => self.client.build_list_items(),
            CategoryFilter::Only(category) => self.client.build_list_items_by_category_paged(
                category,
                self.page_no(),
                self.page_size,
            ),
        }
    }

    /// Mirror a list response into the view. Any array replaces the list,
    /// even when some items carry attributes this client does not know.
    /// Unrecognized shapes and errors leave the current state untouched.
    pub fn apply_list_response(&mut self, response: HttpResponse) -> Result<(), ApiError> {
        let page = self.client.parse_item_page(response).inspect_err(|e| {
            tracing::error!(error = %e, "failed to load item list");
        })?;
        match page {
            ItemPage::Bare(items) => {
                self.total_items = items.len() as u64;
                self.items = items;
            }
            ItemPage::Envelope(envelope) => {
                self.total_items = envelope.total();
                self.items = envelope.content;
            }
            ItemPage::Unrecognized(_) => {
                tracing::warn!(
                    "item list response had an unrecognized shape; keeping current list"
                );
            }
        }
        Ok(())
    }

    pub fn select_category(&mut self, category: CategoryFilter) -> ViewEffect {
        self.category = category;
        self.offset = 0;
        self.total_items = 1;
        self.fetch()
    }

    pub fn first_page(&mut self) -> ViewEffect {
        self.offset = 0;
        self.fetch()
    }

    pub fn previous_page(&mut self) -> ViewEffect {
        self.offset = self.offset.saturating_sub(1);
        self.fetch()
    }

    /// `page_offset` is the offset the control targets, normally
    /// `offset() + 1`.
    pub fn next_page(&mut self, page_offset: u32) -> ViewEffect {
        self.offset = page_offset;
        self.fetch()
    }

    /// Jumps to offset `ceil(total / page_size)`, which with one-based
    /// offsets is the last page.
    pub fn last_page(&mut self) -> ViewEffect {
        self.offset = u32::try_from(self.page_count()).unwrap_or(u32::MAX);
        self.fetch()
    }

    pub fn delete_item(&self, item_id: u64) -> ViewEffect {
        ViewEffect::Fetch(self.client.build_delete_item(item_id))
    }

    /// On success the host gets a confirmation alert followed by a refetch
    /// of the whole list for the current filter.
    pub fn apply_delete_response(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<ViewEffect>, ApiError> {
        self.client.parse_delete_item(response).inspect_err(|e| {
            tracing::error!(error = %e, "failed to delete item");
        })?;
        Ok(vec![
            ViewEffect::Alert(DELETE_CONFIRMATION.to_string()),
            self.fetch(),
        ])
    }

    /// Items without an id cannot be edited and produce no effect.
    pub fn edit_item(&self, item: &Item) -> Option<ViewEffect> {
        item.item_id
            .map(|id| ViewEffect::Navigate(Route::AdminAddItem { id }))
    }

    fn fetch(&self) -> ViewEffect {
        ViewEffect::Fetch(self.fetch_request())
    }
}
