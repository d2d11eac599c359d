//! The single owner of dashboard state.

use std::sync::Arc;

use crate::{
    config::DashboardConfig,
    dashboard::view::{DashboardSnapshot, DashboardState, DashboardViewModel, build_view_model},
    fetch::{FetchState, LatestWins, RequestTicket},
    filter::{FilterState, filter_products},
    pagination::PageSize,
};

/// What the dashboard shows right now.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// No data has arrived yet.
    Loading,
    /// The derived view-models.
    Ready(Arc<DashboardViewModel>),
}

#[derive(Debug)]
struct CachedView {
    ticket: RequestTicket,
    state: DashboardState,
    view: Arc<DashboardViewModel>,
}

/// Holds the fetched snapshot, the filter and pagination state and the most
/// recently derived view.
///
/// Every state change goes through `&mut self`, so there is a single writer.
/// The view is only rebuilt when the data or the state has changed since the
/// last call to [DashboardStore::view].
#[derive(Debug)]
pub struct DashboardStore {
    config: DashboardConfig,
    data: LatestWins<Arc<DashboardSnapshot>>,
    state: DashboardState,
    cache: Option<CachedView>,
}

impl DashboardStore {
    /// Create a store with no data and the default filter.
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: DashboardState::new(&config),
            config,
            data: LatestWins::new(),
            cache: None,
        }
    }

    /// The config the store was created with.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The current filter and pagination state.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// The current filter.
    pub fn filter(&self) -> &FilterState {
        &self.state.filter
    }

    /// Start a fetch. Pass the returned ticket back with the result.
    pub fn begin_fetch(&mut self) -> RequestTicket {
        self.data.begin()
    }

    /// Accept `snapshot` as the result of the fetch for `ticket`.
    ///
    /// Returns `false` if the fetch has been superseded.
    pub fn receive(&mut self, ticket: RequestTicket, snapshot: DashboardSnapshot) -> bool {
        let counts = (
            snapshot.expenses.len(),
            snapshot.products.len(),
            snapshot.sales.len(),
            snapshot.purchases.len(),
        );

        if !self.data.resolve(ticket, Arc::new(snapshot)) {
            return false;
        }

        tracing::info!(
            "Received snapshot #{} with {} expenses, {} products, {} sales points and {} purchase points",
            ticket.sequence(),
            counts.0,
            counts.1,
            counts.2,
            counts.3
        );
        self.clamp_pages();
        true
    }

    /// Record that the fetch for `ticket` failed.
    ///
    /// Returns `false` if the fetch has been superseded.
    pub fn receive_error(&mut self, ticket: RequestTicket) -> bool {
        if !self.data.fail(ticket) {
            return false;
        }

        tracing::warn!("Fetch #{} failed, showing an empty dashboard", ticket.sequence());
        self.clamp_pages();
        true
    }

    /// Replace the filter. Both product lists stay on a page that exists for
    /// the new search results.
    pub fn set_filter(&mut self, filter: FilterState) {
        self.state.filter = filter;
        self.clamp_pages();
    }

    /// Go to `page` of the product cards, clamped to the pages available.
    pub fn set_catalog_page(&mut self, page: i64) {
        let item_count = self.matching_product_count();
        self.state.catalog_page.set_page(page, item_count);
    }

    /// Change the number of product cards per page and go back to the first page.
    pub fn set_catalog_page_size(&mut self, page_size: PageSize) {
        self.state.catalog_page.set_page_size(page_size);
    }

    /// Go to `page` of the inventory grid, clamped to the pages available.
    pub fn set_inventory_page(&mut self, page: i64) {
        let item_count = self.matching_product_count();
        self.state.inventory_page.set_page(page, item_count);
    }

    /// Change the number of inventory rows per page and go back to the first page.
    pub fn set_inventory_page_size(&mut self, page_size: PageSize) {
        self.state.inventory_page.set_page_size(page_size);
    }

    /// The view for the current data and state.
    ///
    /// Repeated calls without an intervening change return the same
    /// [Arc] without deriving the view again.
    pub fn view(&mut self) -> DashboardView {
        let Some(ticket) = self.data.settled() else {
            return DashboardView::Loading;
        };

        let cached = self
            .cache
            .as_ref()
            .filter(|cached| cached.ticket == ticket && cached.state == self.state);

        if let Some(cached) = cached {
            tracing::debug!("Reusing dashboard view for fetch #{}", ticket.sequence());
            return DashboardView::Ready(Arc::clone(&cached.view));
        }

        tracing::debug!("Deriving dashboard view for fetch #{}", ticket.sequence());
        let view = Arc::new(match self.data.state() {
            FetchState::Ready(snapshot) => build_view_model(snapshot, &self.state, &self.config),
            FetchState::Failed | FetchState::Loading => DashboardViewModel {
                failed: true,
                ..build_view_model(&DashboardSnapshot::default(), &self.state, &self.config)
            },
        });

        self.cache = Some(CachedView {
            ticket,
            state: self.state.clone(),
            view: Arc::clone(&view),
        });

        DashboardView::Ready(view)
    }

    fn matching_product_count(&self) -> usize {
        match self.data.state().ready() {
            Some(snapshot) => {
                filter_products(&snapshot.products, &self.state.filter.search_term).len()
            }
            None => 0,
        }
    }

    fn clamp_pages(&mut self) {
        let item_count = self.matching_product_count();
        self.state.catalog_page.clamp_to(item_count);
        self.state.inventory_page.clamp_to(item_count);
    }
}
