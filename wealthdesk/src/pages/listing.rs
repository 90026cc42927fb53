//! Grid, paging cursor, and filter shared by every list page.

use pagination::{ListEnvelope, PageInfo, PageRequest};
use serde::Serialize;
use tracing::{debug, warn};

use super::sequence::{RequestSequencer, Ticket};
use crate::domain::ListQuery;
use crate::view::{DataGrid, GridConfig, GridEvent};

/// Result of handing a list response to [`Listing::apply_fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The rows are on screen.
    Applied,
    /// The service reported failure; the previous rows stay.
    Failed(String),
    /// A newer fetch was issued; the response was dropped.
    Stale,
}

/// What a grid interaction asks the owning page to do next.
#[derive(Debug, Clone)]
pub enum ListingFollowUp<T> {
    /// Paging or sort changed; fetch again.
    Refetch,
    /// A row was clicked.
    Activated(T),
    /// A row action was chosen.
    Action {
        /// Action id.
        action: String,
        /// Row the menu was opened on.
        row: T,
    },
    /// Nothing further.
    Nothing,
}

/// Page state behind a grid: cursor, filter, and fetch ordering.
pub struct Listing<T, F> {
    grid: DataGrid<T>,
    page: PageRequest,
    filter: F,
    sequencer: RequestSequencer,
}

impl<T, F> Listing<T, F>
where
    T: Serialize + Clone,
    F: Clone + Default,
{
    /// Listing on the first page with an empty filter.
    pub fn new(config: GridConfig<T>) -> Self {
        Self {
            grid: DataGrid::new(config),
            page: PageRequest::default(),
            filter: F::default(),
            sequencer: RequestSequencer::new(),
        }
    }

    /// The grid.
    pub fn grid(&self) -> &DataGrid<T> {
        &self.grid
    }

    /// Mutable grid, for selection and menu interactions.
    pub fn grid_mut(&mut self) -> &mut DataGrid<T> {
        &mut self.grid
    }

    /// Current paging cursor.
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Current filter.
    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Replace the filter and go back to the first page.
    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
        self.page = self.page.with_page(0);
    }

    /// Edit the filter in place and go back to the first page.
    pub fn update_filter(&mut self, edit: impl FnOnce(&mut F)) {
        edit(&mut self.filter);
        self.page = self.page.with_page(0);
    }

    /// Clear the filter and return to the first page.
    pub fn reset(&mut self) {
        self.set_filter(F::default());
    }

    /// Query the next fetch should send.
    pub fn query(&self) -> ListQuery<F> {
        ListQuery::new(self.page, self.filter.clone())
            .with_sort(self.grid.sort().and_then(|sort| sort.to_sort()))
    }

    /// Mark a fetch as started and return its ticket and query.
    pub fn begin_fetch(&mut self) -> (Ticket, ListQuery<F>) {
        self.grid.set_loading(true);
        (self.sequencer.issue(), self.query())
    }

    /// Apply a list response if `ticket` is still the newest fetch.
    pub fn apply_fetch(&mut self, ticket: Ticket, envelope: ListEnvelope<T>) -> FetchOutcome {
        if !self.sequencer.is_current(ticket) {
            debug!(?ticket, "discarding stale list response");
            return FetchOutcome::Stale;
        }
        self.grid.set_loading(false);
        if !envelope.success {
            return FetchOutcome::Failed(envelope.message);
        }
        let pagination = envelope.pagination.unwrap_or_else(|| {
            PageInfo::new(self.page, u64::try_from(envelope.data.len()).unwrap_or(u64::MAX))
        });
        self.grid.set_pagination(Some(pagination));
        self.grid.set_data(envelope.data);
        FetchOutcome::Applied
    }

    /// Fold a grid event into the cursor and say what follows.
    pub fn handle(&mut self, event: GridEvent<T>) -> ListingFollowUp<T> {
        match event {
            GridEvent::PageRequested(page) => {
                self.page = self.page.with_page(page);
                ListingFollowUp::Refetch
            }
            GridEvent::RowsPerPageRequested(per_page) => match PageRequest::new(0, per_page) {
                Ok(page) => {
                    self.page = page;
                    ListingFollowUp::Refetch
                }
                Err(err) => {
                    warn!(per_page, error = %err, "ignoring page size");
                    ListingFollowUp::Nothing
                }
            },
            GridEvent::SortChanged(_) => {
                self.page = self.page.with_page(0);
                ListingFollowUp::Refetch
            }
            GridEvent::RowActivated(row) => ListingFollowUp::Activated(row),
            GridEvent::ActionInvoked { action, row } => ListingFollowUp::Action { action, row },
        }
    }
}

#[cfg(test)]
mod tests {
    use pagination::{Page, SortDirection, paginate};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::view::Column;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Row {
        id: u32,
        name: String,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Filter {
        search: Option<String>,
    }

    fn rows(names: &[&str]) -> Vec<Row> {
        names
            .iter()
            .zip(1..)
            .map(|(name, id)| Row {
                id,
                name: (*name).to_owned(),
            })
            .collect()
    }

    fn page_of(names: &[&str]) -> ListEnvelope<Row> {
        let all = rows(names);
        let page: Page<Row> = paginate(all, PageRequest::default());
        ListEnvelope::from_page("ok", page)
    }

    #[fixture]
    fn listing() -> Listing<Row, Filter> {
        Listing::new(GridConfig::new(vec![Column::plain("name", "Name")], "id"))
    }

    #[rstest]
    fn stale_response_never_overwrites_newer(mut listing: Listing<Row, Filter>) {
        let (older, _) = listing.begin_fetch();
        let (newer, _) = listing.begin_fetch();

        assert_eq!(listing.apply_fetch(newer, page_of(&["Asha"])), FetchOutcome::Applied);
        assert_eq!(listing.apply_fetch(older, page_of(&["Old", "Data"])), FetchOutcome::Stale);
        assert_eq!(listing.grid().data(), rows(&["Asha"]).as_slice());
        assert!(!listing.grid().is_loading());
    }

    #[rstest]
    fn stale_response_keeps_loading_until_newest_arrives(mut listing: Listing<Row, Filter>) {
        let (older, _) = listing.begin_fetch();
        let _newer = listing.begin_fetch();
        listing.apply_fetch(older, page_of(&["Old"]));
        assert!(listing.grid().is_loading());
    }

    #[rstest]
    fn failure_keeps_previous_rows(mut listing: Listing<Row, Filter>) {
        let (first, _) = listing.begin_fetch();
        listing.apply_fetch(first, page_of(&["Asha"]));
        let (second, _) = listing.begin_fetch();
        let outcome = listing.apply_fetch(second, ListEnvelope::failure("Failed to fetch customers"));
        assert_eq!(outcome, FetchOutcome::Failed("Failed to fetch customers".into()));
        assert_eq!(listing.grid().data().len(), 1);
    }

    #[rstest]
    fn sort_and_size_changes_return_to_first_page(mut listing: Listing<Row, Filter>) {
        listing.handle(GridEvent::PageRequested(3));
        assert_eq!(listing.page().page(), 3);

        let event = listing.grid_mut().click_header("name").expect("sortable");
        assert!(matches!(listing.handle(event), ListingFollowUp::Refetch));
        assert_eq!(listing.page().page(), 0);
        let query = listing.query();
        assert_eq!(query.sort.map(|sort| sort.direction()), Some(SortDirection::Asc));

        listing.handle(GridEvent::PageRequested(2));
        listing.handle(GridEvent::RowsPerPageRequested(25));
        assert_eq!(listing.page(), PageRequest::new(0, 25).expect("valid"));
    }

    #[rstest]
    fn filter_edits_reset_the_cursor(mut listing: Listing<Row, Filter>) {
        listing.handle(GridEvent::PageRequested(4));
        listing.update_filter(|filter| filter.search = Some("asha".into()));
        assert_eq!(listing.page().page(), 0);
        assert_eq!(listing.query().filter.search.as_deref(), Some("asha"));
    }
}
