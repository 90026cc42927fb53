//! SIP and lumpsum investment page controllers.
//!
//! Both pages share one controller parameterised by [`InvestmentType`]; the
//! type is pinned into every query so a reset never widens the listing to the
//! other product.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use mockable::Clock;
use pagination::{ListEnvelope, PageRequest, MAX_PER_PAGE};
use tracing::{debug, info, warn};

use super::listing::{FetchOutcome, Listing, ListingFollowUp};
use super::sequence::Ticket;
use crate::domain::ports::{CustomerService, InvestmentService};
use crate::domain::{
    CUSTOMER_NAME_SORT, Customer, CustomerQuery, Investment, InvestmentFilter, InvestmentQuery,
    InvestmentStatus, InvestmentType,
};
use crate::view::grid::{DELETE_ACTION, EDIT_ACTION, VIEW_ACTION};
use crate::view::{
    Align, Cell, Column, ConfirmDialog, ConfirmOutcome, ConfirmRequest, DataGrid, DetailPanel,
    FormPanel, GridConfig, GridEvent, InvestmentFormSchema, Severity, Toaster, default_actions,
    format_date, format_inr, status_tone,
};

/// Customer `_id` to display name.
type NameBook = Arc<RwLock<BTreeMap<String, String>>>;

const DELETE_MESSAGE: &str =
    "Are you sure you want to delete this investment? This action cannot be undone.";

const fn label(investment_type: InvestmentType) -> &'static str {
    match investment_type {
        InvestmentType::Sip => "SIP",
        InvestmentType::Lumpsum => "Lumpsum",
    }
}

/// Shown when the grid has no rows.
pub const fn empty_message(investment_type: InvestmentType) -> &'static str {
    match investment_type {
        InvestmentType::Sip => "No SIP investments found",
        InvestmentType::Lumpsum => "No Lumpsum investments found",
    }
}

fn date_cell(value: Option<&serde_json::Value>, missing: &str) -> Cell {
    value
        .and_then(serde_json::Value::as_str)
        .and_then(|raw| raw.get(..10))
        .and_then(|day| chrono::NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map_or_else(|| Cell::text(missing), |date| Cell::text(format_date(date)))
}

/// Columns for `investment_type`, resolving customer names through `names`.
fn investment_columns(investment_type: InvestmentType, names: &NameBook) -> Vec<Column<Investment>> {
    let names = Arc::clone(names);
    let customer = Column::formatted(
        CUSTOMER_NAME_SORT,
        "Customer Name",
        move |_, row: &Investment| {
            let book = names.read().unwrap_or_else(PoisonError::into_inner);
            Cell::text(
                book.get(&row.customer_id)
                    .cloned()
                    .unwrap_or_else(|| row.customer_id.clone()),
            )
        },
    )
    .width(Some(180), None);
    let status = Column::formatted("status", "Status", |_, row: &Investment| {
        Cell::badge(row.status.as_str(), status_tone(row.status.as_str()))
    })
    .align(Align::Center)
    .width(Some(120), None);
    let created = Column::formatted("createdAt", "Created Date", |_, row: &Investment| {
        Cell::text(format_date(row.created_at.date_naive()))
    })
    .width(Some(150), None);
    let start = Column::formatted("startDate", "Start Date", |value, _: &Investment| {
        date_cell(value, "-")
    })
    .width(Some(120), None);

    match investment_type {
        InvestmentType::Sip => vec![
            Column::plain("investmentId", "Investment ID").width(Some(150), None),
            customer,
            Column::formatted("amount", "Monthly Amount", |_, row: &Investment| {
                Cell::text(format_inr(row.amount))
            })
            .align(Align::Right)
            .width(Some(150), None),
            start,
            Column::formatted("endDate", "End Date", |value, _: &Investment| date_cell(value, "-"))
                .width(Some(120), None),
            Column::plain("duration", "Duration (Months)")
                .align(Align::Right)
                .width(Some(150), None),
            Column::plain("frequency", "Frequency").width(Some(120), None),
            status,
            created,
        ],
        InvestmentType::Lumpsum => vec![
            Column::plain("investmentId", "Investment ID").width(Some(150), None),
            customer,
            Column::formatted("amount", "Amount", |_, row: &Investment| {
                Cell::text(format_inr(row.amount))
            })
            .align(Align::Right)
            .width(Some(150), None),
            start,
            status,
            created,
        ],
    }
}

/// Investment list of one product kind with detail, form, and delete gate.
pub struct InvestmentsPage {
    investment_type: InvestmentType,
    investments: Arc<dyn InvestmentService>,
    customers: Arc<dyn CustomerService>,
    names: NameBook,
    listing: Listing<Investment, InvestmentFilter>,
    search_text: String,
    detail: DetailPanel<Investment>,
    form: FormPanel<InvestmentFormSchema>,
    confirm: ConfirmDialog<Investment>,
    toaster: Toaster,
}

impl InvestmentsPage {
    /// Page for `investment_type` on the first page with no filters.
    pub fn new(
        investment_type: InvestmentType,
        investments: Arc<dyn InvestmentService>,
        customers: Arc<dyn CustomerService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let names = NameBook::default();
        let config = GridConfig::new(investment_columns(investment_type, &names), "_id")
            .actions(default_actions())
            .empty_state_message(empty_message(investment_type));
        let mut listing = Listing::new(config);
        listing.set_filter(InvestmentFilter::of_type(investment_type));
        Self {
            investment_type,
            investments,
            customers,
            names,
            listing,
            search_text: String::new(),
            detail: DetailPanel::new(),
            form: FormPanel::new(InvestmentFormSchema::new(investment_type)),
            confirm: ConfirmDialog::new(),
            toaster: Toaster::new(clock),
        }
    }

    /// Product kind shown.
    pub fn investment_type(&self) -> InvestmentType {
        self.investment_type
    }

    /// The grid.
    pub fn grid(&self) -> &DataGrid<Investment> {
        self.listing.grid()
    }

    /// Mutable grid, for selection and menus.
    pub fn grid_mut(&mut self) -> &mut DataGrid<Investment> {
        self.listing.grid_mut()
    }

    /// Active filter.
    pub fn filter(&self) -> &InvestmentFilter {
        self.listing.filter()
    }

    /// Detail panel.
    pub fn detail(&self) -> &DetailPanel<Investment> {
        &self.detail
    }

    /// Edit form.
    pub fn form(&self) -> &FormPanel<InvestmentFormSchema> {
        &self.form
    }

    /// Mutable edit form, for field input.
    pub fn form_mut(&mut self) -> &mut FormPanel<InvestmentFormSchema> {
        &mut self.form
    }

    /// Delete confirmation.
    pub fn confirm(&self) -> &ConfirmDialog<Investment> {
        &self.confirm
    }

    /// Toasts raised by this page.
    pub fn toaster_mut(&mut self) -> &mut Toaster {
        &mut self.toaster
    }

    /// Display name for a customer `_id`, once customers are loaded.
    pub fn customer_name(&self, id: &str) -> Option<String> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Load every customer for the name column and the form's owner select.
    pub async fn load_customers(&mut self) -> bool {
        let mut collected: Vec<Customer> = Vec::new();
        let mut request = match PageRequest::new(0, MAX_PER_PAGE) {
            Ok(request) => request,
            Err(error) => {
                warn!(%error, "customer page size rejected");
                return false;
            }
        };
        loop {
            let query = CustomerQuery::new(request, Default::default());
            let envelope = self.customers.list(&query).await;
            if !envelope.success {
                self.toaster.error(envelope.message);
                return false;
            }
            let fetched = envelope.data.len();
            let total = envelope.pagination.map_or(0, |info| info.total);
            collected.extend(envelope.data);
            if fetched == 0 || u64::try_from(collected.len()).unwrap_or(u64::MAX) >= total {
                break;
            }
            request = request.with_page(request.page() + 1);
        }
        debug!(count = collected.len(), "customer names loaded");
        self.set_customers(&collected);
        true
    }

    /// Replace the customer names and form choices.
    pub fn set_customers(&mut self, customers: &[Customer]) {
        {
            let mut book = self.names.write().unwrap_or_else(PoisonError::into_inner);
            book.clear();
            book.extend(
                customers
                    .iter()
                    .map(|customer| (customer.id.clone(), customer.full_name())),
            );
        }
        self.form.schema_mut().set_customers(customers);
    }

    /// Start a fetch for the current cursor and filter.
    pub fn begin_fetch(&mut self) -> (Ticket, InvestmentQuery) {
        let (ticket, mut query) = self.listing.begin_fetch();
        query.filter.investment_type = Some(self.investment_type);
        (ticket, query)
    }

    /// Apply a list response, raising a toast when it failed.
    pub fn apply_fetch(&mut self, ticket: Ticket, envelope: ListEnvelope<Investment>) -> FetchOutcome {
        let outcome = self.listing.apply_fetch(ticket, envelope);
        if let FetchOutcome::Failed(message) = &outcome {
            self.toaster.error(message.clone());
        }
        outcome
    }

    /// Fetch and apply the current page.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let (ticket, query) = self.begin_fetch();
        let envelope = self.investments.list(&query).await;
        self.apply_fetch(ticket, envelope)
    }

    /// Update the search box without fetching.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Commit the search box and fetch from the first page.
    pub async fn search(&mut self) -> FetchOutcome {
        let search = Some(self.search_text.trim().to_owned()).filter(|text| !text.is_empty());
        self.listing.update_filter(|filter| filter.search = search);
        self.refresh().await
    }

    /// Filter by status and fetch from the first page.
    pub async fn filter_by_status(&mut self, status: Option<InvestmentStatus>) -> FetchOutcome {
        self.listing.update_filter(|filter| filter.status = status);
        self.refresh().await
    }

    /// Restrict to one customer and fetch from the first page.
    pub async fn filter_by_customer(&mut self, customer_id: Option<String>) -> FetchOutcome {
        self.listing.update_filter(|filter| filter.customer_id = customer_id);
        self.refresh().await
    }

    /// Clear search and filters, then fetch the first page.
    pub async fn reset(&mut self) -> FetchOutcome {
        self.search_text.clear();
        self.listing.set_filter(InvestmentFilter::of_type(self.investment_type));
        self.refresh().await
    }

    /// React to a grid interaction.
    pub async fn handle(&mut self, event: GridEvent<Investment>) {
        match self.listing.handle(event) {
            ListingFollowUp::Refetch => {
                self.refresh().await;
            }
            ListingFollowUp::Activated(investment) => self.view(&investment.id).await,
            ListingFollowUp::Action { action, row } => match action.as_str() {
                VIEW_ACTION => self.view(&row.id).await,
                EDIT_ACTION => self.open_edit(&row),
                DELETE_ACTION => self.request_delete(row),
                other => debug!(action = other, "unhandled investment action"),
            },
            ListingFollowUp::Nothing => {}
        }
    }

    /// Open the detail panel and load `id` into it.
    pub async fn view(&mut self, id: &str) {
        self.detail.begin_loading();
        match self.investments.get(id).await.into_result() {
            Ok(investment) => self.detail.show(investment),
            Err(message) => {
                self.detail.show(None);
                self.toaster.error(message);
            }
        }
    }

    /// Hide the detail panel.
    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    /// Ask before deleting `investment`.
    pub fn request_delete(&mut self, investment: Investment) {
        let request = ConfirmRequest::new("Delete Investment", DELETE_MESSAGE)
            .severity(Severity::Error)
            .buttons("Delete", "Cancel");
        self.confirm.open(request, investment);
    }

    /// Dismiss the delete prompt.
    pub fn cancel_delete(&mut self) {
        self.confirm.cancel();
    }

    /// Delete the pending investment; the prompt stays open on failure.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(ConfirmOutcome::Confirmed(investment)) = self.confirm.confirm() else {
            return false;
        };
        let envelope = self.investments.delete(&investment.id).await;
        if envelope.success {
            info!(id = %investment.id, kind = label(self.investment_type), "investment deleted");
            self.toaster.success(envelope.message);
            self.confirm.close();
            self.refresh().await;
            true
        } else {
            self.toaster.error(envelope.message);
            false
        }
    }

    /// Open the form for a new investment.
    pub fn open_create(&mut self) {
        self.form.open_create();
    }

    /// Open the form prefilled from `investment`.
    pub fn open_edit(&mut self, investment: &Investment) {
        self.form.open_edit(investment);
    }

    /// Hide the form.
    pub fn close_form(&mut self) {
        self.form.close();
    }

    /// Validate and persist the form; returns whether it was saved.
    pub async fn submit_form(&mut self) -> bool {
        let Ok(submission) = self.form.submit() else {
            return false;
        };
        self.form.set_submitting(true);
        let envelope = match &submission.id {
            Some(id) => self.investments.update(id, &submission.payload).await,
            None => self.investments.create(&submission.payload).await,
        };
        self.form.set_submitting(false);
        if envelope.success {
            self.toaster.success(envelope.message);
            self.form.close();
            self.refresh().await;
            true
        } else {
            self.toaster.error(envelope.message);
            false
        }
    }
}
