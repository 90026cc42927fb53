//! Customers page controller.

use std::sync::Arc;

use mockable::Clock;
use pagination::{Envelope, ListEnvelope};
use tracing::{debug, info};

use super::listing::{FetchOutcome, Listing, ListingFollowUp};
use super::sequence::Ticket;
use crate::domain::ports::{CustomerService, DropdownService};
use crate::domain::{
    Customer, CustomerFilter, CustomerQuery, CustomerStatus, DropdownCatalogue, Gender,
};
use crate::view::grid::{DELETE_ACTION, EDIT_ACTION, VIEW_ACTION};
use crate::view::{
    Align, Cell, Column, ConfirmDialog, ConfirmOutcome, ConfirmRequest, CustomerFormSchema,
    DataGrid, DetailPanel, FormPanel, GridConfig, GridEvent, NOT_AVAILABLE, Severity, Toaster,
    default_actions, format_date, status_tone,
};

/// Shown when the grid has no rows.
pub const CUSTOMERS_EMPTY_MESSAGE: &str =
    "No customers found. Try adjusting your filters or adding a new customer.";

const DETAIL_FAILED: &str = "Failed to fetch customer details";

/// Columns of the customers grid.
pub fn customer_columns() -> Vec<Column<Customer>> {
    vec![
        // Sorts on the fixed-width code; `_id` counters are not zero-padded.
        Column::formatted("customerCode", "Customer ID", |_, row: &Customer| {
            let id = row.id.as_str();
            if id.chars().count() > 8 {
                Cell::text(format!("{}...", id.chars().take(8).collect::<String>()))
            } else {
                Cell::text(id)
            }
        })
        .width(Some(120), None),
        Column::composite("firstName", "Name", |row: &Customer| Cell::text(row.full_name()))
            .width(Some(170), None),
        Column::plain("email", "Email").width(Some(200), None),
        Column::plain("mobile", "Mobile Number").width(Some(150), None),
        Column::formatted("gender", "Gender", |_, row: &Customer| {
            Cell::text(row.gender.map_or_else(
                || NOT_AVAILABLE.to_owned(),
                |gender| capitalize(gender.as_str()),
            ))
        })
        .width(Some(100), None),
        Column::composite("city", "Location", |row: &Customer| {
            Cell::text(row.location().unwrap_or_else(|| NOT_AVAILABLE.to_owned()))
        })
        .width(Some(120), None),
        Column::formatted("status", "Status", |_, row: &Customer| {
            Cell::badge(row.status.as_str(), status_tone(row.status.as_str()))
        })
        .align(Align::Center)
        .width(Some(120), None),
        Column::formatted("createdAt", "Registration Date", |_, row: &Customer| {
            Cell::text(format_date(row.created_at.date_naive()))
        })
        .width(Some(170), None),
    ]
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Customer list with its detail panel, edit form, and delete gate.
pub struct CustomersPage {
    customers: Arc<dyn CustomerService>,
    listing: Listing<Customer, CustomerFilter>,
    search_text: String,
    detail: DetailPanel<Customer>,
    form: FormPanel<CustomerFormSchema>,
    confirm: ConfirmDialog<Customer>,
    toaster: Toaster,
}

impl CustomersPage {
    /// Page on the first page with no filters.
    pub fn new(customers: Arc<dyn CustomerService>, clock: Arc<dyn Clock>) -> Self {
        let config = GridConfig::new(customer_columns(), "_id")
            .actions(default_actions())
            .empty_state_message(CUSTOMERS_EMPTY_MESSAGE);
        Self {
            customers,
            listing: Listing::new(config),
            search_text: String::new(),
            detail: DetailPanel::new(),
            form: FormPanel::new(CustomerFormSchema::default()),
            confirm: ConfirmDialog::new(),
            toaster: Toaster::new(clock),
        }
    }

    /// The grid.
    pub fn grid(&self) -> &DataGrid<Customer> {
        self.listing.grid()
    }

    /// Mutable grid, for selection and menus.
    pub fn grid_mut(&mut self) -> &mut DataGrid<Customer> {
        self.listing.grid_mut()
    }

    /// Active filter.
    pub fn filter(&self) -> &CustomerFilter {
        self.listing.filter()
    }

    /// Text typed in the search box, committed by [`Self::search`].
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Detail panel.
    pub fn detail(&self) -> &DetailPanel<Customer> {
        &self.detail
    }

    /// Edit form.
    pub fn form(&self) -> &FormPanel<CustomerFormSchema> {
        &self.form
    }

    /// Mutable edit form, for field input.
    pub fn form_mut(&mut self) -> &mut FormPanel<CustomerFormSchema> {
        &mut self.form
    }

    /// Delete confirmation.
    pub fn confirm(&self) -> &ConfirmDialog<Customer> {
        &self.confirm
    }

    /// Toasts raised by this page.
    pub fn toaster_mut(&mut self) -> &mut Toaster {
        &mut self.toaster
    }

    /// Load the form's choice lists.
    pub async fn load_catalogue(&mut self, dropdowns: &dyn DropdownService) {
        match dropdowns.all().await.into_result() {
            Ok(catalogue) => self.set_catalogue(catalogue.unwrap_or_default()),
            Err(message) => {
                self.toaster.error(message);
            }
        }
    }

    /// Replace the form's choice lists.
    pub fn set_catalogue(&mut self, catalogue: DropdownCatalogue) {
        self.form.schema_mut().set_catalogue(catalogue);
    }

    /// Start a fetch for the current cursor and filter.
    pub fn begin_fetch(&mut self) -> (Ticket, CustomerQuery) {
        self.listing.begin_fetch()
    }

    /// Apply a list response, raising a toast when it failed.
    pub fn apply_fetch(&mut self, ticket: Ticket, envelope: ListEnvelope<Customer>) -> FetchOutcome {
        let outcome = self.listing.apply_fetch(ticket, envelope);
        if let FetchOutcome::Failed(message) = &outcome {
            self.toaster.error(message.clone());
        }
        outcome
    }

    /// Fetch and apply the current page.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let (ticket, query) = self.begin_fetch();
        let envelope = self.customers.list(&query).await;
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
    pub async fn filter_by_status(&mut self, status: Option<CustomerStatus>) -> FetchOutcome {
        self.listing.update_filter(|filter| filter.status = status);
        self.refresh().await
    }

    /// Filter by gender and fetch from the first page.
    pub async fn filter_by_gender(&mut self, gender: Option<Gender>) -> FetchOutcome {
        self.listing.update_filter(|filter| filter.gender = gender);
        self.refresh().await
    }

    /// Filter by tax-status code and fetch from the first page.
    pub async fn filter_by_tax_status(&mut self, tax_status: Option<String>) -> FetchOutcome {
        self.listing.update_filter(|filter| filter.tax_status = tax_status);
        self.refresh().await
    }

    /// Clear search and filters, then fetch the first page.
    pub async fn reset(&mut self) -> FetchOutcome {
        self.search_text.clear();
        self.listing.reset();
        self.refresh().await
    }

    /// React to a grid interaction.
    pub async fn handle(&mut self, event: GridEvent<Customer>) {
        match self.listing.handle(event) {
            ListingFollowUp::Refetch => {
                self.refresh().await;
            }
            ListingFollowUp::Activated(customer) => self.view(&customer.id).await,
            ListingFollowUp::Action { action, row } => match action.as_str() {
                VIEW_ACTION => self.view(&row.id).await,
                EDIT_ACTION => self.open_edit(&row),
                DELETE_ACTION => self.request_delete(row),
                other => debug!(action = other, "unhandled customer action"),
            },
            ListingFollowUp::Nothing => {}
        }
    }

    /// Open the detail panel and load `id` into it.
    pub async fn view(&mut self, id: &str) {
        self.detail.begin_loading();
        match self.customers.get(id).await.into_result() {
            Ok(customer) => self.detail.show(customer),
            Err(message) => {
                debug!(id, %message, "customer detail failed");
                self.detail.show(None);
                self.toaster.error(DETAIL_FAILED);
            }
        }
    }

    /// Hide the detail panel.
    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    /// Ask before deleting `customer`.
    pub fn request_delete(&mut self, customer: Customer) {
        let request = ConfirmRequest::new(
            "Delete Customer",
            format!(
                "Are you sure you want to delete {}? This action cannot be undone.",
                customer.full_name()
            ),
        )
        .severity(Severity::Error)
        .buttons("Delete", "Cancel");
        self.confirm.open(request, customer);
    }

    /// Dismiss the delete prompt.
    pub fn cancel_delete(&mut self) {
        self.confirm.cancel();
    }

    /// Delete the pending customer; the prompt stays open on failure.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(ConfirmOutcome::Confirmed(customer)) = self.confirm.confirm() else {
            return false;
        };
        let envelope: Envelope<()> = self.customers.delete(&customer.id).await;
        if envelope.success {
            info!(id = %customer.id, "customer deleted");
            self.toaster.success(envelope.message);
            self.confirm.close();
            self.refresh().await;
            true
        } else {
            self.toaster.error(envelope.message);
            false
        }
    }

    /// Open the form for a new customer.
    pub fn open_create(&mut self) {
        self.form.open_create();
    }

    /// Open the form prefilled from `customer`.
    pub fn open_edit(&mut self, customer: &Customer) {
        self.form.open_edit(customer);
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
            Some(id) => self.customers.update(id, &submission.payload).await,
            None => self.customers.create(&submission.payload).await,
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
