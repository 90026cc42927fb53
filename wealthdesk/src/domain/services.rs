//! Envelope services over the repository ports.
//!
//! These services implement the driving service ports for any repository
//! backend. Client-facing errors (not found, invalid request, unauthorised)
//! keep their message; everything else collapses to the operation's generic
//! failure message and is logged.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Envelope, ListEnvelope, Page};
use tracing::warn;

use crate::domain::messages::{
    CREATE_CUSTOMER_FAILED, CREATE_INVESTMENT_FAILED, CREATE_NOTIFICATION_FAILED,
    CUSTOMER_CREATED, CUSTOMER_DELETED, CUSTOMER_FOUND, CUSTOMER_STATS_RETRIEVED,
    CUSTOMER_UPDATED, CUSTOMERS_RETRIEVED, DELETE_CUSTOMER_FAILED, DELETE_INVESTMENT_FAILED,
    DELETE_NOTIFICATION_FAILED, DROPDOWNS_RETRIEVED, FETCH_CUSTOMER_FAILED,
    FETCH_CUSTOMER_STATS_FAILED, FETCH_CUSTOMERS_FAILED, FETCH_DROPDOWNS_FAILED,
    FETCH_INVESTMENT_FAILED, FETCH_INVESTMENT_STATS_FAILED, FETCH_INVESTMENTS_FAILED,
    FETCH_NOTIFICATIONS_FAILED, INVESTMENT_CREATED, INVESTMENT_DELETED, INVESTMENT_FOUND,
    INVESTMENT_STATS_RETRIEVED, INVESTMENT_UPDATED, INVESTMENTS_RETRIEVED, LOGIN_FAILED,
    LOGIN_SUCCESSFUL, NOTIFICATION_CREATED, NOTIFICATION_DELETED, NOTIFICATION_MARKED_READ,
    NOTIFICATIONS_MARKED_READ, NOTIFICATIONS_RETRIEVED, UNREAD_COUNT_RETRIEVED,
    UPDATE_CUSTOMER_FAILED, UPDATE_INVESTMENT_FAILED, UPDATE_NOTIFICATION_FAILED,
    USER_RETRIEVED,
};
use crate::domain::ports::{
    AuthService, Authenticator, CustomerRepository, CustomerService, DropdownRepository,
    DropdownService, InvestmentRepository, InvestmentService, NotificationRepository,
    NotificationService,
};
use crate::domain::{
    AuthSession, Customer, CustomerDraft, CustomerQuery, CustomerStats, DropdownCatalogue,
    DropdownKind, DropdownOption, Error, ErrorCode, Investment, InvestmentDraft, InvestmentQuery,
    InvestmentStats, LoginCredentials, Notification, NotificationDraft, NotificationQuery, User,
};

/// Message to surface for `error`, given the operation's generic failure.
pub(crate) fn failure_message(error: &Error, generic: &str) -> String {
    match error.code() {
        ErrorCode::InvalidRequest | ErrorCode::Unauthorized | ErrorCode::NotFound => {
            error.message().to_owned()
        }
        _ => {
            warn!(code = ?error.code(), message = error.message(), "service call failed");
            generic.to_owned()
        }
    }
}

fn fold<T>(result: Result<T, Error>, success: &str, generic: &str) -> Envelope<T> {
    match result {
        Ok(data) => Envelope::ok(success, data),
        Err(err) => Envelope::failure(failure_message(&err, generic)),
    }
}

fn fold_done(result: Result<(), Error>, success: &str, generic: &str) -> Envelope<()> {
    match result {
        Ok(()) => Envelope::done(success),
        Err(err) => Envelope::failure(failure_message(&err, generic)),
    }
}

fn fold_page<T>(result: Result<Page<T>, Error>, success: &str, generic: &str) -> ListEnvelope<T> {
    match result {
        Ok(page) => ListEnvelope::from_page(success, page),
        Err(err) => ListEnvelope::failure(failure_message(&err, generic)),
    }
}

/// Customer service backed by a [`CustomerRepository`].
#[derive(Clone)]
pub struct CustomerEnvelopeService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> CustomerEnvelopeService<R> {
    /// Wrap the repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> CustomerService for CustomerEnvelopeService<R>
where
    R: CustomerRepository + ?Sized,
{
    async fn list(&self, query: &CustomerQuery) -> ListEnvelope<Customer> {
        fold_page(self.repo.list(query).await, CUSTOMERS_RETRIEVED, FETCH_CUSTOMERS_FAILED)
    }

    async fn get(&self, id: &str) -> Envelope<Customer> {
        fold(self.repo.get(id).await, CUSTOMER_FOUND, FETCH_CUSTOMER_FAILED)
    }

    async fn create(&self, draft: &CustomerDraft) -> Envelope<Customer> {
        fold(self.repo.create(draft).await, CUSTOMER_CREATED, CREATE_CUSTOMER_FAILED)
    }

    async fn update(&self, id: &str, draft: &CustomerDraft) -> Envelope<Customer> {
        fold(self.repo.update(id, draft).await, CUSTOMER_UPDATED, UPDATE_CUSTOMER_FAILED)
    }

    async fn delete(&self, id: &str) -> Envelope<()> {
        fold_done(self.repo.delete(id).await, CUSTOMER_DELETED, DELETE_CUSTOMER_FAILED)
    }

    async fn stats(&self) -> Envelope<CustomerStats> {
        fold(self.repo.stats().await, CUSTOMER_STATS_RETRIEVED, FETCH_CUSTOMER_STATS_FAILED)
    }
}

/// Investment service backed by an [`InvestmentRepository`].
#[derive(Clone)]
pub struct InvestmentEnvelopeService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> InvestmentEnvelopeService<R> {
    /// Wrap the repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> InvestmentService for InvestmentEnvelopeService<R>
where
    R: InvestmentRepository + ?Sized,
{
    async fn list(&self, query: &InvestmentQuery) -> ListEnvelope<Investment> {
        fold_page(self.repo.list(query).await, INVESTMENTS_RETRIEVED, FETCH_INVESTMENTS_FAILED)
    }

    async fn get(&self, id: &str) -> Envelope<Investment> {
        fold(self.repo.get(id).await, INVESTMENT_FOUND, FETCH_INVESTMENT_FAILED)
    }

    async fn create(&self, draft: &InvestmentDraft) -> Envelope<Investment> {
        fold(self.repo.create(draft).await, INVESTMENT_CREATED, CREATE_INVESTMENT_FAILED)
    }

    async fn update(&self, id: &str, draft: &InvestmentDraft) -> Envelope<Investment> {
        fold(self.repo.update(id, draft).await, INVESTMENT_UPDATED, UPDATE_INVESTMENT_FAILED)
    }

    async fn delete(&self, id: &str) -> Envelope<()> {
        fold_done(self.repo.delete(id).await, INVESTMENT_DELETED, DELETE_INVESTMENT_FAILED)
    }

    async fn stats(&self) -> Envelope<InvestmentStats> {
        fold(
            self.repo.stats().await,
            INVESTMENT_STATS_RETRIEVED,
            FETCH_INVESTMENT_STATS_FAILED,
        )
    }
}

/// Notification service backed by a [`NotificationRepository`].
#[derive(Clone)]
pub struct NotificationEnvelopeService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> NotificationEnvelopeService<R> {
    /// Wrap the repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> NotificationService for NotificationEnvelopeService<R>
where
    R: NotificationRepository + ?Sized,
{
    async fn list(&self, query: &NotificationQuery) -> ListEnvelope<Notification> {
        fold_page(
            self.repo.list(query).await,
            NOTIFICATIONS_RETRIEVED,
            FETCH_NOTIFICATIONS_FAILED,
        )
    }

    async fn create(&self, draft: &NotificationDraft) -> Envelope<Notification> {
        fold(self.repo.create(draft).await, NOTIFICATION_CREATED, CREATE_NOTIFICATION_FAILED)
    }

    async fn mark_read(&self, id: &str) -> Envelope<Notification> {
        fold(
            self.repo.mark_read(id).await,
            NOTIFICATION_MARKED_READ,
            UPDATE_NOTIFICATION_FAILED,
        )
    }

    async fn mark_all_read(&self) -> Envelope<u64> {
        fold(
            self.repo.mark_all_read().await,
            NOTIFICATIONS_MARKED_READ,
            UPDATE_NOTIFICATION_FAILED,
        )
    }

    async fn delete(&self, id: &str) -> Envelope<()> {
        fold_done(self.repo.delete(id).await, NOTIFICATION_DELETED, DELETE_NOTIFICATION_FAILED)
    }

    async fn unread_count(&self) -> Envelope<u64> {
        fold(
            self.repo.unread_count().await,
            UNREAD_COUNT_RETRIEVED,
            FETCH_NOTIFICATIONS_FAILED,
        )
    }
}

/// Dropdown service backed by a [`DropdownRepository`].
#[derive(Clone)]
pub struct DropdownEnvelopeService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> DropdownEnvelopeService<R> {
    /// Wrap the repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> DropdownService for DropdownEnvelopeService<R>
where
    R: DropdownRepository + ?Sized,
{
    async fn options(&self, kind: DropdownKind) -> Envelope<Vec<DropdownOption>> {
        fold(self.repo.options(kind).await, DROPDOWNS_RETRIEVED, FETCH_DROPDOWNS_FAILED)
    }

    async fn all(&self) -> Envelope<DropdownCatalogue> {
        fold(self.repo.catalogue().await, DROPDOWNS_RETRIEVED, FETCH_DROPDOWNS_FAILED)
    }
}

/// Auth service backed by an [`Authenticator`].
#[derive(Clone)]
pub struct AuthEnvelopeService<A: ?Sized> {
    authenticator: Arc<A>,
}

impl<A: ?Sized> AuthEnvelopeService<A> {
    /// Wrap the authenticator.
    pub fn new(authenticator: Arc<A>) -> Self {
        Self { authenticator }
    }
}

#[async_trait]
impl<A> AuthService for AuthEnvelopeService<A>
where
    A: Authenticator + ?Sized,
{
    async fn login(&self, credentials: &LoginCredentials) -> Envelope<AuthSession> {
        fold(
            self.authenticator.login(credentials).await,
            LOGIN_SUCCESSFUL,
            LOGIN_FAILED,
        )
    }

    async fn current_user(&self, token: &str) -> Envelope<User> {
        fold(
            self.authenticator.current_user(token).await,
            USER_RETRIEVED,
            LOGIN_FAILED,
        )
    }
}
