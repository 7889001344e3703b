//! The console shell: navigation, page rendering and record saves.
//!
//! ARCHITECTURE
//! ============
//! A [`Console`] is composed from a [`SessionContext`] and a [`Catalog`].
//! Navigation goes through [`gate::resolve`] against a fresh session snapshot
//! and lands in a [`History`]: [`Console::open`] pushes, [`Console::replace`]
//! overwrites the current entry, and [`Console::refresh`] re-resolves the
//! current entry after the session changes. Rendering fetches whatever the
//! settled page needs and returns plain text.
//!
//! ERROR HANDLING
//! ==============
//! Read failures on a page render as error cards. Commands that change
//! something (login, saves) return [`ConsoleError`] so the caller can report
//! them.

#[cfg(test)]
#[path = "console_test.rs"]
mod console_test;

use std::sync::Arc;

use gate::{AdminPage, AuthOutcome, GateError, History, Resolution, Route, SessionContext, SessionStore, View, resolve};

use crate::forms::{AuthorForm, BookForm, CategoryForm, FormError, LoginForm, PublisherForm};
use crate::net::{Catalog, FetchPolicy, NetError};
use crate::views::pages::{self, PingStatus};
use crate::views::records::{self, RecordKind};
use crate::views::{Card, stack, states};

pub const SIGN_IN_REQUIRED: &str = "Sign in to continue.";

/// Hint shown on error cards; the interactive shell's `reload` re-renders.
const RETRY_HINT: &str = "reload";

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Net(#[from] NetError),

    /// Normalized login failure message.
    #[error("{0}")]
    Login(String),

    /// The session may not reach the page owning this command.
    #[error("{0}")]
    Guarded(&'static str),

    #[error("no {kind} with id {id}")]
    UnknownRecord { kind: &'static str, id: String },
}

pub struct Console {
    session: Arc<SessionStore>,
    catalog: Arc<dyn Catalog>,
    history: History,
    resolution: Resolution,
}

impl Console {
    /// Compose the console and resolve the landing location (`/`).
    ///
    /// # Errors
    ///
    /// Returns [`GateError::MissingSessionStore`] when the context is empty.
    pub fn new(context: &SessionContext, catalog: Arc<dyn Catalog>) -> Result<Self, ConsoleError> {
        let session = Arc::clone(context.session()?);
        let resolution = resolve(Route::Root.path(), &session.snapshot());
        let history = History::new(resolution.route.clone());
        Ok(Self { session, catalog, history, resolution })
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    #[must_use]
    pub fn location(&self) -> &Route {
        self.history.current()
    }

    #[must_use]
    pub fn view(&self) -> &View {
        &self.resolution.view
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Navigate to `location`, adding a history entry.
    ///
    /// Guard redirects replace the entry they were reached from, so only the
    /// settled route is recorded.
    pub fn open(&mut self, location: &str) -> &View {
        let resolution = resolve(location, &self.session.snapshot());
        self.history.push(resolution.route.clone());
        self.settle(resolution)
    }

    /// Navigate to `location`, overwriting the current history entry.
    pub fn replace(&mut self, location: &str) -> &View {
        let resolution = resolve(location, &self.session.snapshot());
        self.history.replace(resolution.route.clone());
        self.settle(resolution)
    }

    /// Re-resolve the current entry against the latest session state.
    pub fn refresh(&mut self) -> &View {
        let location = self.history.current().path().to_owned();
        let resolution = resolve(&location, &self.session.snapshot());
        if resolution.route != *self.history.current() {
            self.history.replace(resolution.route.clone());
        }
        self.settle(resolution)
    }

    /// Step back one entry and re-run its guards. `None` at the start of history.
    pub fn back(&mut self) -> Option<&View> {
        self.history.back()?;
        Some(self.refresh())
    }

    fn settle(&mut self, resolution: Resolution) -> &View {
        tracing::debug!(route = %resolution.route, view = ?resolution.view, "navigation settled");
        self.resolution = resolution;
        &self.resolution.view
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Placeholder to show while [`Console::render`] fetches page data.
    #[must_use]
    pub fn loading_card(&self) -> Option<Card> {
        match &self.resolution.view {
            View::Page(Route::Admin(AdminPage::Dashboard)) => Some(states::loading("Loading dashboard")),
            View::Page(Route::Admin(page)) => record_kind(*page).map(|kind| states::loading(&kind.loading_title())),
            _ => None,
        }
    }

    pub async fn render(&self) -> String {
        match &self.resolution.view {
            View::Loading(message) => states::pending(message).to_string(),
            View::Blocked(message) => states::blocked(message).to_string(),
            View::NotFound(path) => states::not_found(path).to_string(),
            View::RedirectLoop => states::redirect_loop(self.location().path()).to_string(),
            View::Page(Route::Login) => pages::login().to_string(),
            View::Page(Route::Admin(page)) => {
                let identity = self.session.identity();
                let body = self.page_cards(*page).await;
                format!("{}\n{}", pages::shell(identity.as_ref(), *page), stack(&body))
            }
            View::Page(other) => states::not_found(other.path()).to_string(),
        }
    }

    async fn page_cards(&self, page: AdminPage) -> Vec<Card> {
        let policy = FetchPolicy::CacheFirst;
        match page {
            AdminPage::Dashboard => {
                let ping = match self.catalog.ping().await {
                    Ok(true) => PingStatus::Online,
                    Ok(false) => PingStatus::Silent,
                    Err(e) => {
                        tracing::debug!(error = %e, "admin ping failed");
                        PingStatus::Unavailable
                    }
                };
                vec![pages::dashboard(self.session.identity().as_ref(), ping)]
            }
            AdminPage::Authors => listing(RecordKind::Author, self.catalog.authors(policy).await.map(|r| records::authors(&r))),
            AdminPage::Books => listing(RecordKind::Book, self.catalog.books(policy).await.map(|r| records::books(&r))),
            AdminPage::Categories => {
                listing(RecordKind::Category, self.catalog.categories(policy).await.map(|r| records::categories(&r)))
            }
            AdminPage::Publishers => {
                listing(RecordKind::Publisher, self.catalog.publishers(policy).await.map(|r| records::publishers(&r)))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Session commands
    // -------------------------------------------------------------------------

    /// Sign in and re-resolve the current location.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Form`] for an incomplete form (nothing is sent)
    /// or [`ConsoleError::Login`] with the normalized failure message.
    pub async fn login(&mut self, form: &LoginForm) -> Result<&'static str, ConsoleError> {
        let (email, password) = form.validate()?;
        match self.session.login(email, password).await {
            AuthOutcome::Success => {
                self.refresh();
                Ok(pages::LOGIN_SUCCESS)
            }
            AuthOutcome::Failure { message } => Err(ConsoleError::Login(message)),
        }
    }

    /// Sign out and land on the login screen without a way back.
    pub async fn logout(&mut self) -> &View {
        self.session.logout().await;
        self.replace(Route::Login.path())
    }

    // -------------------------------------------------------------------------
    // Record commands
    // -------------------------------------------------------------------------

    fn ensure_access(&self, kind: RecordKind) -> Result<(), ConsoleError> {
        let page = Route::Admin(kind.page());
        match resolve(page.path(), &self.session.snapshot()).view {
            View::Page(route) if route == page => Ok(()),
            View::Loading(message) | View::Blocked(message) => Err(ConsoleError::Guarded(message)),
            View::Page(_) | View::NotFound(_) | View::RedirectLoop => Err(ConsoleError::Guarded(SIGN_IN_REQUIRED)),
        }
    }

    /// Load an author into an edit form.
    ///
    /// # Errors
    ///
    /// Fails when the session may not edit authors, the read fails, or no
    /// author has this id.
    pub async fn author_form(&self, id: &str) -> Result<AuthorForm, ConsoleError> {
        self.ensure_access(RecordKind::Author)?;
        let records = self.catalog.authors(FetchPolicy::CacheFirst).await?;
        find(records, RecordKind::Author, id, |r| r.id.as_str()).map(|r| AuthorForm::from_record(&r))
    }

    /// # Errors
    ///
    /// See [`Console::author_form`].
    pub async fn category_form(&self, id: &str) -> Result<CategoryForm, ConsoleError> {
        self.ensure_access(RecordKind::Category)?;
        let records = self.catalog.categories(FetchPolicy::CacheFirst).await?;
        find(records, RecordKind::Category, id, |r| r.id.as_str()).map(|r| CategoryForm::from_record(&r))
    }

    /// # Errors
    ///
    /// See [`Console::author_form`].
    pub async fn publisher_form(&self, id: &str) -> Result<PublisherForm, ConsoleError> {
        self.ensure_access(RecordKind::Publisher)?;
        let records = self.catalog.publishers(FetchPolicy::CacheFirst).await?;
        find(records, RecordKind::Publisher, id, |r| r.id.as_str()).map(|r| PublisherForm::from_record(&r))
    }

    /// # Errors
    ///
    /// See [`Console::author_form`].
    pub async fn book_form(&self, id: &str) -> Result<BookForm, ConsoleError> {
        self.ensure_access(RecordKind::Book)?;
        let records = self.catalog.books(FetchPolicy::CacheFirst).await?;
        find(records, RecordKind::Book, id, |r| r.id.as_str()).map(|r| BookForm::from_record(&r))
    }

    /// Create (`id` is `None`) or update an author, then refetch the list.
    ///
    /// # Errors
    ///
    /// Fails on a guard refusal, an invalid form, or a backend error.
    pub async fn save_author(&self, id: Option<&str>, form: &AuthorForm) -> Result<String, ConsoleError> {
        self.ensure_access(RecordKind::Author)?;
        let input = form.validate()?;
        match id {
            Some(id) => self.catalog.update_author(id, &input).await?,
            None => self.catalog.create_author(&input).await?,
        };
        self.catalog.authors(FetchPolicy::NetworkOnly).await?;
        Ok(saved(RecordKind::Author, id))
    }

    /// # Errors
    ///
    /// See [`Console::save_author`].
    pub async fn save_category(&self, id: Option<&str>, form: &CategoryForm) -> Result<String, ConsoleError> {
        self.ensure_access(RecordKind::Category)?;
        let input = form.validate()?;
        match id {
            Some(id) => self.catalog.update_category(id, &input).await?,
            None => self.catalog.create_category(&input).await?,
        };
        self.catalog.categories(FetchPolicy::NetworkOnly).await?;
        Ok(saved(RecordKind::Category, id))
    }

    /// # Errors
    ///
    /// See [`Console::save_author`].
    pub async fn save_publisher(&self, id: Option<&str>, form: &PublisherForm) -> Result<String, ConsoleError> {
        self.ensure_access(RecordKind::Publisher)?;
        let input = form.validate()?;
        match id {
            Some(id) => self.catalog.update_publisher(id, &input).await?,
            None => self.catalog.create_publisher(&input).await?,
        };
        self.catalog.publishers(FetchPolicy::NetworkOnly).await?;
        Ok(saved(RecordKind::Publisher, id))
    }

    /// # Errors
    ///
    /// See [`Console::save_author`].
    pub async fn save_book(&self, id: Option<&str>, form: &BookForm) -> Result<String, ConsoleError> {
        self.ensure_access(RecordKind::Book)?;
        let input = form.validate()?;
        match id {
            Some(id) => self.catalog.update_book(id, &input).await?,
            None => self.catalog.create_book(&input).await?,
        };
        self.catalog.books(FetchPolicy::NetworkOnly).await?;
        Ok(saved(RecordKind::Book, id))
    }
}

fn record_kind(page: AdminPage) -> Option<RecordKind> {
    match page {
        AdminPage::Dashboard => None,
        AdminPage::Authors => Some(RecordKind::Author),
        AdminPage::Books => Some(RecordKind::Book),
        AdminPage::Categories => Some(RecordKind::Category),
        AdminPage::Publishers => Some(RecordKind::Publisher),
    }
}

fn listing(kind: RecordKind, cards: Result<Vec<Card>, NetError>) -> Vec<Card> {
    match cards {
        Ok(cards) => std::iter::once(records::form_heading(kind, false)).chain(cards).collect(),
        Err(e) => {
            tracing::warn!(kind = kind.plural(), error = %e, "list read failed");
            vec![states::error(&kind.load_failed_title(), &e.to_string(), Some(RETRY_HINT))]
        }
    }
}

fn find<T>(records: Vec<T>, kind: RecordKind, id: &str, key: impl Fn(&T) -> &str) -> Result<T, ConsoleError> {
    records
        .into_iter()
        .find(|record| key(record) == id)
        .ok_or_else(|| ConsoleError::UnknownRecord { kind: kind.singular(), id: id.to_owned() })
}

fn saved(kind: RecordKind, id: Option<&str>) -> String {
    tracing::info!(kind = kind.singular(), id = id.unwrap_or("new"), "record saved");
    kind.saved_message(id.is_some())
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Mutex;

    use gate::{Identity, IdentityService, Role, ServiceError};
    use tokio::sync::Notify;

    use super::*;
    use crate::net::types::{
        Author, AuthorInput, Book, BookInput, Category, CategoryInput, Publisher, PublisherInput,
    };

    pub fn identity(role: &str) -> Identity {
        Identity { id: "1".into(), email: "admin@example.com".into(), name: "Admin".into(), role: Role::new(role) }
    }

    /// Identity backend with one account: `admin@example.com` / `secret`.
    pub struct Accounts {
        pub current: Mutex<Option<Identity>>,
        pub role: &'static str,
        pub hold_me: Option<Arc<Notify>>,
    }

    impl Accounts {
        pub fn signed_out(role: &'static str) -> Self {
            Self { current: Mutex::new(None), role, hold_me: None }
        }

        pub fn signed_in(role: &'static str) -> Self {
            Self { current: Mutex::new(Some(identity(role))), role, hold_me: None }
        }
    }

    #[async_trait::async_trait]
    impl IdentityService for Accounts {
        async fn who_am_i(&self) -> Result<Option<Identity>, ServiceError> {
            if let Some(gate) = &self.hold_me {
                gate.notified().await;
            }
            Ok(self.current.lock().unwrap().clone())
        }

        async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, ServiceError> {
            if email != "admin@example.com" || password != "secret" {
                return Err(ServiceError::Server("Invalid credentials".into()));
            }
            let signed = identity(self.role);
            *self.current.lock().unwrap() = Some(signed.clone());
            Ok(signed)
        }

        async fn end_session(&self) -> Result<(), ServiceError> {
            *self.current.lock().unwrap() = None;
            Ok(())
        }

        async fn clear_cache(&self) {}
    }

    const STAMP: &str = "2024-01-05T10:00:00Z";

    #[derive(Default)]
    pub struct MemoryCatalog {
        pub authors: Mutex<Vec<Author>>,
        pub fail_reads: bool,
        pub calls: Mutex<Vec<String>>,
    }

    impl MemoryCatalog {
        pub fn failing() -> Self {
            Self { fail_reads: true, ..Self::default() }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn read<T: Clone>(&self, name: &str, policy: FetchPolicy, rows: &[T]) -> Result<Vec<T>, NetError> {
            self.record(format!("{name}:{policy:?}"));
            if self.fail_reads {
                return Err(NetError::Graphql("Forbidden resource".into()));
            }
            Ok(rows.to_vec())
        }
    }

    fn author_from(id: &str, input: &AuthorInput) -> Author {
        Author {
            id: id.into(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            birth_date: input.birth_date.clone(),
            biography: input.biography.clone(),
            nationality: input.nationality.clone(),
            created_at: STAMP.into(),
            updated_at: STAMP.into(),
        }
    }

    #[async_trait::async_trait]
    impl Catalog for MemoryCatalog {
        async fn ping(&self) -> Result<bool, NetError> {
            self.record("ping");
            if self.fail_reads { Err(NetError::Graphql("Forbidden resource".into())) } else { Ok(true) }
        }

        async fn authors(&self, policy: FetchPolicy) -> Result<Vec<Author>, NetError> {
            let rows = self.authors.lock().unwrap().clone();
            self.read("authors", policy, &rows)
        }

        async fn create_author(&self, input: &AuthorInput) -> Result<Author, NetError> {
            self.record("create_author");
            let mut rows = self.authors.lock().unwrap();
            let author = author_from(&(rows.len() + 1).to_string(), input);
            rows.push(author.clone());
            Ok(author)
        }

        async fn update_author(&self, id: &str, input: &AuthorInput) -> Result<Author, NetError> {
            self.record(format!("update_author:{id}"));
            let mut rows = self.authors.lock().unwrap();
            let slot = rows.iter_mut().find(|a| a.id == id).ok_or(NetError::Graphql("Author not found".into()))?;
            *slot = author_from(id, input);
            Ok(slot.clone())
        }

        async fn categories(&self, policy: FetchPolicy) -> Result<Vec<Category>, NetError> {
            self.read::<Category>("categories", policy, &[])
        }

        async fn create_category(&self, input: &CategoryInput) -> Result<Category, NetError> {
            self.record("create_category");
            Ok(Category {
                id: "1".into(),
                name: input.name.clone(),
                description: input.description.clone(),
                created_at: STAMP.into(),
                updated_at: STAMP.into(),
            })
        }

        async fn update_category(&self, _id: &str, _input: &CategoryInput) -> Result<Category, NetError> {
            Err(NetError::Graphql("Category not found".into()))
        }

        async fn publishers(&self, policy: FetchPolicy) -> Result<Vec<Publisher>, NetError> {
            self.read::<Publisher>("publishers", policy, &[])
        }

        async fn create_publisher(&self, _input: &PublisherInput) -> Result<Publisher, NetError> {
            Err(NetError::Status(500))
        }

        async fn update_publisher(&self, _id: &str, _input: &PublisherInput) -> Result<Publisher, NetError> {
            Err(NetError::Status(500))
        }

        async fn books(&self, policy: FetchPolicy) -> Result<Vec<Book>, NetError> {
            self.read::<Book>("books", policy, &[])
        }

        async fn create_book(&self, _input: &BookInput) -> Result<Book, NetError> {
            Err(NetError::Status(500))
        }

        async fn update_book(&self, _id: &str, _input: &BookInput) -> Result<Book, NetError> {
            Err(NetError::Status(500))
        }
    }

    pub async fn console_with(accounts: Accounts, catalog: Arc<MemoryCatalog>) -> Console {
        let store = SessionStore::start(Arc::new(accounts));
        store.initialized().await;
        Console::new(&SessionContext::provide(store), catalog).unwrap()
    }
}
