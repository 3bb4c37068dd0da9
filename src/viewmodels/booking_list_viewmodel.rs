// ============================================================================
// BOOKING LIST VIEWMODEL - Fetch de la lista + mutación "Request Financing"
// ============================================================================
// Lógica sin DOM. La vista llama a load()/request_financing() desde
// spawn_local y se re-renderiza con subscribe().
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use crate::error::ClientError;
use crate::models::{Booking, FinancingRequest};
use crate::router::{Navigator, Route};
use crate::services::{booking_service, finance_service, ApiClient};
use crate::state::SessionStore;
use crate::viewmodels::mutations::Mutation;
use crate::viewmodels::query_cache::{QueryCache, QueryKey, QueryStatus, BOOKINGS};

pub const EMPTY_BOOKINGS_MESSAGE: &str = "No bookings found. Create your first booking to get started.";
pub const LIST_ERROR_PREFIX: &str = "Error loading bookings: ";
pub const CONFIRM_FINANCING_PROMPT: &str = "Request financing for this booking?";
pub const FINANCING_FAILED_MESSAGE: &str = "Financing request failed. Please try again.";

/// Lo que la vista debe pintar (estados excluyentes)
#[derive(Clone, Debug, PartialEq)]
pub enum ListState {
    Loading,
    Error(String),
    Empty(&'static str),
    Items(Rc<Vec<Booking>>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum MutationOutcome {
    /// El usuario no confirmó
    Cancelled,
    /// Ya hay una solicitud en vuelo para ese booking
    AlreadyPending,
    Succeeded,
    Failed(ClientError),
}

/// Diálogo de confirmación (window.confirm en el navegador)
pub type Confirm = Rc<dyn Fn(&str) -> bool>;

pub struct BookingListViewModel {
    api: ApiClient,
    session: Rc<SessionStore>,
    cache: Rc<QueryCache<Booking>>,
    navigator: Rc<dyn Navigator>,
    confirm: Confirm,
    pending: RefCell<HashSet<i64>>,
    mutation_errors: RefCell<HashMap<i64, String>>,
    alive: Cell<bool>,
    listeners: RefCell<Vec<Rc<dyn Fn()>>>,
}

impl BookingListViewModel {
    pub fn new(
        api: ApiClient,
        session: Rc<SessionStore>,
        cache: Rc<QueryCache<Booking>>,
        navigator: Rc<dyn Navigator>,
        confirm: Confirm,
    ) -> Self {
        Self {
            api,
            session,
            cache,
            navigator,
            confirm,
            pending: RefCell::new(HashSet::new()),
            mutation_errors: RefCell::new(HashMap::new()),
            alive: Cell::new(true),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Fetch al montar: solo si no hay entrada, si está stale, si el último
    /// fetch falló o si se fuerza (botón "Retry")
    pub async fn load(&self, force: bool) {
        let reusable = self.cache.has_entry(BOOKINGS)
            && !self.cache.is_stale(BOOKINGS)
            && self.cache.status(BOOKINGS) != QueryStatus::Error;
        if !force && reusable {
            log::info!("📋 [BOOKINGS] Usando lista en caché");
            return;
        }
        self.fetch().await;
    }

    async fn fetch(&self) {
        let ticket = self.cache.begin_fetch(BOOKINGS);

        match booking_service::fetch_bookings(&self.api).await {
            Ok(bookings) => {
                self.cache.complete(ticket, Ok(bookings));
            }
            Err(e) => {
                let err = ClientError::from(e);
                log::error!("❌ [BOOKINGS] Error obteniendo bookings: {}", err);
                self.cache.complete(ticket, Err(err.to_string()));
                if err.is_auth() {
                    self.expire_session();
                }
            }
        }
    }

    async fn refetch(&self, key: QueryKey) {
        if key == BOOKINGS {
            self.fetch().await;
        } else {
            log::warn!("⚠️ [BOOKINGS] Sin fetcher para la clave '{}'", key);
        }
    }

    pub fn list_state(&self) -> ListState {
        let entry = match self.cache.entry(BOOKINGS) {
            Some(entry) => entry,
            None => return ListState::Loading,
        };

        match entry.status {
            QueryStatus::Idle | QueryStatus::Loading => ListState::Loading,
            QueryStatus::Error => ListState::Error(format!(
                "{}{}",
                LIST_ERROR_PREFIX,
                entry.error.as_deref().unwrap_or("Unknown error")
            )),
            QueryStatus::Success => match &entry.data {
                Some(items) if !items.is_empty() => ListState::Items(items.clone()),
                _ => ListState::Empty(EMPTY_BOOKINGS_MESSAGE),
            },
        }
    }

    /// POST de financiación. Mientras está en vuelo el botón de ese booking
    /// queda deshabilitado; al terminar bien se invalida y refetchea la lista.
    /// Si falla, la caché no se toca y el error queda junto al booking.
    pub async fn request_financing(&self, booking_id: i64) -> MutationOutcome {
        if self.is_pending(booking_id) {
            log::warn!("⚠️ [FINANCE] Solicitud ya en curso para booking {}", booking_id);
            return MutationOutcome::AlreadyPending;
        }
        if !(self.confirm)(CONFIRM_FINANCING_PROMPT) {
            return MutationOutcome::Cancelled;
        }

        self.pending.borrow_mut().insert(booking_id);
        self.mutation_errors.borrow_mut().remove(&booking_id);
        self.notify();

        let request = FinancingRequest::for_booking(booking_id);
        let result = finance_service::request_financing(&self.api, &request).await;
        self.pending.borrow_mut().remove(&booking_id);

        match result {
            Ok(created) => {
                log::info!("✅ [FINANCE] Solicitud creada: {:?}", created.id);
                let keys = self.cache.invalidate(Mutation::RequestFinancing.invalidates());
                self.notify();
                if self.alive.get() {
                    for key in keys {
                        self.refetch(key).await;
                    }
                }
                MutationOutcome::Succeeded
            }
            Err(e) => {
                let err = ClientError::from(e);
                log::error!("❌ [FINANCE] Error solicitando financiación: {}", err);
                if self.alive.get() {
                    self.mutation_errors
                        .borrow_mut()
                        .insert(booking_id, err.user_message(FINANCING_FAILED_MESSAGE));
                }
                self.notify();
                if err.is_auth() {
                    self.expire_session();
                }
                MutationOutcome::Failed(err)
            }
        }
    }

    pub fn is_pending(&self, booking_id: i64) -> bool {
        self.pending.borrow().contains(&booking_id)
    }

    pub fn mutation_error(&self, booking_id: i64) -> Option<String> {
        self.mutation_errors.borrow().get(&booking_id).cloned()
    }

    /// Re-render de la vista tras cambios propios o de la caché
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn() + 'static,
    {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// La vista se desmonta: los resultados que lleguen después no tocan su estado
    pub fn dispose(&self) {
        self.alive.set(false);
        self.listeners.borrow_mut().clear();
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// 401/403 fuera de los formularios de auth: cerrar sesión y volver al login
    fn expire_session(&self) {
        log::warn!("🔒 [BOOKINGS] Sesión expirada o no autorizada, cerrando sesión");
        self.session.logout();
        self.navigator.navigate(Route::Login);
    }

    fn notify(&self) {
        if !self.alive.get() {
            return;
        }
        let listeners: Vec<Rc<dyn Fn()>> = self.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::testing::RecordingNavigator;
    use crate::services::http::HttpMethod;
    use crate::services::testing::{ok, FakeTransport};
    use crate::utils::storage::MemoryStorage;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;

    const TWO_BOOKINGS: &str = r#"[
        {"id": 1, "status": "booked", "client_id": 3, "reference_number": "REF-1", "carrier_name": "Maersk"},
        {"id": 2, "status": "delivered", "client_id": 3, "reference_number": "REF-2", "carrier_name": "MSC"}
    ]"#;

    struct Harness {
        vm: Rc<BookingListViewModel>,
        transport: Rc<FakeTransport>,
        session: Rc<SessionStore>,
        cache: Rc<QueryCache<Booking>>,
        navigator: Rc<RecordingNavigator>,
    }

    fn harness_with_confirm(confirm: Confirm) -> Harness {
        let transport = FakeTransport::new();
        let session = Rc::new(SessionStore::initialize(Rc::new(MemoryStorage::new()), "leva_token"));
        session.login("jwt");
        let api = ApiClient::with_transport("http://api", transport.clone(), session.clone());
        let cache = Rc::new(QueryCache::new());
        let navigator = Rc::new(RecordingNavigator::default());
        let vm = Rc::new(BookingListViewModel::new(
            api,
            session.clone(),
            cache.clone(),
            navigator.clone(),
            confirm,
        ));
        Harness { vm, transport, session, cache, navigator }
    }

    fn harness() -> Harness {
        harness_with_confirm(Rc::new(|_: &str| true))
    }

    fn gets(transport: &FakeTransport) -> usize {
        transport.requests().iter().filter(|r| r.method == HttpMethod::Get).count()
    }

    #[test]
    fn load_populates_cache_and_renders_items() {
        let h = harness();
        h.transport.respond(200, TWO_BOOKINGS);

        assert_eq!(h.vm.list_state(), ListState::Loading);
        block_on(h.vm.load(false));

        match h.vm.list_state() {
            ListState::Items(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].reference_number, "REF-1");
            }
            other => panic!("expected items, got {:?}", other),
        }
        let sent = h.transport.last_request().unwrap();
        assert_eq!(sent.url, "http://api/bookings/");
        assert_eq!(sent.header("Authorization"), Some("Bearer jwt"));
    }

    #[test]
    fn cached_entry_skips_fetch_unless_forced() {
        let h = harness();
        h.transport.respond(200, TWO_BOOKINGS);
        h.transport.respond(200, "[]");

        block_on(h.vm.load(false));
        block_on(h.vm.load(false));
        assert_eq!(h.transport.request_count(), 1);

        block_on(h.vm.load(true));
        assert_eq!(h.transport.request_count(), 2);
        assert_eq!(h.vm.list_state(), ListState::Empty(EMPTY_BOOKINGS_MESSAGE));
    }

    #[test]
    fn empty_sequence_renders_empty_state_not_error() {
        let h = harness();
        h.transport.respond(200, "[]");
        block_on(h.vm.load(false));
        assert_eq!(h.vm.list_state(), ListState::Empty(EMPTY_BOOKINGS_MESSAGE));
    }

    #[test]
    fn failed_fetch_renders_error_with_detail() {
        let h = harness();
        h.transport.respond(404, r#"{"detail":"Organization not found"}"#);
        block_on(h.vm.load(false));
        assert_eq!(
            h.vm.list_state(),
            ListState::Error("Error loading bookings: Organization not found".to_string())
        );
        assert_eq!(h.cache.status(BOOKINGS), QueryStatus::Error);
        assert!(h.session.is_authenticated());
    }

    #[test]
    fn network_failure_renders_error_state() {
        let h = harness();
        h.transport.fail("offline");
        block_on(h.vm.load(false));
        assert_eq!(
            h.vm.list_state(),
            ListState::Error("Error loading bookings: Network error: offline".to_string())
        );
    }

    #[test]
    fn unauthorized_fetch_forces_logout_and_redirect() {
        let h = harness();
        h.transport.respond(401, r#"{"detail":"Could not validate credentials"}"#);
        block_on(h.vm.load(false));

        assert!(!h.session.is_authenticated());
        assert_eq!(h.navigator.routes(), vec![Route::Login]);
    }

    #[test]
    fn overlapping_fetches_keep_the_latest_started() {
        let h = harness();
        let first_reply = h.transport.defer();
        let second_reply = h.transport.defer();

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for _ in 0..2 {
            let vm = h.vm.clone();
            spawner.spawn_local(async move { vm.load(true).await }).unwrap();
        }
        pool.run_until_stalled();
        assert_eq!(h.transport.request_count(), 2);

        // la segunda llega antes que la primera
        second_reply.send(ok(200, TWO_BOOKINGS)).unwrap();
        pool.run_until_stalled();
        first_reply.send(ok(200, "[]")).unwrap();
        pool.run_until_stalled();

        match h.vm.list_state() {
            ListState::Items(items) => assert_eq!(items.len(), 2),
            other => panic!("expected second fetch's items, got {:?}", other),
        }
    }

    #[test]
    fn successful_mutation_invalidates_and_refetches_exactly_once() {
        let h = harness();
        h.transport.respond(200, TWO_BOOKINGS);
        block_on(h.vm.load(false));

        h.transport.respond(200, r#"{"id": 10, "status": "pending"}"#);
        h.transport.respond(200, TWO_BOOKINGS);
        let outcome = block_on(h.vm.request_financing(1));
        assert_eq!(outcome, MutationOutcome::Succeeded);

        let requests = h.transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].method, HttpMethod::Post);
        assert_eq!(requests[1].url, "http://api/finance/financing-requests/");
        assert_eq!(gets(&h.transport), 2);
        assert!(!h.cache.is_stale(BOOKINGS));
        assert!(!h.vm.is_pending(1));
    }

    #[test]
    fn failed_mutation_leaves_cache_untouched() {
        let h = harness();
        h.transport.respond(200, TWO_BOOKINGS);
        block_on(h.vm.load(false));
        let before = h.cache.entry(BOOKINGS).unwrap();

        h.transport.respond(400, r#"{"detail":"Booking already financed"}"#);
        let outcome = block_on(h.vm.request_financing(2));

        assert!(matches!(outcome, MutationOutcome::Failed(ClientError::Request { status: 400, .. })));
        let after = h.cache.entry(BOOKINGS).unwrap();
        assert!(Rc::ptr_eq(&before, &after));
        assert_eq!(gets(&h.transport), 1);
        assert_eq!(h.vm.mutation_error(2).as_deref(), Some("Booking already financed"));
    }

    #[test]
    fn unauthorized_financing_post_forces_logout_and_redirect() {
        let h = harness();
        h.transport.respond(200, TWO_BOOKINGS);
        block_on(h.vm.load(false));

        h.transport.respond(403, r#"{"detail":"Not authenticated"}"#);
        let outcome = block_on(h.vm.request_financing(1));

        assert!(matches!(outcome, MutationOutcome::Failed(ClientError::Auth { status: 403, .. })));
        assert!(!h.session.is_authenticated());
        assert_eq!(h.session.get_token(), None);
        assert_eq!(h.navigator.routes(), vec![Route::Login]);
        assert_eq!(gets(&h.transport), 1);
        assert!(!h.vm.is_pending(1));
    }

    #[test]
    fn errored_entry_is_refetched_on_next_load() {
        let h = harness();
        h.transport.fail("offline");
        h.transport.respond(200, TWO_BOOKINGS);

        block_on(h.vm.load(false));
        assert!(matches!(h.vm.list_state(), ListState::Error(_)));

        block_on(h.vm.load(false));
        assert_eq!(h.transport.request_count(), 2);
        assert!(matches!(h.vm.list_state(), ListState::Items(_)));
    }

    #[test]
    fn pending_item_blocks_duplicate_submission() {
        let h = harness();
        let reply = h.transport.defer();

        let mut pool = LocalPool::new();
        let vm = h.vm.clone();
        pool.spawner()
            .spawn_local(async move {
                vm.request_financing(1).await;
            })
            .unwrap();
        pool.run_until_stalled();

        assert!(h.vm.is_pending(1));
        assert!(!h.vm.is_pending(2));
        assert_eq!(block_on(h.vm.request_financing(1)), MutationOutcome::AlreadyPending);

        reply.send(ok(500, "")).unwrap();
        pool.run_until_stalled();
        assert!(!h.vm.is_pending(1));
        assert_eq!(h.transport.request_count(), 1);
    }

    #[test]
    fn declined_confirmation_sends_nothing() {
        let h = harness_with_confirm(Rc::new(|prompt: &str| {
            assert_eq!(prompt, CONFIRM_FINANCING_PROMPT);
            false
        }));
        assert_eq!(block_on(h.vm.request_financing(1)), MutationOutcome::Cancelled);
        assert_eq!(h.transport.request_count(), 0);
    }

    #[test]
    fn disposed_view_does_not_receive_late_results() {
        let h = harness();
        let calls = Rc::new(Cell::new(0));
        {
            let calls = calls.clone();
            h.vm.subscribe(move || calls.set(calls.get() + 1));
        }
        let reply = h.transport.defer();

        let mut pool = LocalPool::new();
        let vm = h.vm.clone();
        pool.spawner()
            .spawn_local(async move {
                vm.request_financing(1).await;
            })
            .unwrap();
        pool.run_until_stalled();
        let calls_before = calls.get();

        h.vm.dispose();
        reply.send(ok(400, r#"{"detail":"nope"}"#)).unwrap();
        pool.run_until_stalled();

        assert_eq!(calls.get(), calls_before);
        assert_eq!(h.vm.mutation_error(1), None);
        assert!(!h.vm.is_alive());
    }
}
