// ============================================================================
// SESSION STORE - Única fuente del token de sesión (persistido en localStorage)
// ============================================================================

use std::rc::Rc;
use crate::models::session::Session;
use crate::services::api_client::TokenProvider;
use crate::state::reactivity::{ReactiveState, SubscriptionId};
use crate::utils::storage::KeyValueStorage;

pub struct SessionStore {
    state: ReactiveState<Session>,
    storage: Rc<dyn KeyValueStorage>,
    storage_key: String,
}

impl SessionStore {
    /// Lee el token persistido y construye el estado inicial.
    /// La app crea una sola instancia al arrancar (ver `App::new`).
    pub fn initialize(storage: Rc<dyn KeyValueStorage>, storage_key: &str) -> Self {
        let token = match storage.get_item(storage_key) {
            Ok(token) => token,
            Err(e) => {
                log::warn!("⚠️ [SESSION] No se pudo leer el token persistido: {}", e);
                None
            }
        };

        let session = Session::with_token(token);
        if session.is_authenticated() {
            log::info!("💾 [SESSION] Sesión restaurada desde storage");
        } else {
            log::info!("ℹ️ [SESSION] Sin sesión guardada");
        }

        Self {
            state: ReactiveState::new(session),
            storage,
            storage_key: storage_key.to_string(),
        }
    }

    /// Guarda el token y marca la sesión como autenticada.
    /// Un fallo del storage no impide actualizar el estado en memoria.
    pub fn login(&self, token: &str) {
        if token.is_empty() {
            log::warn!("⚠️ [SESSION] login() con token vacío ignorado");
            return;
        }

        if let Err(e) = self.storage.set_item(&self.storage_key, token) {
            log::warn!("⚠️ [SESSION] Error persistiendo token: {}", e);
        }

        self.state.set(Session::with_token(Some(token.to_string())));
        log::info!("✅ [SESSION] Sesión iniciada");
    }

    /// Borra el token. Idempotente: sin sesión no notifica a nadie.
    pub fn logout(&self) {
        if let Err(e) = self.storage.remove_item(&self.storage_key) {
            log::warn!("⚠️ [SESSION] Error eliminando token persistido: {}", e);
        }

        if !self.state.get().is_authenticated() {
            return;
        }

        self.state.set(Session::anonymous());
        log::info!("👋 [SESSION] Logout");
    }

    pub fn get_token(&self) -> Option<String> {
        self.state.get().token().map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.get().is_authenticated()
    }

    pub fn session(&self) -> Rc<Session> {
        self.state.get()
    }

    /// Suscribirse a cambios de sesión (guard de rutas, header...)
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Session) + 'static,
    {
        self.state.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.state.unsubscribe(id);
    }
}

impl TokenProvider for SessionStore {
    fn current_token(&self) -> Option<String> {
        self.get_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;
    use std::cell::{Cell, RefCell};

    const KEY: &str = "leva_token";

    /// Storage que falla en todas las escrituras
    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, String> {
            Err("quota".to_string())
        }
        fn set_item(&self, _key: &str, _value: &str) -> Result<(), String> {
            Err("quota".to_string())
        }
        fn remove_item(&self, _key: &str) -> Result<(), String> {
            Err("quota".to_string())
        }
    }

    #[test]
    fn login_then_get_token_round_trips_for_various_tokens() {
        for token in ["a", "eyJhbGciOiJIUzI1NiJ9.e30.sig", "tok en/with+chars=="] {
            let store = SessionStore::initialize(Rc::new(MemoryStorage::new()), KEY);
            store.login(token);
            assert_eq!(store.get_token().as_deref(), Some(token));
            assert!(store.is_authenticated());
        }
    }

    #[test]
    fn restart_reproduces_persisted_state() {
        let storage = Rc::new(MemoryStorage::new());
        let store = SessionStore::initialize(storage.clone(), KEY);
        store.login("jwt-123");
        drop(store);

        let restarted = SessionStore::initialize(storage.clone(), KEY);
        assert_eq!(restarted.get_token().as_deref(), Some("jwt-123"));
        assert!(restarted.is_authenticated());
        assert_eq!(storage.get_item(KEY).unwrap().as_deref(), Some("jwt-123"));
    }

    #[test]
    fn initialize_with_empty_persisted_value_is_anonymous() {
        let store = SessionStore::initialize(Rc::new(MemoryStorage::with_item(KEY, "")), KEY);
        assert_eq!(store.get_token(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn logout_clears_memory_and_storage_and_is_idempotent() {
        let storage = Rc::new(MemoryStorage::new());
        let store = SessionStore::initialize(storage.clone(), KEY);
        store.login("jwt");

        store.logout();
        assert_eq!(store.get_token(), None);
        assert!(!store.is_authenticated());
        assert_eq!(storage.get_item(KEY).unwrap(), None);

        store.logout();
        assert_eq!(store.get_token(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn mutators_notify_subscribers_with_new_session() {
        let store = SessionStore::initialize(Rc::new(MemoryStorage::new()), KEY);
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            store.subscribe(move |s| seen.borrow_mut().push(s.is_authenticated()));
        }

        store.login("jwt");
        store.logout();
        // logout sin sesión: no-op
        store.logout();
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn empty_token_is_rejected() {
        let store = SessionStore::initialize(Rc::new(MemoryStorage::new()), KEY);
        let calls = Rc::new(Cell::new(0));
        {
            let calls = calls.clone();
            store.subscribe(move |_| calls.set(calls.get() + 1));
        }
        store.login("");
        assert!(!store.is_authenticated());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn storage_failure_is_best_effort() {
        let store = SessionStore::initialize(Rc::new(BrokenStorage), KEY);
        assert!(!store.is_authenticated());

        store.login("jwt");
        assert_eq!(store.current_token().as_deref(), Some("jwt"));

        store.logout();
        assert_eq!(store.current_token(), None);
    }
}
