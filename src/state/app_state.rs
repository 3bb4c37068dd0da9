// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================
// Un único SessionStore, un único ApiClient y una única caché de queries
// compartidos por todas las pantallas. Los ViewModels de formularios viven
// toda la app; el de la lista de bookings se crea al entrar al dashboard y
// se descarta (dispose) al salir.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::config::CONFIG;
use crate::models::Booking;
use crate::router::{HashNavigator, Navigator, Route};
use crate::services::ApiClient;
use crate::state::SessionStore;
use crate::utils::scheduler::{Scheduler, TimeoutScheduler};
use crate::utils::storage::BrowserStorage;
use crate::viewmodels::booking_list_viewmodel::Confirm;
use crate::viewmodels::{
    BookingListViewModel, LoginForm, LoginViewModel, QueryCache, RegisterForm, RegisterViewModel,
};

type Listener = Rc<dyn Fn()>;

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub session: Rc<SessionStore>,
    pub api: ApiClient,
    pub bookings: Rc<QueryCache<Booking>>,
    pub navigator: Rc<dyn Navigator>,
    pub scheduler: Rc<dyn Scheduler>,

    // Formularios (sobreviven a los re-renders)
    pub login: Rc<LoginViewModel>,
    pub login_form: Rc<RefCell<LoginForm>>,
    pub register: Rc<RegisterViewModel>,
    pub register_form: Rc<RefCell<RegisterForm>>,

    booking_list: Rc<RefCell<Option<Rc<BookingListViewModel>>>>,
    confirm: Confirm,
    on_change: Rc<RefCell<Option<Listener>>>,
}

impl AppState {
    /// Estado real del navegador: localStorage, location.hash, setTimeout y window.confirm
    pub fn new() -> Self {
        let session = Rc::new(SessionStore::initialize(
            Rc::new(BrowserStorage),
            &CONFIG.token_storage_key,
        ));
        let api = ApiClient::new(session.clone());
        let confirm: Confirm = Rc::new(|prompt: &str| {
            web_sys::window()
                .and_then(|w| w.confirm_with_message(prompt).ok())
                .unwrap_or(false)
        });
        Self::with_parts(
            session,
            api,
            Rc::new(HashNavigator),
            Rc::new(TimeoutScheduler),
            confirm,
            CONFIG.register_redirect_delay_ms,
        )
    }

    pub fn with_parts(
        session: Rc<SessionStore>,
        api: ApiClient,
        navigator: Rc<dyn Navigator>,
        scheduler: Rc<dyn Scheduler>,
        confirm: Confirm,
        register_redirect_delay_ms: u32,
    ) -> Self {
        let bookings: Rc<QueryCache<Booking>> = Rc::new(QueryCache::new());

        // Datos de un usuario no deben verse tras su logout
        {
            let bookings = bookings.clone();
            session.subscribe(move |s| {
                if !s.is_authenticated() {
                    log::info!("🧹 [STATE] Sesión cerrada, limpiando caché de queries");
                    bookings.clear();
                }
            });
        }

        let login = Rc::new(LoginViewModel::new(api.clone(), session.clone(), navigator.clone()));
        let register = Rc::new(RegisterViewModel::new(
            api.clone(),
            navigator.clone(),
            scheduler.clone(),
            register_redirect_delay_ms,
        ));

        Self {
            session,
            api,
            bookings,
            navigator,
            scheduler,
            login,
            login_form: Rc::new(RefCell::new(LoginForm::default())),
            register,
            register_form: Rc::new(RefCell::new(RegisterForm::default())),
            booking_list: Rc::new(RefCell::new(None)),
            confirm,
            on_change: Rc::new(RefCell::new(None)),
        }
    }

    /// Registrar el callback de re-render. Solo se llama una vez al arrancar.
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        let callback: Listener = Rc::new(callback);
        *self.on_change.borrow_mut() = Some(callback.clone());

        let cb = callback.clone();
        self.session.subscribe(move |_| cb());
        let cb = callback.clone();
        self.login.subscribe(move |_| cb());
        let cb = callback.clone();
        self.register.subscribe(move |_| cb());
        let cb = callback.clone();
        self.bookings.subscribe(move |_| cb());

        if let Some(vm) = self.booking_list.borrow().as_ref() {
            vm.subscribe(move || callback());
        }
    }

    pub fn booking_list(&self) -> Option<Rc<BookingListViewModel>> {
        self.booking_list.borrow().clone()
    }

    /// Montar/desmontar el ViewModel de la lista según la ruta.
    /// Devuelve el ViewModel solo cuando se acaba de crear (hay que lanzar load()).
    pub fn enter_route(&self, route: Route) -> Option<Rc<BookingListViewModel>> {
        if route != Route::Register && self.register.status().success.is_some() {
            self.register.reset();
            *self.register_form.borrow_mut() = RegisterForm::default();
        }
        if route == Route::Dashboard && *self.login_form.borrow() != LoginForm::default() {
            *self.login_form.borrow_mut() = LoginForm::default();
        }

        if route != Route::Dashboard {
            if let Some(vm) = self.booking_list.borrow_mut().take() {
                log::info!("📤 [STATE] Saliendo del dashboard, desmontando lista");
                vm.dispose();
            }
            return None;
        }

        if self.booking_list.borrow().is_some() {
            return None;
        }

        let vm = Rc::new(BookingListViewModel::new(
            self.api.clone(),
            self.session.clone(),
            self.bookings.clone(),
            self.navigator.clone(),
            self.confirm.clone(),
        ));
        if let Some(callback) = self.on_change.borrow().clone() {
            vm.subscribe(move || callback());
        }
        *self.booking_list.borrow_mut() = Some(vm.clone());
        Some(vm)
    }

    /// Logout explícito desde la cabecera del dashboard
    pub fn logout(&self) {
        log::info!("👋 [STATE] Logout solicitado");
        self.session.logout();
        *self.login_form.borrow_mut() = LoginForm::default();
        self.navigator.navigate(Route::Login);
    }
}
