// ============================================================================
// AUTH VIEWMODELS - Formularios de login y registro
// ============================================================================
// Validación local -> llamada a la API -> SessionStore / navegación.
// Nunca vacían los campos: en error el usuario corrige y reintenta.
// ============================================================================

use std::rc::Rc;
use crate::error::ClientError;
use crate::models::{LoginRequest, RegisterRequest};
use crate::router::{Navigator, Route};
use crate::services::{perform_login, register_user, ApiClient};
use crate::state::{ReactiveState, SessionStore, SubscriptionId};
use crate::utils::scheduler::Scheduler;

pub const LOGIN_FALLBACK_MESSAGE: &str = "Incorrect email or password.";
pub const REGISTER_FALLBACK_MESSAGE: &str = "Registration failed. Please try again.";
pub const REGISTER_SUCCESS_MESSAGE: &str = "Registration successful! Redirecting to login...";

/// Estado visible de un formulario
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormStatus {
    pub busy: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl FormStatus {
    fn busy() -> Self {
        Self { busy: true, ..Self::default() }
    }

    fn failed(message: String) -> Self {
        Self { error: Some(message), ..Self::default() }
    }
}

fn required(field: &'static str, value: &str) -> Result<(), ClientError> {
    if value.is_empty() {
        Err(ClientError::Validation { field })
    } else {
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ClientError> {
        required("Email", &self.username)?;
        required("Password", &self.password)
    }

    fn to_request(&self) -> LoginRequest {
        LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterForm {
    pub organization_name: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ClientError> {
        required("Organization Name", &self.organization_name)?;
        required("Full Name", &self.full_name)?;
        required("Email", &self.email)?;
        required("Password", &self.password)
    }

    fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            full_name: self.full_name.clone(),
            organization_name: self.organization_name.clone(),
        }
    }
}

pub struct LoginViewModel {
    api: ApiClient,
    session: Rc<SessionStore>,
    navigator: Rc<dyn Navigator>,
    status: ReactiveState<FormStatus>,
}

impl LoginViewModel {
    pub fn new(api: ApiClient, session: Rc<SessionStore>, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            api,
            session,
            navigator,
            status: ReactiveState::default(),
        }
    }

    pub fn status(&self) -> Rc<FormStatus> {
        self.status.get()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FormStatus) + 'static,
    {
        self.status.subscribe(callback)
    }

    pub async fn submit(&self, form: &LoginForm) {
        if self.status.get().busy {
            return;
        }
        if let Err(e) = form.validate() {
            self.status.set(FormStatus::failed(e.to_string()));
            return;
        }

        self.status.set(FormStatus::busy());

        let result = perform_login(&self.api, &form.to_request())
            .await
            .map_err(ClientError::from)
            .and_then(|token| {
                if token.access_token.is_empty() {
                    Err(ClientError::Decode("empty access_token".to_string()))
                } else {
                    Ok(token)
                }
            });

        match result {
            Ok(token) => {
                self.session.login(&token.access_token);
                self.status.set(FormStatus::default());
                log::info!("✅ [LOGIN] Login exitoso");
                self.navigator.navigate(Route::Dashboard);
            }
            Err(err) => {
                log::error!("❌ [LOGIN] Login fallido: {}", err);
                self.status.set(FormStatus::failed(err.user_message(LOGIN_FALLBACK_MESSAGE)));
            }
        }
    }
}

pub struct RegisterViewModel {
    api: ApiClient,
    navigator: Rc<dyn Navigator>,
    scheduler: Rc<dyn Scheduler>,
    redirect_delay_ms: u32,
    status: ReactiveState<FormStatus>,
}

impl RegisterViewModel {
    pub fn new(
        api: ApiClient,
        navigator: Rc<dyn Navigator>,
        scheduler: Rc<dyn Scheduler>,
        redirect_delay_ms: u32,
    ) -> Self {
        Self {
            api,
            navigator,
            scheduler,
            redirect_delay_ms,
            status: ReactiveState::default(),
        }
    }

    pub fn status(&self) -> Rc<FormStatus> {
        self.status.get()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FormStatus) + 'static,
    {
        self.status.subscribe(callback)
    }

    /// Volver al estado inicial (al salir de la pantalla tras un registro)
    pub fn reset(&self) {
        if *self.status.get() != FormStatus::default() {
            self.status.set(FormStatus::default());
        }
    }

    /// En éxito muestra el acuse y navega al login tras `redirect_delay_ms`
    pub async fn submit(&self, form: &RegisterForm) {
        if self.status.get().busy {
            return;
        }
        if let Err(e) = form.validate() {
            self.status.set(FormStatus::failed(e.to_string()));
            return;
        }

        self.status.set(FormStatus::busy());

        match register_user(&self.api, &form.to_request()).await {
            Ok(user) => {
                log::info!("✅ [REGISTER] Usuario creado (organización {})", user.organization_id);
                self.status.set(FormStatus {
                    success: Some(REGISTER_SUCCESS_MESSAGE.to_string()),
                    ..FormStatus::default()
                });
                let navigator = self.navigator.clone();
                self.scheduler.schedule(
                    self.redirect_delay_ms,
                    Box::new(move || navigator.navigate(Route::Login)),
                );
            }
            Err(e) => {
                let err = ClientError::from(e);
                log::error!("❌ [REGISTER] Registro fallido: {}", err);
                self.status.set(FormStatus::failed(err.user_message(REGISTER_FALLBACK_MESSAGE)));
            }
        }
    }
}
