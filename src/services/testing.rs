// Fakes de transporte y token para los tests (solo cfg(test))

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use async_trait::async_trait;
use futures::channel::oneshot;
use crate::services::api_client::TokenProvider;
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport, TransportError};

pub type Reply = Result<HttpResponse, TransportError>;

enum Scripted {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

/// Transporte con respuestas guionizadas, consumidas en orden de llamada
#[derive(Default)]
pub struct FakeTransport {
    requests: RefCell<Vec<HttpRequest>>,
    script: RefCell<VecDeque<Scripted>>,
}

impl FakeTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.script.borrow_mut().push_back(Scripted::Ready(Ok(HttpResponse {
            status,
            body: body.to_string(),
        })));
    }

    pub fn fail(&self, message: &str) {
        self.script
            .borrow_mut()
            .push_back(Scripted::Ready(Err(TransportError::Network(message.to_string()))));
    }

    /// La respuesta llega cuando el test la envía por el Sender
    pub fn defer(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.script.borrow_mut().push_back(Scripted::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

pub fn ok(status: u16, body: &str) -> Reply {
    Ok(HttpResponse { status, body: body.to_string() })
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Reply {
        self.requests.borrow_mut().push(request);
        let next = self.script.borrow_mut().pop_front();
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Network("reply dropped".to_string()))),
            None => Err(TransportError::Network("no scripted response".to_string())),
        }
    }
}

/// Token fijo (modificable) en lugar del SessionStore
pub struct FixedToken(RefCell<Option<String>>);

impl FixedToken {
    pub fn new(token: Option<&str>) -> Self {
        Self(RefCell::new(token.map(str::to_string)))
    }

    pub fn set(&self, token: Option<&str>) {
        *self.0.borrow_mut() = token.map(str::to_string);
    }
}

impl TokenProvider for FixedToken {
    fn current_token(&self) -> Option<String> {
        self.0.borrow().clone()
    }
}
