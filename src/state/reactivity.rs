// ============================================================================
// REACTIVITY - Celda de estado con subscribers (un escritor, muchos lectores)
// ============================================================================
// El valor vive en un Rc inmutable: los lectores obtienen un snapshot y los
// escritores lo reemplazan entero, nunca campo a campo.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Identificador para cancelar una suscripción
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Estado reactivo con sistema de notificaciones
pub struct ReactiveState<T> {
    value: RefCell<Rc<T>>,
    subscribers: RefCell<Vec<(SubscriptionId, Callback<T>)>>,
    next_id: Cell<u64>,
}

impl<T> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(Rc::new(value)),
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Snapshot del valor actual
    pub fn get(&self) -> Rc<T> {
        self.value.borrow().clone()
    }

    /// Reemplazar el valor y notificar
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = Rc::new(new_value);
        self.notify();
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn notify(&self) {
        // Copia de la lista: un callback puede leer, suscribirse o volver a escribir
        let snapshot = self.get();
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback(&snapshot);
        }
    }
}

impl<T: Default> Default for ReactiveState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
