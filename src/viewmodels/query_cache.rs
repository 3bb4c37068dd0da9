// ============================================================================
// QUERY CACHE - Colecciones descargadas, indexadas por clave de query
// ============================================================================
// Cada entrada se reemplaza entera (nunca se edita en sitio). Para una misma
// clave solo aterriza el resultado del fetch iniciado más recientemente:
// `begin_fetch` entrega un ticket con generación y `complete` descarta los
// tickets viejos.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use chrono::{DateTime, Utc};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey(pub &'static str);

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Lista de bookings de la organización
pub const BOOKINGS: QueryKey = QueryKey("bookings");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug)]
pub struct CacheEntry<T> {
    pub status: QueryStatus,
    /// Último snapshot correcto (se conserva durante loading y tras un error)
    pub data: Option<Rc<Vec<T>>>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
    /// Marcada por una mutación; pendiente de refetch
    pub stale: bool,
}

impl<T> CacheEntry<T> {
    fn replaced(&self) -> Self {
        Self {
            status: self.status,
            data: self.data.clone(),
            fetched_at: self.fetched_at,
            error: self.error.clone(),
            stale: self.stale,
        }
    }
}

/// Permiso para escribir el resultado de un fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    key: QueryKey,
    generation: u64,
}

impl FetchTicket {
    pub fn key(&self) -> QueryKey {
        self.key
    }
}

type Listener = Rc<dyn Fn(QueryKey)>;

pub struct QueryCache<T> {
    entries: RefCell<HashMap<QueryKey, Rc<CacheEntry<T>>>>,
    generations: RefCell<HashMap<QueryKey, u64>>,
    listeners: RefCell<Vec<Listener>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            generations: RefCell::new(HashMap::new()),
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl<T> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, key: QueryKey) -> Option<Rc<CacheEntry<T>>> {
        self.entries.borrow().get(&key).cloned()
    }

    pub fn has_entry(&self, key: QueryKey) -> bool {
        self.entries.borrow().contains_key(&key)
    }

    pub fn status(&self, key: QueryKey) -> QueryStatus {
        self.entry(key).map(|e| e.status).unwrap_or(QueryStatus::Idle)
    }

    pub fn is_stale(&self, key: QueryKey) -> bool {
        self.entry(key).map(|e| e.stale).unwrap_or(false)
    }

    /// Pasa la clave a loading y devuelve el ticket del nuevo fetch.
    /// Cualquier ticket anterior de esa clave deja de ser válido.
    pub fn begin_fetch(&self, key: QueryKey) -> FetchTicket {
        let generation = {
            let mut generations = self.generations.borrow_mut();
            let generation = generations.entry(key).or_insert(0);
            *generation += 1;
            *generation
        };

        let previous = self.entry(key);
        let entry = CacheEntry {
            status: QueryStatus::Loading,
            data: previous.as_ref().and_then(|e| e.data.clone()),
            fetched_at: previous.as_ref().and_then(|e| e.fetched_at),
            error: None,
            stale: previous.map(|e| e.stale).unwrap_or(false),
        };
        self.replace(key, entry);

        FetchTicket { key, generation }
    }

    /// Aplica el resultado si el ticket sigue siendo el último. Devuelve si se aplicó.
    pub fn complete(&self, ticket: FetchTicket, result: Result<Vec<T>, String>) -> bool {
        let latest = self.generations.borrow().get(&ticket.key).copied();
        if latest != Some(ticket.generation) {
            log::info!(
                "⏭️ [CACHE] Resultado descartado para '{}' (generación {} superada)",
                ticket.key,
                ticket.generation
            );
            return false;
        }

        let previous = self.entry(ticket.key);
        let entry = match result {
            Ok(items) => CacheEntry {
                status: QueryStatus::Success,
                data: Some(Rc::new(items)),
                fetched_at: Some(Utc::now()),
                error: None,
                stale: false,
            },
            Err(message) => CacheEntry {
                status: QueryStatus::Error,
                data: previous.as_ref().and_then(|e| e.data.clone()),
                fetched_at: previous.as_ref().and_then(|e| e.fetched_at),
                error: Some(message),
                stale: previous.map(|e| e.stale).unwrap_or(false),
            },
        };
        self.replace(ticket.key, entry);
        true
    }

    /// Marca como stale las claves presentes y devuelve las que hay que refetchear
    pub fn invalidate(&self, keys: &[QueryKey]) -> Vec<QueryKey> {
        let mut to_refetch = Vec::new();
        for key in keys {
            if let Some(current) = self.entry(*key) {
                let mut entry = current.replaced();
                entry.stale = true;
                self.replace(*key, entry);
                to_refetch.push(*key);
            }
        }
        if !to_refetch.is_empty() {
            log::info!("♻️ [CACHE] Invalidadas: {:?}", to_refetch);
        }
        to_refetch
    }

    pub fn remove(&self, key: QueryKey) {
        let removed = self.entries.borrow_mut().remove(&key).is_some();
        // Un fetch en vuelo para esta clave ya no debe aterrizar
        if let Some(generation) = self.generations.borrow_mut().get_mut(&key) {
            *generation += 1;
        }
        if removed {
            self.notify(key);
        }
    }

    /// Vacía todo (p.ej. en logout, los datos son de otra organización)
    pub fn clear(&self) {
        let keys: Vec<QueryKey> = self.entries.borrow().keys().copied().collect();
        for key in keys {
            self.remove(key);
        }
    }

    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(QueryKey) + 'static,
    {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn replace(&self, key: QueryKey, entry: CacheEntry<T>) {
        self.entries.borrow_mut().insert(key, Rc::new(entry));
        self.notify(key);
    }

    fn notify(&self, key: QueryKey) {
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(key);
        }
    }
}
