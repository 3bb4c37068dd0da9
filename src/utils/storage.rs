// ============================================================================
// STORAGE - Almacenamiento clave/valor duradero (localStorage en el navegador)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use web_sys::{window, Storage};

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Almacenamiento clave/valor de strings crudos
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str) -> Result<(), String>;
}

/// localStorage del navegador
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
        storage
            .get_item(key)
            .map_err(|_| "Error leyendo de localStorage".to_string())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
        storage
            .set_item(key, value)
            .map_err(|_| "Error guardando en localStorage".to_string())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
        storage
            .remove_item(key)
            .map_err(|_| "Error eliminando de localStorage".to_string())
    }
}

/// Almacenamiento en memoria (tests y entornos sin localStorage)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.items.borrow_mut().insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("leva_token").unwrap(), None);

        storage.set_item("leva_token", "abc").unwrap();
        assert_eq!(storage.get_item("leva_token").unwrap().as_deref(), Some("abc"));

        storage.remove_item("leva_token").unwrap();
        assert_eq!(storage.get_item("leva_token").unwrap(), None);
        // quitar una clave inexistente no es error
        storage.remove_item("leva_token").unwrap();
    }
}
