use crate::viewmodels::query_cache::{QueryKey, BOOKINGS};

/// Escrituras contra la API y las colecciones que dejan obsoletas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    RequestFinancing,
}

impl Mutation {
    /// Claves a invalidar (y refetchear) cuando la mutación tiene éxito
    pub fn invalidates(&self) -> &'static [QueryKey] {
        match self {
            Mutation::RequestFinancing => &[BOOKINGS],
        }
    }
}
