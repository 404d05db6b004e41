//! Reviews domain layer: entities and the reputation reduction

pub mod entities;
