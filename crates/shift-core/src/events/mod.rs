//! Domain events emitted when domain state changes

mod domain_event;

pub use domain_event::DomainEvent;
