//! First-run bootstrap for the user story backend.
//!
//! - [`domain`]: first-run gate, permission policy, reconciliation, seeding
//! - [`outbound`]: PostgreSQL and in-memory adapters for the domain ports
//! - [`startup`]: settings and wiring used by the `userstory-bootstrap` binary

pub mod domain;
pub mod outbound;
pub mod startup;
