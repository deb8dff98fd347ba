//! Semantic analysis: scopes, contract hierarchy, types, and the resolver.
//!
//! Everything here is a pure function of a `&Project` snapshot: no interior
//! mutability, no I/O, no caching across snapshots. Concurrent resolution
//! against the same snapshot is safe by construction.
//!
//! The five public resolution operations live in [`resolve`]:
//! one per reference kind (type name, var literal, member access, modifier
//! invocation, function call), each returning an ordered candidate list.
//! An empty list is the normal "unresolved" outcome, never an error.

pub mod hierarchy;
pub mod resolve;
pub mod scope;
pub mod ty;

pub use resolve::{MatchQuality, ResolvedCall};
pub use ty::Ty;

#[cfg(test)]
mod tests;
