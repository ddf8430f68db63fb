// GigFlow - marketplace hire core
//
// This crate provides the backend core for hiring a freelancer on a gig:
// the race-safe hire transition, the storage interfaces it relies on, and
// real-time delivery of hire notifications to the winning freelancer.
//
// Gig/bid CRUD, registration, and session issuance are external collaborators;
// this crate defines and implements the narrow seams they plug into.

pub mod config;
pub mod domains;
pub mod notify;
pub mod server;

pub use config::*;
