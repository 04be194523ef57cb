//! HTTP-level tests against an in-memory store.

mod support;

mod crud;
mod service;
