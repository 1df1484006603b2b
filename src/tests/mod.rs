//! Host-target tests for the dialog, panel and page wiring, run against the
//! in-memory document in [`fake_dom`].

pub mod fake_dom;

mod modal_prop_test;
