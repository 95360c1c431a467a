//! Integration tests for scope configuration

mod mutable_store;
mod populate_cli;
mod scope_tree;
