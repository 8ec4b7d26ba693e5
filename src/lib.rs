//! Workspace-level test package for sideband.
//!
//! This crate exists so the workspace root can host cross-crate
//! integration tests (see `tests/`). The published crates are
//! `sideband-protocol`, `sideband-router`, and `sideband-console`.
