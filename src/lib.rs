//! Workspace-level integration tests for PiCalc-rs live in `tests/`.
