//! Workspace-level integration tests for disksched live in `tests/`.
