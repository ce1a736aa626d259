//! End-to-end tests for rusty-links live under `tests/`.
