//! Integration tests for the #[entity] and #[state_enum] macros.
