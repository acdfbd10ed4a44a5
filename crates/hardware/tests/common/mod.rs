/// Fluent window builder.
pub mod builder;

/// Run helpers and logging setup.
pub mod harness;
