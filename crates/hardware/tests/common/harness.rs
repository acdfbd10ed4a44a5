use std::sync::Once;

use rspsim_core::Pipeline;
use rspsim_core::common::constants::DEFAULT_MAX_CYCLES;
use rspsim_core::core::InstructionMemory;

static TRACING: Once = Once::new();

/// Routes pipeline trace events to the test output. Installs the subscriber
/// on the first call only.
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .init();
    });
}

/// A pipeline over the whole of `words`.
pub fn pipeline(words: &[u32]) -> Pipeline<'_> {
    init_tracing();
    Pipeline::new(InstructionMemory::whole(words))
}

/// Steps a pipeline over the whole of `words` until the terminator retires.
///
/// Panics if it has not retired within the default cycle cap.
pub fn run_to_break(words: &[u32]) -> Pipeline<'_> {
    let mut p = pipeline(words);
    while !p.broken {
        assert!(
            p.stats.cycles < DEFAULT_MAX_CYCLES,
            "terminator never retired"
        );
        p.step();
    }
    p
}
