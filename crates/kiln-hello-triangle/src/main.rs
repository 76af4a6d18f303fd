use kiln_engine::device::ContextHints;
use kiln_engine::harness::{Harness, HarnessConfig};
use kiln_engine::logging::{LoggingConfig, init_logging};
use kiln_engine::scenes::Triangle;

fn main() {
    init_logging(LoggingConfig::default());

    let config = HarnessConfig::default().with_hints(ContextHints::core(4, 5));
    let exit = Harness::new(config).run(Triangle::new());

    std::process::exit(exit.code());
}
