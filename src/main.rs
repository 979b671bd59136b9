mod logging;

use std::env;
use std::process;

use flow::{SchemaPolicy, Topology};

const DEFAULT_DELIMITER: &str = ",";

fn main() {
    logging::init();

    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| {
        eprintln!("Usage: tupleflow <FILE> [DELIMITER] [--strict|--skip]");
        process::exit(1);
    });
    let mut delimiter = DEFAULT_DELIMITER.to_string();
    let mut policy = SchemaPolicy::Permissive;
    for arg in args {
        match arg.as_str() {
            "--strict" => policy = SchemaPolicy::FailFast,
            "--skip" => policy = SchemaPolicy::SkipRecord,
            other => delimiter = other.to_string(),
        }
    }

    if let Err(e) = run(&path, &delimiter, policy) {
        tracing::error!(error = %e, "topology failed");
        eprintln!("tupleflow: {e}");
        process::exit(1);
    }
}

fn run(path: &str, delimiter: &str, policy: SchemaPolicy) -> Result<(), flow::FlowError> {
    let topology = Topology::new();
    topology
        .new_stream_from_file(path)?
        .extract_with(delimiter, policy)?
        .pfprint()?;
    topology.start()
}
