mod args;
mod commands;

use todo_core::config::TodoConfig;
use todo_core::store::JsonFileStore;

use crate::args::Args;

fn main() {
    // logs go to stderr, the report goes to stdout
    todo_core::logging::init(true);

    let args = Args::parse_normalized();
    let trace_id = todo_core::logging::new_trace_id();
    let span = tracing::info_span!("cli", trace_id = %trace_id);
    let _guard = span.enter();

    if let Err(e) = run(&args) {
        eprintln!("✗ Error: {} (TraceID: {})", e, trace_id);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let data_file = match &args.data {
        Some(path) => path.clone(),
        None => TodoConfig::load().data_file().into(),
    };
    tracing::debug!(file = %data_file.display(), "Using data file");

    let store = JsonFileStore::new(data_file);
    let stdout = std::io::stdout();
    commands::run(args, &store, &mut stdout.lock())
}
