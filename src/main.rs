use env_logger::Env;
use todo_jsonl::cli::{error_style, format_error, run};
use todo_jsonl::error::TodoError;

fn main() {
    env_logger::Builder::from_env(Env::default().filter_or("TODO_LOG", "warn")).init();

    #[cfg(windows)]
    let _ = enable_ansi_support::enable_ansi_support();

    if let Err(e) = run() {
        let style = error_style();
        if let Some(user_error) = e.downcast_ref::<TodoError>() {
            eprintln!("{}", format_error(user_error, style));
            std::process::exit(1);
        }

        // Internal error (I/O, corrupt store)
        eprintln!("{}", format_error(&format!("Internal error: {}", e), style));
        let mut source = e.source();
        if source.is_some() {
            eprintln!("\nCaused by:");
            let mut indent = 1;
            while let Some(err) = source {
                eprintln!("{:indent$}  {}", "", err);
                source = err.source();
                indent += 1;
            }
        }
        std::process::exit(2);
    }
}
