fn main() {
    riverlog_cli::logging::init_logging();
    let code = riverlog_cli::run(
        std::env::args(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    std::process::exit(code);
}
