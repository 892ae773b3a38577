use std::process::ExitCode;

use bento::{
    logging, run_session, EditorConfig, EditorSession, ExitFlag, ProcessTerminal, SignalWake,
};

fn main() -> ExitCode {
    let config = EditorConfig::from_env();
    if let Err(err) = logging::init(&config) {
        eprintln!("bento: {err}");
    }

    let exit = ExitFlag::new();
    let _signals = match exit.register_signals() {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("bento: {err}");
            return ExitCode::FAILURE;
        }
    };

    let wake = match SignalWake::register() {
        Ok(wake) => wake,
        Err(err) => {
            eprintln!("bento: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut terminal = ProcessTerminal::new().with_signal_wake(wake);
    let mut session = EditorSession::new();
    match run_session(&mut terminal, &mut session, &exit, &config.output_path) {
        Ok(report) => {
            if let Some(err) = report.save_error {
                eprintln!("bento: {err}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "session failed");
            eprintln!("bento: {err}");
            ExitCode::FAILURE
        }
    }
}
