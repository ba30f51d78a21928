use std::io::BufRead;
use crate::Executor;

#[derive(Debug,Clone,Copy,PartialEq)]
pub enum AppMode {
    ExitHandler,
    NoExitHandler,
}

impl AppMode {
    pub fn to_option_flag(&self) -> &'static str {
        match self {
            AppMode::ExitHandler => "--exit-handler",
            AppMode::NoExitHandler => "--no-exit-handler",
        }
    }

    pub fn from_option_flag(s: &str) -> Option<Self> {
        match s {
            "--exit-handler" => Some(AppMode::ExitHandler),
            "--no-exit-handler" => Some(AppMode::NoExitHandler),
            _ => None,
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn execute_with_args() {
    init_tracing();

    let flag = std::env::args().nth(1);
    let mode = flag.as_deref().and_then(AppMode::from_option_flag);

    match mode {
        Some(mode) => execute(mode),
        None => {
            eprintln!("usage: app --exit-handler|--no-exit-handler");
            std::process::exit(2);
        },
    }
}

pub fn execute(mode: AppMode) {
    if mode == AppMode::ExitHandler {
        temporarily::install_exit_handler();
    }
    tracing::info!(mode = ?mode, "Ready");

    repl(Executor::new());
}

pub fn repl(mut executor: Executor) {
    let stdin = std::io::stdin();
    let mut handle = stdin.lock();
    let mut buf = String::new();

    loop {
        match handle.read_line(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(_) => {},
        }

        match executor.exec_str(&buf) {
            Ok(rep) => {
                println!("{}", rep.to_json_string());
                buf.clear();
            },
            Err(e) => {
                eprintln!("{}", e);
                break;
            },
        }
    }
}
