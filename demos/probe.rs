use padbind::backends::hid::HidBackend;
use padbind::{ControllerManager, Options, Resolver};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(&path).expect("load options"),
        None => Options::default(),
    };

    let backend = HidBackend::new().expect("init hidapi");
    let found = backend.probe(&options);
    println!("Identified {} device(s)", found.len());
    for (identity, info) in &found {
        println!("- {} at {}", identity, info.path().to_string_lossy());
    }

    let mut mgr = ControllerManager::new(Resolver::new(backend));
    for (identity, info) in &found {
        if let Err(e) = mgr.attach(identity, info, &options) {
            eprintln!("{e}");
        }
    }
    if mgr.is_empty() {
        return;
    }

    loop {
        for (id, ev) in mgr.poll_events() {
            println!("{id}: {:?}", ev.kind);
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}
