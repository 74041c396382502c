use clap::Parser;
use std::thread;
use std::time::Duration;
use taskpool::{FixedThreadPool, TaskHandle, ThreadPool};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(long)]
    #[clap(default_value_t = num_cpus::get())]
    #[clap(help = "Number of worker threads in the pool")]
    workers: usize,

    #[clap(long)]
    #[clap(default_value_t = 8)]
    #[clap(help = "Number of squaring tasks to submit")]
    tasks: u64,
}

fn main() {
    // set log collector
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .pretty()
        .with_max_level(Level::DEBUG)
        .init();

    info!("Logger Initialized");

    let args = Args::parse();

    info!("Application Started: Version {}", env!("CARGO_PKG_VERSION"));

    let pool = FixedThreadPool::new(args.workers).expect("Cannot build pool");
    info!("Pool running with {} workers", args.workers);

    let mut pending: Vec<(u64, TaskHandle<u64>)> = Vec::new();
    for i in 0..args.tasks {
        let handle = pool
            .submit(move || {
                info!("hello {}", i);
                thread::sleep(Duration::from_secs(1));
                info!("world {}", i);
                i * i
            })
            .expect("Pool rejected task");
        pending.push((i, handle));
    }

    // poll the handles and print each square as soon as it is ready
    while !pending.is_empty() {
        let mut still_pending = Vec::new();
        for (i, handle) in pending {
            if handle.is_ready() {
                let square = handle.take().expect("Task failed");
                println!("Result: {} * {} = {}", i, i, square);
            } else {
                still_pending.push((i, handle));
            }
        }
        pending = still_pending;

        if !pending.is_empty() {
            thread::sleep(Duration::from_millis(50));
        }
    }
}
