use std::env;
use std::process;
use tausi::TausiCli;

fn main() {
    let args: Vec<String> = env::args().collect();
    let cli = TausiCli::new();

    if let Err(e) = cli.run(args) {
        // Help and version requests surface as clap errors and exit cleanly
        if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
            clap_err.exit();
        }
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
