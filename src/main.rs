mod commands;
mod config;
mod image;
mod loader;
mod manifest;
mod options;
mod sheet;

use std::process;

use structopt::StructOpt;

use crate::options::Options;

fn main() {
    env_logger::init();

    let options = Options::from_args();

    if let Err(err) = commands::bundle(options) {
        eprintln!("Error: {:?}", err);
        process::exit(1);
    }
}
