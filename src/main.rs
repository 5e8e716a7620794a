use log::error;

use std::process;

const EXIT_FAILURE: i32 = 1;

fn main() {
    quad_demo::logging::init(Default::default());

    if let Err(err) = quad_demo::run(quad_demo::Config::default()) {
        error!("{}", err);
        process::exit(EXIT_FAILURE);
    }
}
