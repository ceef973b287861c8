use std::process::ExitCode;

use vuur_driver::{Argument, Parser};

fn main() -> ExitCode {
    let argument = Argument::parse();
    vuur_driver::run(argument)
}
