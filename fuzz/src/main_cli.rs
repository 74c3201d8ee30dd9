//! Replay crashes outside of the fuzzer: `main_cli [FILE]...`, or input on stdin.
use std::io::Read;

use testcase::run;

fn main() {
    let paths: Vec<_> = std::env::args_os().skip(1).collect();
    if paths.is_empty() {
        let mut input = Vec::new();
        std::io::stdin().lock().read_to_end(&mut input).unwrap();
        run(&input);
    }

    for path in paths {
        eprintln!("running {}", path.to_string_lossy());
        run(&std::fs::read(&path).unwrap());
    }
}
