//! Minimal mitigation check
//!
//! Usage: `vkquality-minimal <brand> <device> <soc> <api_level> <patch>`
//! Prints `mitigated` or `unaffected`.

use std::env;
use std::process;
use vkquality::DeviceSnapshot;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 5 {
        eprintln!("usage: vkquality-minimal <brand> <device> <soc> <api_level> <patch>");
        process::exit(2);
    }

    let api_level = match args[3].parse() {
        Ok(level) => level,
        Err(_) => {
            eprintln!("invalid api level: {}", args[3]);
            process::exit(2);
        }
    };

    let snapshot = DeviceSnapshot::from_raw(api_level, &args[0], &args[1], Some(args[2].as_str()), Some(args[4].as_str()));
    if vkquality::is_mitigated(&snapshot) {
        println!("mitigated");
        process::exit(1);
    }
    println!("unaffected");
}
