//! Load a circuit file, set inputs, evaluate and print every output.
//!
//! Usage: `evaluate_file <circuit.json> [ID=0|1]...`

use logicsim::{Bit, Circuit, ComponentId, IdStrategy, Resolution};
use std::{env, fs, process};

fn parse_assignment(arg: &str) -> Result<(ComponentId, Bit), String> {
    let (id, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected ID=0|1, got '{}'", arg))?;
    let bit = value
        .parse::<u8>()
        .ok()
        .and_then(Bit::from_u8)
        .ok_or_else(|| format!("input value must be 0 or 1, got '{}'", value))?;
    Ok((ComponentId::from(id), bit))
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = args.first().ok_or("missing circuit file")?;
    let json = fs::read_to_string(path)?;
    let mut circuit = Circuit::from_json(&json, IdStrategy::default())?;

    for arg in &args[1..] {
        let (id, bit) = parse_assignment(arg)?;
        circuit.set_input_value(&id, bit)?;
    }

    let report = logicsim::evaluate(&mut circuit);
    for (id, resolution) in report.outputs() {
        match resolution {
            Resolution::Value(bit) => println!("{} = {}", id, bit),
            Resolution::Undetermined => println!("{} = undetermined", id),
            Resolution::Cycle(entry) => println!("{} = cycle through {}", id, entry),
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
