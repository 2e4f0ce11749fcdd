use logicsim::{Bit, ComponentKind, Position, TruthTable, Workbench};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Building a half adder");
    let mut bench = Workbench::default();
    bench.set_description("Half adder: SUM = A xor B, CARRY = A and B");

    let a = bench.add_component(ComponentKind::Input, Some(Position::new(30.0, 40.0)));
    let b = bench.add_component(ComponentKind::Input, Some(Position::new(30.0, 140.0)));
    let xor = bench.add_component(ComponentKind::Xor, Some(Position::new(160.0, 40.0)));
    let and = bench.add_component(ComponentKind::And, Some(Position::new(160.0, 140.0)));
    let sum = bench.add_component(ComponentKind::Output, Some(Position::new(290.0, 40.0)));
    let carry = bench.add_component(ComponentKind::Output, Some(Position::new(290.0, 140.0)));

    for gate in [&xor, &and] {
        bench.connect(a.output("out"), gate.input("in1"))?;
        bench.connect(b.output("out"), gate.input("in2"))?;
    }
    bench.connect(xor.output("out"), sum.input("in"))?;
    bench.connect(and.output("out"), carry.input("in"))?;

    bench.set_input_value(&a, Bit::One)?;
    bench.set_input_value(&b, Bit::One)?;
    let report = bench.run_simulation();
    for (id, resolution) in report.outputs() {
        println!("  {} -> {:?}", id, resolution);
    }

    println!("\nTruth table:");
    print!("{}", bench.truth_table()?);

    println!("\nXOR gate:");
    if let Some(table) = TruthTable::for_kind(ComponentKind::Xor) {
        print!("{}", table);
    }

    println!("\nCanonical JSON:\n{}", bench.circuit().to_json_pretty()?);
    Ok(())
}
