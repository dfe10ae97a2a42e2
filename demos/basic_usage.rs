// ============================================================================
// Basic Usage Example
// ============================================================================

use rpn_engine::numeric::config;
use rpn_engine::prelude::*;
use std::sync::Arc;

fn show(evaluator: &Evaluator, text: &str) {
    let program = match parse_program(standard_registry(), text) {
        Ok(program) => program,
        Err(err) => {
            println!("{:<32} parse error: {}", text, err);
            return;
        },
    };

    let evaluation = evaluator.run(&program);
    let rendered: Vec<String> = evaluation.stack.iter().map(ToString::to_string).collect();
    let status = match &evaluation.outcome {
        Outcome::Completed => "ok".to_string(),
        Outcome::Halted(reason) => format!("halted at item {}", reason.position()),
    };
    println!("{:<32} [{}] ({})", text, rendered.join(", "), status);
}

fn main() {
    #[cfg(feature = "logging")]
    rpn_engine::utils::init_logging();

    println!("=== RPN Engine Example ===\n");

    let evaluator = Evaluator::new().with_event_handler(Arc::new(LoggingEventHandler));

    println!("Arithmetic:");
    show(&evaluator, "3 4 +");
    show(&evaluator, "3 4 + 5 *");
    show(&evaluator, "2 3 /");
    show(&evaluator, "200 15 %");

    println!("\nScientific:");
    show(&evaluator, "2 10 ^");
    show(&evaluator, "2 SQRT");
    show(&evaluator, "100 LOG");

    println!("\nFinancial:");
    show(&evaluator, "1000 0.05 10 FV");
    show(&evaluator, "200000 0.005 360 PMT");
    show(&evaluator, "1000 0.05 0.06 10 BOND");
    show(&evaluator, "200000 1199.1010503055 360 RATE");

    println!("\nFailures:");
    show(&evaluator, "10 0 / 5 +");
    show(&evaluator, "5 +");
    show(&evaluator, "-4 SQRT");
    show(&evaluator, "1 2 MOD");

    println!("\nPrecision:");
    for precision in [2, 6, 20] {
        let previous = config::update(|cfg| cfg.with_precision(precision));
        match previous {
            Ok(_) => {
                print!("precision {:>2}: ", precision);
                show(&evaluator, "1 7 /");
            },
            Err(err) => println!("precision {}: {}", precision, err),
        }
    }
    if let Err(err) = config::replace(NumericConfig::DEFAULT) {
        println!("could not restore configuration: {}", err);
    }

    println!("\nOperations:");
    for op in standard_registry().operations() {
        let info = op.info();
        println!("  {:<8} {:<22} {}", info.symbol, info.name, info.example);
    }
}
