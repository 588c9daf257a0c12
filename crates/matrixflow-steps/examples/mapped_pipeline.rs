use matrixflow_steps::staging::StagingArea;
use matrixflow_steps::steps::{build_step, StepKind, StepParams};

fn main() {
    env_logger::init();

    // Run the mapped chain step by step instead of through the runner,
    // the way a scheduler driving individual stages would.
    let staging = StagingArea::new("example_staging_mapped");
    let params = StepParams {
        n: 8,
        m: 16,
        seed: 1,
        ..StepParams::default()
    };

    for kind in [StepKind::MappedRaw, StepKind::MappedInvert, StepKind::MappedSum] {
        let step = build_step(kind, params.clone());
        match step.run(&staging) {
            Ok(manifest) => {
                println!("{} staged {} files", step.name(), manifest.len());
            }
            Err(e) => {
                eprintln!("{} failed: {:#}", step.name(), e);
                std::process::exit(1);
            }
        }
    }
}
