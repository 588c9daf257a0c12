use matrixflow_steps::config::WorkflowConfig;
use matrixflow_steps::workflow::{run_all, WorkflowOptions};

fn main() {
    env_logger::init();

    // Small workload so the example finishes in a couple of seconds
    let config = WorkflowConfig {
        project_local_staging_dir: "example_staging".into(),
    };
    let options = WorkflowOptions {
        n: 8,
        m: 16,
        seed: 1,
        clean: true,
        ..WorkflowOptions::default()
    };

    match run_all(&config, &options) {
        Ok(summary) => {
            for step in &summary.steps {
                println!("{:<14} {:>4} items in {:.3}s", step.step, step.items, step.seconds);
            }
            println!(
                "Report written to {}/report.html",
                config.project_local_staging_dir.display()
            );
        }
        Err(e) => {
            eprintln!("Workflow failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
