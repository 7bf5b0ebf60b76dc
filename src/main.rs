//! BeeVolve CLI - Evolve an ordering of a URL list.

use std::sync::Arc;

use clap::Parser;

use beevolve::{
    EvolutionError, ItemCatalog,
    cli::Args,
    compute::evolution::{EvolutionEngine, best_run, run_batch},
    report::{ReportError, RunLog, export_history},
    schema::{EvolutionConfig, EvolutionResult},
    source::{ItemSource, UrlListFile},
};

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    if args.example_config {
        print_example_config();
        return;
    }

    let input = args.input_file().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let config = args.resolve().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let catalog = UrlListFile::new(input)
        .load(config.population.strand_size)
        .unwrap_or_else(|e| {
            eprintln!("Error loading {}: {}", input.display(), e);
            std::process::exit(1);
        });
    let catalog = Arc::new(catalog);

    let mut run_log = RunLog::new(args.outfile.as_ref(), args.verbose).unwrap_or_else(|e| {
        eprintln!("Error opening run log: {}", e);
        std::process::exit(1);
    });
    if let Err(e) = run_log.parameters(&config) {
        eprintln!("Error writing run log: {}", e);
        std::process::exit(1);
    }

    let results = if args.execs > 1 {
        run_batch(&config, catalog, args.execs)
    } else {
        run_single(&config, catalog, &mut run_log)
    };
    let results = results.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = write_report(&args, &results, run_log) {
        eprintln!("Error writing report: {}", e);
        std::process::exit(1);
    }
}

fn run_single(
    config: &EvolutionConfig,
    catalog: Arc<ItemCatalog>,
    run_log: &mut RunLog,
) -> Result<Vec<EvolutionResult>, EvolutionError> {
    let mut engine = EvolutionEngine::new(config.clone(), catalog)?;
    let result = engine.run_with_callback(|progress| {
        if let Err(e) = run_log.progress(progress) {
            log::warn!("Run log write failed: {e}");
        }
    });
    Ok(vec![result])
}

fn write_report(
    args: &Args,
    results: &[EvolutionResult],
    mut run_log: RunLog,
) -> Result<(), ReportError> {
    if results.len() > 1 {
        for (run, result) in results.iter().enumerate() {
            run_log.line(format_args!(
                "[r] Run {}: seed {}, best {}",
                run + 1,
                result.stats.random_seed,
                result.best.fitness
            ))?;
        }
    }

    let best = best_run(results).map(|index| &results[index]);
    if let Some(result) = best {
        run_log.summary(result)?;
        if args.verbose {
            run_log.statistics(result)?;
        }
    }
    run_log.finish()?;

    if let Some(path) = &args.stats_json {
        export_history(path, results)?;
        println!("Statistics written to {}", path.display());
    }

    if let Some(result) = best
        && !args.verbose
    {
        println!(
            "Best fitness {} after {} generations (initial best {})",
            result.best.fitness, result.stats.generations, result.stats.initial_best_fitness
        );
    }
    Ok(())
}

fn print_example_config() {
    match serde_json::to_string_pretty(&EvolutionConfig::default()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error encoding example config: {}", e);
            std::process::exit(1);
        }
    }
}
