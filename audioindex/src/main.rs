mod cli;

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use audioindex_core::{plan_recordings, run_with_progress, Config, ProgressEvent};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::cli::build_cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = build_cli().get_matches();

    let input_dir = matches
        .get_one::<PathBuf>("input_dir")
        .expect("defaulted argument");
    if !input_dir.is_dir() {
        return Err(anyhow!(
            "input directory does not exist: {}",
            input_dir.display()
        ));
    }

    let dataset_name = matches
        .get_one::<String>("dataset-name")
        .cloned()
        .expect("defaulted argument");
    let extension = matches
        .get_one::<String>("extension")
        .cloned()
        .expect("defaulted argument");
    let tool = matches
        .get_one::<String>("tool")
        .cloned()
        .expect("defaulted argument");
    let dry_run = matches.get_flag("dry-run");

    let mut builder = Config::builder(input_dir)
        .dataset_name(dataset_name)
        .extension(extension)
        .tool(tool);
    if let Some(output) = matches.get_one::<PathBuf>("output") {
        builder = builder.output_path(output.clone());
    }
    let config = builder.build().with_context(|| {
        format!(
            "failed to create configuration for '{}'",
            input_dir.display()
        )
    })?;

    if dry_run {
        let plan = plan_recordings(&config).with_context(|| {
            format!(
                "failed to list recordings in '{}'",
                config.input_dir.display()
            )
        })?;

        if plan.is_empty() {
            println!("Dry run: no recordings would be inventoried.");
        } else {
            println!("Dry run: would inventory {} recording(s):", plan.len());
            for file_name in plan {
                println!("  {file_name}");
            }
        }

        return Ok(());
    }

    let progress = ProgressBar::new(0);
    progress.set_draw_target(ProgressDrawTarget::stderr());

    let bar_style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar());

    let progress_handle = progress.clone();
    let result = run_with_progress(config, move |event| match event {
        ProgressEvent::Start { total_files } => {
            progress_handle.set_style(bar_style.clone());
            progress_handle.set_length(total_files as u64);
        }
        ProgressEvent::Advance {
            file_name,
            processed,
        } => {
            progress_handle.set_position(processed as u64);
            progress_handle.set_message(file_name);
        }
        ProgressEvent::Finish => {
            progress_handle.set_message(String::from("Completed"));
        }
    })
    .with_context(|| format!("failed to inventory '{}'", input_dir.display()));

    progress.finish_and_clear();

    let summary = result?;
    println!(
        "Inventoried {} recording(s) into '{}'",
        summary.recordings,
        summary.output_path.display()
    );

    Ok(())
}
