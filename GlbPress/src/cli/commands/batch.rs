//! CLI command for directory batch conversion

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::batch::{batch_convert, find_source_files};
use crate::cli::progress::{TRUCK, batch_bar, print_done};
use crate::config::{CONFIG_FILE_NAME, ConvertConfig};
use crate::normalize::ReferencePolicy;
use crate::package::GlbPackager;

/// Flags of the `batch` command; set values override the config file.
pub struct BatchArgs {
    pub config: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub extension: Option<String>,
    pub recursive: bool,
    pub lenient: bool,
    pub quiet: bool,
}

fn resolve_config(args: &BatchArgs) -> anyhow::Result<ConvertConfig> {
    let mut config = match &args.config {
        Some(path) => ConvertConfig::load(path)?,
        None if Path::new(CONFIG_FILE_NAME).is_file() => ConvertConfig::load(CONFIG_FILE_NAME)?,
        None => ConvertConfig::default(),
    };

    if let Some(input) = &args.input {
        config.input_dir.clone_from(input);
    }
    if let Some(output) = &args.output {
        config.output_dir.clone_from(output);
    }
    if let Some(extension) = &args.extension {
        config.extension = extension.trim_start_matches('.').to_string();
    }
    if args.recursive {
        config.recursive = true;
    }
    if args.lenient {
        config.references = ReferencePolicy::Lenient;
    }
    Ok(config)
}

pub fn execute(args: &BatchArgs) -> anyhow::Result<()> {
    let config = resolve_config(args)?;
    let files = find_source_files(&config.input_dir, &config.extension, config.recursive)?;

    if files.is_empty() {
        println!(
            "No .{} files found in: {}",
            config.extension,
            config.input_dir.display()
        );
        return Ok(());
    }

    println!("{}Found {} files to convert", TRUCK, files.len());

    let started = Instant::now();
    let pb = (!args.quiet).then(|| batch_bar(files.len() as u64));

    let result = batch_convert(&files, &config, &GlbPackager, |progress| {
        if let Some(pb) = &pb {
            pb.set_position(progress.current as u64);
            if let Some(ref name) = progress.current_file {
                pb.set_message(name.clone());
            }
        }
    });

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    println!();
    println!(
        "Converted {} of {} files to {}",
        result.success_count,
        files.len(),
        config.output_dir.display()
    );

    if result.fail_count > 0 {
        println!("{} files failed:", result.fail_count);
        for message in result.results.iter().filter(|m| m.starts_with("Failed")) {
            println!("  {message}");
        }
    }

    print_done(started.elapsed());
    Ok(())
}
