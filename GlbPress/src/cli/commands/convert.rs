//! CLI command for single-file conversion

use std::path::Path;
use std::time::Instant;

use super::OutputFormat;
use crate::cli::progress::{phase_emoji, print_done, print_step};
use crate::convert::{ConvertPhase, convert_file_to_gltf, convert_file_with_progress};
use crate::normalize::NormalizeOptions;
use crate::package::GlbPackager;

pub fn execute(
    source: &Path,
    destination: Option<&Path>,
    format: OutputFormat,
    resource_dir: Option<&Path>,
    lenient: bool,
) -> anyhow::Result<()> {
    if !source.is_file() {
        anyhow::bail!("Source file not found: {}", source.display());
    }

    if format == OutputFormat::Gltf && resource_dir.is_some() {
        anyhow::bail!("--resource-dir only applies to GLB output; .gltf keeps buffer URIs as-is");
    }

    let output = destination.map_or_else(
        || source.with_extension(format.extension()),
        Path::to_path_buf,
    );
    if output == source {
        anyhow::bail!("Destination would overwrite the source: {}", output.display());
    }

    let options = if lenient {
        NormalizeOptions::lenient()
    } else {
        NormalizeOptions::default()
    };

    let started = Instant::now();
    let report = match format {
        OutputFormat::Glb => {
            let resource_dir = resource_dir
                .map(Path::to_path_buf)
                .or_else(|| source.parent().map(Path::to_path_buf))
                .unwrap_or_default();
            convert_file_with_progress(
                source,
                &output,
                &options,
                &resource_dir,
                &GlbPackager,
                &|progress| {
                    if progress.phase != ConvertPhase::Complete {
                        print_step(
                            progress.current,
                            progress.total,
                            phase_emoji(progress.phase),
                            &format!("{}...", progress.phase.as_str()),
                        );
                    }
                },
            )?
        }
        OutputFormat::Gltf => convert_file_to_gltf(source, &output, &options)?,
    };

    for unresolved in &report.unresolved {
        println!("  warning: {unresolved}");
    }
    println!("Wrote {}", report.output.display());
    print_done(started.elapsed());

    Ok(())
}
