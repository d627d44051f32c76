use crate::cli::Cli;
use crate::progress::IndicatifReporter;
use eyre::{Result, WrapErr};
use progcp_core::{copy_with_progress, CopyConfig, CopySummary, NoProgress, ProgressReporter};

pub fn run_copy(cli: &Cli) -> Result<()> {
    let config = CopyConfig {
        chunk_size: cli.chunk_size,
    };
    log::debug!("chunk size {}", config.chunk_size);

    let mut reporter: Box<dyn ProgressReporter> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(IndicatifReporter::new())
    };

    let summary = copy_with_progress(&cli.source, &cli.destination, &config, reporter.as_mut())
        .wrap_err_with(|| {
            format!(
                "failed to copy {} into {}",
                cli.source.display(),
                cli.destination.display()
            )
        })?;

    if !cli.quiet {
        println!("{}", summary_line(&summary));
    }
    Ok(())
}

fn summary_line(summary: &CopySummary) -> String {
    format!(
        "Copied {} file(s), {} in {:.2?} ({}/s)",
        summary.files_copied,
        format_bytes(summary.bytes_copied),
        summary.duration,
        format_bytes(summary.throughput() as u64)
    )
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0usize;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use progcp_core::{ChunkSize, CopyKind};
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn format_bytes_scales_binary_units() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.50 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.00 GiB");
    }

    #[test]
    fn summary_line_reports_files_and_bytes() {
        let mut summary = CopySummary::new(CopyKind::Directory, 2048);
        summary.add_file(1024);
        summary.add_file(1024);
        summary.duration = Duration::from_secs(1);
        let line = summary_line(&summary);
        assert!(line.starts_with("Copied 2 file(s), 2.00 KiB in "), "{line}");
        assert!(line.ends_with("(2.00 KiB/s)"), "{line}");
    }

    #[test]
    fn run_copy_quiet_copies_tree() -> Result<()> {
        let tmp = tempdir()?;
        let src = tmp.path().join("src");
        let dest = tmp.path().join("dest");
        std::fs::create_dir_all(src.join("sub"))?;
        std::fs::create_dir(&dest)?;
        std::fs::write(src.join("sub/hello.txt"), b"hello")?;

        let cli = Cli {
            source: src,
            destination: dest.clone(),
            chunk_size: ChunkSize::default(),
            quiet: true,
            verbose: 0,
        };
        run_copy(&cli)?;

        assert_eq!(std::fs::read(dest.join("src/sub/hello.txt"))?, b"hello");
        Ok(())
    }

    #[test]
    fn run_copy_wraps_errors_with_paths() {
        let tmp = tempdir().expect("tempdir");
        let cli = Cli {
            source: tmp.path().join("missing"),
            destination: tmp.path().to_path_buf(),
            chunk_size: ChunkSize::default(),
            quiet: true,
            verbose: 0,
        };
        let err = run_copy(&cli).unwrap_err();
        assert!(err.to_string().starts_with("failed to copy "));
        let core = err
            .downcast_ref::<progcp_core::CopyError>()
            .expect("core error in chain");
        assert_eq!(core.kind(), progcp_core::CopyErrorKind::InvalidSource);
    }
}
