//! gscvoice - List the voice lines a Budokai Tenkaichi 3 scenario uses
//!
//! This tool scans GSC scenario files for voice-line commands, resolves them
//! against the scenario's data table and writes the used and unused
//! voice-line IDs to text files.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser};
use gscvoice_core::{
    container, render_id_list, render_inline, Error, Extractor, ExtractorConfig,
    VoiceLineReport, PRESENT_FILE_NAME, UNUSED_FILE_NAME,
};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// List used and unused voice-line IDs of GSC scenario files
#[derive(Parser, Debug)]
#[command(name = "gscvoice")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: InputMode,

    /// Output directory for the voice-line lists
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Collapse repeated voice-line IDs before looking for unused ones
    #[arg(long)]
    dedupe_ids: bool,

    /// Dry run - don't write files, just show what was found
    #[arg(long)]
    dry_run: bool,

    /// Don't print the voice-line lists to the console
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputMode {
    /// Path to a single GSC file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a directory of GSC files to process
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

/// Tracks processed scenario contents so identical copies are handled once
#[derive(Default)]
struct ScenarioRegistry {
    /// Maps content hash -> first path seen with it
    seen: HashMap<String, PathBuf>,
    stats: RegistryStats,
}

#[derive(Default)]
struct RegistryStats {
    scanned: usize,
    duplicates_skipped: usize,
    rejected: usize,
    written: usize,
}

impl ScenarioRegistry {
    fn new() -> Self {
        Self::default()
    }

    /// Compute a short hash of the content (first 8 chars of blake3)
    fn content_hash(data: &[u8]) -> String {
        let hash = blake3::hash(data);
        hash.to_hex()[..8].to_string()
    }

    /// Register a scenario; returns false if identical content was already seen
    fn register(&mut self, path: &Path, data: &[u8]) -> bool {
        self.stats.scanned += 1;
        let hash = Self::content_hash(data);

        if let Some(first) = self.seen.get(&hash) {
            debug!(
                "Skipping {}: same content as {} (hash: {})",
                path.display(),
                first.display(),
                hash
            );
            self.stats.duplicates_skipped += 1;
            return false;
        }

        self.seen.insert(hash, path.to_path_buf());
        true
    }

    fn print_summary(&self) {
        info!(
            "Summary: {} scanned, {} duplicates skipped, {} rejected, {} written",
            self.stats.scanned,
            self.stats.duplicates_skipped,
            self.stats.rejected,
            self.stats.written
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    // Dispatch based on input mode
    if let Some(ref file) = cli.input.file {
        process_single_file(&cli, file)
    } else if let Some(ref directory) = cli.input.directory {
        process_directory(&cli, directory)
    } else {
        bail!("Either --file or --directory must be specified")
    }
}

fn extractor(cli: &Cli) -> Extractor {
    Extractor::with_config(ExtractorConfig::new().dedupe_identifiers(cli.dedupe_ids))
}

/// Process a single GSC file
fn process_single_file(cli: &Cli, file: &Path) -> Result<()> {
    if !file.exists() {
        bail!("Input file does not exist: {}", file.display());
    }
    if !file.is_file() {
        bail!("Input path is not a file: {}", file.display());
    }

    let data = fs::read(file)
        .with_context(|| format!("Failed to read input file: {}", file.display()))?;
    let report = extractor(cli)
        .extract(&data)
        .with_context(|| format!("Failed to extract voice lines: {}", file.display()))?;

    emit_report(cli, &report, &cli.output)
}

/// Process every GSC file under a directory
fn process_directory(cli: &Cli, directory: &Path) -> Result<()> {
    if !directory.exists() {
        bail!("Directory does not exist: {}", directory.display());
    }
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }

    info!("Scanning directory: {}", directory.display());

    let extractor = extractor(cli);
    let mut registry = ScenarioRegistry::new();

    for entry in WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        // Skip hidden files
        if path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(false)
        {
            continue;
        }

        if !has_gscf_magic(path) {
            trace!("Skipping non-GSC file: {}", path.display());
            continue;
        }

        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                continue;
            }
        };

        if !registry.register(path, &data) {
            continue;
        }

        let report = match extractor.extract(&data) {
            Ok(report) => report,
            Err(e) if e.is_recoverable() => {
                warn!("Skipping {}: {}", path.display(), e);
                registry.stats.rejected += 1;
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to process {}", path.display()))
            }
        };

        if !cli.quiet {
            println!("== {}", path.display());
        }
        emit_report(cli, &report, &output_dir_for(&cli.output, directory, path))?;
        registry.stats.written += 1;
    }

    registry.print_summary();
    Ok(())
}

/// Checks the first four bytes for the GSCF magic
fn has_gscf_magic(path: &Path) -> bool {
    let mut magic = [0u8; 4];
    fs::File::open(path)
        .and_then(|mut file| file.read_exact(&mut magic))
        .map(|()| u32::from_be_bytes(magic) == container::MAGIC)
        .unwrap_or(false)
}

/// Output directory for one file found under `root`, mirroring its relative path
fn output_dir_for(output: &Path, root: &Path, file: &Path) -> PathBuf {
    match file.strip_prefix(root) {
        Ok(relative) => output.join(relative),
        Err(_) => output.join(file.file_name().unwrap_or(file.as_os_str())),
    }
}

/// Print the lists to the console and write them to `output_dir`
fn emit_report(cli: &Cli, report: &VoiceLineReport, output_dir: &Path) -> Result<()> {
    info!(
        "{} voice lines present, {} unused ({} commands, {} distinct pointers)",
        report.present.len(),
        report.unused.len(),
        report.stats.command_matches,
        report.stats.candidate_offsets
    );

    if !cli.quiet {
        print_lists(report);
    }

    if cli.dry_run {
        println!("Would write: {}", output_dir.join(PRESENT_FILE_NAME).display());
        println!("Would write: {}", output_dir.join(UNUSED_FILE_NAME).display());
        return Ok(());
    }

    write_lists(report, output_dir)
}

fn print_lists(report: &VoiceLineReport) {
    println!("[Present Voice Lines]");
    println!("{}", render_inline(&report.present));
    println!("[Unused Voice Lines]");
    println!("{}", render_inline(&report.unused));
}

/// Write both list files, overwriting existing ones
fn write_lists(report: &VoiceLineReport, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir).map_err(|e| Error::directory_create(output_dir, e))?;

    for (name, ids) in [
        (PRESENT_FILE_NAME, &report.present),
        (UNUSED_FILE_NAME, &report.unused),
    ] {
        let path = output_dir.join(name);
        fs::write(&path, render_id_list(ids)).map_err(|e| Error::file_write(&path, e))?;
        debug!("Wrote {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gscvoice_core::ExtractStats;
    use std::ffi::OsStr;
    use tempfile::TempDir;

    fn sample_report() -> VoiceLineReport {
        VoiceLineReport {
            present: vec![10, 25],
            unused: (11..=24).collect(),
            stats: ExtractStats::default(),
        }
    }

    #[test]
    fn test_write_lists() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("nested");

        write_lists(&sample_report(), &out).unwrap();

        let present = fs::read_to_string(out.join("voices-main.txt")).unwrap();
        assert_eq!(present, "[Voice Line IDs]\n10\n25\n");

        let unused = fs::read_to_string(out.join("voices-unused.txt")).unwrap();
        let lines: Vec<&str> = unused.lines().collect();
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[0], "[Voice Line IDs]");
        assert_eq!(lines[1], "11");
        assert_eq!(lines[14], "24");
    }

    #[test]
    fn test_write_lists_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("voices-main.txt"), "stale").unwrap();

        write_lists(&sample_report(), temp_dir.path()).unwrap();

        let present = fs::read_to_string(temp_dir.path().join("voices-main.txt")).unwrap();
        assert!(present.starts_with("[Voice Line IDs]\n"));
    }

    #[test]
    fn test_write_lists_io_errors() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_lists(&sample_report(), &blocker.join("out")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::DirectoryCreate { .. })
        ));

        let out = temp_dir.path().join("out");
        fs::create_dir_all(out.join("voices-main.txt")).unwrap();
        let err = write_lists(&sample_report(), &out).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::FileWrite { .. })
        ));
    }

    #[test]
    fn test_scenario_registry_deduplication() {
        let mut registry = ScenarioRegistry::new();
        assert!(registry.register(Path::new("a/GSC"), b"GSCF same"));
        assert!(!registry.register(Path::new("b/GSC"), b"GSCF same"));
        assert!(registry.register(Path::new("c/GSC"), b"GSCF other"));

        assert_eq!(registry.stats.scanned, 3);
        assert_eq!(registry.stats.duplicates_skipped, 1);
    }

    #[test]
    fn test_content_hash() {
        let hash1 = ScenarioRegistry::content_hash(b"hello");
        let hash2 = ScenarioRegistry::content_hash(b"hello");
        let hash3 = ScenarioRegistry::content_hash(b"world");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hash1.len(), 8);
    }

    #[test]
    fn test_has_gscf_magic() {
        let temp_dir = TempDir::new().unwrap();
        let gsc = temp_dir.path().join("GSC");
        let text = temp_dir.path().join("notes.txt");
        let tiny = temp_dir.path().join("tiny");
        fs::write(&gsc, b"GSCF\x00\x00").unwrap();
        fs::write(&text, b"hello world").unwrap();
        fs::write(&tiny, b"GS").unwrap();

        assert!(has_gscf_magic(&gsc));
        assert!(!has_gscf_magic(&text));
        assert!(!has_gscf_magic(&tiny));
        assert!(!has_gscf_magic(&temp_dir.path().join("missing")));
    }

    #[test]
    fn test_output_dir_for() {
        let out = output_dir_for(
            Path::new("out"),
            Path::new("scenarios"),
            &Path::new("scenarios").join("goku").join("GSC"),
        );
        assert_eq!(out, Path::new("out").join("goku").join("GSC"));

        let flat = output_dir_for(
            Path::new("out"),
            Path::new("scenarios"),
            &Path::new("scenarios").join("goku_GSC"),
        );
        assert_ne!(out, flat);
    }

    #[test]
    fn test_invalid_container_is_rejected() {
        let cli = Cli::parse_from(["gscvoice", "--file", "GSC", "--dedupe-ids"]);
        let err = extractor(&cli)
            .extract(b"NOPE\x00\x00\x00\x00\x00\x00")
            .unwrap_err();
        assert!(matches!(err, gscvoice_core::Error::InvalidFormat { .. }));
        assert!(err.is_recoverable());
    }

    /// Header, cutscene start, two voice commands, GSDT with ids 7, 9, 12
    fn sample_container() -> Vec<u8> {
        let mut data = b"GSCF".to_vec();
        data.extend_from_slice(&[0; 12]);
        data.extend_from_slice(&[0x01, 0x00, 0x03, 0x00]);
        let commands = [
            ([0x01, 0x02, 0x43, 0x06], 2u16),
            ([0x08, 0x76, 0x02, 0x00], 0),
        ];
        for (command, pointer) in commands {
            data.extend_from_slice(&command);
            data.extend_from_slice(&[0, 0, 0, 0, 0x0A]);
            data.extend_from_slice(&pointer.to_le_bytes());
        }
        data.extend_from_slice(b"GSDT");
        data.extend_from_slice(&[0; 12]);
        for id in [7u16, 9, 12] {
            data.extend_from_slice(&id.to_le_bytes());
            data.extend_from_slice(&[0, 0]);
        }
        data.extend_from_slice(&[0xAA, 0xAA]);
        data.extend_from_slice(b"EOFC");
        let size = (data.len() - 32) as u16;
        data[8..10].copy_from_slice(&size.to_le_bytes());
        data
    }

    fn cli_for(file: &Path, output: &Path) -> Cli {
        Cli::parse_from([
            OsStr::new("gscvoice"),
            OsStr::new("--quiet"),
            OsStr::new("--file"),
            file.as_os_str(),
            OsStr::new("--output"),
            output.as_os_str(),
        ])
    }

    #[test]
    fn test_single_file_writes_lists() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("GSC");
        let out = temp_dir.path().join("out");
        fs::write(&input, sample_container()).unwrap();

        process_single_file(&cli_for(&input, &out), &input).unwrap();

        let present = fs::read_to_string(out.join("voices-main.txt")).unwrap();
        assert_eq!(present, "[Voice Line IDs]\n7\n12\n");
        let unused = fs::read_to_string(out.join("voices-unused.txt")).unwrap();
        assert_eq!(unused, "[Voice Line IDs]\n8\n9\n10\n11\n");
    }

    #[test]
    fn test_invalid_file_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("GSC");
        let out = temp_dir.path().join("out");
        let mut data = sample_container();
        data[0] = b'X';
        fs::write(&input, data).unwrap();

        let err = process_single_file(&cli_for(&input, &out), &input).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<gscvoice_core::Error>(),
            Some(gscvoice_core::Error::InvalidFormat { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_directory_skips_invalid_and_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let scenarios = temp_dir.path().join("scenarios");
        let out = temp_dir.path().join("out");
        fs::create_dir_all(scenarios.join("b")).unwrap();
        fs::write(scenarios.join("a"), sample_container()).unwrap();
        fs::write(scenarios.join("b").join("copy"), sample_container()).unwrap();
        fs::write(scenarios.join("broken"), b"GSCF but not really").unwrap();

        let cli = Cli::parse_from([
            OsStr::new("gscvoice"),
            OsStr::new("--quiet"),
            OsStr::new("--directory"),
            scenarios.as_os_str(),
            OsStr::new("--output"),
            out.as_os_str(),
        ]);
        process_directory(&cli, &scenarios).unwrap();

        let written = [out.join("a"), out.join("b").join("copy")]
            .iter()
            .filter(|dir| dir.join("voices-main.txt").exists())
            .count();
        assert_eq!(written, 1);
        assert!(!out.join("broken").exists());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
