use clap::{Parser, Subcommand};
use log::info;
use patternlab::loader::{annotation_source, read_build_state, read_pattern_data, viewer_builder};
use patternlab::{DataExporter, PanelEvent, PatternLabError, RecordingFrameHost, ViewRequest};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, about = "Pattern Lab front-end data export and pattern info panels")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write patternlab-data.js and annotations.js for every output target
    Export {
        /// Build state JSON (`config`, `patternTypes`, `patternPaths`, ...)
        state: PathBuf,

        /// Directory output targets and source paths are resolved against
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Render the info panels of one pattern from an exported public dir
    Panels {
        /// Build state JSON
        state: PathBuf,

        /// Partial of the pattern to show, e.g. `atoms-logo`
        partial: String,

        /// JSON data of the pattern, as embedded in its rendered page
        #[arg(long)]
        pattern_data: PathBuf,

        /// Public directory the pattern files were exported to
        #[arg(long)]
        public_dir: PathBuf,

        /// Directory source paths are resolved against
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Render for the style guide modal instead of the pattern page
        #[arg(long)]
        modal: bool,

        /// Seconds a single panel may take
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), PatternLabError> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Export { state, root } => {
            let state = read_build_state(&state)?;
            let exporter = DataExporter::new(annotation_source(&state, &root)?).with_root(&root);
            let report = exporter.export(&state)?;
            for path in &report.written {
                println!("{}", path.display());
            }
        }
        Command::Panels {
            state,
            partial,
            pattern_data,
            public_dir,
            root,
            modal,
            timeout,
        } => {
            let state = read_build_state(&state)?;
            let mut pattern = read_pattern_data(&pattern_data)?;
            pattern.pattern_partial = partial.into();

            let annotations = annotation_source(&state, &root)?;
            let frame = Arc::new(RecordingFrameHost::new());
            let (tx, rx) = async_channel::unbounded();
            let viewer = viewer_builder(&state, &public_dir, annotations.as_ref())?
                .with_frame_host(frame.clone())
                .with_events(tx)
                .with_fetch_timeout(Duration::from_secs(timeout))
                .build()?;

            let rendered = viewer
                .show(ViewRequest::new(pattern).with_iframe_passback(modal))
                .await?;
            while let Ok(event) = rx.try_recv() {
                if let PanelEvent::Completed {
                    panel,
                    collected,
                    expected,
                    ..
                } = event
                {
                    info!("Panel '{}' ready ({}/{})", panel, collected, expected);
                }
            }

            println!("{}", rendered.html);
            for (message, origin) in frame.posted() {
                println!("postMessage({}, \"{}\")", message, origin);
            }
        }
    }
    Ok(())
}
