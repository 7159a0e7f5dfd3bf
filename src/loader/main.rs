// This is free and unencumbered software released into the public domain.

#[cfg(not(feature = "std"))]
compile_error!("asimov-overlay-loader requires the 'std' feature");

use asimov_overlay_module::{
    cli,
    shared::{
        DirAssetStore, Frame, JsonMetadata, NativeRuntime, OverlayConfig, OverlayError,
        OverlayPipeline, Packet, ProcessingEngine, RuntimeConfig, SidePacketSet, side_packet,
    },
};
use asimov_module::SysexitsError::{self, *};
use clap::Parser;
use clientele::StandardOptions;
use std::{
    borrow::Cow,
    error::Error as StdError,
    path::PathBuf,
    sync::{Arc, OnceLock},
};

#[derive(Debug, Parser)]
struct Options {
    #[clap(flatten)]
    flags: StandardOptions,

    /// Directory holding the bundled assets
    #[arg(long, value_name = "DIR", default_value = "assets")]
    assets: PathBuf,

    /// JSON deployment descriptor with the overlay metadata
    #[arg(long, value_name = "FILE", default_value = "manifest.json")]
    manifest: PathBuf,

    #[arg(long, value_name = "PATH")]
    obj_texture: Option<String>,

    #[arg(long, value_name = "PATH")]
    obj_model: Option<String>,

    #[arg(long, value_name = "PATH")]
    box_texture: Option<String>,

    #[arg(long, value_name = "PATH")]
    box_model: Option<String>,

    /// Native library to load before preparing the graph (repeatable)
    #[arg(long = "library", value_name = "NAME")]
    libraries: Vec<String>,

    #[arg(
        value_name = "FORMAT",
        short = 'o',
        long = "output",
        value_enum,
        default_value = "text"
    )]
    output: OutputFormat,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Jsonl,
}

/// Stands in for the graph: accepts the side packets and never renders.
#[derive(Debug, Default)]
struct InspectEngine {
    packets: OnceLock<Arc<SidePacketSet>>,
}

impl dogma::Named for InspectEngine {
    fn name(&self) -> Cow<'_, str> {
        "inspect".into()
    }
}

impl ProcessingEngine for InspectEngine {
    fn set_input_side_packets(&self, packets: Arc<SidePacketSet>) -> Result<(), OverlayError> {
        self.packets
            .set(packets)
            .map_err(|_| OverlayError::other("side packets delivered twice"))
    }

    fn start(&self) -> Result<(), OverlayError> {
        Ok(())
    }

    fn process_frame(&self, _frame: Frame) -> Result<(), OverlayError> {
        Ok(())
    }
}

pub fn main() -> Result<SysexitsError, Box<dyn StdError>> {
    asimov_module::dotenv().ok();
    let args = asimov_module::args_os()?;
    let options = Options::parse_from(args);

    if options.flags.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(EX_OK);
    }

    if options.flags.license {
        print!("{}", include_str!("../../UNLICENSE"));
        return Ok(EX_OK);
    }

    #[cfg(feature = "tracing")]
    asimov_module::init_tracing_subscriber(&options.flags).expect("failed to initialize logging");

    let exit_code = match run_loader(&options) {
        Ok(()) => EX_OK,
        Err(err) => cli::handle_error(&err, &options.flags),
    };

    Ok(exit_code)
}

fn run_loader(options: &Options) -> Result<(), OverlayError> {
    let runtime_config = options
        .libraries
        .iter()
        .fold(RuntimeConfig::new(), |c, name| c.with_library(name.as_str()));
    let runtime = NativeRuntime::initialize(&runtime_config)?;

    let defaults = OverlayConfig::default();
    let config = OverlayConfig::default()
        .with_obj_asset(
            options.obj_texture.clone().unwrap_or(defaults.obj_texture),
            options.obj_model.clone().unwrap_or(defaults.obj_model),
        )
        .with_box_asset(
            options.box_texture.clone().unwrap_or(defaults.box_texture),
            options.box_model.clone().unwrap_or(defaults.box_model),
        );

    cli::info_user(
        &options.flags,
        &format!(
            "loading assets from {} with descriptor {}",
            options.assets.display(),
            options.manifest.display()
        ),
    );

    let assets = DirAssetStore::new(&options.assets);
    let metadata = JsonMetadata::open(&options.manifest)?;
    let engine = Arc::new(InspectEngine::default());
    let pipeline = OverlayPipeline::create(runtime, engine, &assets, &metadata, config)?;

    let packets = pipeline.side_packets();
    let transformation = packets.get(side_packet::MODEL_TRANSFORMATION);
    if transformation.and_then(Packet::as_floats).is_some_and(<[f32]>::is_empty) {
        cli::warn_user(&options.flags, "modelTransformation is empty");
    }

    match options.output {
        OutputFormat::Text => {
            for line in cli::describe_side_packets(packets) {
                println!("{line}");
            }
        },
        OutputFormat::Jsonl => {
            for (key, packet) in packets.iter() {
                println!("{}", cli::packet_to_json(key, packet));
            }
        },
    }

    Ok(())
}
