use clap::{Parser, Subcommand};
use stitch_common::db::core::{Board, PLACEMENT_VALUE, Placement};
use stitch_common::util::config::Config;
use stitch_common::util::generator::{self, GeneratorParams};
use stitch_common::util::params::{FillParams, FillParamsBuilder};
use stitch_common::util::{check, logger, visualization};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about = "Via stitching fill for PCB copper zones", long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the target-net zones of a board with vias.
    Fill {
        /// Board description; overrides `input.board_file`.
        #[arg(long)]
        board: Option<String>,
        /// Target net; overrides `fill.net_name`.
        #[arg(long)]
        net: Option<String>,
        /// Log the grid status matrix after every pass.
        #[arg(long)]
        debug: bool,
    },
    /// Write a random board description for benchmarking.
    Generate {
        #[arg(long, default_value_t = 100.0)]
        width: f64,
        #[arg(long, default_value_t = 80.0)]
        height: f64,
        #[arg(long, default_value_t = 200)]
        pads: usize,
        #[arg(long, default_value_t = 100)]
        tracks: usize,
        #[arg(long, default_value_t = 10)]
        texts: usize,
        #[arg(long, default_value_t = 3)]
        keepouts: usize,
        #[arg(long, default_value = "inputs/random_board.toml")]
        output: String,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        let config_str = std::fs::read_to_string(&args.config)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };

    let command = args.command.unwrap_or(Commands::Fill {
        board: None,
        net: None,
        debug: false,
    });

    match command {
        Commands::Generate {
            width,
            height,
            pads,
            tracks,
            texts,
            keepouts,
            output,
        } => {
            prepare_output_dir(&output)?;
            let params = GeneratorParams {
                width,
                height,
                pads,
                tracks,
                texts,
                keepouts,
            };
            generator::generate_random_board(&output, &params)?;
            log::info!("Generated: {}", output);
        }
        Commands::Fill { board, net, debug } => {
            let board_file = board.unwrap_or_else(|| config.input.board_file.clone());
            if !Path::new(&board_file).exists() {
                return Err(anyhow::anyhow!("Input board file missing: {}", board_file));
            }
            prepare_output_dir(&config.input.output_file)?;
            prepare_output_dir(&config.input.image_file)?;

            let mut builder = FillParamsBuilder::from(&config.fill);
            if let Some(net) = net {
                builder = builder.net_name(net);
            }
            if debug {
                builder = builder.debug(true);
            }

            if run_fill(&config, &board_file, builder).is_err() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn prepare_output_dir(path_str: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path_str).parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            log::info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn run_fill(config: &Config, board_file: &str, builder: FillParamsBuilder) -> anyhow::Result<()> {
    let mut board = Board::new();
    log::info!("Parsing board: {}", board_file);
    stitch_common::db::parser::board::parse(&mut board, board_file).map_err(|e| {
        log::error!("Invalid board description in '{}': {:#}", board_file, e);
        e
    })?;

    let params = builder.build(&board).map_err(|e| {
        log::error!("{}", e);
        anyhow::anyhow!(e)
    })?;

    let placements = stitch_fill::run(&board, &params).map_err(|e| {
        log::error!("Fill failed: {}", e);
        anyhow::anyhow!(e)
    })?;

    if let Err(e) = check::run_fill_check(&board, &params, &placements) {
        log::error!("{}", e);
        return Err(anyhow::anyhow!(e));
    }

    log::info!("Generating fill visualization...");
    if let Err(e) = visualization::draw_fill(
        &board,
        &placements,
        &config.input.image_file,
        1000,
        1000,
    ) {
        log::warn!("Could not write {}: {}", config.input.image_file, e);
    }

    log::info!("Writing {} vias to {}", placements.len(), config.input.output_file);
    save_placements(&placements, &params, &config.input.output_file).map_err(|e| {
        log::error!("Could not write {}: {}", config.input.output_file, e);
        e
    })?;

    Ok(())
}

fn save_placements(
    placements: &[Placement],
    params: &FillParams,
    filename: &str,
) -> std::io::Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(filename)?);
    write_placements(&mut file, placements, params)?;
    file.flush()
}

/// One line per via: `reference x y size drill net value`.
fn write_placements<W: Write>(
    out: &mut W,
    placements: &[Placement],
    params: &FillParams,
) -> std::io::Result<()> {
    writeln!(out, "# via fill on net {}", params.net_name())?;
    writeln!(out, "# clearance {} mm, value {}", params.clearance(), PLACEMENT_VALUE)?;
    writeln!(out, "# reference x y size drill net value")?;
    for via in placements {
        writeln!(
            out,
            "{} {:.4} {:.4} {} {} {} {}",
            via.label, via.position.x, via.position.y, via.size, via.drill, via.net_name, via.value
        )?;
    }
    Ok(())
}
