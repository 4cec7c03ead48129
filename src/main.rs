use std::path::PathBuf;

use clap::Parser;
use gridmaze::{
    error::AppError,
    logging, render,
    session::MazeSession,
    settings::{Settings, SolverKind},
};
use gridmaze_core::dims::Dims;

#[derive(Parser, Debug)]
#[clap(version, about, name = "gridmaze")]
struct Args {
    #[clap(short, long, help = "Maze size preset from the settings file")]
    preset: Option<String>,
    #[clap(long, requires = "height", help = "Maze width, overrides the preset")]
    width: Option<i32>,
    #[clap(long, requires = "width", help = "Maze height, overrides the preset")]
    height: Option<i32>,
    #[clap(short, long, help = "Seed for reproducible mazes")]
    seed: Option<u64>,
    #[clap(long, help = "Start cell as x,y [default: 0,0]")]
    start: Option<Dims>,
    #[clap(long, help = "End cell as x,y [default: bottom-right corner]")]
    end: Option<Dims>,
    #[clap(long, value_enum, help = "Path finding algorithm")]
    solver: Option<SolverKind>,
    #[clap(long, action, help = "Disable colored output")]
    no_color: bool,
    #[clap(long, action, help = "Only print statistics, not the maze")]
    no_render: bool,
    #[clap(short, long, help = "Use this settings file instead of the default one")]
    config: Option<PathBuf>,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "More logging, repeatable")]
    verbose: u8,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    let settings_path = args.config.clone().unwrap_or_else(Settings::default_path);

    if args.show_config_path {
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    if args.reset_config {
        Settings::reset_config(&settings_path)?;
        return Ok(());
    }

    let settings = Settings::load(&settings_path)?;

    let size = match (args.width, args.height, &args.preset) {
        (Some(width), Some(height), _) => Dims(width, height),
        (_, _, Some(title)) => settings
            .find_preset(title)
            .ok_or_else(|| AppError::UnknownPreset(title.clone()))?
            .size(),
        _ => settings.get_default_preset().size(),
    };

    let session = MazeSession::generate(size, args.seed, settings.get_corner_fixup())?;
    let start = args.start.unwrap_or(Dims::ZERO);
    let end = args.end.unwrap_or_else(|| MazeSession::default_end(size));
    let session = session.with_endpoints(start, end);

    let solver = args.solver.unwrap_or_else(|| settings.get_solver());
    let outcome = session.solve_with(solver.finder().as_ref());

    if !args.no_render {
        let color = settings.get_color() && !args.no_color;
        print!(
            "{}",
            render::render(session.grid(), &outcome.path, start, end, color)
        );
    }

    let stats = &outcome.stats;
    println!("Size:       {}x{}", size.0, size.1);
    println!("Seed:       {}", session.seed());
    if outcome.is_solved() {
        println!("Path:       {} cells", stats.path_length);
    } else {
        println!("Path:       none, {} is unreachable from {}", end, start);
    }
    println!("Dead ends:  {}", stats.dead_end_count);
    println!("Difficulty: {}", stats.difficulty);
    println!("Solved in:  {:.3} ms", stats.solve_time_ms);

    Ok(())
}
