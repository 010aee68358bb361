pub mod beliefs;
pub mod engine;
pub mod filters;
pub mod game;
pub mod save;
pub mod solver;
pub mod suggest;

/// dimensional analysis types
type Count = u8;
type Position = usize;
type Entropy = f32;
type Weight = f32;

// candidate sets are bitstrings over the value set
const MAX_VALUES: usize = 64;
// hidden-subset enumeration depth, overridable per game
const SUBSET_DEPTH: usize = 4;
// global solver wall-clock allowance, overridable per game
const SOLVER_BUDGET_MS: u64 = 2_000;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// initialize logging
pub fn init() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
