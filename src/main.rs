use bombbuster::beliefs::call::Call;
use bombbuster::engine::config::Config;
use bombbuster::engine::engine::Engine;
use bombbuster::engine::error::Error;
use bombbuster::engine::event::Event;
use bombbuster::game::player::Player;
use bombbuster::game::value::Value;
use bombbuster::save::snapshot::Snapshot;
use bombbuster::suggest;
use clap::Parser;
use dialoguer::Input;
use dialoguer::Select;

#[derive(Parser)]
#[command(about = "inference engine for the BombBuster deduction game")]
enum Command {
    /// play out a scripted three-player game and watch the domains shrink
    Demo,
    /// drive a live table, entering public events as they happen
    Play {
        /// JSON config path; the demo table when omitted
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },
    /// rebuild a snapshot and print the table
    Replay { snapshot: std::path::PathBuf },
}

fn main() -> anyhow::Result<()> {
    bombbuster::init();
    match Command::parse() {
        Command::Demo => demo(),
        Command::Play { config } => play(config),
        Command::Replay { snapshot } => replay(&snapshot),
    }
}

fn demo() -> anyhow::Result<()> {
    let mut engine = Engine::new(Config::demo())?;
    let script = vec![
        Event::Call(Call {
            caller: Player::from(0),
            target: Player::from(2),
            position: 0,
            value: Value::from(1u8),
            hit: true,
            shown: Some(1),
        }),
        Event::Certain {
            player: Player::from(1),
            position: 3,
            value: Value::from(4u8),
        },
        Event::Absent {
            player: Player::from(2),
            value: Value::from(0u8),
        },
        Event::Call(Call {
            caller: Player::from(1),
            target: Player::from(0),
            position: 3,
            value: Value::from(2u8),
            hit: false,
            shown: None,
        }),
    ];
    for event in script {
        println!("\n{}", event);
        engine.apply(event)?;
        println!("{}", engine);
    }
    for pick in suggest::rank(&engine, Player::from(0)).iter().take(3) {
        println!("suggest {}", pick);
    }
    Ok(())
}

fn play(config: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => serde_json::from_reader(std::fs::File::open(path)?)?,
        None => Config::demo(),
    };
    let mut engine = Engine::new(config)?;
    loop {
        println!("{}", engine);
        let kinds = [
            "call", "miss", "certain", "absent", "pin", "link", "suggest", "quit",
        ];
        let choice = Select::new()
            .with_prompt("event")
            .items(&kinds)
            .default(0)
            .interact()?;
        let verdict = match kinds[choice] {
            "quit" => break,
            "suggest" => {
                for pick in suggest::rank(&engine, prompt_player("seat")?).iter().take(5) {
                    println!("suggest {}", pick);
                }
                continue;
            }
            "call" => engine.apply(Event::Call(Call {
                caller: prompt_player("caller")?,
                target: prompt_player("target")?,
                position: prompt_position("target position")?,
                value: prompt_value("value")?,
                hit: true,
                shown: Some(prompt_position("shown position")?),
            })),
            "miss" => engine.apply(Event::Call(Call {
                caller: prompt_player("caller")?,
                target: prompt_player("target")?,
                position: prompt_position("target position")?,
                value: prompt_value("value")?,
                hit: false,
                shown: None,
            })),
            "certain" => engine.apply(Event::Certain {
                player: prompt_player("player")?,
                position: prompt_position("position")?,
                value: prompt_value("value")?,
            }),
            "absent" => engine.apply(Event::Absent {
                player: prompt_player("player")?,
                value: prompt_value("value")?,
            }),
            "pin" => engine.apply(Event::Pin {
                player: prompt_player("player")?,
                position: prompt_position("position")?,
                class: prompt_class()?,
            }),
            "link" => engine.apply(Event::Link {
                player: prompt_player("player")?,
                position: prompt_position("position")?,
                relation: prompt_relation()?,
            }),
            _ => unreachable!(),
        };
        match verdict {
            Ok(()) => {
                if engine.is_won() {
                    println!("every wire is pinned down");
                    break;
                }
                if engine.is_lost() {
                    println!("too many strikes");
                    break;
                }
            }
            Err(e @ Error::InvalidEvent(_)) => println!("{}", e),
            Err(e) => {
                println!("{}", e);
                println!("state frozen for inspection; restore from a snapshot to continue");
                break;
            }
        }
    }
    Ok(())
}

fn replay(path: &std::path::Path) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(path)?;
    let engine = snapshot.restore()?;
    println!("{}", engine.journal());
    println!("{}", engine);
    Ok(())
}

fn prompt_player(name: &str) -> anyhow::Result<Player> {
    let raw = Input::<String>::new().with_prompt(name).interact_text()?;
    Player::try_from(raw.as_str())
}

fn prompt_position(name: &str) -> anyhow::Result<usize> {
    Ok(Input::<usize>::new().with_prompt(name).interact_text()?)
}

fn prompt_value(name: &str) -> anyhow::Result<Value> {
    let raw = Input::<String>::new().with_prompt(name).interact_text()?;
    Value::try_from(raw.as_str())
}

fn prompt_class() -> anyhow::Result<bombbuster::beliefs::signal::Multiplicity> {
    let raw = Input::<u8>::new().with_prompt("copy count").interact_text()?;
    bombbuster::beliefs::signal::Multiplicity::try_from(raw)
}

fn prompt_relation() -> anyhow::Result<bombbuster::beliefs::signal::Relation> {
    let kinds = ["same", "differ"];
    let choice = Select::new()
        .with_prompt("relation")
        .items(&kinds)
        .default(0)
        .interact()?;
    Ok(match kinds[choice] {
        "same" => bombbuster::beliefs::signal::Relation::Same,
        _ => bombbuster::beliefs::signal::Relation::Differ,
    })
}
