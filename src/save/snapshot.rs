use crate::engine::config::Config;
use crate::engine::engine::Engine;
use crate::engine::error::Error;
use crate::engine::journal::Journal;
use crate::game::hand::Hand;
use std::path::Path;

/// everything needed to rebuild an engine bit for bit: the config,
/// the privately dealt hands, and the journal. derived beliefs are
/// never stored; replay is the single source of truth.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    pub config: Config,
    pub hands: Vec<Option<Hand>>,
    pub journal: Journal,
}

impl Snapshot {
    pub fn grab(engine: &Engine) -> Self {
        Self {
            config: engine.config().clone(),
            hands: engine.dealt().to_vec(),
            journal: engine.journal().clone(),
        }
    }

    pub fn restore(&self) -> Result<Engine, Error> {
        Engine::replay(self.config.clone(), &self.hands, &self.journal)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        log::info!("{:<32}{:<32}", "saving      snapshot", path.display());
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        log::info!("{:<32}{:<32}", "loading     snapshot", path.display());
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beliefs::call::Call;
    use crate::engine::event::Event;
    use crate::game::player::Player;
    use crate::game::value::Value;

    fn played() -> Engine {
        let hand = Hand::from(vec![
            Value::from(0u8),
            Value::from(1u8),
            Value::from(2u8),
            Value::from(3u8),
        ]);
        let mut engine = Engine::new(Config::demo())
            .unwrap()
            .with_hand(Player::from(0), hand)
            .unwrap();
        engine
            .apply(Event::Call(Call {
                caller: Player::from(0),
                target: Player::from(2),
                position: 0,
                value: Value::from(1u8),
                hit: true,
                shown: Some(1),
            }))
            .unwrap();
        engine
    }

    #[test]
    fn json_round_trip() {
        let snapshot = Snapshot::grab(&played());
        let text = serde_json::to_string(&snapshot).unwrap();
        let back = serde_json::from_str::<Snapshot>(&text).unwrap();
        assert!(back == snapshot);
    }

    #[test]
    fn restore_replays_the_game() {
        let engine = played();
        let restored = Snapshot::grab(&engine).restore().unwrap();
        assert!(restored.beliefs() == engine.beliefs());
        assert!(restored.tracker() == engine.tracker());
        assert!(restored.journal() == engine.journal());
    }
}
