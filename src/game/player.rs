/// seat index around the table
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Player(usize);

impl Player {
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// usize isomorphism
impl From<usize> for Player {
    fn from(n: usize) -> Self {
        Self(n)
    }
}
impl From<Player> for usize {
    fn from(player: Player) -> Self {
        player.0
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.trim()
            .trim_start_matches(['P', 'p'])
            .parse::<usize>()
            .map(Self)
            .map_err(|_| anyhow::anyhow!("invalid player"))
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}
