use super::event::Event;

/// append-only public record. state is Markovian in the journal:
/// replaying it against the same config and privately known hands
/// reproduces the engine bit for bit (swaps carry their realized
/// values for exactly this reason).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Journal(Vec<Event>);

impl Journal {
    pub fn push(&mut self, event: Event) {
        self.0.push(event);
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn get(&self, id: usize) -> Option<&Event> {
        self.0.get(id)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.0.iter()
    }
}

impl From<Vec<Event>> for Journal {
    fn from(events: Vec<Event>) -> Self {
        Self(events)
    }
}

impl std::fmt::Display for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (id, event) in self.0.iter().enumerate() {
            writeln!(f, "{:>3} {}", id, event)?;
        }
        Ok(())
    }
}
