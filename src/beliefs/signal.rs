/// how many copies of the wire at a signaled position exist
/// in the whole deck. signaling the class narrows the slot to
/// values of exactly that multiplicity.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Multiplicity {
    Single = 1,
    Double = 2,
    Triple = 3,
}

impl Multiplicity {
    pub fn copies(&self) -> crate::Count {
        *self as crate::Count
    }
}

impl TryFrom<u8> for Multiplicity {
    type Error = anyhow::Error;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Self::Single),
            2 => Ok(Self::Double),
            3 => Ok(Self::Triple),
            _ => Err(anyhow::anyhow!("invalid multiplicity class")),
        }
    }
}

impl std::fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.copies())
    }
}

/// announced relation between a position and its right neighbor
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Relation {
    Same,
    Differ,
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Same => write!(f, "="),
            Self::Differ => write!(f, "≠"),
        }
    }
}
