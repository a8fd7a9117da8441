//! Entities: heroes, powers, and the strength-rated hero_powers association.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Hero {
    pub id: i64,
    pub name: String,
    pub super_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Power {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Rating attached to a hero-power association. Matching is exact and case-sensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    Strong,
    Weak,
    Average,
}

impl Strength {
    pub const ALL: [Strength; 3] = [Strength::Strong, Strength::Weak, Strength::Average];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Weak => "Weak",
            Strength::Average => "Average",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised strength value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrength(pub String);

impl FromStr for Strength {
    type Err = UnknownStrength;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strength::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownStrength(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeroPower {
    pub id: i64,
    pub strength: Strength,
    pub hero_id: i64,
    pub power_id: i64,
}

/// A hero's association together with the power it points at, as listed under a hero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroPowerEntry {
    pub hero_power: HeroPower,
    pub power: Power,
}

/// An association with both of its referenced entities resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroPowerDetail {
    pub hero_power: HeroPower,
    pub hero: Hero,
    pub power: Power,
}

#[derive(Clone, Debug)]
pub struct NewHero {
    pub name: String,
    pub super_name: String,
}

#[derive(Clone, Debug)]
pub struct NewPower {
    pub name: String,
    pub description: String,
}

/// Validated input for creating an association.
#[derive(Clone, Copy, Debug)]
pub struct NewHeroPower {
    pub strength: Strength,
    pub hero_id: i64,
    pub power_id: i64,
}
