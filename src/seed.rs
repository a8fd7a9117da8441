//! Sample roster for local runs and demos.

use crate::error::AppError;
use crate::model::{NewHero, NewHeroPower, NewPower, Strength};
use crate::service::{HeroPowerService, HeroService, PowerService};
use crate::store::Store;

const HEROES: &[(&str, &str)] = &[
    ("Kamala Khan", "Ms. Marvel"),
    ("Doreen Green", "Squirrel Girl"),
    ("Gwen Stacy", "Spider-Gwen"),
    ("Janet Van Dyne", "The Wasp"),
    ("Wanda Maximoff", "Scarlet Witch"),
    ("Carol Danvers", "Captain Marvel"),
    ("Jean Grey", "Dark Phoenix"),
    ("Ororo Munroe", "Storm"),
    ("Kitty Pryde", "Shadowcat"),
    ("Elektra Natchios", "Elektra"),
];

const POWERS: &[(&str, &str)] = &[
    ("super strength", "gives the wielder super-human strengths"),
    ("flight", "gives the wielder the ability to fly through the skies at supersonic speed"),
    ("super human senses", "allows the wielder to use her senses at a super-human level"),
    ("elasticity", "can stretch the human body to extreme lengths"),
];

/// Insert the sample heroes, powers and one association per hero, unless any hero already exists.
/// Returns the number of heroes inserted.
pub async fn seed_if_empty(store: &dyn Store) -> Result<usize, AppError> {
    if !store.list_heroes().await?.is_empty() {
        tracing::info!("store already populated, skipping seed");
        return Ok(0);
    }

    let mut powers = Vec::with_capacity(POWERS.len());
    for (name, description) in POWERS {
        let new = NewPower {
            name: (*name).to_string(),
            description: (*description).to_string(),
        };
        powers.push(PowerService::create(store, &new).await?);
    }

    let mut inserted = 0;
    for (i, (name, super_name)) in HEROES.iter().enumerate() {
        let new = NewHero {
            name: (*name).to_string(),
            super_name: (*super_name).to_string(),
        };
        let hero = HeroService::create(store, &new).await?;
        let power = &powers[i % powers.len()];
        let link = NewHeroPower {
            strength: Strength::ALL[i % Strength::ALL.len()],
            hero_id: hero.id,
            power_id: power.id,
        };
        HeroPowerService::create(store, &link).await?;
        inserted += 1;
    }
    tracing::info!(heroes = inserted, powers = powers.len(), "seeded sample data");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn seeds_once() {
        let store = MemoryStore::new();
        assert_eq!(seed_if_empty(&store).await.unwrap(), HEROES.len());
        assert_eq!(seed_if_empty(&store).await.unwrap(), 0);
        assert_eq!(store.list_heroes().await.unwrap().len(), HEROES.len());
        assert_eq!(store.list_powers().await.unwrap().len(), POWERS.len());
        assert_eq!(store.hero_powers_of(1).await.unwrap().len(), 1);
    }

    #[test]
    fn sample_powers_satisfy_description_rule() {
        for (_, description) in POWERS {
            assert!(crate::service::validate_description(description).is_ok(), "{description}");
        }
    }
}
