//! JSON views of entities. Each builder takes an optional `only` list restricting the top-level keys.

use crate::model::{Hero, HeroPowerDetail, HeroPowerEntry, Power};
use serde_json::{json, Map, Value};

/// Top-level keys of a hero without its associations (list endpoint).
pub const HERO_SUMMARY_FIELDS: &[&str] = &["id", "name", "super_name"];
pub const POWER_FIELDS: &[&str] = &["id", "name", "description"];

/// Keep only the keys named in `only`; unknown names are ignored.
fn select(map: Map<String, Value>, only: Option<&[&str]>) -> Value {
    match only {
        None => Value::Object(map),
        Some(keys) => Value::Object(
            map.into_iter()
                .filter(|(k, _)| keys.contains(&k.as_str()))
                .collect(),
        ),
    }
}

/// Hero view. `hero_powers` is rendered only when supplied by the caller.
pub fn hero_view(hero: &Hero, hero_powers: Option<&[HeroPowerEntry]>, only: Option<&[&str]>) -> Value {
    let mut map = Map::new();
    map.insert("id".into(), json!(hero.id));
    map.insert("name".into(), json!(hero.name));
    map.insert("super_name".into(), json!(hero.super_name));
    if let Some(entries) = hero_powers {
        let nested: Vec<Value> = entries
            .iter()
            .map(|e| {
                json!({
                    "id": e.hero_power.id,
                    "strength": e.hero_power.strength,
                    "power": power_view(&e.power, Some(POWER_FIELDS)),
                })
            })
            .collect();
        map.insert("hero_powers".into(), Value::Array(nested));
    }
    select(map, only)
}

pub fn power_view(power: &Power, only: Option<&[&str]>) -> Value {
    let mut map = Map::new();
    map.insert("id".into(), json!(power.id));
    map.insert("name".into(), json!(power.name));
    map.insert("description".into(), json!(power.description));
    select(map, only)
}

/// Full nested association: own columns plus `hero` and `power` sub-objects.
pub fn hero_power_view(detail: &HeroPowerDetail, only: Option<&[&str]>) -> Value {
    let hp = &detail.hero_power;
    let mut map = Map::new();
    map.insert("id".into(), json!(hp.id));
    map.insert("strength".into(), json!(hp.strength));
    map.insert("hero_id".into(), json!(hp.hero_id));
    map.insert("power_id".into(), json!(hp.power_id));
    map.insert("hero".into(), hero_view(&detail.hero, None, Some(HERO_SUMMARY_FIELDS)));
    map.insert("power".into(), power_view(&detail.power, Some(POWER_FIELDS)));
    select(map, only)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeroPower, Strength};

    fn hero() -> Hero {
        Hero {
            id: 1,
            name: "Kamala Khan".into(),
            super_name: "Ms. Marvel".into(),
        }
    }

    fn power() -> Power {
        Power {
            id: 2,
            name: "elasticity".into(),
            description: "can stretch the human body to extreme lengths".into(),
        }
    }

    fn association() -> HeroPower {
        HeroPower {
            id: 7,
            strength: Strength::Strong,
            hero_id: 1,
            power_id: 2,
        }
    }

    #[test]
    fn hero_without_associations_has_no_hero_powers_key() {
        let v = hero_view(&hero(), None, None);
        assert_eq!(v, json!({"id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel"}));
    }

    #[test]
    fn hero_with_associations_nests_power() {
        let entries = vec![HeroPowerEntry {
            hero_power: association(),
            power: power(),
        }];
        let v = hero_view(&hero(), Some(entries.as_slice()), None);
        assert_eq!(
            v["hero_powers"],
            json!([{
                "id": 7,
                "strength": "Strong",
                "power": {
                    "id": 2,
                    "name": "elasticity",
                    "description": "can stretch the human body to extreme lengths"
                }
            }])
        );
    }

    #[test]
    fn hero_only_restricts_keys() {
        let entries: Vec<HeroPowerEntry> = Vec::new();
        let v = hero_view(&hero(), Some(entries.as_slice()), Some(HERO_SUMMARY_FIELDS));
        assert_eq!(v, json!({"id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel"}));

        let v = hero_view(&hero(), None, Some(&["super_name", "unknown"][..]));
        assert_eq!(v, json!({"super_name": "Ms. Marvel"}));
    }

    #[test]
    fn power_view_fields() {
        let v = power_view(&power(), Some(&["id", "name"][..]));
        assert_eq!(v, json!({"id": 2, "name": "elasticity"}));
        assert_eq!(power_view(&power(), None)["description"], json!(power().description));
    }

    #[test]
    fn hero_power_view_embeds_both_sides() {
        let detail = HeroPowerDetail {
            hero_power: association(),
            hero: hero(),
            power: power(),
        };
        let v = hero_power_view(&detail, None);
        assert_eq!(v["strength"], json!("Strong"));
        assert_eq!(v["hero_id"], json!(1));
        assert_eq!(v["power_id"], json!(2));
        assert_eq!(v["hero"], json!({"id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel"}));
        assert_eq!(v["power"], power_view(&power(), None));
    }
}
