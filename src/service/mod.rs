//! Entity services: validate, persist through a `Store`, render views.

mod hero;
mod hero_power;
mod power;
mod validation;

pub use hero::{HeroService, HERO_NOT_FOUND};
pub use hero_power::{HeroPowerService, HERO_POWER_NOT_FOUND};
pub use power::{PowerService, POWER_NOT_FOUND};
pub use validation::{validate_description, validate_strength, RequestValidator, MIN_DESCRIPTION_CHARS};
