//! Bonus tables, in hundredths of the base multiplier.
//!
//! Every lookup is an exhaustive `match`: adding a rating, item class or tier
//! fails to compile until each table handles it.

use std::ops::{Add, Sub};

use crate::{ComplexityLevel, ItemClass, Rating, TurnType};

/// A multiplier contribution in hundredths (`60` is `+0.60`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Points(pub i32);

impl Points {
    pub const ZERO: Points = Points(0);

    pub fn as_fraction(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Add for Points {
    type Output = Points;

    fn add(self, rhs: Points) -> Points {
        Points(self.0 + rhs.0)
    }
}

impl Sub for Points {
    type Output = Points;

    fn sub(self, rhs: Points) -> Points {
        Points(self.0 - rhs.0)
    }
}

pub const fn attack_pronunciation_bonus(rating: Rating) -> Points {
    match rating {
        Rating::Excellent => Points(60),
        Rating::Good => Points(30),
        Rating::Okay => Points(10),
        Rating::NeedsImprovement => Points(0),
    }
}

pub const fn attack_complexity_bonus(level: ComplexityLevel) -> Points {
    match level {
        ComplexityLevel::One => Points(0),
        ComplexityLevel::Two => Points(15),
        ComplexityLevel::Three => Points(30),
        ComplexityLevel::Four => Points(45),
        ComplexityLevel::Five => Points(60),
    }
}

/// Mitigation from a defensive phrase; special items mitigate more.
pub const fn defense_pronunciation_bonus(item_class: ItemClass, rating: Rating) -> Points {
    match (item_class, rating) {
        (ItemClass::Regular, Rating::Excellent) => Points(-50),
        (ItemClass::Regular, Rating::Good) => Points(-30),
        (ItemClass::Regular, Rating::Okay) => Points(-10),
        (ItemClass::Regular, Rating::NeedsImprovement) => Points(0),
        (ItemClass::Special, Rating::Excellent) => Points(-70),
        (ItemClass::Special, Rating::Good) => Points(-50),
        (ItemClass::Special, Rating::Okay) => Points(-25),
        (ItemClass::Special, Rating::NeedsImprovement) => Points(0),
    }
}

pub const fn defense_complexity_bonus(level: ComplexityLevel) -> Points {
    match level {
        ComplexityLevel::One => Points(0),
        ComplexityLevel::Two => Points(-5),
        ComplexityLevel::Three => Points(-10),
        ComplexityLevel::Four => Points(-15),
        ComplexityLevel::Five => Points(-20),
    }
}

/// Table row for the given turn. Item class only matters on defense.
pub const fn pronunciation_bonus(turn: TurnType, item_class: ItemClass, rating: Rating) -> Points {
    match turn {
        TurnType::Attack => attack_pronunciation_bonus(rating),
        TurnType::Defense => defense_pronunciation_bonus(item_class, rating),
    }
}

pub const fn complexity_bonus(turn: TurnType, level: ComplexityLevel) -> Points {
    match turn {
        TurnType::Attack => attack_complexity_bonus(level),
        TurnType::Defense => defense_complexity_bonus(level),
    }
}
