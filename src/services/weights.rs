// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Official FFJDA 2024-2025 weight categories.
//!
//! Age is the difference between the current year and the birth year,
//! which matches the federation's season-based age groups.

use crate::models::{AgeBand, Gender, WeightBracket};
use crate::time_utils;

macro_rules! kg {
    ($($v:literal),* $(,)?) => {
        &[$(WeightBracket { value: $v, label: concat!($v, " kg") }),*]
    };
}

/// Brackets for one age band.
#[derive(Debug, Clone, Copy)]
pub enum CategoryTable {
    Mixed(&'static [WeightBracket]),
    ByGender {
        male: &'static [WeightBracket],
        female: &'static [WeightBracket],
    },
}

impl CategoryTable {
    /// Brackets for a gender. Mixed tables ignore it.
    pub fn for_gender(&self, gender: Option<Gender>) -> Option<&'static [WeightBracket]> {
        match (*self, gender) {
            (CategoryTable::Mixed(brackets), _) => Some(brackets),
            (CategoryTable::ByGender { male, .. }, Some(Gender::Male)) => Some(male),
            (CategoryTable::ByGender { female, .. }, Some(Gender::Female)) => Some(female),
            (CategoryTable::ByGender { .. }, None) => None,
        }
    }
}

const EVEIL: &[WeightBracket] = kg!["-20", "-23", "-26", "-29", "+29"];

const MINI_POUSSINS: &[WeightBracket] =
    kg!["-20", "-23", "-26", "-29", "-32", "-35", "-38", "-42", "-46", "+46"];

const POUSSINS: &[WeightBracket] =
    kg!["-20", "-23", "-26", "-29", "-32", "-34", "-38", "-42", "-46", "+46"];

const BENJAMINS_M: &[WeightBracket] =
    kg!["-26", "-30", "-34", "-38", "-42", "-46", "-50", "-55", "-60", "-66", "+66"];
const BENJAMINS_F: &[WeightBracket] =
    kg!["-28", "-32", "-36", "-40", "-44", "-48", "-52", "-57", "-63", "+63"];

const MINIMES_M: &[WeightBracket] =
    kg!["-34", "-38", "-42", "-46", "-50", "-55", "-60", "-66", "-73", "+73"];
const MINIMES_F: &[WeightBracket] =
    kg!["-36", "-40", "-44", "-48", "-52", "-57", "-63", "-70", "+70"];

const CADETS_M: &[WeightBracket] =
    kg!["-46", "-50", "-55", "-60", "-66", "-73", "-81", "-90", "+90"];
const CADETS_F: &[WeightBracket] = kg!["-40", "-44", "-48", "-52", "-57", "-63", "-70", "+70"];

const JUNIORS_SENIORS_M: &[WeightBracket] = kg!["-60", "-66", "-73", "-81", "-90", "-100", "+100"];
const JUNIORS_SENIORS_F: &[WeightBracket] = kg!["-48", "-52", "-57", "-63", "-70", "-78", "+78"];

/// Every bracket used by any band, without duplicates.
pub const ALL_WEIGHTS: &[WeightBracket] = kg![
    "-20", "-23", "-26", "-28", "-29", "-30", "-32", "-34", "-35", "-36", "-38", "-40", "-42",
    "-44", "-46", "-48", "-50", "-52", "-55", "-57", "-60", "-63", "-66", "-70", "-73", "-78",
    "-81", "-90", "-100", "+29", "+46", "+63", "+66", "+70", "+73", "+78", "+90", "+100",
];

/// Category table for an age band.
pub fn category_table(band: AgeBand) -> CategoryTable {
    match band {
        AgeBand::Eveil => CategoryTable::Mixed(EVEIL),
        AgeBand::MiniPoussins => CategoryTable::Mixed(MINI_POUSSINS),
        AgeBand::Poussins => CategoryTable::Mixed(POUSSINS),
        AgeBand::Benjamins => CategoryTable::ByGender {
            male: BENJAMINS_M,
            female: BENJAMINS_F,
        },
        AgeBand::Minimes => CategoryTable::ByGender {
            male: MINIMES_M,
            female: MINIMES_F,
        },
        AgeBand::Cadets => CategoryTable::ByGender {
            male: CADETS_M,
            female: CADETS_F,
        },
        AgeBand::JuniorsSeniors => CategoryTable::ByGender {
            male: JUNIORS_SENIORS_M,
            female: JUNIORS_SENIORS_F,
        },
    }
}

/// Weight brackets for a registration form, relative to today.
pub fn weight_categories(
    birth_date: Option<&str>,
    gender: Option<&str>,
) -> &'static [WeightBracket] {
    weight_categories_in_year(time_utils::current_year(), birth_date, gender)
}

/// Weight brackets for a birth date and gender code, as of `current_year`.
///
/// Falls back to [`ALL_WEIGHTS`] when the birth date is missing or
/// unreadable, or when a gendered band gets an unknown gender code.
pub fn weight_categories_in_year(
    current_year: i32,
    birth_date: Option<&str>,
    gender: Option<&str>,
) -> &'static [WeightBracket] {
    let Some(birth_year) = birth_date.and_then(time_utils::parse_birth_year) else {
        return ALL_WEIGHTS;
    };

    let band = AgeBand::from_age(current_year - birth_year);
    let gender = gender.and_then(|code| code.parse::<Gender>().ok());

    category_table(band)
        .for_gender(gender)
        .unwrap_or(ALL_WEIGHTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_weights_is_union_of_tables() {
        let mut union = HashSet::new();
        for band in AgeBand::ALL {
            for gender in [Gender::Male, Gender::Female] {
                let brackets = category_table(band).for_gender(Some(gender)).unwrap();
                union.extend(brackets.iter().copied());
            }
        }

        let all: HashSet<_> = ALL_WEIGHTS.iter().copied().collect();
        assert_eq!(all.len(), ALL_WEIGHTS.len(), "ALL_WEIGHTS has duplicates");
        assert_eq!(union, all);
    }

    #[test]
    fn test_tables_are_ascending() {
        for band in AgeBand::ALL {
            for gender in [Gender::Male, Gender::Female] {
                let brackets = category_table(band).for_gender(Some(gender)).unwrap();
                let (last, minus) = brackets.split_last().unwrap();
                assert!(last.value.starts_with('+'), "{band} must end with a + bracket");

                let limits: Vec<i32> = minus.iter().map(|b| b.value.parse().unwrap()).collect();
                assert!(limits.windows(2).all(|w| w[0] > w[1]), "{band} not ascending");
            }
        }
    }

    #[test]
    fn test_labels_match_values() {
        for bracket in ALL_WEIGHTS {
            assert_eq!(bracket.label, format!("{} kg", bracket.value));
        }
    }

    #[test]
    fn test_mixed_flag_matches_table_shape() {
        for band in AgeBand::ALL {
            let mixed = matches!(category_table(band), CategoryTable::Mixed(_));
            assert_eq!(mixed, band.is_mixed(), "{band}");
        }
    }
}
