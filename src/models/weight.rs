// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weight category model: brackets, genders and age bands.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A competition weight bracket, e.g. `("-60", "-60 kg")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WeightBracket {
    /// Signed threshold in kilograms
    pub value: &'static str,
    /// Display label
    pub label: &'static str,
}

/// Gender code used by the federation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Gender::Male),
            "F" => Ok(Gender::Female),
            other => Err(UnknownGender(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown gender code: {0:?}")]
pub struct UnknownGender(pub String);

/// Federation age band (2024-2025 season).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBand {
    /// Up to 5
    Eveil,
    /// 6-7
    MiniPoussins,
    /// 8-9
    Poussins,
    /// 10-11
    Benjamins,
    /// 12-13
    Minimes,
    /// 14-16
    Cadets,
    /// 17 and over
    JuniorsSeniors,
}

impl AgeBand {
    /// All bands, youngest first.
    pub const ALL: [AgeBand; 7] = [
        AgeBand::Eveil,
        AgeBand::MiniPoussins,
        AgeBand::Poussins,
        AgeBand::Benjamins,
        AgeBand::Minimes,
        AgeBand::Cadets,
        AgeBand::JuniorsSeniors,
    ];

    /// Band for an age in years. Negative ages land in the youngest band.
    pub fn from_age(age: i32) -> Self {
        match age {
            ..=5 => AgeBand::Eveil,
            6..=7 => AgeBand::MiniPoussins,
            8..=9 => AgeBand::Poussins,
            10..=11 => AgeBand::Benjamins,
            12..=13 => AgeBand::Minimes,
            14..=16 => AgeBand::Cadets,
            _ => AgeBand::JuniorsSeniors,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AgeBand::Eveil => "EVEIL",
            AgeBand::MiniPoussins => "MINI_POUSSINS",
            AgeBand::Poussins => "POUSSINS",
            AgeBand::Benjamins => "BENJAMINS",
            AgeBand::Minimes => "MINIMES",
            AgeBand::Cadets => "CADETS",
            AgeBand::JuniorsSeniors => "JUNIORS_SENIORS",
        }
    }

    /// Whether boys and girls share one table.
    pub fn is_mixed(self) -> bool {
        matches!(
            self,
            AgeBand::Eveil | AgeBand::MiniPoussins | AgeBand::Poussins
        )
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
