use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Direction, Instrument, InstrumentProfile};

/// Gap sizes (in pips) the wide-pip ladder samples from.
pub const WIDE_PIP_GAPS: [u32; 17] = [
    50, 60, 70, 80, 90, 100, 110, 120, 130, 140, 150, 160, 170, 180, 200, 220, 250,
];

/// Base target offsets for every other instrument.
pub const BASE_OFFSETS: [u32; 5] = [50, 100, 160, 220, 280];

/// Jitter applied to each base offset, in pips, either side.
pub const BASE_JITTER: f64 = 5.0;

pub const TP_COUNT: usize = 5;
pub const SWING_MIN: u32 = 550;
pub const SWING_MAX: u32 = 750;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TpLevel {
    pub pips: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeProfitPlan {
    pub levels: Vec<TpLevel>,
    pub swing: TpLevel,
}

/// Cumulative ladder: five distinct gaps, sorted, summed as they go.
pub fn wide_pip_offsets<R: Rng + ?Sized>(rng: &mut R) -> Vec<u32> {
    let mut gaps: Vec<u32> = WIDE_PIP_GAPS
        .choose_multiple(rng, TP_COUNT)
        .copied()
        .collect();
    gaps.sort_unstable();

    gaps.iter()
        .scan(0u32, |total, gap| {
            *total += gap;
            Some(*total)
        })
        .collect()
}

/// Base ladder with light jitter, truncated to whole pips and re-sorted.
pub fn jittered_offsets<R: Rng + ?Sized>(rng: &mut R) -> Vec<u32> {
    let mut offsets: Vec<u32> = BASE_OFFSETS
        .iter()
        .map(|&base| {
            let jitter = rng.gen_range(-BASE_JITTER..=BASE_JITTER);
            (base as f64 + jitter) as u32
        })
        .collect();
    offsets.sort_unstable();
    offsets
}

pub fn swing_offset<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(SWING_MIN..=SWING_MAX)
}

/// `entry + pips * pip_size * sign`
pub fn level_price(entry: f64, pips: u32, profile: &InstrumentProfile, direction: Direction) -> f64 {
    entry + pips as f64 * profile.pip_size * direction.sign()
}

impl TakeProfitPlan {
    pub fn generate<R: Rng + ?Sized>(
        instrument: Instrument,
        direction: Direction,
        entry: f64,
        rng: &mut R,
    ) -> Self {
        let offsets = if instrument.is_wide_pip() {
            wide_pip_offsets(rng)
        } else {
            jittered_offsets(rng)
        };
        let swing = swing_offset(rng);
        Self::from_offsets(&instrument.profile(), direction, entry, &offsets, swing)
    }

    pub fn from_offsets(
        profile: &InstrumentProfile,
        direction: Direction,
        entry: f64,
        offsets: &[u32],
        swing: u32,
    ) -> Self {
        let levels = offsets
            .iter()
            .map(|&pips| TpLevel {
                pips,
                price: level_price(entry, pips, profile, direction),
            })
            .collect();

        Self {
            levels,
            swing: TpLevel {
                pips: swing,
                price: level_price(entry, swing, profile, direction),
            },
        }
    }

    pub fn offsets(&self) -> Vec<u32> {
        self.levels.iter().map(|l| l.pips).collect()
    }
}
