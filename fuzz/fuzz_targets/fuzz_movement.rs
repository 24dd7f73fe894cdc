#![no_main]

//! Enemy movement fuzzer.
//!
//! Builds a small board from fuzzer bytes, drops enemies on it and runs
//! the pursuit AI for a few ticks, checking that:
//! 1. resolution never panics, even for enemies off the board
//! 2. no enemy turns back onto the reverse of its previous heading
//! 3. every tick is reproducible from the same input

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pursuit::enemy::{IntersectionPolicy, Rng};
use pursuit::grid::Tile;
use pursuit::referee::simulate;
use pursuit::{Board, Coord, Enemy, Heading, PursuitAi};

/// A fuzzer-generated enemy.
#[derive(Arbitrary, Debug, Clone, Copy)]
struct FuzzEnemy {
    x: i8,
    y: i8,
    /// 0-3 map to a heading, anything else is no heading.
    heading: u8,
}

/// Structured input for movement fuzzing.
#[derive(Arbitrary, Debug)]
struct MovementInput {
    /// Wall bitmask, one bit per cell of a 16x16 board.
    walls: [u64; 4],
    enemies: Vec<FuzzEnemy>,
    seed: u64,
    num_ticks: u8,
}

fn heading(raw: u8) -> Option<Heading> {
    Heading::MOVING.get(usize::from(raw)).copied()
}

fuzz_target!(|input: MovementInput| {
    let Some(mut board) = Board::new(16, 16) else {
        return;
    };
    for bit in 0..256i32 {
        let word = input.walls[(bit / 64) as usize];
        if word & (1u64 << (bit % 64)) != 0 {
            board.set(Coord::new(bit % 16, bit / 16), Tile::Wall);
        }
    }

    let start: Vec<Enemy> = input
        .enemies
        .iter()
        .take(8)
        .map(|e| Enemy::new(Coord::new(i32::from(e.x), i32::from(e.y)), heading(e.heading)))
        .collect();
    let ticks = u32::from(input.num_ticks % 32);

    let run = || {
        let mut enemies = start.clone();
        let mut ai = PursuitAi::new(IntersectionPolicy::Wander(Rng::new(input.seed)));
        simulate(&board, &mut enemies, &mut ai, ticks)
    };

    let first = run();
    assert_eq!(first, run(), "simulation must be deterministic");

    let mut before = start.clone();
    for report in &first {
        assert!(report.undecided.is_empty());
        for (old, new) in before.iter().zip(&report.enemies) {
            if let (Some(a), Some(b)) = (old.heading, new.heading) {
                assert_ne!(b, a.opposite(), "enemy reversed on tick {}", report.tick);
            }
        }
        before.clone_from(&report.enemies);
    }
});
