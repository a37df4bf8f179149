//! Example: Print the binary clock in the terminal, pause it, then resume.
//!
//! Run with: `RUST_LOG=debug cargo run --example tick_log -- 5`

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use binclock_core::{
    BlockGrid, CellChange, ClockDriver, ClockError, Column, GridState, LocalClock, TICK_INTERVAL,
    ThreadDriver, Unit, start_grid,
};

fn render(state: &GridState) -> String {
    let mut out = String::new();
    for unit in Unit::ALL {
        out.push_str(unit.label());
        out.push(' ');
        for column in Column::ALL.iter().rev() {
            out.push(if state.is_lit(unit, *column) { '#' } else { '.' });
        }
        out.push_str(&format!(" {:>2}\n", state.value(unit)));
    }
    out
}

fn run(
    driver: &mut ThreadDriver,
    grid: &Arc<Mutex<BlockGrid<LocalClock>>>,
    seconds: u64,
) -> Result<(), ClockError> {
    let changes: Arc<Mutex<Vec<CellChange>>> = Arc::default();
    let collecting = Arc::clone(&changes);
    let handle = start_grid(driver, grid, TICK_INTERVAL, move |change: CellChange| {
        if let Ok(mut changes) = collecting.lock() {
            changes.push(change);
        }
    })?;

    // Sample halfway between firings.
    thread::sleep(TICK_INTERVAL / 2);
    for _ in 0..seconds {
        thread::sleep(TICK_INTERVAL);
        let count = changes.lock().map(|mut c| c.drain(..).count()).unwrap_or(0);
        if let Ok(grid) = grid.lock() {
            if let Some(reading) = grid.reading() {
                println!("{} ({} block(s) changed)", reading, count);
            }
            print!("{}", render(&grid.state()));
        }
    }

    driver.stop(handle);
    Ok(())
}

fn main() -> Result<(), ClockError> {
    // Initialize logging (optional)
    env_logger::init();

    let seconds: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(5);

    let grid = Arc::new(Mutex::new(BlockGrid::new(LocalClock::new())));
    let mut driver = ThreadDriver::new();

    run(&mut driver, &grid, seconds)?;
    println!("Paused for 2s");
    thread::sleep(Duration::from_secs(2));

    // Resuming starts with all 18 blocks repainted.
    run(&mut driver, &grid, seconds)
}
