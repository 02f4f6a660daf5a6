//! Ticker Sample Application Entry Point
//!
//! Drives effects one tick at a time from a plain loop. The loop owns the
//! clock: each suspension hands the current tick back, and the loop resumes
//! the continuation with the next one.

use std::cell::Cell;
use std::rc::Rc;

use morae::control::Either;
use morae::effect::{Effect, Incomplete, Outcome};

/// Steps `effect` until it completes, printing one line per suspension and
/// advancing the clock before each resumption.
fn drive<A>(label: &str, effect: &Effect<u64, String, A>, start: u64) -> (A, u64) {
    let mut current = effect.clone();
    let mut tick = start;
    loop {
        match current.step(tick) {
            Outcome::Completed(value, final_tick) => return (value, final_tick),
            Outcome::Incomplete(Incomplete::Suspended(snapshot, continuation)) => {
                println!("[{label}] tick {snapshot}: still running");
                tick = snapshot + 1;
                current = continuation;
            }
            Outcome::Incomplete(Incomplete::Failed(error)) => {
                eprintln!("[{label}] failed: {error}");
                std::process::exit(1);
            }
        }
    }
}

fn countdown_race() {
    println!("== countdown race ==");

    let hare = Effect::<u64, String, ()>::wait(3).then(Effect::succeed("hare"));
    let tortoise = Effect::<u64, String, ()>::wait(5).then(Effect::succeed("tortoise"));

    let (winner, tick) = drive("race", &hare.race(&tortoise), 0);
    match winner {
        Either::Left(name) => println!("[race] {name} (left lane) wins at tick {tick}"),
        Either::Right(name) => println!("[race] {name} (right lane) wins at tick {tick}"),
    }
}

fn flaky_probe() {
    println!("\n== flaky probe with a retry budget ==");

    let attempts = Rc::new(Cell::new(0_u32));
    let counter = attempts.clone();
    let probe = Effect::<u64, String, &str>::new(move |tick| {
        let attempt = counter.get() + 1;
        counter.set(attempt);
        if attempt < 3 {
            Outcome::failed(format!("probe attempt {attempt}: no answer"))
        } else {
            Outcome::Completed("pong", tick)
        }
    });

    let (answer, tick) = drive("probe", &probe.retry(4), 0);
    println!(
        "[probe] got {answer:?} after {} attempts (tick {tick})",
        attempts.get()
    );
}

fn deadline_poll() {
    println!("\n== polling until a deadline ==");

    // The effect never touches the clock; it just yields until the driver's
    // clock reaches the deadline.
    let yield_once = Effect::<u64, String, ()>::suspend();
    let until_deadline = yield_once.repeat_until(|tick| *tick >= 8);

    let ((), tick) = drive("poll", &until_deadline, 0);
    println!("[poll] deadline reached at tick {tick}");
}

fn main() {
    countdown_race();
    flaky_probe();
    deadline_poll();
}
