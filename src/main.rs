//! Headless demo: runs a handful of scripted episodes and reports the
//! outcome counters. Set `RUST_LOG=info` to watch episodes end.

use parklot::{Action, EnvConfig, EnvError, ParkingEnv};

fn main() -> Result<(), EnvError> {
    env_logger::init();

    let mut env = ParkingEnv::new(EnvConfig::default())?;
    let scripts: [(&str, Action); 3] = [
        ("full ahead", Action::Accelerate),
        ("spin the wheel", Action::SteerLeft),
        ("circle left", Action::ForwardLeft),
    ];

    for (name, action) in scripts {
        let start = env.reset(false);
        log::info!(
            "{name}: starting at ({:.2}, {:.2}), deadline {} ticks",
            start.x,
            start.y,
            env.deadline()
        );
        let mut total = 0.0;
        while !env.is_done() {
            let (_, reward) = env.step(action)?;
            total += reward;
        }
        println!(
            "{name}: {:?} after {} ticks, return {total:.1}",
            env.last_outcome(),
            env.tick()
        );
    }

    println!("totals: {:?}", env.counters());
    Ok(())
}
