mod pillar;
mod xenia;

pub use pillar::Pillar;
pub use xenia::{Roll, Xenia};

use std::io::Write;

use rand::Rng;
use shuttle_core::System;

/// The simulated endpoints wired together.
///
/// Pulled records are echoed to `echo`; stored records are printed to `out`.
pub fn sim_system<R, E, O>(
    source_host: &str,
    sink_host: &str,
    rng: R,
    echo: E,
    out: O,
) -> System<Xenia<R, E>, Pillar<O>>
where
    R: Rng,
    E: Write,
    O: Write,
{
    System::new(
        Xenia::with_host_and_rng(source_host, rng).with_echo(echo),
        Pillar::new(sink_host).with_output(out),
    )
}
