use std::{error::Error, process, sync::Arc};

use phaseplot_display::{DisplayConfig, Displayer, PlotObserver, Session, ShowConfig, scenarios};
use phaseplot_systems::{
    DT, SecondOrderSolver, SecondOrderSystem, TIME_RANGE, builtin::DampedOscillator,
};

const USAGE: &str = "\
usage:
  phaseplot [scenario]                  open the interactive viewer
  phaseplot plot [x0 v0 time_range dt]  plot one damped oscillator trajectory

scenarios: default, duffing, oscillator";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| scenarios::NAMES[0].to_owned());

    match mode.as_str() {
        "plot" => plot(&args.collect::<Vec<_>>()),
        "-h" | "--help" => {
            println!("{USAGE}");
            Ok(())
        }
        name => {
            let Some(solvers) = scenarios::by_name(name) else {
                eprintln!("unknown mode `{name}`\n\n{USAGE}");
                process::exit(1);
            };
            let session = Session::new(solvers, DisplayConfig::default())?;
            Displayer::new(session).run("Solver Display")?;
            Ok(())
        }
    }
}

/// Integrates one damped oscillator and shows `x(t)`, `v(t)`, and `v(x)`.
fn plot(args: &[String]) -> Result<(), Box<dyn Error>> {
    let mut values = [1.0, 1.0, 100.0, 0.01];
    if args.len() > values.len() {
        eprintln!("too many arguments\n\n{USAGE}");
        process::exit(1);
    }
    for (slot, arg) in values.iter_mut().zip(args) {
        *slot = arg
            .parse()
            .map_err(|err| format!("invalid number `{arg}`: {err}"))?;
    }
    let [x0, v0, time_range, dt] = values;

    let parameters = DampedOscillator
        .default_parameters()
        .with(DT, dt)
        .with(TIME_RANGE, time_range);
    let solver = SecondOrderSolver::new(x0, v0, parameters, Arc::new(DampedOscillator));

    let mut obs = PlotObserver::<2>::new(["x", "v"]);
    let solution = solver.integrate(dt, time_range, &mut obs)?;
    log::info!(
        "{} steps back, {} steps forward",
        solution.backward_steps,
        solution.forward_steps
    );

    obs.show(
        ShowConfig::new()
            .title(format!("Phase portrait: (x0, v0) = ({x0}, {v0}) | dt = {dt}"))
            .legend()
            .phase_portrait(),
    )?;
    Ok(())
}
