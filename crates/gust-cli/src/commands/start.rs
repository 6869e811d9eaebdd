use std::io::Write;
use std::time::{Duration, Instant};

use clap::Args;
use gust_core::session::CompletionPolicy;
use gust_core::{Config, Event, Session, SessionSnapshot, WorkoutDb};

#[derive(Args)]
pub struct StartArgs {
    /// Workout id to play
    id: i64,
    /// Play a single pass and halt, regardless of the configured loop policy
    #[arg(long)]
    once: bool,
    /// When looping, stop after this many completed passes
    #[arg(long, default_value = "1")]
    laps: u64,
    /// Print lifecycle events as JSON instead of the live view
    #[arg(long)]
    json: bool,
}

const BAR_WIDTH: usize = 30;

fn render(snapshot: &SessionSnapshot) {
    let filled = (snapshot.phase * BAR_WIDTH as f64).round() as usize;
    let bar: String = (0..BAR_WIDTH)
        .map(|i| if i < filled { '#' } else { '-' })
        .collect();
    print!(
        "\r{:<12} {:>2}s  [{}]  rep {}/{}   ",
        snapshot.cue.to_string(),
        snapshot.remaining_secs,
        bar,
        snapshot.rep,
        snapshot.total_reps
    );
    let _ = std::io::stdout().flush();
}

fn emit(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

pub fn run(args: StartArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db = WorkoutDb::open()?;
    let Some(workout) = db.get(args.id)? else {
        println!("workout {} not found", args.id);
        return Ok(());
    };

    let config = Config::load_or_default();
    let policy = if args.once {
        CompletionPolicy::Halt
    } else {
        config.completion_policy()
    };
    let tick = Duration::from_millis(config.session.tick_ms.max(1));

    let mut session = Session::new(workout, policy)?;
    let origin = Instant::now();
    let started = session.toggle(0);
    if args.json {
        emit(&started)?;
    } else {
        println!(
            "{} ({}s + {}s lead-in)",
            session.workout().title,
            session.workout().duration_secs(),
            session.lead_in_ms() / 1000
        );
    }

    loop {
        std::thread::sleep(tick);
        let now_ms = origin.elapsed().as_millis() as u64;
        let boundary = session.tick(now_ms);
        if args.json {
            if let Some(ref event) = boundary {
                emit(event)?;
            }
        } else {
            render(&session.snapshot());
        }
        match boundary {
            Some(Event::SessionFinished { .. }) => break,
            Some(Event::SessionLooped { lap, .. }) if lap >= args.laps => {
                let stopped = session.toggle(now_ms);
                if args.json {
                    emit(&stopped)?;
                }
                break;
            }
            _ => {}
        }
    }

    if !args.json {
        println!();
        println!("done");
    }
    Ok(())
}
