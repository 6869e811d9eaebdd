use clap::Subcommand;
use gust_core::{Stage, Workout, WorkoutDb};

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// List all workouts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one workout in detail
    Show {
        /// Workout id
        id: i64,
    },
    /// Add a workout
    Add {
        /// Display title
        title: String,
        /// Packed ARGB color, hex (e.g. FF3B82F6)
        #[arg(long, default_value = "FF3B82F6")]
        color: String,
        /// Stage as "in,hold,out,regen,reps" (repeatable, in playback order)
        #[arg(long = "stage", required = true, value_parser = parse_stage)]
        stages: Vec<Stage>,
    },
    /// Remove a workout by id
    Remove {
        /// Workout id
        id: i64,
    },
    /// Seed the built-in presets into an empty store
    Seed,
}

fn parse_stage(spec: &str) -> Result<Stage, String> {
    let parts: Vec<&str> = spec.split(',').collect();
    if parts.len() != 5 {
        return Err(format!(
            "expected \"in,hold,out,regen,reps\", got \"{spec}\""
        ));
    }
    let mut nums = [0u32; 5];
    for (slot, part) in nums.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| format!("not a number: \"{part}\""))?;
    }
    Stage::new(nums[0], nums[1], nums[2], nums[3], nums[4]).map_err(|e| e.to_string())
}

fn describe(workout: &Workout) -> String {
    let stages = workout
        .stages
        .iter()
        .map(|s| {
            format!(
                "{}-{}-{}-{} x{}",
                s.breath_in_secs, s.hold_secs, s.breath_out_secs, s.regenerate_secs, s.reps
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "[{}] {} ({}s, {} reps) {}",
        workout.id,
        workout.title,
        workout.duration_secs(),
        workout.total_reps(),
        stages
    )
}

pub fn run(action: WorkoutAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = WorkoutDb::open()?;
    match action {
        WorkoutAction::List { json } => {
            let workouts = db.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&workouts)?);
            } else if workouts.is_empty() {
                println!("no workouts (try `gust-cli workout seed`)");
            } else {
                for w in &workouts {
                    println!("{}", describe(w));
                }
            }
        }
        WorkoutAction::Show { id } => match db.get(id)? {
            Some(w) => println!("{}", serde_json::to_string_pretty(&w)?),
            None => println!("workout {id} not found"),
        },
        WorkoutAction::Add {
            title,
            color,
            stages,
        } => {
            let color = u32::from_str_radix(color.trim_start_matches("0x"), 16)
                .map_err(|_| format!("invalid color: \"{color}\""))?;
            let workout = Workout::new(0, title, color, stages)?;
            let stored = db.insert(&workout)?;
            println!("{}", describe(&stored));
        }
        WorkoutAction::Remove { id } => {
            if db.delete(id)? {
                println!("removed workout {id}");
            } else {
                println!("workout {id} not found");
            }
        }
        WorkoutAction::Seed => {
            let n = db.seed_presets()?;
            if n > 0 {
                println!("seeded {n} preset workouts");
            } else {
                println!("store already has workouts; nothing seeded");
            }
        }
    }
    Ok(())
}
