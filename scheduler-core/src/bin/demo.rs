//! Demo CLI (grounded on the teacher's `main.rs` tracing setup, trimmed of
//! the HTTP/database bring-up that's out of scope here): generates a
//! synthetic scenario, solves it, and prints the resulting grid and stats.

use std::str::FromStr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scheduler_core::demo_data::{self, DemoSize};
use scheduler_core::optimize_schedule;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scheduler_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let size = std::env::args()
        .nth(1)
        .and_then(|s| DemoSize::from_str(&s).ok())
        .unwrap_or(DemoSize::Small);

    tracing::info!("generating demo scenario");
    let scenario = demo_data::generate(size);

    let response = optimize_schedule(
        scenario.staff,
        scenario.dates.clone(),
        scenario.constraints,
        5,
    );

    if !response.success {
        tracing::error!(error = ?response.error, status = ?response.status, "optimization failed");
        std::process::exit(1);
    }

    println!("status: {}", response.status.unwrap_or_default());
    println!("optimal: {}", response.is_optimal.unwrap_or(false));
    println!("solve_time: {:.2}s", response.solve_time.unwrap_or(0.0));

    let mut staff_ids: Vec<&String> = response.schedule.keys().collect();
    staff_ids.sort();
    for staff_id in staff_ids {
        let row = &response.schedule[staff_id];
        let mut line = format!("{staff_id:>12} | ");
        for date in &scenario.dates {
            let glyph = row.get(date).map(String::as_str).unwrap_or("?");
            line.push_str(&format!("{glyph:>2}"));
        }
        println!("{line}");
    }

    if let Some(stats) = &response.stats {
        println!(
            "total_off_days={} violations={} penalty={}",
            stats.total_off_days, stats.total_violations, stats.total_violation_penalty
        );
    }
}
