// ABOUTME: Pierre reminders CLI - manage workout reminders from the command line
// ABOUTME: Wires the sqlite store, in-memory dispatcher, and lifecycle manager behind clap subcommands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Remind me about leg day every Monday and Thursday at 18:00
//! pierre-reminders add "Leg Day" --time 18:00 --days mon,thu
//!
//! # One-off reminder tomorrow morning
//! pierre-reminders add "Long Run" --time 07:30 --once --date 2025-06-01
//!
//! # List reminders as JSON
//! pierre-reminders --format json list
//!
//! # Remind 15 minutes early
//! pierre-reminders settings set --minutes-before 15
//!
//! # Mute everything without losing reminders
//! pierre-reminders mute
//!
//! # Pick the second workout of the configured plan
//! REMINDER_WORKOUT_TYPES="Squat Day,Bench Day" pierre-reminders add --pick 2 --time 18:00 --days tue
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use pierre_reminders::{
    config::ReminderConfig,
    errors::AppResult,
    formatters::OutputFormat,
    lifecycle::ReminderManager,
    logging::LoggingConfig,
    notifications::{InMemoryDispatcher, NotificationDispatcher},
    plans::{StaticWorkoutPlanSource, WorkoutPlanSource},
    reconciler::FiredEventReconciler,
    storage::SqliteReminderStore,
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "pierre-reminders",
    about = "Pierre Workout Reminders",
    long_about = "Create, edit, and schedule local workout reminder notifications."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Output format: text or json
    #[arg(long, global = true, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// List all reminders
    List,

    /// Create a reminder
    Add {
        /// Workout name shown in the notification
        #[arg(required_unless_present = "pick")]
        workout_name: Option<String>,

        /// Use the Nth workout from `workouts` instead of a name
        #[arg(long, conflicts_with = "workout_name")]
        pick: Option<usize>,

        /// Time of day, HH:MM
        #[arg(long)]
        time: String,

        /// Comma-separated days for a recurring reminder (e.g. "mon,wed,fri")
        #[arg(long, conflicts_with = "once")]
        days: Option<String>,

        /// Fire once instead of weekly
        #[arg(long)]
        once: bool,

        /// Date for a one-time reminder, YYYY-MM-DD (defaults to today)
        #[arg(long, requires = "once")]
        date: Option<String>,
    },

    /// Edit a reminder
    Update {
        /// Reminder ID
        id: String,

        /// New workout name
        #[arg(long)]
        name: Option<String>,

        /// New time of day, HH:MM
        #[arg(long)]
        time: Option<String>,

        /// New comma-separated days; makes the reminder recurring
        #[arg(long, conflicts_with = "once")]
        days: Option<String>,

        /// Make the reminder one-time
        #[arg(long)]
        once: bool,

        /// New date for a one-time reminder, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },

    /// Switch a reminder on or off
    Toggle {
        /// Reminder ID
        id: String,
    },

    /// Delete a reminder
    Delete {
        /// Reminder ID
        id: String,
    },

    /// Re-create triggers for every active reminder
    Reschedule,

    /// Cancel every scheduled notification, keeping reminders
    Mute,

    /// Reminder settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },

    /// List workouts offered by the active plan
    Workouts,

    /// Show the triggers a reminder would schedule
    Preview {
        /// Reminder ID
        id: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum SettingsCommand {
    /// Show current settings
    Show,

    /// Change settings; omitted flags keep their value
    Set {
        /// Master switch
        #[arg(long)]
        enabled: Option<bool>,

        /// Play a sound
        #[arg(long)]
        sound: Option<bool>,

        /// Vibrate
        #[arg(long)]
        vibration: Option<bool>,

        /// Minutes before the workout to notify
        #[arg(long)]
        minutes_before: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    if let Err(e) = logging.init() {
        eprintln!("Logging initialization failed: {e}");
    }

    let mut config = ReminderConfig::from_env()?;
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }
    let format = OutputFormat::from_str_param(&cli.format);
    let plans = StaticWorkoutPlanSource::from_config(&config);

    helpers::storage::ensure_database_dir(&config.database_url)?;
    info!("Connecting to reminder store: {}", config.database_url);
    let store = Arc::new(SqliteReminderStore::connect(&config.database_url).await?);
    let dispatcher = Arc::new(InMemoryDispatcher::new(config.event_buffer));
    let manager = Arc::new(ReminderManager::new(store, dispatcher.clone(), &config.scheduler));

    let reconciler =
        FiredEventReconciler::new(manager.clone()).spawn(dispatcher.subscribe());

    // Platform triggers do not survive the process; restore them before acting
    match manager.reschedule_all().await {
        Ok(summary) => info!(scheduled = summary.scheduled, "Triggers restored"),
        Err(e) => warn!("Could not restore triggers: {}", e.user_message()),
    }

    let result = run(&manager, &plans, cli.command, format).await;
    if let Err(e) = &result {
        eprintln!("{}", e.user_message());
    }
    reconciler.shutdown().await;
    result
}

async fn run(
    manager: &ReminderManager,
    plans: &dyn WorkoutPlanSource,
    command: Command,
    format: OutputFormat,
) -> AppResult<()> {
    match command {
        Command::List => commands::reminder::list(manager, format).await,
        Command::Add {
            workout_name,
            pick,
            time,
            days,
            once,
            date,
        } => {
            let workout_name = commands::plan::resolve_workout(plans, workout_name, pick).await?;
            commands::reminder::add(manager, workout_name, &time, days, once, date, format).await
        }
        Command::Update {
            id,
            name,
            time,
            days,
            once,
            date,
        } => {
            let update = helpers::input::build_update(name, time, days, once, date)?;
            commands::reminder::update(manager, &id, update, format).await
        }
        Command::Toggle { id } => commands::reminder::toggle(manager, &id, format).await,
        Command::Delete { id } => commands::reminder::delete(manager, &id).await,
        Command::Reschedule => commands::reminder::reschedule(manager, format).await,
        Command::Mute => commands::reminder::mute(manager).await,
        Command::Workouts => commands::plan::list(plans, format).await,
        Command::Preview { id } => commands::reminder::preview(manager, &id, format).await,
        Command::Settings { action } => match action {
            SettingsCommand::Show => commands::settings::show(manager, format).await,
            SettingsCommand::Set {
                enabled,
                sound,
                vibration,
                minutes_before,
            } => {
                commands::settings::set(
                    manager,
                    commands::settings::SettingsChange {
                        enabled,
                        sound,
                        vibration,
                        minutes_before,
                    },
                    format,
                )
                .await
            }
        },
    }
}
