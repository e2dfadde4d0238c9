//! Command-line interface definitions and handlers.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::AppController;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{location, Center, CenterDraft, EmergencyContact, PersonField};
use crate::sync::{PullOutcome, SyncOutcome};

/// Voting center directory with a shared, last-write-wins synced document
#[derive(Parser, Debug)]
#[command(name = "center-directory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the remote blob server
    Serve,
    /// Keep the local copy in sync until interrupted
    Watch,
    /// Fetch the remote document now
    Pull,
    /// List centers, optionally filtered
    List {
        /// Match center names, numbers, and staff
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Write a dated JSON backup of the document
    Export {
        /// Directory for the backup file
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Replace the document with a JSON backup and push it
    Import {
        file: PathBuf,
        #[command(flatten)]
        admin: AdminArgs,
    },
    /// Manage centers
    #[command(subcommand)]
    Center(CenterCommand),
    /// Set the emergency contact
    Emergency {
        #[arg(long)]
        name: String,
        #[arg(long)]
        mobile: String,
        #[command(flatten)]
        admin: AdminArgs,
    },
    /// Change a password
    #[command(subcommand)]
    Password(PasswordCommand),
    /// Log in as a user (or as admin with --admin)
    Login {
        #[arg(long, env = "CENTERS_PASSWORD")]
        password: String,
        #[arg(long)]
        admin: bool,
    },
    /// Clear the saved login
    Logout,
}

#[derive(Subcommand, Debug)]
pub enum CenterCommand {
    /// Show one center
    Show { id: String },
    /// Add a center
    Add {
        #[command(flatten)]
        fields: CenterFields,
        #[command(flatten)]
        admin: AdminArgs,
    },
    /// Edit a center; omitted fields keep their values
    Edit {
        id: String,
        #[command(flatten)]
        fields: CenterFields,
        #[command(flatten)]
        admin: AdminArgs,
    },
    /// Remove a center
    Remove {
        id: String,
        #[command(flatten)]
        admin: AdminArgs,
    },
    /// Move a center to a 1-based position
    Move {
        id: String,
        position: usize,
        #[command(flatten)]
        admin: AdminArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum PasswordCommand {
    /// Change the user password
    User {
        new_password: String,
        #[command(flatten)]
        admin: AdminArgs,
    },
    /// Change the admin password
    Admin {
        new_password: String,
        #[command(flatten)]
        admin: AdminArgs,
    },
}

#[derive(Args, Debug)]
pub struct AdminArgs {
    /// Admin password for this command only; without it the saved admin login is used
    #[arg(long, env = "CENTERS_ADMIN_PASSWORD")]
    pub admin_password: Option<String>,
}

#[derive(Args, Debug)]
pub struct CenterFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub booths: Option<String>,
    #[arg(long)]
    pub voters: Option<String>,
    #[arg(long)]
    pub room: Option<String>,
    /// Map link; overridden by --lat/--lng
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,
    /// Staff member as "name|designation|mobile"; repeatable, replaces the list
    #[arg(long = "person")]
    pub persons: Vec<String>,
    /// Id of a staff member to drop; repeatable
    #[arg(long = "remove-person")]
    pub remove_persons: Vec<String>,
}

/// Run a client command against the local store and remote document.
pub async fn run(command: Commands, config: &Config) -> Result<(), AppError> {
    let controller = AppController::open(config).await?;
    dispatch(&controller, command, config).await
}

/// Whether `command` starts with the silent startup pull. `pull` and `watch` make
/// their own first pull.
fn needs_startup_pull(command: &Commands) -> bool {
    !matches!(command, Commands::Serve | Commands::Watch | Commands::Pull)
}

/// Run a client command with an already opened controller.
pub async fn dispatch(
    controller: &AppController,
    command: Commands,
    config: &Config,
) -> Result<(), AppError> {
    if needs_startup_pull(&command) {
        if let Err(e) = controller.start().await {
            if !e.is_transient() {
                return Err(e);
            }
            tracing::warn!("Working from the local copy: {}", e);
        }
    }

    match command {
        Commands::Serve => Ok(()),
        Commands::Watch => watch(controller, config).await,
        Commands::Pull => {
            pull(controller).await?;
            Ok(())
        }
        Commands::List { query } => {
            controller.go_home().await;
            let centers = controller.search(query.as_deref().unwrap_or("")).await;
            for center in &centers {
                print_center_line(center);
            }
            let stats = controller.stats().await;
            println!(
                "{} centers, {} staff",
                config.digits.render(&stats.total_centers.to_string()),
                config.digits.render(&stats.total_personnel.to_string())
            );
            Ok(())
        }
        Commands::Export { dir } => {
            let path = controller.export_to(&dir).await?;
            println!("Backup written to {}", path.display());
            Ok(())
        }
        Commands::Import { file, admin } => {
            authorize(&controller, &admin).await?;
            report(controller.import_from(&file).await?);
            Ok(())
        }
        Commands::Center(cmd) => run_center(&controller, cmd).await,
        Commands::Emergency {
            name,
            mobile,
            admin,
        } => {
            authorize(&controller, &admin).await?;
            report(
                controller
                    .save_emergency_contact(EmergencyContact { name, mobile })
                    .await?,
            );
            Ok(())
        }
        Commands::Password(PasswordCommand::User {
            new_password,
            admin,
        }) => {
            authorize(&controller, &admin).await?;
            controller.open_settings().await?;
            report(controller.change_user_password(&new_password).await?);
            Ok(())
        }
        Commands::Password(PasswordCommand::Admin {
            new_password,
            admin,
        }) => {
            authorize(&controller, &admin).await?;
            controller.open_settings().await?;
            report(controller.change_admin_password(&new_password).await?);
            Ok(())
        }
        Commands::Login { password, admin } => {
            if admin {
                controller.login_admin(&password).await?;
            } else {
                controller.login_user(&password).await?;
            }
            println!("Logged in");
            Ok(())
        }
        Commands::Logout => {
            controller.logout().await?;
            println!("Logged out");
            Ok(())
        }
    }
}

/// Manual pull; in a fresh process this is also the first pull.
pub async fn pull(controller: &AppController) -> Result<PullOutcome, AppError> {
    let outcome = controller.refresh().await?;
    match outcome {
        PullOutcome::Applied { last_updated } => {
            println!("Adopted remote document (lastUpdated {})", last_updated)
        }
        PullOutcome::UpToDate => println!("Already up to date"),
    }
    Ok(outcome)
}

async fn run_center(controller: &AppController, cmd: CenterCommand) -> Result<(), AppError> {
    match cmd {
        CenterCommand::Show { id } => {
            let center = controller.select_center(&id).await?;
            print_center_details(&center);
            Ok(())
        }
        CenterCommand::Add { fields, admin } => {
            authorize(controller, &admin).await?;
            let mut draft = controller.begin_edit(None).await?;
            apply_fields(&mut draft, fields)?;
            report(controller.save_center(draft).await?);
            Ok(())
        }
        CenterCommand::Edit { id, fields, admin } => {
            authorize(controller, &admin).await?;
            let mut draft = controller.begin_edit(Some(&id)).await?;
            apply_fields(&mut draft, fields)?;
            report(controller.save_center(draft).await?);
            Ok(())
        }
        CenterCommand::Remove { id, admin } => {
            authorize(controller, &admin).await?;
            report(controller.delete_center(&id).await?);
            Ok(())
        }
        CenterCommand::Move {
            id,
            position,
            admin,
        } => {
            authorize(controller, &admin).await?;
            if position == 0 {
                return Err(AppError::Validation("Positions start at 1".to_string()));
            }
            report(controller.move_center(&id, position - 1).await?);
            Ok(())
        }
    }
}

async fn watch(controller: &AppController, config: &Config) -> Result<(), AppError> {
    tracing::info!(
        digits = config.digits.as_str(),
        "Watching {} every {:?}",
        controller.engine().remote().url(),
        config.poll_interval
    );
    let poller = controller.spawn_background_sync(config.poll_interval);

    tokio::signal::ctrl_c().await?;
    poller.abort();

    let state = controller.snapshot().await;
    tracing::info!(
        last_updated = state.document.last_updated,
        centers = state.document.centers.len(),
        "Stopped watching"
    );
    Ok(())
}

async fn authorize(controller: &AppController, admin: &AdminArgs) -> Result<(), AppError> {
    match &admin.admin_password {
        Some(password) => controller.authorize_admin(password).await,
        None => Ok(()),
    }
}

fn apply_fields(draft: &mut CenterDraft, fields: CenterFields) -> Result<(), AppError> {
    if let Some(name) = fields.name {
        draft.name = name;
    }
    if let Some(booths) = fields.booths {
        draft.booth_count = booths;
    }
    if let Some(voters) = fields.voters {
        draft.voter_count = voters;
    }
    if let Some(room) = fields.room {
        draft.room_location = room;
    }
    if let Some(link) = fields.location {
        draft.location_link = link;
    }
    if let (Some(lat), Some(lng)) = (fields.lat, fields.lng) {
        draft.location_link = location::map_link(lat, lng);
    }
    for id in &fields.remove_persons {
        if !draft.remove_person(id) {
            return Err(AppError::NotFound(format!("Person {} not found", id)));
        }
    }
    if !fields.persons.is_empty() {
        draft.important_persons.clear();
        for entry in &fields.persons {
            let parts: Vec<&str> = entry.split('|').map(str::trim).collect();
            let [name, designation, mobile] = parts.as_slice() else {
                return Err(AppError::Validation(format!(
                    "Expected \"name|designation|mobile\", got \"{}\"",
                    entry
                )));
            };
            let id = draft.add_person();
            draft.update_person(&id, PersonField::Name, *name);
            draft.update_person(&id, PersonField::Designation, *designation);
            draft.update_person(&id, PersonField::Mobile, *mobile);
        }
    }
    Ok(())
}

fn report(outcome: SyncOutcome) {
    match outcome {
        SyncOutcome::Synced => println!("Saved and synced"),
        SyncOutcome::LocalOnly(e) => println!("Saved on this device only ({})", e),
    }
}

fn print_center_line(center: &Center) {
    println!(
        "{}  {}  [{}]  staff: {}",
        center.center_number,
        center.name,
        center.id,
        center.important_persons.len()
    );
}

fn print_center_details(center: &Center) {
    println!("{} {}", center.center_number, center.name);
    println!("  id:        {}", center.id);
    println!("  booths:    {}", center.booth_count);
    println!("  voters:    {}", center.voter_count);
    println!("  room:      {}", center.room_location);
    println!("  location:  {}", center.location_link);
    if let Some((lat, lng)) = location::coordinates(&center.location_link) {
        println!("  coords:    {}, {}", lat, lng);
    }
    if let Some(embed) = location::embed_url(&center.location_link) {
        println!("  embed:     {}", embed);
    }
    for person in &center.important_persons {
        println!(
            "  - {} ({}) {}  [{}]",
            person.name, person.designation, person.mobile, person.id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_fields(args: &[&str]) -> CenterFields {
        let mut argv = vec!["center-directory", "center", "add"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Center(CenterCommand::Add { fields, .. }) => fields,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_fields_fill_draft() {
        let fields = parse_fields(&[
            "--name",
            "Model School",
            "--booths",
            "6",
            "--lat",
            "23.8",
            "--lng",
            "90.4",
            "--person",
            "Rahim | Presiding Officer | 01711111111",
        ]);

        let mut draft = CenterDraft::new();
        apply_fields(&mut draft, fields).unwrap();

        assert_eq!(draft.name, "Model School");
        assert_eq!(draft.booth_count, "6");
        assert_eq!(draft.location_link, "https://www.google.com/maps?q=23.8,90.4");
        assert_eq!(draft.important_persons.len(), 1);
        assert_eq!(draft.important_persons[0].designation, "Presiding Officer");
        assert_eq!(draft.important_persons[0].mobile, "01711111111");
    }

    #[test]
    fn test_bad_person_is_rejected() {
        let fields = parse_fields(&["--person", "only a name"]);
        let mut draft = CenterDraft::new();
        assert!(matches!(
            apply_fields(&mut draft, fields),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_person_removal_is_rejected() {
        let fields = parse_fields(&["--remove-person", "nobody"]);
        let mut draft = CenterDraft::new();
        assert!(matches!(
            apply_fields(&mut draft, fields),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_pull_and_watch_skip_startup_pull() {
        assert!(!needs_startup_pull(&Commands::Pull));
        assert!(!needs_startup_pull(&Commands::Watch));
        assert!(needs_startup_pull(&Commands::List { query: None }));
        assert!(needs_startup_pull(&Commands::Logout));
    }

    #[test]
    fn test_lat_requires_lng() {
        let result = Cli::try_parse_from(["center-directory", "center", "add", "--lat", "1.0"]);
        assert!(result.is_err());
    }
}
