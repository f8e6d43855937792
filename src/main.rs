//! role-compass - Guided career exploration
//!
//! Thin command-line caller over `AppContext`: loads configuration, restores
//! the session, performs one action and prints the result as plain text.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use role_compass::application::AppContext;
use role_compass::config::AppConfig;
use role_compass::domain::scoring::ScoredRole;
use role_compass::domain::selection::{CategoryToggle, FlowStep, MIN_TRAITS};
use role_compass::telemetry;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_validated().context("Failed to load configuration")?;
    telemetry::init(&config.logging, cli.verbose).context("Failed to initialize logging")?;

    let mut ctx = AppContext::bootstrap(&config).await;
    run(&mut ctx, cli.command);

    for warning in ctx.warnings() {
        eprintln!("note: {}", warning.message);
    }
    Ok(())
}

fn run(ctx: &mut AppContext, command: Commands) {
    match command {
        Commands::Status => print_status(ctx),
        Commands::Categories => print_categories(ctx),
        Commands::Traits => print_traits(ctx),
        Commands::ToggleCategory { id } => match ctx.toggle_category(&id) {
            CategoryToggle::Added => println!("Selected category {}", id),
            CategoryToggle::Removed => println!("Deselected category {}", id),
            CategoryToggle::Replaced { evicted } => {
                println!("Selected category {} (replaced {})", id, evicted)
            }
        },
        Commands::ToggleTrait { id } => {
            if ctx.toggle_trait(&id) {
                println!("Selected trait {}", id);
            } else {
                println!("Deselected trait {}", id);
            }
            print_trait_progress(ctx);
        }
        Commands::Notes { text } => {
            ctx.set_notes(text);
            println!("Notes saved");
        }
        Commands::Roles { limit } => {
            if let Err(unmet) = ctx.check_step(FlowStep::Roles) {
                eprintln!("note: {}", unmet.message);
            }
            print_roles(&ctx.top_roles(limit));
        }
        Commands::Summary => print_summary(ctx),
        Commands::Reset => {
            ctx.reset();
            println!("Selections cleared");
        }
    }
}

fn print_status(ctx: &AppContext) {
    println!("Data:       {}", ctx.origin());
    if let Some(location) = ctx.roles_location() {
        println!("Roles:      {}", location);
    }
    println!("Step:       {}", ctx.step());
    println!("Categories: {}", join_or_none(&ctx.selected_category_names()));
    print_trait_progress(ctx);
    if !ctx.selection().notes().is_empty() {
        println!("Notes:      {}", ctx.selection().notes());
    }
}

fn print_categories(ctx: &AppContext) {
    for category in ctx.categories() {
        let mark = checkbox(ctx.selection().has_category(&category.id));
        match &category.summary {
            Some(summary) => println!("{} {:<16} {} - {}", mark, category.id, category.name, summary),
            None => println!("{} {:<16} {}", mark, category.id, category.name),
        }
    }
}

fn print_traits(ctx: &AppContext) {
    let traits = ctx.available_traits();
    if traits.is_empty() {
        println!("Select a category first (see `categories`).");
        return;
    }
    for t in traits {
        let mark = checkbox(ctx.selection().has_trait(&t.id));
        match &t.desc {
            Some(desc) => println!("{} {:<24} {} - {}", mark, t.id, t.name, desc),
            None => println!("{} {:<24} {}", mark, t.id, t.name),
        }
    }
    print_trait_progress(ctx);
}

fn print_trait_progress(ctx: &AppContext) {
    println!(
        "Traits:     {} selected ({} needed)",
        ctx.selection().trait_ids().len(),
        MIN_TRAITS
    );
}

fn print_roles(roles: &[ScoredRole<'_>]) {
    if roles.is_empty() {
        println!("No roles available.");
        return;
    }
    for scored in roles {
        let role = scored.role;
        println!(
            "{:>4}  {:<15} {}",
            scored.score.score.to_string(),
            scored.score.label.to_string(),
            role.title
        );
        let details: Vec<&str> = [role.category.as_deref(), non_empty(&role.outlook), non_empty(&role.salary)]
            .into_iter()
            .flatten()
            .collect();
        if !details.is_empty() {
            println!("      {}", details.join(" | "));
        }
        if !role.why.is_empty() {
            println!("      {}", role.why);
        }
    }
}

fn print_summary(ctx: &mut AppContext) {
    println!("Categories: {}", join_or_none(&ctx.selected_category_names()));
    println!("Traits:     {}", join_or_none(&ctx.selected_trait_names()));
    if !ctx.selection().notes().is_empty() {
        println!("Notes:      {}", ctx.selection().notes());
    }
    println!();
    print_roles(&ctx.summary_roles());
}

fn checkbox(selected: bool) -> &'static str {
    if selected {
        "[x]"
    } else {
        "[ ]"
    }
}

fn join_or_none(items: &[&str]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
