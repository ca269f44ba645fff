// 🖥️ Interactive session - name prompt, then a parent or child menu
//
// Every number shown here comes from the same library operations the web
// server uses; this module only prompts and prints.

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use chore_tracker::{
    aggregate_all_children, completions_for_child, format_money, reconcile, reconcile_summary,
    week_cutoff, Chore, ChoreStore, Role, Timing, REPORT_WINDOW_DAYS,
};

/// Login loop: each round asks for a name and opens the menu for the
/// inferred role. Returns when someone picks Exit or types 'exit'.
pub fn run(mut store: ChoreStore) -> Result<()> {
    println!("🧼 Welcome to the Chore Tracker\n");
    let theme = ColorfulTheme::default();

    loop {
        let name: String = Input::with_theme(&theme)
            .with_prompt("What is your name? (type 'exit' to quit)")
            .allow_empty(true)
            .interact_text()?;
        let name = name.trim().to_string();

        if name.is_empty() || name.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            return Ok(());
        }

        let role = store.ensure_user(&name).role;
        println!(
            "\nHello, {}! You are logged in as a {}.\n",
            name,
            role.as_str().to_uppercase().bold()
        );

        let switch_user = match role {
            Role::Parent => parent_menu(&mut store, &name, &theme)?,
            Role::Child => child_menu(&mut store, &name, &theme)?,
        };
        if !switch_user {
            println!("Goodbye!");
            return Ok(());
        }
    }
}

// ============================================================================
// PARENT MENU
// ============================================================================

/// Returns true to go back to the name prompt, false to quit entirely.
fn parent_menu(store: &mut ChoreStore, parent_name: &str, theme: &ColorfulTheme) -> Result<bool> {
    loop {
        println!("👩‍👧 Parent menu ({})", parent_name);
        let choice = Select::with_theme(theme)
            .with_prompt("Choose an option")
            .items(&[
                "Set up a new chore",
                "View chore report",
                "Reconcile allowance",
                "Switch user",
                "Exit",
            ])
            .default(0)
            .interact()?;

        match choice {
            0 => create_chore_flow(store, theme)?,
            1 => print_report(store),
            2 => reconcile_flow(store, theme)?,
            3 => return Ok(true),
            _ => return Ok(false),
        }
    }
}

fn create_chore_flow(store: &mut ChoreStore, theme: &ColorfulTheme) -> Result<()> {
    println!("\n🧹 Create a new chore");

    let name: String = Input::with_theme(theme)
        .with_prompt("Chore name")
        .interact_text()?;

    let timing_labels: Vec<&str> = Timing::ALL.iter().map(|t| t.label()).collect();
    let timing_idx = Select::with_theme(theme)
        .with_prompt("Timing")
        .items(&timing_labels)
        .default(0)
        .interact()?;
    let timing = Timing::ALL[timing_idx];

    let price: f64 = Input::with_theme(theme)
        .with_prompt("Price for performing this chore (e.g. 1.50)")
        .validate_with(|p: &f64| {
            if p.is_finite() && *p >= 0.0 {
                Ok(())
            } else {
                Err("please enter a price of 0 or more")
            }
        })
        .interact_text()?;

    let emoji: String = Input::with_theme(theme)
        .with_prompt("Emoji for this chore (e.g. 🧼)")
        .allow_empty(true)
        .interact_text()?;

    let required = Confirm::with_theme(theme)
        .with_prompt("Is this chore required to qualify for allowance?")
        .default(false)
        .interact()?;

    match store.create_chore(&name, timing.as_str(), price, &emoji, required) {
        Ok(chore) => {
            println!("\n{}", "✅ New chore created:".green());
            println!("  {}\n", describe_chore(&chore));
        }
        Err(err) => println!("\n{} {}\n", "✗".red(), err),
    }
    Ok(())
}

fn print_report(store: &ChoreStore) {
    println!("\n📊 Chore report for the last {} days\n", REPORT_WINDOW_DAYS);

    let reports = aggregate_all_children(store, week_cutoff(Utc::now()));
    if reports.is_empty() {
        println!("No children have logged in yet.\n");
        return;
    }

    for report in reports {
        println!("Child: {}", report.child_name);
        for item in &report.items {
            println!(
                "  - {} {} ({}) x {} = {}",
                item.emoji,
                item.name,
                item.timing,
                item.count,
                format_money(item.value)
            );
        }
        if report.total == 0.0 {
            println!("  (no chores completed in the last week)");
        } else {
            println!("  ▶ Total value: {}", format_money(report.total).green());
        }
        println!();
    }
}

fn reconcile_flow(store: &mut ChoreStore, theme: &ColorfulTheme) -> Result<()> {
    println!("\n💸 Reconcile allowance");

    let summary = reconcile_summary(store, week_cutoff(Utc::now()));
    if summary.is_empty() {
        println!("No children to reconcile.\n");
        return Ok(());
    }

    println!("Children summary (last {} days):", REPORT_WINDOW_DAYS);
    let mut options: Vec<String> = summary
        .iter()
        .map(|s| {
            format!(
                "{} - earned: {}, current balance: {}",
                s.child_name,
                format_money(s.earned),
                format_money(s.current_balance)
            )
        })
        .collect();
    options.push("Back".to_string());

    let choice = Select::with_theme(theme)
        .with_prompt("Select a child to transfer allowance to")
        .items(&options)
        .default(0)
        .interact()?;
    if choice == summary.len() {
        return Ok(());
    }
    let target = &summary[choice];

    if target.earned == 0.0 {
        println!(
            "{} has no earned chores in the last week. You can still manually add money if you want.",
            target.child_name
        );
    }

    // blank input falls back to the earned value computed above
    let amount: f64 = Input::with_theme(theme)
        .with_prompt(format!("Amount to transfer to {}", target.child_name))
        .default(target.earned)
        .interact_text()?;

    match reconcile(store, &target.child_name, amount) {
        Ok(receipt) => println!(
            "{} Transferred {} to {}. New balance: {}\n",
            "✅".green(),
            format_money(receipt.amount),
            receipt.child_name,
            format_money(receipt.new_balance)
        ),
        Err(_) => println!("No valid transfer made.\n"),
    }
    Ok(())
}

// ============================================================================
// CHILD MENU
// ============================================================================

/// Returns true to go back to the name prompt, false to quit entirely.
fn child_menu(store: &mut ChoreStore, child_name: &str, theme: &ColorfulTheme) -> Result<bool> {
    loop {
        let balance = store.find_user(child_name).map(|u| u.balance).unwrap_or(0.0);
        println!("🧒 Child menu ({})", child_name);
        println!("  Your balance: {}", format_money(balance).green());

        let choice = Select::with_theme(theme)
            .with_prompt("Choose an option")
            .items(&[
                "View my completed chores",
                "Complete a chore",
                "Switch user",
                "Exit",
            ])
            .default(0)
            .interact()?;

        match choice {
            0 => print_my_completions(store, child_name),
            1 => complete_chore_flow(store, child_name, theme)?,
            2 => return Ok(true),
            _ => return Ok(false),
        }
    }
}

fn print_my_completions(store: &ChoreStore, child_name: &str) {
    println!(
        "\n📋 Chores completed by {} in the last {} days:\n",
        child_name, REPORT_WINDOW_DAYS
    );

    match completions_for_child(store, child_name, week_cutoff(Utc::now())) {
        Ok(view) => {
            if view.items.is_empty() {
                println!("You haven't completed any chores in the last week yet.\n");
                return;
            }
            for item in &view.items {
                println!(
                    "  - {} {} ({}) x {} = {}",
                    item.emoji,
                    item.name,
                    item.timing,
                    item.count,
                    format_money(item.value)
                );
            }
            println!(
                "\n▶ Total potential value this week: {}",
                format_money(view.total).green()
            );
            println!("Note: the parent still needs to reconcile to move this into your balance.\n");
        }
        Err(err) => println!("{} {}\n", "✗".red(), err),
    }
}

fn complete_chore_flow(store: &mut ChoreStore, child_name: &str, theme: &ColorfulTheme) -> Result<()> {
    println!("\n✅ Complete a chore");

    let chores: Vec<Chore> = store.chores().to_vec();
    if chores.is_empty() {
        println!("There are no chores available yet. Ask a parent to add some.\n");
        return Ok(());
    }

    let mut options: Vec<String> = chores.iter().map(describe_chore).collect();
    options.push("Cancel".to_string());

    let choice = Select::with_theme(theme)
        .with_prompt("Which chore did you complete?")
        .items(&options)
        .default(0)
        .interact()?;
    if choice == chores.len() {
        return Ok(());
    }
    let chore = &chores[choice];

    match store.record_completion(child_name, chore.id, Utc::now()) {
        Ok(_) => println!(
            "🎉 Nice work, {}! Recorded completion of: {} {}\n",
            child_name, chore.emoji, chore.name
        ),
        Err(err) => println!("{} {}\n", "✗".red(), err),
    }
    Ok(())
}

// ============================================================================
// FORMATTING
// ============================================================================

/// One-line chore description: `🍽 Dishes [daily] - $1.50 (required)`
fn describe_chore(chore: &Chore) -> String {
    format!(
        "{} {} [{}] - {}{}",
        chore.emoji,
        chore.name,
        chore.timing,
        format_money(chore.price),
        if chore.required { " (required)" } else { "" }
    )
}
