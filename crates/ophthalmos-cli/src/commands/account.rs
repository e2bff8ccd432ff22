use super::AppContext;
use anyhow::{Result, bail};
use colored::Colorize;

pub async fn create(ctx: &AppContext, name: &str) -> Result<()> {
    let Some(account) = ctx.usecase.create_account(name).await else {
        bail!(
            "Could not create an account for '{}'. Is the backend at {} reachable?",
            name.trim(),
            ctx.config.backend.base_url
        );
    };

    println!("{} {}", "Welcome,".bright_green(), account.user_name.bold());
    println!("{}", format!("User ID: {}", account.user_id).bright_black());
    if ctx.offline {
        println!(
            "{}",
            "Offline mode: this account exists only on this machine.".yellow()
        );
    }
    Ok(())
}

pub async fn show(ctx: &AppContext) -> Result<()> {
    match ctx.usecase.restore_account().await {
        Some(account) => {
            println!("{} ({})", account.user_name.bold(), account.user_id);
            if let Some(profile) = ctx.usecase.load_latest_profile().await {
                println!();
                super::print_profile(&profile);
            } else {
                println!("{}", "No cone test on record.".bright_black());
            }
        }
        None => println!("{}", "No account on this machine.".bright_black()),
    }
    if !ctx.offline {
        println!("{}", format!("Backend: {}", ctx.config.backend.base_url).bright_black());
    }
    Ok(())
}

pub async fn forget(ctx: &AppContext) -> Result<()> {
    ctx.usecase.forget_account().await?;
    println!("{}", "Account forgotten.".bright_green());
    Ok(())
}
