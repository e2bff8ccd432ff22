use super::{AppContext, swatch};
use anyhow::Result;
use colored::Colorize;
use ophthalmos_core::color::Color;
use ophthalmos_core::cone::SensitivityProfile;

/// Loads the profile and turns adapted mode on; returns whether it worked.
async fn prepare(ctx: &AppContext, profile: Option<SensitivityProfile>) -> bool {
    if ctx.resolve_profile(profile).await.is_none() {
        println!(
            "{}",
            "No profile available; take `ophthalmos cone-test` or pass --profile L,M,S.".yellow()
        );
        return false;
    }
    if !ctx.usecase.enable_adaptation().await {
        println!("{}", "Adaptation factors unavailable; showing original colors.".yellow());
        return false;
    }
    true
}

pub async fn adapt(ctx: &AppContext, colors: &[Color], profile: Option<SensitivityProfile>) -> Result<()> {
    prepare(ctx, profile).await;

    for color in colors {
        let adapted = ctx.usecase.adapt_color(*color).await;
        println!("{} {}  ->  {} {}", swatch(*color), color, swatch(adapted), adapted);
    }
    print_recommendations(ctx).await;
    Ok(())
}

pub async fn simulate(ctx: &AppContext, profile: Option<SensitivityProfile>) -> Result<()> {
    let adapted = prepare(ctx, profile).await;

    println!("{}", "=== Color Simulator ===".bright_magenta().bold());
    println!("{:<16} {:<15} {}", "", "Original", if adapted { "Adapted" } else { "Adapted (off)" });
    for (sample, shown) in ctx.usecase.preview_palette().await {
        println!(
            "{:<16} {} {}  {} {}",
            sample.name,
            swatch(sample.color),
            sample.color,
            swatch(shown),
            shown
        );
    }
    print_recommendations(ctx).await;
    Ok(())
}

async fn print_recommendations(ctx: &AppContext) {
    let simulator = ctx.usecase.simulator().await;
    let recommendations = simulator.recommendations();
    if recommendations.is_empty() {
        return;
    }
    println!();
    println!("{}", "Recommendations".bold());
    for line in recommendations {
        println!("  - {}", line);
    }
}
